//! Executor definitions.

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactTypeDescriptor;

/// The container or importer backing a single-executor component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutorDef {
    /// Container to run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerSpec>,
    /// Artifact importer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importer: Option<ImporterSpec>,
}

impl ExecutorDef {
    /// Creates a container executor.
    pub fn container(image: impl Into<String>) -> Self {
        Self {
            container: Some(ContainerSpec {
                image: image.into(),
                command: Vec::new(),
                args: Vec::new(),
            }),
            importer: None,
        }
    }

    /// Returns the container image, if this executor runs a container.
    pub fn image(&self) -> Option<&str> {
        self.container
            .as_ref()
            .map(|container| container.image.as_str())
            .filter(|image| !image.is_empty())
    }
}

/// A container executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Entrypoint override.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    /// Arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

/// An importer executor, which registers an existing artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterSpec {
    /// Schema of the imported artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_schema: Option<ArtifactTypeDescriptor>,
    /// Whether the artifact is imported again on every run.
    #[serde(default)]
    pub reimport: bool,
}
