//! Pipeline spec and spec documents.

use std::collections::BTreeMap;

use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::component::{ComponentDef, Dag, IoDefinition};
use super::executor::ExecutorDef;
use super::platform::PlatformSpec;
use crate::error::{Error, Result};

/// A compiled pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSpec {
    /// Pipeline name and description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_info: Option<PipelineInfo>,
    /// Components keyed by component id.
    #[serde(default)]
    pub components: BTreeMap<String, ComponentDef>,
    /// Executors backing single components.
    #[serde(default)]
    pub deployment_spec: DeploymentSpec,
    /// The top-level DAG.
    #[serde(default)]
    pub root: RootComponent,
    /// Version of the IR schema, e.g. `2.1.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Version of the SDK that compiled the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
}

impl PipelineSpec {
    /// Decodes a bare pipeline spec from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::decode("pipeline spec", e))
    }

    /// Returns a component by id.
    pub fn component(&self, id: &str) -> Option<&ComponentDef> {
        self.components.get(id)
    }

    /// Returns an executor by label.
    pub fn executor(&self, label: &str) -> Option<&ExecutorDef> {
        self.deployment_spec.executors.get(label)
    }

    /// Parses the IR schema version, if one is declared.
    pub fn schema_version(&self) -> Result<Option<Version>> {
        self.schema_version
            .as_deref()
            .map(|version| {
                Version::parse(version).map_err(|source| Error::SchemaVersion {
                    version: version.to_owned(),
                    source,
                })
            })
            .transpose()
    }
}

/// Pipeline name and description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineInfo {
    /// Pipeline name.
    #[serde(default)]
    pub name: String,
    /// Human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Executors keyed by executor label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    /// Executors keyed by label.
    #[serde(default)]
    pub executors: BTreeMap<String, ExecutorDef>,
}

/// The top-level component of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootComponent {
    /// The root DAG.
    #[serde(default)]
    pub dag: Dag,
    /// Pipeline-level inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_definitions: Option<IoDefinition>,
}

/// A pipeline spec as returned by the run API.
///
/// The API returns the spec either bare, or wrapped together with its platform
/// spec as `{"pipeline_spec": .., "platform_spec": ..}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecDocument {
    /// The pipeline spec.
    pub spec: PipelineSpec,
    /// The platform spec, when the document carried one.
    pub platform: Option<PlatformSpec>,
}

impl SpecDocument {
    /// Decodes a spec document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::decode("spec document", e))?;
        Self::from_value(value)
    }

    /// Decodes a spec document from a JSON value.
    pub fn from_value(mut value: Value) -> Result<Self> {
        let Some(spec) = take_field(&mut value, "pipeline_spec") else {
            let spec =
                serde_json::from_value(value).map_err(|e| Error::decode("pipeline spec", e))?;
            return Ok(Self {
                spec,
                platform: None,
            });
        };

        let platform = take_field(&mut value, "platform_spec")
            .filter(|platform| !platform.is_null())
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| Error::decode("platform spec", e))?;
        let spec = serde_json::from_value(spec).map_err(|e| Error::decode("pipeline spec", e))?;

        tracing::trace!(
            target: crate::TRACING_TARGET,
            has_platform_spec = platform.is_some(),
            "decoded wrapped spec document"
        );

        Ok(Self { spec, platform })
    }
}

/// Removes a field from a JSON object, if the value is an object.
fn take_field(value: &mut Value, key: &str) -> Option<Value> {
    value.as_object_mut().and_then(|object| object.remove(key))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_spec() -> Value {
        json!({
            "pipelineInfo": { "name": "training" },
            "schemaVersion": "2.1.0",
            "sdkVersion": "kfp-2.7.0",
            "components": {
                "comp-train": { "executorLabel": "exec-train" }
            },
            "deploymentSpec": {
                "executors": {
                    "exec-train": { "container": { "image": "python:3.11", "command": ["python"] } }
                }
            },
            "root": {
                "dag": {
                    "tasks": {
                        "train": { "taskInfo": { "name": "train" }, "componentRef": { "name": "comp-train" } }
                    }
                }
            }
        })
    }

    #[test]
    fn test_bare_document() {
        let document = SpecDocument::from_value(sample_spec()).unwrap();
        assert!(document.platform.is_none());
        assert_eq!(document.spec.pipeline_info.as_ref().unwrap().name, "training");
        assert!(document.spec.root.dag.tasks.contains_key("train"));
        assert_eq!(
            document.spec.executor("exec-train").and_then(ExecutorDef::image),
            Some("python:3.11")
        );
    }

    #[test]
    fn test_wrapped_document() {
        let value = json!({
            "pipeline_spec": sample_spec(),
            "platform_spec": { "platforms": { "kubernetes": { "deploymentSpec": { "executors": {} } } } }
        });
        let document = SpecDocument::from_value(value).unwrap();
        assert!(document.platform.unwrap().platforms.kubernetes.is_some());
        assert!(document.spec.component("comp-train").is_some());
    }

    #[test]
    fn test_wrapped_document_with_null_platform() {
        let value = json!({ "pipeline_spec": sample_spec(), "platform_spec": null });
        let document = SpecDocument::from_value(value).unwrap();
        assert!(document.platform.is_none());
    }

    #[test]
    fn test_decode_error_names_document() {
        let error = SpecDocument::from_json(r#"{"root": {"dag": {"tasks": []}}}"#).unwrap_err();
        assert!(error.to_string().starts_with("failed to decode pipeline spec"));
        assert!(SpecDocument::from_json("not json").is_err());
    }

    #[test]
    fn test_schema_version() {
        let spec: PipelineSpec = serde_json::from_value(sample_spec()).unwrap();
        assert_eq!(spec.schema_version().unwrap(), Some(Version::new(2, 1, 0)));

        let spec = PipelineSpec {
            schema_version: Some("two".into()),
            ..PipelineSpec::default()
        };
        assert!(matches!(spec.schema_version(), Err(Error::SchemaVersion { .. })));
        assert_eq!(PipelineSpec::default().schema_version().unwrap(), None);
    }
}
