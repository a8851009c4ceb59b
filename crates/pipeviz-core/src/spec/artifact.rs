//! Artifact type descriptors.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Schema of an artifact, e.g. `system.Model` at version `0.0.1`.
///
/// Displays as `"<schemaTitle> (<schemaVersion>)"`, the form shown to operators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{schema_title} ({schema_version})")]
#[serde(rename_all = "camelCase")]
pub struct ArtifactTypeDescriptor {
    /// Schema title, such as `system.Dataset`.
    #[serde(default)]
    pub schema_title: String,
    /// Schema version.
    #[serde(default)]
    pub schema_version: String,
}

impl ArtifactTypeDescriptor {
    /// Creates a descriptor from a title and version.
    pub fn new(schema_title: impl Into<String>, schema_version: impl Into<String>) -> Self {
        Self {
            schema_title: schema_title.into(),
            schema_version: schema_version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_composes_title_and_version() {
        let descriptor = ArtifactTypeDescriptor::new("system.Model", "1");
        assert_eq!(descriptor.to_string(), "system.Model (1)");
    }

    #[test]
    fn test_decodes_camel_case() {
        let descriptor: ArtifactTypeDescriptor = serde_json::from_str(
            r#"{"schemaTitle": "system.Dataset", "schemaVersion": "0.0.1"}"#,
        )
        .unwrap();
        assert_eq!(descriptor, ArtifactTypeDescriptor::new("system.Dataset", "0.0.1"));
    }
}
