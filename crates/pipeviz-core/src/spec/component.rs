//! Component definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::artifact::ArtifactTypeDescriptor;
use super::task::TaskDef;

/// A DAG: the sibling tasks of one nesting level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dag {
    /// Tasks keyed by their stable task id.
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskDef>,
}

/// What a component wraps.
///
/// A component either runs a single executor or expands into a nested DAG.
/// A component declaring a `dag` is always a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentBody {
    /// Nested sub-pipeline.
    Group {
        /// The nested DAG.
        dag: Dag,
    },
    /// Single executor.
    Single {
        /// Label of the executor in `deploymentSpec.executors`.
        #[serde(default, rename = "executorLabel")]
        executor_label: String,
    },
}

/// A reusable component referenced by tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDef {
    /// Single executor or nested DAG.
    #[serde(flatten)]
    pub body: ComponentBody,
    /// Declared inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_definitions: Option<IoDefinition>,
    /// Declared outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_definitions: Option<IoDefinition>,
}

impl ComponentDef {
    /// Creates a single-executor component.
    pub fn single(executor_label: impl Into<String>) -> Self {
        Self {
            body: ComponentBody::Single {
                executor_label: executor_label.into(),
            },
            input_definitions: None,
            output_definitions: None,
        }
    }

    /// Creates a group component around a nested DAG.
    pub fn group(dag: Dag) -> Self {
        Self {
            body: ComponentBody::Group { dag },
            input_definitions: None,
            output_definitions: None,
        }
    }

    /// Sets the declared outputs.
    pub fn with_outputs(mut self, outputs: IoDefinition) -> Self {
        self.output_definitions = Some(outputs);
        self
    }

    /// Sets the declared inputs.
    pub fn with_inputs(mut self, inputs: IoDefinition) -> Self {
        self.input_definitions = Some(inputs);
        self
    }

    /// Returns the nested DAG when this component is a group.
    pub fn dag(&self) -> Option<&Dag> {
        match &self.body {
            ComponentBody::Group { dag } => Some(dag),
            ComponentBody::Single { .. } => None,
        }
    }

    /// Returns the executor label when this component runs a single executor.
    pub fn executor_label(&self) -> Option<&str> {
        match &self.body {
            ComponentBody::Single { executor_label } if !executor_label.is_empty() => {
                Some(executor_label)
            }
            _ => None,
        }
    }

    /// Returns whether this component contains a nested DAG.
    pub const fn is_group(&self) -> bool {
        matches!(self.body, ComponentBody::Group { .. })
    }

    /// Iterates over the declared output artifacts.
    pub fn output_artifacts(&self) -> impl Iterator<Item = (&str, &ArtifactDefinition)> {
        self.output_definitions
            .iter()
            .flat_map(|outputs| outputs.artifacts.iter())
            .map(|(key, definition)| (key.as_str(), definition))
    }
}

/// Declared artifacts and parameters of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IoDefinition {
    /// Artifacts keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub artifacts: BTreeMap<String, ArtifactDefinition>,
    /// Parameters keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ParameterDefinition>,
}

impl IoDefinition {
    /// Creates an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artifact.
    pub fn with_artifact(
        mut self,
        name: impl Into<String>,
        artifact_type: ArtifactTypeDescriptor,
    ) -> Self {
        self.artifacts.insert(
            name.into(),
            ArtifactDefinition {
                artifact_type,
                is_artifact_list: false,
            },
        );
        self
    }

    /// Adds a parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, parameter_type: ParameterType) -> Self {
        self.parameters.insert(
            name.into(),
            ParameterDefinition {
                parameter_type,
                default_value: None,
                is_optional: false,
            },
        );
        self
    }

    /// Returns whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty() && self.parameters.is_empty()
    }
}

/// A declared artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDefinition {
    /// Schema of the artifact.
    #[serde(default)]
    pub artifact_type: ArtifactTypeDescriptor,
    /// Whether the artifact is a list of artifacts.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_artifact_list: bool,
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    /// Value type of the parameter.
    #[serde(default)]
    pub parameter_type: ParameterType,
    /// Value used when the parameter is not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    /// Whether the parameter may be omitted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_optional: bool,
}

/// Value type of a pipeline parameter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterType {
    /// Floating point number.
    NumberDouble,
    /// Integer number.
    NumberInteger,
    /// String.
    String,
    /// Boolean.
    Boolean,
    /// JSON list.
    List,
    /// JSON object.
    Struct,
    /// Final status of an upstream task.
    TaskFinalStatus,
    /// Type not set, or not known to this version.
    #[default]
    #[strum(serialize = "PARAMETER_TYPE_ENUM_UNSPECIFIED")]
    #[serde(rename = "PARAMETER_TYPE_ENUM_UNSPECIFIED", other)]
    Unspecified,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_single_component_decodes() {
        let component: ComponentDef = serde_json::from_value(json!({
            "executorLabel": "exec-train",
            "outputDefinitions": {
                "artifacts": {
                    "model": {
                        "artifactType": { "schemaTitle": "system.Model", "schemaVersion": "0.0.1" }
                    }
                },
                "parameters": { "accuracy": { "parameterType": "NUMBER_DOUBLE" } }
            }
        }))
        .unwrap();

        assert!(!component.is_group());
        assert_eq!(component.executor_label(), Some("exec-train"));
        let outputs: Vec<_> = component.output_artifacts().map(|(key, _)| key).collect();
        assert_eq!(outputs, vec!["model"]);
        let outputs = component.output_definitions.unwrap();
        assert_eq!(
            outputs.parameters["accuracy"].parameter_type,
            ParameterType::NumberDouble
        );
    }

    #[test]
    fn test_group_component_decodes() {
        let component: ComponentDef = serde_json::from_value(json!({
            "dag": {
                "tasks": {
                    "inner": { "taskInfo": { "name": "inner" }, "componentRef": { "name": "comp-inner" } }
                }
            }
        }))
        .unwrap();

        assert!(component.is_group());
        assert!(component.executor_label().is_none());
        assert!(component.dag().unwrap().tasks.contains_key("inner"));
    }

    #[test]
    fn test_component_without_body_is_single() {
        let component: ComponentDef = serde_json::from_value(json!({})).unwrap();
        assert!(!component.is_group());
        assert!(component.executor_label().is_none());
        assert_eq!(component.output_artifacts().count(), 0);
    }

    #[test]
    fn test_unknown_parameter_type_is_unspecified() {
        let definition: ParameterDefinition =
            serde_json::from_value(json!({ "parameterType": "SOMETHING_NEW" })).unwrap();
        assert_eq!(definition.parameter_type, ParameterType::Unspecified);
        assert_eq!(ParameterType::String.to_string(), "STRING");
        assert_eq!(ParameterType::NumberInteger.as_ref(), "NUMBER_INTEGER");
    }
}
