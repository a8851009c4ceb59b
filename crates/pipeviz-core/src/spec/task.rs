//! Task definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A task inside a DAG scope.
///
/// The task id is the key of the task in [`Dag::tasks`](super::Dag::tasks).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDef {
    /// Display information.
    #[serde(default)]
    pub task_info: TaskInfo,
    /// Component this task instantiates.
    #[serde(default)]
    pub component_ref: ComponentRef,
    /// Ids of sibling tasks this task explicitly runs after.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependent_tasks: Vec<String>,
    /// Declared inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<TaskInputs>,
}

impl TaskDef {
    /// Creates a task instantiating the given component.
    pub fn new(name: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            task_info: TaskInfo { name: name.into() },
            component_ref: ComponentRef {
                name: component.into(),
            },
            dependent_tasks: Vec::new(),
            inputs: None,
        }
    }

    /// Adds explicit dependencies.
    pub fn with_dependencies(mut self, tasks: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependent_tasks = tasks.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an artifact input.
    pub fn with_artifact_input(mut self, key: impl Into<String>, input: ArtifactInput) -> Self {
        self.inputs
            .get_or_insert_with(TaskInputs::default)
            .artifacts
            .insert(key.into(), input);
        self
    }

    /// Iterates over the declared artifact inputs.
    pub fn artifact_inputs(&self) -> impl Iterator<Item = (&str, &ArtifactInput)> {
        self.inputs
            .iter()
            .flat_map(|inputs| inputs.artifacts.iter())
            .map(|(key, input)| (key.as_str(), input))
    }
}

/// Display information of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Reference to a component by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    /// Component id in [`PipelineSpec::components`](super::PipelineSpec::components).
    #[serde(default)]
    pub name: String,
}

/// Inputs bound to a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInputs {
    /// Artifact inputs keyed by input name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub artifacts: BTreeMap<String, ArtifactInput>,
    /// Parameter inputs keyed by input name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ParameterInput>,
}

/// Binding of an artifact input.
///
/// Kept as loose optional fields because malformed bindings must be tolerated;
/// use [`ArtifactInput::source`] for the interpreted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactInput {
    /// Output of another task in the same scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_output_artifact: Option<TaskOutputArtifact>,
    /// Input artifact of the enclosing component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_input_artifact: Option<String>,
}

impl ArtifactInput {
    /// Binds to the output of another task.
    pub fn from_task(producer_task: impl Into<String>, output_artifact_key: impl Into<String>) -> Self {
        Self {
            task_output_artifact: Some(TaskOutputArtifact {
                producer_task: producer_task.into(),
                output_artifact_key: output_artifact_key.into(),
            }),
            component_input_artifact: None,
        }
    }

    /// Binds to an input of the enclosing component.
    pub fn from_component(name: impl Into<String>) -> Self {
        Self {
            task_output_artifact: None,
            component_input_artifact: Some(name.into()),
        }
    }

    /// Interprets the binding.
    pub fn source(&self) -> ArtifactSource<'_> {
        if let Some(name) = self.component_input_artifact.as_deref() {
            return ArtifactSource::Component(name);
        }

        match &self.task_output_artifact {
            Some(output)
                if !output.producer_task.is_empty() && !output.output_artifact_key.is_empty() =>
            {
                ArtifactSource::Task {
                    producer_task: &output.producer_task,
                    output_artifact_key: &output.output_artifact_key,
                }
            }
            _ => ArtifactSource::Malformed,
        }
    }
}

/// Interpreted binding of an [`ArtifactInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactSource<'a> {
    /// Produced by a sibling task.
    Task {
        /// Id of the producing task.
        producer_task: &'a str,
        /// Output key on the producer's component.
        output_artifact_key: &'a str,
    },
    /// Supplied by the enclosing scope.
    Component(&'a str),
    /// Missing producer or output key.
    Malformed,
}

/// Reference to an output artifact of another task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutputArtifact {
    /// Id of the producing task.
    #[serde(default)]
    pub producer_task: String,
    /// Output key on the producer's component.
    #[serde(default)]
    pub output_artifact_key: String,
}

/// Binding of a parameter input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterInput {
    /// Input parameter of the enclosing component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_input_parameter: Option<String>,
    /// Output parameter of another task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_output_parameter: Option<TaskOutputParameter>,
    /// Constant value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime_value: Option<serde_json::Value>,
}

/// Reference to an output parameter of another task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutputParameter {
    /// Id of the producing task.
    #[serde(default)]
    pub producer_task: String,
    /// Output key on the producer's component.
    #[serde(default)]
    pub output_parameter_key: String,
}
