//! Task details attached to task and group nodes.

use pipeviz_core::spec::{ComponentDef, IoDefinition, PipelineSpec, PlatformSpec, TaskDef};
use serde::Serialize;

use crate::status::TaskRunStatus;

/// What a task runs and what it consumes and produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    /// Task display name.
    pub display_name: String,
    /// Id of the component the task runs.
    pub component: String,
    /// Executor of a single component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_label: Option<String>,
    /// Container image of the executor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Declared inputs.
    pub inputs: TaskIo,
    /// Declared outputs.
    pub outputs: TaskIo,
    /// Volumes mounted into the task's pod.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Resolved run status, once the task has started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_status: Option<TaskRunStatus>,
}

impl TaskDetails {
    /// Collects the details of a task from the pipeline and platform specs.
    pub(crate) fn collect(
        task_id: &str,
        task: &TaskDef,
        component: &ComponentDef,
        spec: &PipelineSpec,
        platform: Option<&PlatformSpec>,
        run_status: Option<TaskRunStatus>,
    ) -> Self {
        let executor_label = component.executor_label();
        let image = executor_label
            .and_then(|label| spec.executor(label))
            .and_then(|executor| executor.image())
            .map(str::to_owned);
        let volume_mounts = executor_label
            .zip(platform)
            .map(|(label, platform)| {
                platform
                    .pvc_mounts(label)
                    .iter()
                    .map(|mount| VolumeMount {
                        mount_path: mount.mount_path.clone(),
                        name: mount.claim_name().to_owned(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            display_name: display_name(task_id, task).to_owned(),
            component: task.component_ref.name.clone(),
            executor_label: executor_label.map(str::to_owned),
            image,
            inputs: TaskIo::from_definition(component.input_definitions.as_ref()),
            outputs: TaskIo::from_definition(component.output_definitions.as_ref()),
            volume_mounts,
            run_status,
        }
    }
}

/// Returns the display name of a task, falling back to its id.
pub(crate) fn display_name<'a>(task_id: &'a str, task: &'a TaskDef) -> &'a str {
    let name = task.task_info.name.as_str();
    if name.is_empty() { task_id } else { name }
}

/// Declared parameters and artifacts on one side of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskIo {
    /// Parameters by name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<IoParameter>,
    /// Artifacts by name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<IoArtifact>,
}

impl TaskIo {
    fn from_definition(definition: Option<&IoDefinition>) -> Self {
        let Some(definition) = definition else {
            return Self::default();
        };

        Self {
            parameters: definition
                .parameters
                .iter()
                .map(|(label, parameter)| IoParameter {
                    label: label.clone(),
                    parameter_type: parameter.parameter_type.to_string(),
                })
                .collect(),
            artifacts: definition
                .artifacts
                .iter()
                .map(|(label, artifact)| IoArtifact {
                    label: label.clone(),
                    artifact_type: artifact.artifact_type.to_string(),
                })
                .collect(),
        }
    }

    /// Returns whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.artifacts.is_empty()
    }
}

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IoParameter {
    /// Parameter name.
    pub label: String,
    /// Parameter type, e.g. `STRING`.
    #[serde(rename = "type")]
    pub parameter_type: String,
}

/// A declared artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IoArtifact {
    /// Artifact name.
    pub label: String,
    /// Artifact type, e.g. `system.Model (0.0.1)`.
    #[serde(rename = "type")]
    pub artifact_type: String,
}

/// A persistent volume mounted into a task's pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Path inside the container.
    pub mount_path: String,
    /// Claim name, or the task that creates the claim.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use pipeviz_core::spec::{ArtifactTypeDescriptor, ParameterType, SpecDocument};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collects_task_details() {
        let document = SpecDocument::from_value(json!({
            "pipeline_spec": {
                "components": {
                    "comp-train": {
                        "executorLabel": "exec-train",
                        "inputDefinitions": {
                            "parameters": { "epochs": { "parameterType": "NUMBER_INTEGER" } }
                        },
                        "outputDefinitions": {
                            "artifacts": {
                                "model": {
                                    "artifactType": { "schemaTitle": "system.Model", "schemaVersion": "0.0.1" }
                                }
                            }
                        }
                    }
                },
                "deploymentSpec": {
                    "executors": { "exec-train": { "container": { "image": "python:3.11" } } }
                },
                "root": { "dag": { "tasks": {
                    "train": { "taskInfo": { "name": "Train" }, "componentRef": { "name": "comp-train" } }
                } } }
            },
            "platform_spec": {
                "platforms": { "kubernetes": { "deploymentSpec": { "executors": {
                    "exec-train": { "pvcMount": [
                        { "mountPath": "/data", "taskOutputParameter": { "producerTask": "createpvc", "outputParameterKey": "name" } },
                        { "mountPath": "/cache", "constant": "shared-cache" }
                    ] }
                } } } }
            }
        }))
        .unwrap();

        let spec = &document.spec;
        let task = &spec.root.dag.tasks["train"];
        let component = spec.component("comp-train").unwrap();
        let details =
            TaskDetails::collect("train", task, component, spec, document.platform.as_ref(), None);

        assert_eq!(details.display_name, "Train");
        assert_eq!(details.component, "comp-train");
        assert_eq!(details.executor_label.as_deref(), Some("exec-train"));
        assert_eq!(details.image.as_deref(), Some("python:3.11"));
        assert_eq!(
            details.inputs.parameters,
            vec![IoParameter {
                label: "epochs".to_owned(),
                parameter_type: ParameterType::NumberInteger.to_string(),
            }]
        );
        assert_eq!(
            details.outputs.artifacts,
            vec![IoArtifact {
                label: "model".to_owned(),
                artifact_type: "system.Model (0.0.1)".to_owned(),
            }]
        );
        assert_eq!(
            details.volume_mounts,
            vec![
                VolumeMount { mount_path: "/data".to_owned(), name: "createpvc".to_owned() },
                VolumeMount { mount_path: "/cache".to_owned(), name: "shared-cache".to_owned() },
            ]
        );
    }

    #[test]
    fn test_group_has_no_executor() {
        let spec = PipelineSpec::default();
        let task = TaskDef::new("", "comp-group");
        let component = ComponentDef::group(Default::default()).with_outputs(
            IoDefinition::new().with_artifact("metrics", ArtifactTypeDescriptor::new("system.Metrics", "0.0.1")),
        );

        let details = TaskDetails::collect("group", &task, &component, &spec, None, None);

        assert_eq!(details.display_name, "group");
        assert!(details.executor_label.is_none());
        assert!(details.image.is_none());
        assert!(details.inputs.is_empty());
        assert_eq!(details.outputs.artifacts.len(), 1);
    }
}
