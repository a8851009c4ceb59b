//! Run details reported by the pipelines API.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::state::RuntimeState;
use crate::error::{Error, Result};

/// Per-task details of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunDetails {
    /// Metadata context of the pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_context_id: Option<String>,
    /// Metadata context of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_run_context_id: Option<String>,
    /// One entry per execution attempt, in report order.
    #[serde(default)]
    pub task_details: Vec<TaskDetail>,
}

impl RunDetails {
    /// Decodes run details from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::decode("run details", e))
    }
}

/// One execution attempt of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    /// Run the attempt belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Backend id of the attempt.
    #[serde(default)]
    pub task_id: String,
    /// Name of the pipeline task, or of its driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Execution id in the metadata store.
    #[serde(
        default,
        deserialize_with = "crate::de::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub execution_id: Option<String>,
    /// When the attempt was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<Timestamp>,
    /// When the attempt started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    /// When the attempt ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    /// Reported state.
    #[serde(default)]
    pub state: RuntimeState,
    /// Pods and sub-tasks spawned by the attempt.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_tasks: Vec<ChildTask>,
}

impl TaskDetail {
    /// Returns the name used to correlate this attempt with a pipeline task.
    ///
    /// The display name wins; the execution id is the fallback.
    pub fn correlation_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.execution_id.as_deref())
    }

    /// Returns the first pod name among the child tasks.
    pub fn pod_name(&self) -> Option<&str> {
        self.child_tasks
            .iter()
            .find_map(|child| child.pod_name.as_deref())
    }
}

/// A pod or sub-task spawned by an attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTask {
    /// Backend task id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Kubernetes pod name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
}
