use pipeviz_core::run::{ExecutionState, RuntimeState};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::resolver::RunState;

/// Status of a node as shown in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Executing, as recorded in the metadata store.
    Running,
    /// Executing, as reported in run details.
    InProgress,
    /// Waiting to run, or paused.
    Pending,
    /// Skipped or served from cache.
    Skipped,
    /// Cancelled or being cancelled.
    Cancelled,
}

impl NodeStatus {
    /// Returns whether the node has stopped changing.
    pub const fn is_finished(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::Skipped | Self::Cancelled
        )
    }
}

impl RunState {
    /// Maps the state onto a graph status.
    ///
    /// Returns `None` for states that carry no information.
    pub const fn translate(&self) -> Option<NodeStatus> {
        match self {
            Self::Runtime(state) => translate_runtime(*state),
            Self::Execution(state) => translate_execution(*state),
        }
    }
}

const fn translate_runtime(state: RuntimeState) -> Option<NodeStatus> {
    match state {
        RuntimeState::Canceled | RuntimeState::Canceling => Some(NodeStatus::Cancelled),
        RuntimeState::Paused | RuntimeState::Pending => Some(NodeStatus::Pending),
        RuntimeState::Failed => Some(NodeStatus::Failed),
        RuntimeState::Running => Some(NodeStatus::InProgress),
        RuntimeState::Succeeded => Some(NodeStatus::Succeeded),
        RuntimeState::Skipped => Some(NodeStatus::Skipped),
        RuntimeState::Unspecified => None,
    }
}

const fn translate_execution(state: ExecutionState) -> Option<NodeStatus> {
    match state {
        ExecutionState::Canceled => Some(NodeStatus::Cancelled),
        ExecutionState::Running => Some(NodeStatus::Running),
        ExecutionState::Failed => Some(NodeStatus::Failed),
        ExecutionState::Complete => Some(NodeStatus::Succeeded),
        ExecutionState::Cached => Some(NodeStatus::Skipped),
        ExecutionState::New | ExecutionState::Unknown => None,
    }
}
