//! Runtime and execution states.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Ranks a state by how far a task has advanced.
///
/// When several records describe one task, the record with the highest rank
/// decides the task state.
pub trait Progress {
    /// Returns the rank of this state; higher is more advanced.
    fn progress(&self) -> u8;
}

/// State of a task as reported by the pipelines API.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeState {
    /// Waiting to be scheduled.
    Pending,
    /// Running.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Skipped, e.g. by a condition.
    Skipped,
    /// Finished with an error.
    Failed,
    /// Cancellation requested.
    Canceling,
    /// Cancelled.
    Canceled,
    /// Paused.
    Paused,
    /// State not set, or not known to this version.
    #[default]
    #[strum(serialize = "RUNTIME_STATE_UNSPECIFIED")]
    #[serde(rename = "RUNTIME_STATE_UNSPECIFIED", other)]
    Unspecified,
}

impl Progress for RuntimeState {
    // Canceling ranks above Canceled.
    fn progress(&self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Pending => 10,
            Self::Running => 20,
            Self::Skipped => 30,
            Self::Paused => 40,
            Self::Canceled => 51,
            Self::Canceling => 59,
            Self::Succeeded => 60,
            Self::Failed => 70,
        }
    }
}

/// Last known state of an execution in the metadata store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionState {
    /// Registered but not started.
    New,
    /// Running.
    Running,
    /// Finished successfully.
    Complete,
    /// Finished with an error.
    Failed,
    /// Reused a cached result.
    Cached,
    /// Cancelled.
    Canceled,
    /// State not set, or not known to this version.
    #[default]
    #[serde(other)]
    Unknown,
}

impl ExecutionState {
    /// Returns whether the execution has stopped changing.
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete | Self::Failed | Self::Cached | Self::Canceled
        )
    }
}

impl Progress for ExecutionState {
    fn progress(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::New => 10,
            Self::Running => 20,
            Self::Cached => 30,
            Self::Canceled => 51,
            Self::Complete => 60,
            Self::Failed => 70,
        }
    }
}
