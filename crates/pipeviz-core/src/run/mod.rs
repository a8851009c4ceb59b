//! Runtime status sources.
//!
//! Two structurally different sources report how far a run has progressed:
//! - [`RunDetails`]: the task details reported by the pipelines API
//! - [`ExecutionRecord`]: raw executions read from the metadata store
//!
//! Both carry a state drawn from a fixed enumeration ([`RuntimeState`] and
//! [`ExecutionState`]) ranked by [`Progress`].

mod details;
mod execution;
mod state;

pub use details::{ChildTask, RunDetails, TaskDetail};
pub use execution::{ExecutionRecord, PropertyValue};
pub use state::{ExecutionState, Progress, RuntimeState};
