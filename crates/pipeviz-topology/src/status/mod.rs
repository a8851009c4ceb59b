//! Runtime status resolution and translation.
//!
//! Per-task run state comes from one of two sources: the run-details report
//! of the pipelines API, or raw execution records from the metadata store.
//! [`StatusResolver`] correlates either source with a task and picks one
//! [`TaskRunStatus`]; [`RunState::translate`] maps the result onto the
//! [`NodeStatus`] shown in the graph.

mod resolver;
mod translate;

pub use resolver::{RunState, StatusResolver, StatusSource, TaskRunStatus};
pub use translate::NodeStatus;
