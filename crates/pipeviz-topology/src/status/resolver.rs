use jiff::Timestamp;
use pipeviz_core::run::{ExecutionRecord, ExecutionState, Progress, RunDetails, RuntimeState};
use serde::Serialize;

/// Tracing target for status resolution.
const TRACING_TARGET: &str = "pipeviz_topology::status";

/// Where per-task run state is read from.
#[derive(Debug, Clone, Copy)]
pub enum StatusSource<'a> {
    /// Run details reported by the pipelines API.
    RunDetails(&'a RunDetails),
    /// Execution records from the metadata store.
    Executions(&'a [ExecutionRecord]),
}

impl<'a> From<&'a RunDetails> for StatusSource<'a> {
    fn from(details: &'a RunDetails) -> Self {
        Self::RunDetails(details)
    }
}

impl<'a> From<&'a [ExecutionRecord]> for StatusSource<'a> {
    fn from(records: &'a [ExecutionRecord]) -> Self {
        Self::Executions(records)
    }
}

impl<'a> From<&'a Vec<ExecutionRecord>> for StatusSource<'a> {
    fn from(records: &'a Vec<ExecutionRecord>) -> Self {
        Self::Executions(records)
    }
}

/// A state drawn from either status source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RunState {
    /// State reported in run details.
    Runtime(RuntimeState),
    /// State recorded in the metadata store.
    Execution(ExecutionState),
}

impl Progress for RunState {
    fn progress(&self) -> u8 {
        match self {
            Self::Runtime(state) => state.progress(),
            Self::Execution(state) => state.progress(),
        }
    }
}

impl From<RuntimeState> for RunState {
    fn from(state: RuntimeState) -> Self {
        Self::Runtime(state)
    }
}

impl From<ExecutionState> for RunState {
    fn from(state: ExecutionState) -> Self {
        Self::Execution(state)
    }
}

/// The resolved run status of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRunStatus {
    /// When the task started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    /// When the task finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete_time: Option<Timestamp>,
    /// Most advanced state among the correlated records.
    pub state: RunState,
    /// Pod the task ran in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
}

/// Correlates status records with pipeline tasks.
#[derive(Debug, Clone, Copy)]
pub struct StatusResolver<'a> {
    source: StatusSource<'a>,
    driver_suffix: &'a str,
}

impl<'a> StatusResolver<'a> {
    /// Creates a resolver over a status source.
    ///
    /// A record whose name is a task id followed by `driver_suffix` is the
    /// controller of that task's sub-DAG and correlates with the task too.
    pub fn new(source: impl Into<StatusSource<'a>>, driver_suffix: &'a str) -> Self {
        Self {
            source: source.into(),
            driver_suffix,
        }
    }

    /// Returns the status source.
    pub fn source(&self) -> StatusSource<'a> {
        self.source
    }

    /// Resolves the run status of a task.
    ///
    /// Run details correlate by each record's display name, which falls back
    /// to its execution id; execution records correlate by `task_name`, which
    /// falls back to the task id. Either matches the task id alone or followed
    /// by the driver suffix. Returns `None` when no record matches, i.e. the
    /// task has not started.
    ///
    /// Timing and pod come from the first matching record; the state is the
    /// highest ranked among all matches, and the first one wins ties.
    pub fn resolve(&self, task_id: &str, task_name: Option<&str>) -> Option<TaskRunStatus> {
        let status = match self.source {
            StatusSource::RunDetails(details) => self.resolve_run_details(details, task_id),
            StatusSource::Executions(records) => {
                self.resolve_executions(records, task_name.unwrap_or(task_id))
            }
        };

        if let Some(status) = &status {
            tracing::trace!(
                target: TRACING_TARGET,
                task_id,
                state = ?status.state,
                "resolved task status"
            );
        }

        status
    }

    fn resolve_run_details(&self, details: &RunDetails, task_id: &str) -> Option<TaskRunStatus> {
        let mut matches = details
            .task_details
            .iter()
            .filter(|detail| self.correlates(detail.correlation_name(), task_id));

        let first = matches.next()?;
        let state = matches
            .map(|detail| detail.state)
            .fold(first.state, highest);

        Some(TaskRunStatus {
            start_time: first.start_time,
            complete_time: first.end_time,
            state: state.into(),
            pod_name: first.pod_name().map(str::to_owned),
        })
    }

    fn resolve_executions(&self, records: &[ExecutionRecord], task_name: &str) -> Option<TaskRunStatus> {
        let mut matches = records
            .iter()
            .filter(|record| self.correlates(record.task_name(), task_name));

        let first = matches.next()?;
        let state = matches
            .map(|record| record.last_known_state)
            .fold(first.last_known_state, highest);

        Some(TaskRunStatus {
            start_time: first.created_at(),
            complete_time: first.updated_at().filter(|_| state.is_terminal()),
            state: state.into(),
            pod_name: first.pod_name().map(str::to_owned),
        })
    }

    fn correlates(&self, record_name: Option<&str>, name: &str) -> bool {
        let Some(record_name) = record_name else {
            return false;
        };
        record_name == name
            || record_name
                .strip_prefix(name)
                .is_some_and(|rest| rest == self.driver_suffix)
    }
}

/// Keeps the more advanced state; the earlier one wins ties.
fn highest<S: Progress>(current: S, next: S) -> S {
    if next.progress() > current.progress() {
        next
    } else {
        current
    }
}
