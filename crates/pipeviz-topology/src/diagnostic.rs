//! Non-fatal findings reported while building a topology.

use serde::Serialize;
use thiserror::Error;

/// A non-fatal problem found in the inputs.
///
/// Construction always continues; the affected task or binding is left out.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A task references a component that does not exist.
    #[error("task {task_id} in scope {scope} references unknown component {component:?}")]
    UnresolvedComponent {
        /// Scope of the task.
        scope: String,
        /// Id of the skipped task.
        task_id: String,
        /// The missing component id.
        component: String,
    },

    /// An artifact input names no producer task or no output key.
    #[error("task {task_id} in scope {scope} has a malformed artifact input {input_key:?}")]
    MalformedArtifactInput {
        /// Scope of the task.
        scope: String,
        /// Id of the consuming task.
        task_id: String,
        /// Name of the dropped input.
        input_key: String,
    },

    /// A task depends on a task that is not a resolved sibling.
    #[error("task {task_id} in scope {scope} depends on unknown task {dependency:?}")]
    UnknownDependency {
        /// Scope of the task.
        scope: String,
        /// Id of the dependent task.
        task_id: String,
        /// The dropped dependency.
        dependency: String,
    },

    /// A group component contains itself.
    #[error("task {task_id} in scope {scope} expands component {component:?} recursively")]
    RecursiveComponent {
        /// Scope of the task.
        scope: String,
        /// Id of the task that was not expanded.
        task_id: String,
        /// The recursive component id.
        component: String,
    },

    /// The pipeline declares a schema version this crate does not understand.
    #[error("unsupported pipeline schema version {version:?}")]
    UnsupportedSchemaVersion {
        /// The declared version.
        version: String,
    },
}

impl Diagnostic {
    /// Returns the id of the affected task, if any.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Self::UnresolvedComponent { task_id, .. }
            | Self::MalformedArtifactInput { task_id, .. }
            | Self::UnknownDependency { task_id, .. }
            | Self::RecursiveComponent { task_id, .. } => Some(task_id),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}
