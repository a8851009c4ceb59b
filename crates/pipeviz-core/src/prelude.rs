//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use pipeviz_core::prelude::*;
//! ```

pub use crate::error::{Error, Result};
pub use crate::run::{ExecutionRecord, ExecutionState, RunDetails, RuntimeState, TaskDetail};
pub use crate::spec::{
    ArtifactInput, ArtifactTypeDescriptor, ComponentBody, ComponentDef, Dag, PipelineSpec,
    PlatformSpec, SpecDocument, TaskDef,
};
