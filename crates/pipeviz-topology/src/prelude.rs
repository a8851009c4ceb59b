//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use pipeviz_topology::prelude::*;
//! ```

pub use crate::config::{TopologyConfig, TopologyConfigBuilder};
pub use crate::diagnostic::Diagnostic;
pub use crate::error::{Error, Result};
pub use crate::graph::{
    ArtifactDetails, Edge, GraphNode, NodeId, NodeKind, PipelineTopology, TaskDetails,
    TopologyBuilder, ViewState,
};
pub use crate::status::{NodeStatus, RunState, StatusResolver, StatusSource, TaskRunStatus};
