#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod diagnostic;
mod error;
pub mod graph;
pub mod index;
pub mod status;

#[doc(hidden)]
pub mod prelude;

pub use config::{TopologyConfig, TopologyConfigBuilder, TopologyConfigBuilderError};
pub use diagnostic::Diagnostic;
pub use error::{Error, Result};
pub use graph::{GraphNode, NodeId, NodeKind, PipelineTopology, TopologyBuilder, ViewState};
pub use status::{NodeStatus, StatusSource};

/// Tracing target for topology operations.
pub const TRACING_TARGET: &str = "pipeviz_topology";
