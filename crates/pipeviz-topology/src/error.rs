//! Topology error types.

use thiserror::Error;

use crate::graph::NodeId;

/// Result type for topology queries.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by queries over a built topology.
///
/// Building a topology never fails; only derived views that need an acyclic
/// graph can.
#[derive(Debug, Error)]
pub enum Error {
    /// The run-after relation contains a cycle.
    #[error("cycle detected in topology at node {node_id}")]
    Cycle {
        /// A node on the cycle.
        node_id: NodeId,
    },
}
