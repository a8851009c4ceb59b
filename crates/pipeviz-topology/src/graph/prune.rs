//! Removal of dangling run-after references.

use std::collections::HashSet;

use super::id::NodeId;
use super::node::GraphNode;

/// Tracing target for post-processing.
const TRACING_TARGET: &str = "pipeviz_topology::prune";

/// Drops every run-after reference to a node that is not in `nodes`.
///
/// References dangle when a dependency was skipped or never existed.
pub fn prune_dangling(mut nodes: Vec<GraphNode>) -> Vec<GraphNode> {
    let ids: HashSet<NodeId> = nodes.iter().map(|node| node.id.clone()).collect();

    for node in &mut nodes {
        let before = node.run_after.len();
        node.run_after.retain(|id| ids.contains(id));

        let dropped = before - node.run_after.len();
        if dropped > 0 {
            tracing::debug!(
                target: TRACING_TARGET,
                node_id = %node.id,
                dropped,
                "pruned dangling run-after references"
            );
        }
    }

    nodes
}
