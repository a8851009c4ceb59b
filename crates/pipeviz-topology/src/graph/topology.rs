//! The built pipeline topology and graph views over it.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use super::id::NodeId;
use super::node::GraphNode;
use crate::diagnostic::Diagnostic;
use crate::error::{Error, Result};

/// A directed edge from a node to one that runs after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    /// Node that runs first.
    pub source: NodeId,
    /// Node that runs after `source`.
    pub target: NodeId,
}

impl Edge {
    /// Creates an edge.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The logical run graph of a pipeline.
///
/// Every node id is unique and every run-after reference resolves to a node.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineTopology {
    nodes: Vec<GraphNode>,
    roots: Vec<NodeId>,
    diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    positions: HashMap<NodeId, usize>,
}

impl PipelineTopology {
    pub(crate) fn new(nodes: Vec<GraphNode>, roots: Vec<NodeId>, diagnostics: Vec<Diagnostic>) -> Self {
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id.clone(), position))
            .collect();

        Self {
            nodes,
            roots,
            diagnostics,
            positions,
        }
    }

    /// Returns a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.positions.get(id).map(|position| &self.nodes[*position])
    }

    /// Returns whether a node exists.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Returns all nodes.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Consumes the topology and returns its nodes.
    pub fn into_nodes(self) -> Vec<GraphNode> {
        self.nodes
    }

    /// Returns the direct children of the top-level DAG.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the problems found while building.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the topology has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the group containing a node, if any.
    pub fn parent(&self, id: &str) -> Option<&GraphNode> {
        self.nodes
            .iter()
            .find(|node| node.children().iter().any(|child| child == id))
    }

    /// Returns the edges derived from the run-after lists.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().flat_map(|node| {
            node.run_after
                .iter()
                .map(|source| Edge::new(source.clone(), node.id.clone()))
        })
    }

    /// Exports the topology as a petgraph graph.
    ///
    /// Node weights borrow from the topology; edges follow [`Self::edges`].
    pub fn to_graph(&self) -> DiGraph<&GraphNode, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.nodes.len());
        let indices: Vec<NodeIndex> = self.nodes.iter().map(|node| graph.add_node(node)).collect();

        for (position, node) in self.nodes.iter().enumerate() {
            for source in &node.run_after {
                if let Some(source) = self.positions.get(source) {
                    graph.add_edge(indices[*source], indices[position], ());
                }
            }
        }

        graph
    }

    /// Returns the node ids in an order where every node follows the nodes it
    /// runs after.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] if explicit dependencies form a cycle.
    pub fn topological_order(&self) -> Result<Vec<&NodeId>> {
        let graph = self.to_graph();
        let order = toposort(&graph, None).map_err(|cycle| Error::Cycle {
            node_id: graph[cycle.node_id()].id.clone(),
        })?;

        Ok(order.into_iter().map(|index| &graph[index].id).collect())
    }
}

impl PartialEq for PipelineTopology {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.roots == other.roots
            && self.diagnostics == other.diagnostics
    }
}

impl Eq for PipelineTopology {}
