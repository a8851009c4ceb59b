//! Transient view state over a built topology.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::id::NodeId;
use super::node::{GraphNode, NodeKind};
use super::topology::{Edge, PipelineTopology};

/// Collapsed and expanded groups of one view.
///
/// Kept apart from the topology, which stays immutable. Groups without an
/// override use the collapsed flag they were built with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    collapsed: BTreeMap<NodeId, bool>,
}

impl ViewState {
    /// Creates a view with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses a group.
    pub fn collapse(&mut self, id: impl Into<NodeId>) {
        self.collapsed.insert(id.into(), true);
    }

    /// Expands a group.
    pub fn expand(&mut self, id: impl Into<NodeId>) {
        self.collapsed.insert(id.into(), false);
    }

    /// Flips a group between collapsed and expanded.
    pub fn toggle(&mut self, topology: &PipelineTopology, id: &str) {
        let collapsed = self.is_collapsed(topology, id);
        self.collapsed.insert(NodeId::from(id), !collapsed);
    }

    /// Drops all overrides.
    pub fn reset(&mut self) {
        self.collapsed.clear();
    }

    /// Returns whether a node is a collapsed group in this view.
    pub fn is_collapsed(&self, topology: &PipelineTopology, id: &str) -> bool {
        let Some(node) = topology.node(id) else {
            return false;
        };
        let NodeKind::GroupTask { collapsed, .. } = &node.kind else {
            return false;
        };
        self.collapsed.get(id).copied().unwrap_or(*collapsed)
    }

    /// Returns the nodes shown in this view.
    ///
    /// Children of a collapsed group are hidden, as is everything nested below
    /// them.
    pub fn visible_nodes<'t>(&self, topology: &'t PipelineTopology) -> Vec<&'t GraphNode> {
        let mut visible = Vec::new();
        let mut pending: Vec<&NodeId> = topology.roots().iter().rev().collect();

        while let Some(id) = pending.pop() {
            let Some(node) = topology.node(id.as_str()) else {
                continue;
            };
            visible.push(node);
            if !self.is_collapsed(topology, id.as_str()) {
                pending.extend(node.children().iter().rev());
            }
        }

        visible
    }

    /// Returns the edges between visible nodes.
    ///
    /// An edge touching a hidden node is redirected to the collapsed group
    /// that contains it; edges inside one collapsed group disappear.
    pub fn visible_edges(&self, topology: &PipelineTopology) -> Vec<Edge> {
        let visible: BTreeSet<&NodeId> = self
            .visible_nodes(topology)
            .into_iter()
            .map(|node| &node.id)
            .collect();
        let parents: HashMap<&NodeId, &NodeId> = topology
            .nodes()
            .iter()
            .flat_map(|node| node.children().iter().map(move |child| (child, &node.id)))
            .collect();

        let stand_in = |id: &NodeId| -> Option<NodeId> {
            let mut id = id.clone();
            while !visible.contains(&id) {
                id = (*parents.get(&id)?).clone();
            }
            Some(id)
        };

        let edges: BTreeSet<Edge> = topology
            .edges()
            .filter_map(|edge| {
                let source = stand_in(&edge.source)?;
                let target = stand_in(&edge.target)?;
                (source != target).then(|| Edge { source, target })
            })
            .collect();

        edges.into_iter().collect()
    }
}
