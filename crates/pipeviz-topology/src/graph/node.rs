//! Graph node types.

use serde::Serialize;
use strum::IntoStaticStr;

use super::details::TaskDetails;
use super::id::NodeId;
use crate::status::NodeStatus;

/// A node of the pipeline topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique node id.
    pub id: NodeId,
    /// Display label.
    pub label: String,
    /// Nodes this node runs after.
    pub run_after: Vec<NodeId>,
    /// Translated run status; `None` until the node has a known state.
    pub status: Option<NodeStatus>,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl GraphNode {
    /// Returns whether this node stands for a nested DAG.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::GroupTask { .. })
    }

    /// Returns whether this node is an artifact.
    pub fn is_artifact(&self) -> bool {
        matches!(self.kind, NodeKind::Artifact(_))
    }

    /// Returns the direct children of a group node.
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::GroupTask { children, .. } => children,
            NodeKind::Task { .. } | NodeKind::Artifact(_) => &[],
        }
    }

    /// Returns the task details of a task or group node.
    pub fn task_details(&self) -> Option<&TaskDetails> {
        match &self.kind {
            NodeKind::Task { details } | NodeKind::GroupTask { details, .. } => Some(details),
            NodeKind::Artifact(_) => None,
        }
    }

    /// Returns the artifact details of an artifact node.
    pub fn artifact_details(&self) -> Option<&ArtifactDetails> {
        match &self.kind {
            NodeKind::Artifact(details) => Some(details),
            NodeKind::Task { .. } | NodeKind::GroupTask { .. } => None,
        }
    }
}

/// What a node stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, IntoStaticStr)]
#[serde(tag = "type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// A task running a single executor.
    Task {
        /// What the task runs.
        details: TaskDetails,
    },
    /// A task expanding into a nested DAG.
    GroupTask {
        /// What the task runs.
        details: TaskDetails,
        /// Direct children: tasks, groups and artifacts of the nested DAG.
        children: Vec<NodeId>,
        /// Whether the group starts collapsed.
        collapsed: bool,
    },
    /// An output artifact of a task.
    Artifact(ArtifactDetails),
}

impl NodeKind {
    /// Returns the kind name, as serialized in the `type` field.
    pub fn type_label(&self) -> &'static str {
        self.into()
    }
}

/// An output artifact and the tasks it flows to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDetails {
    /// Node id of the producing task.
    pub producer: NodeId,
    /// Output key on the producer's component.
    pub output_key: String,
    /// Artifact type, e.g. `system.Model (0.0.1)`.
    pub artifact_type: String,
    /// Node ids of the consuming sibling tasks.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumers: Vec<NodeId>,
}
