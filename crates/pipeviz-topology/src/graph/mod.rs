//! Pipeline topology graph.
//!
//! [`TopologyBuilder`] walks the root DAG and every nested group, emitting one
//! node per task, one per group and one per declared output artifact. Each
//! node lists the nodes it runs after; [`PipelineTopology`] holds the pruned
//! result and derives edges, a petgraph export and a topological order from it.

mod builder;
mod details;
mod id;
mod node;
mod prune;
mod topology;
mod view;

pub use builder::TopologyBuilder;
pub use details::{IoArtifact, IoParameter, TaskDetails, TaskIo, VolumeMount};
pub use id::NodeId;
pub use node::{ArtifactDetails, GraphNode, NodeKind};
pub use prune::prune_dangling;
pub use topology::{Edge, PipelineTopology};
pub use view::ViewState;
