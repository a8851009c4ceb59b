//! Artifact relationship indices.
//!
//! Both indices are computed fresh for every build and passed explicitly:
//! - [`ComponentArtifactIndex`]: declared output artifacts per component
//! - [`TaskArtifactIndex`]: consumed outputs per producer task, for one DAG scope

mod component;
mod task;

pub use component::ComponentArtifactIndex;
pub use task::{ArtifactConsumer, TaskArtifactIndex};
