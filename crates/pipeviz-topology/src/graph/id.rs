//! Node identifier type and allocation.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use derive_more::{Debug, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Unique identifier of a node in a pipeline topology.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Debug, Display, From, Into)]
#[debug("{_0}")]
#[display("{_0}")]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Hands out node ids that are unique within one build.
///
/// Task ids only repeat across DAG scopes, so a task keeps its own id while it
/// is free and is qualified with its scope otherwise. Artifact ids are always
/// qualified with scope and producer. A numeric suffix settles what remains.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdAllocator {
    claimed: BTreeSet<NodeId>,
}

impl IdAllocator {
    /// Claims the id of a task node.
    pub fn claim_task(&mut self, scope: &str, task_id: &str) -> NodeId {
        if !self.claimed.contains(task_id) {
            return self.insert(task_id.to_owned());
        }
        self.claim_qualified(format!("{scope}.{task_id}"))
    }

    /// Claims the id of an artifact node.
    pub fn claim_artifact(&mut self, scope: &str, producer: &str, local_id: &str) -> NodeId {
        self.claim_qualified(format!("{scope}.{producer}.{local_id}"))
    }

    fn claim_qualified(&mut self, base: String) -> NodeId {
        if !self.claimed.contains(base.as_str()) {
            return self.insert(base);
        }

        let mut suffix = 2usize;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !self.claimed.contains(candidate.as_str()) {
                return self.insert(candidate);
            }
            suffix += 1;
        }
    }

    fn insert(&mut self, id: String) -> NodeId {
        let id = NodeId::new(id);
        self.claimed.insert(id.clone());
        id
    }
}
