use std::collections::BTreeSet;
use std::iter::FromIterator;
use std::sync::Arc;

use crate::errors::BullyError;
use crate::NodeId;

/// Source of the cluster membership. Implementations must hand out whole snapshots:
/// a membership change is never observed half-applied.
pub trait PeerDirectory: Send + Sync + Clone + 'static {
    /// Returns a consistent copy of the current membership.
    fn snapshot(&self) -> Result<MembershipSnapshot, BullyError>;

    /// All known nodes, the caller included.
    fn all_nodes(&self) -> Result<Vec<NodeId>, BullyError> {
        Ok(self.snapshot()?.all_nodes())
    }

    /// All known nodes except the given one.
    fn peers(&self, node_id: NodeId) -> Result<Vec<NodeId>, BullyError> {
        Ok(self.snapshot()?.peers(node_id))
    }

    /// Nodes with priority strictly greater than the given one.
    fn peers_above(&self, node_id: NodeId) -> Result<Vec<NodeId>, BullyError> {
        Ok(self.snapshot()?.peers_above(node_id))
    }

    /// Nodes with priority strictly lower than the given one.
    fn peers_below(&self, node_id: NodeId) -> Result<Vec<NodeId>, BullyError> {
        Ok(self.snapshot()?.peers_below(node_id))
    }
}

/// Immutable membership view. Cloning shares the underlying set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MembershipSnapshot {
    nodes: Arc<BTreeSet<NodeId>>,
}

impl MembershipSnapshot {
    pub fn new(nodes: BTreeSet<NodeId>) -> MembershipSnapshot {
        MembershipSnapshot {
            nodes: Arc::new(nodes),
        }
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains(&node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node with the highest priority.
    pub fn highest(&self) -> Option<NodeId> {
        self.nodes.iter().next_back().cloned()
    }

    pub fn all_nodes(&self) -> Vec<NodeId> {
        self.nodes.iter().cloned().collect()
    }

    pub fn peers(&self, node_id: NodeId) -> Vec<NodeId> {
        self.nodes.iter().cloned().filter(|&id| id != node_id).collect()
    }

    pub fn peers_above(&self, node_id: NodeId) -> Vec<NodeId> {
        self.nodes.iter().cloned().filter(|&id| id > node_id).collect()
    }

    pub fn peers_below(&self, node_id: NodeId) -> Vec<NodeId> {
        self.nodes.iter().cloned().filter(|&id| id < node_id).collect()
    }
}

impl FromIterator<NodeId> for MembershipSnapshot {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        MembershipSnapshot::new(iter.into_iter().collect())
    }
}
