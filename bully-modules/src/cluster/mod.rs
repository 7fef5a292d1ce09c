use bully::{new_err, BullyError, MembershipSnapshot, NodeId, PeerDirectory};
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

pub mod priority;

/// Basic in-memory implementation of the PeerDirectory trait. Joins and leaves replace the
/// whole snapshot, so concurrent readers see either the old or the new membership.
#[derive(Clone, Debug)]
pub struct ClusterMembership {
    snapshot: Arc<RwLock<MembershipSnapshot>>,
}

impl PeerDirectory for ClusterMembership {
    fn snapshot(&self) -> Result<MembershipSnapshot, BullyError> {
        let snapshot = self.snapshot.read();
        if snapshot.is_empty() {
            return new_err("Cluster membership is empty".to_string(), String::new());
        }

        Ok(snapshot.clone())
    }
}

impl ClusterMembership {
    /// Creates the membership from the node ids. Ids must be unique.
    pub fn new(nodes: Vec<NodeId>) -> Result<ClusterMembership, BullyError> {
        let mut unique = BTreeSet::new();
        let mut duplicates = Vec::new();
        for node_id in nodes {
            if !unique.insert(node_id) {
                duplicates.push(node_id);
            }
        }

        if !duplicates.is_empty() {
            return new_err(
                "Cannot create cluster membership".to_string(),
                format!("duplicate node ids: {:?}", duplicates),
            );
        }

        Ok(ClusterMembership {
            snapshot: Arc::new(RwLock::new(MembershipSnapshot::new(unique))),
        })
    }

    /// Adds a node id to the membership.
    pub fn add_peer(&self, peer: NodeId) {
        let mut snapshot = self.snapshot.write();
        if snapshot.contains(peer) {
            warn!("Cluster membership - add duplicate peer:{}", peer);
            return;
        }

        let mut nodes: BTreeSet<NodeId> = snapshot.all_nodes().into_iter().collect();
        nodes.insert(peer);
        *snapshot = MembershipSnapshot::new(nodes);
        info!("Cluster membership - peer {} joined", peer);
    }

    /// Removes a node id from the membership.
    pub fn remove_peer(&self, peer: NodeId) {
        let mut snapshot = self.snapshot.write();
        if !snapshot.contains(peer) {
            warn!("Cluster membership - remove unknown peer:{}", peer);
            return;
        }

        *snapshot = snapshot.peers(peer).into_iter().collect();
        info!("Cluster membership - peer {} left", peer);
    }
}
