use std::collections::HashMap;
use std::time::Duration;

use bully::{NodeHandle, NodeId, NodeStatus, NodeTimings, StatusReport};
use bully_modules::{ClusterMembership, InProcTransport};

use crate::steps;
use crate::steps::configuration;

pub struct CaseCluster {
    pub transport: InProcTransport,
    pub nodes: HashMap<NodeId, NodeHandle>,
}

/// Starts every node with the full membership.
pub fn start_initial_cluster(node_ids: Vec<NodeId>, timings: NodeTimings) -> CaseCluster {
    let transport = InProcTransport::new(node_ids.clone());

    start_cluster_on_transport(transport, node_ids, timings)
}

/// Starts every node with the full membership on a transport whose faults are already set.
pub fn start_cluster_on_transport(
    transport: InProcTransport,
    node_ids: Vec<NodeId>,
    timings: NodeTimings,
) -> CaseCluster {
    let views = node_ids
        .iter()
        .map(|node_id| (*node_id, node_ids.clone()))
        .collect::<Vec<(NodeId, Vec<NodeId>)>>();

    start_nodes(transport, views, timings)
}

/// Starts every node with its own view of the membership.
pub fn start_cluster_with_views(
    node_ids: Vec<NodeId>,
    views: Vec<(NodeId, Vec<NodeId>)>,
    timings: NodeTimings,
) -> CaseCluster {
    start_nodes(InProcTransport::new(node_ids), views, timings)
}

fn start_nodes(
    transport: InProcTransport,
    views: Vec<(NodeId, Vec<NodeId>)>,
    timings: NodeTimings,
) -> CaseCluster {
    let mut nodes = HashMap::new();

    for (node_id, view) in views {
        let membership = ClusterMembership::new(view).expect("valid membership");
        let node = configuration::create_node(node_id, membership, transport.clone(), timings)
            .expect("node started");

        nodes.insert(node_id, node);
    }

    CaseCluster { transport, nodes }
}

impl CaseCluster {
    pub fn node(&self, node_id: NodeId) -> &NodeHandle {
        &self.nodes[&node_id]
    }

    pub fn status(&self, node_id: NodeId) -> StatusReport {
        self.node(node_id).status()
    }

    pub fn log_statuses(&self) {
        let mut node_ids = self.nodes.keys().cloned().collect::<Vec<NodeId>>();
        node_ids.sort();
        for node_id in node_ids {
            info!("--Status: {}", self.status(node_id));
        }
    }

    /// Checks that the leader holds the role and every listed node follows it with no
    /// round in flight.
    pub fn converged_on(&self, leader_id: NodeId, node_ids: &[NodeId]) -> bool {
        node_ids.iter().all(|node_id| {
            let status = self.status(*node_id);
            let expected_role = if *node_id == leader_id {
                NodeStatus::Leader
            } else {
                NodeStatus::Follower
            };

            status.current_leader == Some(leader_id)
                && status.role == expected_role
                && !status.election_in_progress
        })
    }

    pub fn wait_for_leader(
        &self,
        leader_id: NodeId,
        node_ids: &[NodeId],
        timeout: Duration,
    ) -> bool {
        let converged = steps::wait_until(timeout, || self.converged_on(leader_id, node_ids));
        self.log_statuses();

        converged
    }

    /// Number of nodes that consider themselves the leader.
    pub fn leaders(&self, node_ids: &[NodeId]) -> Vec<NodeId> {
        node_ids
            .iter()
            .cloned()
            .filter(|node_id| self.status(*node_id).role == NodeStatus::Leader)
            .collect()
    }

    pub fn stop_node(&mut self, node_id: NodeId) {
        if let Some(node) = self.nodes.remove(&node_id) {
            node.shutdown().expect("node stopped");
        }
    }

    pub fn terminate(self) {
        for (_, node) in self.nodes {
            let node_id = node.id();
            if let Err(err) = node.shutdown() {
                panic!("Node {} shutdown failed: {}", node_id, err);
            }
        }
    }
}
