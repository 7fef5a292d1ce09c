use std::time::Duration;

use crate::communication::peers::{Transport, TransportChannels};
use crate::errors::{new_err, BullyError};
use crate::leadership::ElectionTimer;
use crate::membership::{MembershipSnapshot, PeerDirectory};
use crate::NodeId;

/// Failure detection timings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeTimings {
    /// Failure detector window. Leaders send heartbeats twice per window.
    pub heartbeat_interval: Duration,

    /// Consecutive windows without a heartbeat before the leader is considered gone.
    pub missed_heartbeat_threshold: u32,
}

impl Default for NodeTimings {
    fn default() -> Self {
        NodeTimings {
            heartbeat_interval: Duration::from_millis(500),
            missed_heartbeat_threshold: 1,
        }
    }
}

impl NodeTimings {
    pub fn leader_heartbeat_period(&self) -> Duration {
        self.heartbeat_interval / 2
    }
}

/// Everything a node needs to run.
#[derive(Clone, Debug)]
pub struct NodeConfiguration<Tr, Pd, Et>
where
    Tr: Transport + TransportChannels,
    Pd: PeerDirectory,
    Et: ElectionTimer,
{
    pub node_id: NodeId,
    pub peer_directory: Pd,
    pub transport: Tr,
    pub election_timer: Et,
    pub timings: NodeTimings,
}

impl<Tr, Pd, Et> NodeConfiguration<Tr, Pd, Et>
where
    Tr: Transport + TransportChannels,
    Pd: PeerDirectory,
    Et: ElectionTimer,
{
    /// Checks the configuration and returns the initial membership.
    pub fn validate(&self) -> Result<MembershipSnapshot, BullyError> {
        if self.timings.missed_heartbeat_threshold == 0 {
            return new_err(
                format!("Invalid configuration for Node {}", self.node_id),
                "missed_heartbeat_threshold must be at least 1".to_string(),
            );
        }
        if self.timings.heartbeat_interval == Duration::from_millis(0) {
            return new_err(
                format!("Invalid configuration for Node {}", self.node_id),
                "heartbeat_interval must be positive".to_string(),
            );
        }

        let snapshot = match self.peer_directory.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                return new_err(
                    format!("Cannot read membership for Node {}", self.node_id),
                    err.to_string(),
                )
            }
        };

        if !snapshot.contains(self.node_id) {
            return new_err(
                format!("Invalid membership for Node {}", self.node_id),
                format!("node is not a member of {:?}", snapshot.all_nodes()),
            );
        }

        Ok(snapshot)
    }
}
