use bully::{BullyError, NodeConfiguration, NodeHandle, NodeId, NodeTimings};
use bully_modules::{ClusterMembership, FixedElectionTimer, InProcTransport};
use std::time::Duration;

pub fn get_election_timeout_ms() -> u64 {
    300
}

/// Detector fires after 300 ms without a heartbeat.
pub fn fast_timings() -> NodeTimings {
    NodeTimings {
        heartbeat_interval: Duration::from_millis(100),
        missed_heartbeat_threshold: 3,
    }
}

/// Detector window shorter than the election timeout.
pub fn tight_timings() -> NodeTimings {
    NodeTimings {
        heartbeat_interval: Duration::from_millis(100),
        missed_heartbeat_threshold: 1,
    }
}

/// Detector stays quiet for the length of a case so only manual elections run.
pub fn slow_timings() -> NodeTimings {
    NodeTimings {
        heartbeat_interval: Duration::from_secs(5),
        missed_heartbeat_threshold: 10,
    }
}

pub fn create_node_configuration(
    node_id: NodeId,
    membership: ClusterMembership,
    transport: InProcTransport,
    timings: NodeTimings,
) -> NodeConfiguration<InProcTransport, ClusterMembership, FixedElectionTimer> {
    NodeConfiguration {
        node_id,
        peer_directory: membership,
        transport,
        election_timer: FixedElectionTimer::new(get_election_timeout_ms()),
        timings,
    }
}

pub fn create_node(
    node_id: NodeId,
    membership: ClusterMembership,
    transport: InProcTransport,
    timings: NodeTimings,
) -> Result<NodeHandle, BullyError> {
    bully::start_node(create_node_configuration(
        node_id, membership, transport, timings,
    ))
}
