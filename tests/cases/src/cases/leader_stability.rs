use bully::NodeStatus;
use bully_modules::{InProcTransport, UnreachableMode};

use crate::steps;
use crate::steps::configuration;

/// Lower nodes keep running elections against a sitting leader whose only higher peer is
/// silent. The leader must keep its role and keep the followers' detectors fed.
pub fn run() {
    steps::init_logger();

    let node_ids = vec![10, 20, 30, 40, 50];
    let transport = InProcTransport::new(node_ids.clone());
    transport.set_unreachable(50, UnreachableMode::Drop);
    let cluster = steps::cluster::start_cluster_on_transport(
        transport,
        node_ids,
        configuration::tight_timings(),
    );

    let reachable = vec![10, 20, 30, 40];
    assert!(cluster.wait_for_leader(40, &reachable, steps::convergence_timeout()));

    for _ in 0..5 {
        cluster.node(10).start_election();

        for _ in 0..40 {
            let status = cluster.status(40);
            assert_eq!(NodeStatus::Leader, status.role);
            assert!(!status.election_in_progress);
            steps::sleep_ms(10);
        }
    }

    assert!(cluster.wait_for_leader(40, &reachable, steps::convergence_timeout()));

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_leader_stability() {
        crate::cases::leader_stability::run()
    }
}
