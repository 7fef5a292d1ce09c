use bully::MessageKind;
use bully_modules::{InProcTransport, UnreachableMode};

use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let node_ids = vec![10, 20, 30, 40, 50];
    let cluster =
        steps::cluster::start_initial_cluster(node_ids.clone(), configuration::slow_timings());

    cluster.transport.set_unreachable(50, UnreachableMode::Fail);

    cluster.node(10).start_election();

    let reachable = vec![10, 20, 30, 40];
    assert!(cluster.wait_for_leader(40, &reachable, steps::convergence_timeout()));
    assert_eq!(vec![40], cluster.leaders(&reachable));
    assert_eq!(0, cluster.transport.sent_count(10, MessageKind::Coordinator));

    cluster.terminate();
}

/// Node 50 swallows messages, so the rounds of node 40 end by deadline. The lower nodes start
/// newer rounds while the round of node 40 is still waiting.
pub fn run_with_silent_node() {
    steps::init_logger();

    let node_ids = vec![10, 20, 30, 40, 50];
    let transport = InProcTransport::new(node_ids.clone());
    transport.set_unreachable(50, UnreachableMode::Drop);
    let cluster = steps::cluster::start_cluster_on_transport(
        transport,
        node_ids,
        configuration::slow_timings(),
    );

    cluster.node(40).start_election();
    steps::sleep_ms(30);
    cluster.node(10).start_election();

    let reachable = vec![10, 20, 30, 40];
    assert!(cluster.wait_for_leader(40, &reachable, steps::convergence_timeout()));
    assert_eq!(vec![40], cluster.leaders(&reachable));

    let last_round = cluster.status(40).last_round.expect("node 40 ran a round");
    assert!(last_round.won);
    assert!(last_round.answered_by.is_empty());
    assert!(cluster.transport.sent_count(40, MessageKind::Election) >= 1);

    // no follower is left ahead of the leader's heartbeats
    let leader_epoch = cluster.status(40).epoch;
    for node_id in vec![10, 20, 30] {
        assert!(cluster.status(node_id).epoch <= leader_epoch);
    }

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_failure_tolerance() {
        crate::cases::failure_tolerance::run()
    }

    #[test]
    fn test_failure_tolerance_with_silent_node() {
        crate::cases::failure_tolerance::run_with_silent_node()
    }
}
