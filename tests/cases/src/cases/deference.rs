use bully::MessageKind;

use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let node_ids = vec![10, 20, 30];
    let cluster =
        steps::cluster::start_initial_cluster(node_ids.clone(), configuration::slow_timings());

    cluster.node(10).start_election();

    assert!(cluster.wait_for_leader(30, &node_ids, steps::convergence_timeout()));

    // both higher nodes answered the lowest one
    assert!(cluster.transport.sent_count(20, MessageKind::Answer) >= 1);
    assert!(cluster.transport.sent_count(30, MessageKind::Answer) >= 1);
    assert_eq!(0, cluster.transport.sent_count(10, MessageKind::Coordinator));

    let last_round = cluster.status(10).last_round.expect("node 10 ran a round");
    assert!(!last_round.won);

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_deference() {
        crate::cases::deference::run()
    }
}
