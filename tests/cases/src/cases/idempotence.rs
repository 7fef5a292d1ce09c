use bully::MessageKind;
use bully_modules::UnreachableMode;

use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let node_ids = vec![10, 20];
    let cluster = steps::cluster::start_initial_cluster(node_ids, configuration::slow_timings());

    // node 20 swallows everything, so the round of node 10 runs until its deadline
    cluster.transport.set_unreachable(20, UnreachableMode::Drop);

    cluster.node(10).start_election();
    cluster.node(10).start_election();

    assert!(cluster.wait_for_leader(10, &[10], steps::convergence_timeout()));

    let status = cluster.status(10);
    assert_eq!(1, status.epoch);
    assert_eq!(1, cluster.transport.sent_count(10, MessageKind::Election));

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_idempotence() {
        crate::cases::idempotence::run()
    }
}
