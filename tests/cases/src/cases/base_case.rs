use bully::MessageKind;

use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let node_ids = vec![10, 20, 30, 40, 50];
    let cluster =
        steps::cluster::start_initial_cluster(node_ids.clone(), configuration::slow_timings());

    // highest node
    cluster.node(50).start_election();

    assert!(cluster.wait_for_leader(50, &node_ids, steps::convergence_timeout()));
    assert_eq!(0, cluster.transport.sent_count(50, MessageKind::Election));
    assert_eq!(1, cluster.status(50).epoch);

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_base_case() {
        crate::cases::base_case::run()
    }
}
