use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let node_ids = vec![10, 20, 30, 40];

    // node 20 does not know about 30 and 40, so both 20 and 40 see nobody above them
    let views = vec![
        (10, node_ids.clone()),
        (20, vec![10, 20]),
        (30, node_ids.clone()),
        (40, node_ids.clone()),
    ];
    let cluster = steps::cluster::start_cluster_with_views(
        node_ids.clone(),
        views,
        configuration::slow_timings(),
    );

    cluster.node(20).start_election();
    cluster.node(40).start_election();

    assert!(cluster.wait_for_leader(40, &node_ids, steps::convergence_timeout()));
    assert_eq!(vec![40], cluster.leaders(&node_ids));

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_concurrent_elections() {
        crate::cases::concurrent_elections::run()
    }
}
