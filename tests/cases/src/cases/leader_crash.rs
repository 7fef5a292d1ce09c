use bully_modules::UnreachableMode;

use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let node_ids = vec![10, 20, 30];
    let mut cluster =
        steps::cluster::start_initial_cluster(node_ids.clone(), configuration::fast_timings());

    // failure detectors start the first election
    assert!(cluster.wait_for_leader(30, &node_ids, steps::convergence_timeout()));
    let first_epoch = cluster.status(30).epoch;

    cluster.stop_node(30);
    cluster.transport.set_unreachable(30, UnreachableMode::Fail);

    let survivors = vec![10, 20];
    assert!(cluster.wait_for_leader(20, &survivors, steps::convergence_timeout()));
    assert!(cluster.status(20).epoch > first_epoch);

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_leader_crash() {
        crate::cases::leader_crash::run()
    }
}
