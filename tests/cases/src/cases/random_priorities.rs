use bully::NodeId;
use bully_modules::PriorityAssignment;

use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let node_ids = PriorityAssignment::Random { count: 5, max: 1000 }
        .assign()
        .expect("unique priorities");
    let highest: NodeId = *node_ids.iter().max().expect("non-empty cluster");
    info!("Random priorities: {:?}", node_ids);

    let cluster =
        steps::cluster::start_initial_cluster(node_ids.clone(), configuration::fast_timings());

    assert!(cluster.wait_for_leader(highest, &node_ids, steps::convergence_timeout()));

    cluster.terminate();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_random_priorities() {
        crate::cases::random_priorities::run()
    }
}
