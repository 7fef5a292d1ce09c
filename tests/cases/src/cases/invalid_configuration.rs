use bully::NodeTimings;
use bully_modules::{ClusterMembership, InProcTransport};

use crate::steps;
use crate::steps::configuration;

pub fn run() {
    steps::init_logger();

    let transport = InProcTransport::new(vec![10, 20]);
    let membership = ClusterMembership::new(vec![10, 20]).expect("valid membership");

    // not a member
    let result = configuration::create_node(
        30,
        membership.clone(),
        transport.clone(),
        configuration::fast_timings(),
    );
    assert!(result.is_err());

    let zero_threshold = NodeTimings {
        missed_heartbeat_threshold: 0,
        ..configuration::fast_timings()
    };
    let result = configuration::create_node(10, membership.clone(), transport, zero_threshold);
    assert!(result.is_err());

    // no mailbox for node 20
    let result = configuration::create_node(
        20,
        membership,
        InProcTransport::new(vec![10]),
        configuration::fast_timings(),
    );
    assert!(result.is_err());

    if let Err(err) = result {
        info!("Node not started: {}", err);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_invalid_configuration() {
        crate::cases::invalid_configuration::run()
    }
}
