#[macro_use]
extern crate log;
extern crate chrono;
extern crate env_logger;

extern crate bully;
extern crate bully_modules;

use std::io::Write;
use std::process;
use std::thread;
use std::time::Duration;

use chrono::prelude::{DateTime, Local};

use bully::{BullyError, NodeConfiguration, NodeHandle, NodeId, NodeTimings};
use bully_modules::{
    ClusterMembership, InProcTransport, PriorityAssignment, RandomizedElectionTimer,
    UnreachableMode,
};

fn init_logger() {
    env_logger::builder()
        .format(|buf, record| {
            let now: DateTime<Local> = Local::now();
            writeln!(
                buf,
                "{:5}: {} - {}",
                record.level(),
                now.format("%H:%M:%S.%3f").to_string(),
                record.args()
            )
        })
        .init();
}

fn main() {
    init_logger();

    if let Err(err) = run() {
        error!("Demo failed: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), BullyError> {
    let node_ids = PriorityAssignment::Random {
        count: 5,
        max: 100,
    }
    .assign()?;
    info!("Cluster priorities: {:?}", node_ids);

    let membership = ClusterMembership::new(node_ids.clone())?;
    let transport = InProcTransport::new(node_ids.clone());

    let mut nodes = Vec::new();
    for node_id in node_ids.iter().cloned() {
        nodes.push(start(node_id, membership.clone(), transport.clone())?);
    }

    let mut sorted = node_ids.clone();
    sorted.sort();
    let (lowest, highest) = match (sorted.first(), sorted.last()) {
        (Some(lowest), Some(highest)) => (*lowest, *highest),
        _ => return Ok(()),
    };

    info!("Node {} goes down", highest);
    transport.set_unreachable(highest, UnreachableMode::Fail);

    if let Some(node) = nodes.iter().find(|node| node.id() == lowest) {
        node.start_election();
    }

    thread::sleep(get_settle_time());

    for node in nodes.iter() {
        info!("{}", node.status());
    }

    for node in nodes {
        node.shutdown()?;
    }

    Ok(())
}

fn start(
    node_id: NodeId,
    membership: ClusterMembership,
    transport: InProcTransport,
) -> Result<NodeHandle, BullyError> {
    let node_config = NodeConfiguration {
        node_id,
        peer_directory: membership,
        transport,
        election_timer: RandomizedElectionTimer::new(300, 600),
        timings: NodeTimings::default(),
    };

    bully::start_node(node_config)
}

fn get_settle_time() -> Duration {
    Duration::from_secs(5)
}
