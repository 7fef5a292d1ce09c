use std::sync::Arc;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use crate::common::{BullyWorker, BullyWorkerPool};
use crate::communication::peers::{Message, Transport, TransportChannels};
use crate::errors::{new_err, BullyError};
use crate::leadership::heartbeat_sender::{send_leader_heartbeats, SendHeartbeatParams};
use crate::leadership::status::administrator::{ElectionsAdministrator, NodeElections};
use crate::leadership::status::node_leadership_fsm::{
    run_node_status_watcher, ElectionManagerParams,
};
use crate::leadership::status::ElectionTrigger;
use crate::leadership::watchdog::leader_status_watcher::{
    watch_leader_status, WatchLeaderStatusParams,
};
use crate::leadership::watchdog::watchdog_handler::LeadershipStatusWatchdogHandler;
use crate::leadership::ElectionTimer;
use crate::membership::PeerDirectory;
use crate::request_handler::peer::{process_peer_messages, PeerMessageHandlerParams};
use crate::{common, NodeId};

pub mod configuration;
pub mod state;

use configuration::NodeConfiguration;
use state::{Node, ProtectedNode, StatusReport};

/// Running node as seen by its supervisor.
#[derive(Debug)]
pub struct NodeHandle {
    node_id: NodeId,
    worker: BullyWorker,
    protected_node: ProtectedNode,
    election_administrator: ElectionsAdministrator,
}

impl NodeHandle {
    pub fn id(&self) -> NodeId {
        self.node_id
    }

    /// Requests an election. Ignored while a round is active.
    pub fn start_election(&self) {
        self.election_administrator
            .start_election(ElectionTrigger::Manual);
    }

    pub fn status(&self) -> StatusReport {
        self.protected_node.lock().status_report()
    }

    /// Stops all node workers and cancels the in-flight round.
    pub fn shutdown(self) -> Result<(), BullyError> {
        if let Err(err) = self.worker.terminate_worker_tx.send(()) {
            return new_err(
                format!("Cannot send termination signal to Node {}", self.node_id),
                err.to_string(),
            );
        }

        if self.worker.join_handle.join().is_err() {
            return new_err(
                format!("Node {} worker panicked", self.node_id),
                String::new(),
            );
        }

        Ok(())
    }
}

pub struct NodeStartingParams<Tr, Pd, Et>
where
    Tr: Transport + TransportChannels,
    Pd: PeerDirectory,
    Et: ElectionTimer,
{
    pub node_config: NodeConfiguration<Tr, Pd, Et>,
    pub protected_node: ProtectedNode,
    pub message_rx: Receiver<Message>,
    pub election_administrator: ElectionsAdministrator,
}

/// Validates the configuration and starts the node workers. A node whose membership
/// cannot be read, or that has no mailbox, does not start.
pub fn start_node<Tr, Pd, Et>(
    node_config: NodeConfiguration<Tr, Pd, Et>,
) -> Result<NodeHandle, BullyError>
where
    Tr: Transport + TransportChannels,
    Pd: PeerDirectory,
    Et: ElectionTimer,
{
    let node_id = node_config.node_id;
    let membership = node_config.validate()?;

    let message_rx = match node_config.transport.message_rx(node_id) {
        Ok(message_rx) => message_rx,
        Err(err) => {
            return new_err(
                format!("Cannot start Node {}: no inbound channel", node_id),
                err.to_string(),
            )
        }
    };

    let protected_node = Arc::new(Mutex::new(Node::new(node_id)));
    let election_administrator = ElectionsAdministrator::new();

    let worker = common::run_worker(
        start,
        NodeStartingParams {
            node_config,
            protected_node: protected_node.clone(),
            message_rx,
            election_administrator: election_administrator.clone(),
        },
    );

    info!("Node {} started. Membership: {:?}", node_id, membership.all_nodes());

    Ok(NodeHandle {
        node_id,
        worker,
        protected_node,
        election_administrator,
    })
}

fn start<Tr, Pd, Et>(params: NodeStartingParams<Tr, Pd, Et>, terminate_worker_rx: Receiver<()>)
where
    Tr: Transport + TransportChannels,
    Pd: PeerDirectory,
    Et: ElectionTimer,
{
    let node_id = params.node_config.node_id;
    let watchdog_handler = LeadershipStatusWatchdogHandler::new();

    let peer_message_processor_worker = common::run_worker(
        process_peer_messages,
        PeerMessageHandlerParams {
            protected_node: params.protected_node.clone(),
            message_rx: params.message_rx,
            transport: params.node_config.transport.clone(),
            election_administrator: params.election_administrator.clone(),
            leadership_status_watchdog_handler: watchdog_handler.clone(),
        },
    );

    let check_leader_worker = common::run_worker(
        watch_leader_status,
        WatchLeaderStatusParams {
            protected_node: params.protected_node.clone(),
            election_administrator: params.election_administrator.clone(),
            watchdog_event_rx: watchdog_handler.clone(),
            timings: params.node_config.timings,
        },
    );

    let send_heartbeat_worker = common::run_worker(
        send_leader_heartbeats,
        SendHeartbeatParams {
            protected_node: params.protected_node.clone(),
            peer_directory: params.node_config.peer_directory.clone(),
            transport: params.node_config.transport.clone(),
            timings: params.node_config.timings,
        },
    );

    let election_worker = common::run_worker(
        run_node_status_watcher,
        ElectionManagerParams {
            protected_node: params.protected_node.clone(),
            election_administrator: params.election_administrator.clone(),
            leadership_status_watchdog_handler: watchdog_handler,
            transport: params.node_config.transport,
            peer_directory: params.node_config.peer_directory,
            election_timer: params.node_config.election_timer,
        },
    );

    let workers = vec![
        peer_message_processor_worker,
        check_leader_worker,
        send_heartbeat_worker,
        election_worker,
    ];

    let worker_pool = BullyWorkerPool::new(workers);

    let terminate_result = terminate_worker_rx.recv();
    if let Err(e) = terminate_result {
        error!("Abnormal exit for node: {}", e);
    }

    info!("Node {} termination requested", node_id);

    params.protected_node.lock().cancel_round();

    worker_pool.terminate();
    worker_pool.join();

    info!("Node {} shutting down", node_id);
}
