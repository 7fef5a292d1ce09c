use crossbeam_channel::Receiver;

use crate::communication::peers::{Message, Transport};
use crate::leadership::status::administrator::NodeElections;
use crate::leadership::status::ElectionTrigger;
use crate::leadership::watchdog::watchdog_handler::ResetLeadershipStatusWatchdog;
use crate::node::state::{CoordinatorAccepted, ElectionResponse, ProtectedNode};
use crate::NodeId;

pub struct PeerMessageHandlerParams<Tr, Rl, Re>
where
    Tr: Transport,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections,
{
    pub protected_node: ProtectedNode,
    pub message_rx: Receiver<Message>,
    pub transport: Tr,
    pub election_administrator: Re,
    pub leadership_status_watchdog_handler: Rl,
}

/// Consumes the node's inbound messages in arrival order.
pub fn process_peer_messages<Tr, Rl, Re>(
    params: PeerMessageHandlerParams<Tr, Rl, Re>,
    terminate_worker_rx: Receiver<()>,
) where
    Tr: Transport,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections,
{
    info!("Peer message processor worker started");
    loop {
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for peer message processor worker");
                }
                break
            },
            recv(params.message_rx) -> res => {
                match res {
                    Ok(message) => handle_message(&params, message),
                    Err(err) => {
                        error!("Cannot receive peer message: {}", err);
                        break
                    }
                }
            }
        );
    }
    info!("Peer message processor worker stopped");
}

pub(crate) fn handle_message<Tr, Rl, Re>(
    params: &PeerMessageHandlerParams<Tr, Rl, Re>,
    message: Message,
) where
    Tr: Transport,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections,
{
    match message {
        Message::Election { from, epoch } => handle_election(params, from, epoch),
        Message::Answer { from, epoch } => handle_answer(params, from, epoch),
        Message::Coordinator { from, epoch } => handle_coordinator(params, from, epoch),
    }
}

fn handle_election<Tr, Rl, Re>(
    params: &PeerMessageHandlerParams<Tr, Rl, Re>,
    from: NodeId,
    epoch: u64,
) where
    Tr: Transport,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections,
{
    let (node_id, response) = {
        let mut node = params.protected_node.lock();
        (node.id, node.on_election(from, epoch))
    };

    match response {
        Ok(ElectionResponse::Answer { reply, challenge }) => {
            trace!("Node {} Sending {} to Node {}", node_id, reply, from);
            if let Err(err) = params.transport.send(from, reply) {
                debug!("Node {} cannot answer Node {}: {}", node_id, from, err);
            }
            if challenge {
                params
                    .election_administrator
                    .start_election(ElectionTrigger::Challenge { from });
            }
        }
        Ok(ElectionResponse::Reassert { reply, coordinator }) => {
            trace!("Node {} Sending {} and {} to Node {}", node_id, reply, coordinator, from);
            for message in [reply, coordinator].iter() {
                if let Err(err) = params.transport.send(from, *message) {
                    debug!("Node {} cannot reach Node {}: {}", node_id, from, err);
                }
            }
        }
        Ok(ElectionResponse::Defer) => {
            debug!("Node {} defers to Node {} (epoch {})", node_id, from, epoch);
        }
        Err(reason) => {
            debug!(
                "Node {} Election from Node {} (epoch {}) dropped: {}",
                node_id, from, epoch, reason
            );
        }
    }
}

fn handle_answer<Tr, Rl, Re>(
    params: &PeerMessageHandlerParams<Tr, Rl, Re>,
    from: NodeId,
    epoch: u64,
) where
    Tr: Transport,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections,
{
    let (node_id, round_tx) = {
        let node = params.protected_node.lock();
        (node.id, node.on_answer(from, epoch))
    };

    match round_tx {
        Ok(answer_tx) => {
            if answer_tx.send(from).is_err() {
                debug!("Node {} round for epoch {} already finished", node_id, epoch);
            }
        }
        Err(reason) => {
            debug!(
                "Node {} Answer from Node {} (epoch {}) dropped: {}",
                node_id, from, epoch, reason
            );
        }
    }
}

fn handle_coordinator<Tr, Rl, Re>(
    params: &PeerMessageHandlerParams<Tr, Rl, Re>,
    from: NodeId,
    epoch: u64,
) where
    Tr: Transport,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections,
{
    let (node_id, accepted) = {
        let mut node = params.protected_node.lock();
        (node.id, node.on_coordinator(from, epoch))
    };

    match accepted {
        Ok(CoordinatorAccepted {
            reassert: Some(coordinator),
            ..
        }) => {
            info!("Node {} keeps leadership against Node {}", node_id, from);
            if let Err(err) = params.transport.send(from, coordinator) {
                debug!("Node {} cannot reach Node {}: {}", node_id, from, err);
            }
        }
        Ok(accepted) => {
            params
                .leadership_status_watchdog_handler
                .confirm_leader(from, epoch);

            if accepted.challenge {
                info!(
                    "Node {} outranks announced leader {}. Challenging",
                    node_id, from
                );
                params
                    .election_administrator
                    .start_election(ElectionTrigger::Challenge { from });
            }
        }
        Err(reason) => {
            trace!(
                "Node {} Coordinator from Node {} (epoch {}) dropped: {}",
                node_id, from, epoch, reason
            );
        }
    }
}
