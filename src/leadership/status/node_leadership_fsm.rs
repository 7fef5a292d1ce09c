use crossbeam_channel::Receiver;

use crate::common;
use crate::communication::peer_notifier::notify_peers;
use crate::communication::peers::{Message, Transport};
use crate::leadership::election::{run_election_round, StartElectionParams};
use crate::leadership::status::administrator::{NodeElections, NodeElectionsChannelRx};
use crate::leadership::status::{ElectionTrigger, LeaderElectionEvent, RoundSummary};
use crate::leadership::watchdog::watchdog_handler::ResetLeadershipStatusWatchdog;
use crate::leadership::ElectionTimer;
use crate::membership::PeerDirectory;
use crate::node::state::ProtectedNode;
use crate::NodeId;

pub struct ElectionManagerParams<Tr, Pd, Et, Rl, Re>
where
    Tr: Transport,
    Pd: PeerDirectory,
    Et: ElectionTimer,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections + NodeElectionsChannelRx,
{
    pub protected_node: ProtectedNode,
    pub election_administrator: Re,
    pub leadership_status_watchdog_handler: Rl,
    pub transport: Tr,
    pub peer_directory: Pd,
    pub election_timer: Et,
}

/// Single consumer of the node's election queue: starts rounds and applies their results.
pub fn run_node_status_watcher<Tr, Pd, Et, Rl, Re>(
    params: ElectionManagerParams<Tr, Pd, Et, Rl, Re>,
    terminate_worker_rx: Receiver<()>,
) where
    Tr: Transport,
    Pd: PeerDirectory,
    Et: ElectionTimer,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections + NodeElectionsChannelRx,
{
    info!("Leader election status watcher worker started");
    loop {
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for leader election status watcher worker");
                }
                break
            },
            recv(params.election_administrator.leader_election_event_rx()) -> event_result => {
                match event_result {
                    Ok(event) => change_node_leadership_state(&params, event),
                    Err(err) => {
                        error!("Cannot receive leader election event: {}", err);
                        break
                    }
                }
            }
        );
    }
    info!("Leader election status watcher worker stopped");
}

fn change_node_leadership_state<Tr, Pd, Et, Rl, Re>(
    params: &ElectionManagerParams<Tr, Pd, Et, Rl, Re>,
    event: LeaderElectionEvent,
) where
    Tr: Transport,
    Pd: PeerDirectory,
    Et: ElectionTimer,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections + NodeElectionsChannelRx,
{
    match event {
        LeaderElectionEvent::StartElection(trigger) => start_election(params, trigger),
        LeaderElectionEvent::ConcludeRound(summary) => conclude_round(params, summary),
    }
}

fn start_election<Tr, Pd, Et, Rl, Re>(
    params: &ElectionManagerParams<Tr, Pd, Et, Rl, Re>,
    trigger: ElectionTrigger,
) where
    Tr: Transport,
    Pd: PeerDirectory,
    Et: ElectionTimer,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections + NodeElectionsChannelRx,
{
    // one membership snapshot per round
    let membership = match params.peer_directory.snapshot() {
        Ok(membership) => membership,
        Err(err) => {
            error!("Cannot start election ({}): membership unavailable: {}", trigger, err);
            return;
        }
    };

    let (node_id, ticket) = {
        let mut node = params.protected_node.lock();

        if let Err(reason) = node.check_trigger(trigger) {
            debug!("Node {} election request ({}) dropped: {}", node.id, trigger, reason);
            return;
        }

        let round_timeout = params.election_timer.next_election_timeout();
        match node.begin_round(round_timeout) {
            Ok(ticket) => (node.id, ticket),
            Err(reason) => {
                debug!("Node {} election request ({}) dropped: {}", node.id, trigger, reason);
                return;
            }
        }
    };

    info!(
        "Node {} started an election for epoch {} ({})",
        node_id, ticket.epoch, trigger
    );

    let round_params = StartElectionParams {
        node_id,
        ticket,
        peers_above: membership.peers_above(node_id),
        transport: params.transport.clone(),
        election_administrator: params.election_administrator.clone(),
    };

    common::run_worker_thread(run_election_round, round_params);
}

fn conclude_round<Tr, Pd, Et, Rl, Re>(
    params: &ElectionManagerParams<Tr, Pd, Et, Rl, Re>,
    summary: RoundSummary,
) where
    Tr: Transport,
    Pd: PeerDirectory,
    Et: ElectionTimer,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections + NodeElectionsChannelRx,
{
    let (node_id, coordinator) = {
        let mut node = params.protected_node.lock();

        match node.conclude_round(&summary) {
            Ok(coordinator) => (node.id, coordinator),
            Err(reason) => {
                debug!("Node {} round result ({}) dropped: {}", node.id, summary, reason);
                return;
            }
        }
    };

    params
        .leadership_status_watchdog_handler
        .reset_leadership_status_watchdog();

    if let Some(coordinator) = coordinator {
        broadcast_coordinator(params, node_id, coordinator);
    }
}

fn broadcast_coordinator<Tr, Pd, Et, Rl, Re>(
    params: &ElectionManagerParams<Tr, Pd, Et, Rl, Re>,
    node_id: NodeId,
    coordinator: Message,
) where
    Tr: Transport,
    Pd: PeerDirectory,
    Et: ElectionTimer,
    Rl: ResetLeadershipStatusWatchdog,
    Re: NodeElections + NodeElectionsChannelRx,
{
    let peers = match params.peer_directory.peers(node_id) {
        Ok(peers) => peers,
        Err(err) => {
            error!("Node {} cannot announce leadership: {}", node_id, err);
            return;
        }
    };

    if let Err(err) = notify_peers(coordinator, node_id, peers, &params.transport) {
        warn!("Node {} leadership announcement failed: {}", node_id, err);
    }
}
