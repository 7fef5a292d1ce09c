use crossbeam_channel::Receiver;

use crate::leadership::status::administrator::NodeElections;
use crate::leadership::status::ElectionTrigger;
use crate::leadership::watchdog::watchdog_handler::{
    LeaderConfirmationEvent, ResetLeadershipEventChannelRx,
};
use crate::node::configuration::NodeTimings;
use crate::node::state::{NodeStatus, ProtectedNode};

pub struct WatchLeaderStatusParams<Rl, Re>
where
    Rl: ResetLeadershipEventChannelRx,
    Re: NodeElections,
{
    pub protected_node: ProtectedNode,
    pub election_administrator: Re,
    pub watchdog_event_rx: Rl,
    pub timings: NodeTimings,
}

/// Failure detector: each heartbeat interval without a confirmation from the leader is a
/// miss, and enough consecutive misses start an election.
pub fn watch_leader_status<Rl, Re>(
    params: WatchLeaderStatusParams<Rl, Re>,
    terminate_worker_rx: Receiver<()>,
) where
    Rl: ResetLeadershipEventChannelRx,
    Re: NodeElections,
{
    info!("Watch leader expiration status worker started");
    let mut missed_heartbeats = 0;
    loop {
        let timeout = crossbeam_channel::after(params.timings.heartbeat_interval);
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for watch leader expiration status worker");
                }
                break
            },
            recv(timeout) -> _  => {
                missed_heartbeats = register_missed_heartbeat(&params, missed_heartbeats);
            },
            recv(params.watchdog_event_rx.reset_leadership_watchdog_rx())
                -> watchdog_event_result => {
                match watchdog_event_result {
                    Ok(LeaderConfirmationEvent::Heartbeat { leader_id, epoch }) => {
                        trace!("Leader {} confirmed for epoch {}", leader_id, epoch);
                    },
                    Ok(LeaderConfirmationEvent::ResetWatchdogCounter) => {
                        trace!("Leadership status watchdog reset");
                    },
                    Err(err) => {
                        error!("Invalid result from watchdog_event_rx: {}", err);
                    }
                }
                missed_heartbeats = 0;
            },
        );
    }
    info!("Watch leader expiration status worker stopped");
}

fn register_missed_heartbeat<Rl, Re>(
    params: &WatchLeaderStatusParams<Rl, Re>,
    missed_heartbeats: u32,
) -> u32
where
    Rl: ResetLeadershipEventChannelRx,
    Re: NodeElections,
{
    let (node_id, current_leader_id, observed_epoch) = {
        let node = params.protected_node.lock();
        if node.status != NodeStatus::Follower || node.is_election_in_progress() {
            return 0;
        }
        (node.id, node.get_current_leader_id(), node.get_epoch())
    };

    let missed_heartbeats = missed_heartbeats + 1;
    if missed_heartbeats < params.timings.missed_heartbeat_threshold {
        trace!(
            "Node {} missed heartbeat {} of {} from leader {:?}",
            node_id,
            missed_heartbeats,
            params.timings.missed_heartbeat_threshold,
            current_leader_id
        );
        return missed_heartbeats;
    }

    info!(
        "Node {} Leader {:?} awaiting time elapsed. Starting new election",
        node_id, current_leader_id
    );
    params
        .election_administrator
        .start_election(ElectionTrigger::LeaderTimeout { observed_epoch });

    0
}
