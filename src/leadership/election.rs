use std::collections::BTreeSet;
use std::time::Instant;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::communication::peer_notifier::notify_peers;
use crate::communication::peers::{Message, Transport};
use crate::leadership::status::administrator::NodeElections;
use crate::leadership::status::RoundSummary;
use crate::node::state::RoundTicket;
use crate::NodeId;

/// Ephemeral state of one election round, owned by the round worker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionRound {
    pub epoch: u64,
    pub deadline: Instant,
    pub answered_by: BTreeSet<NodeId>,
    pub won: bool,
}

impl ElectionRound {
    pub fn new(epoch: u64, deadline: Instant) -> ElectionRound {
        ElectionRound {
            epoch,
            deadline,
            answered_by: BTreeSet::new(),
            won: false,
        }
    }

    fn into_summary(self) -> RoundSummary {
        RoundSummary {
            epoch: self.epoch,
            won: self.won,
            answered_by: self.answered_by,
        }
    }
}

pub struct StartElectionParams<Tr, Re>
where
    Tr: Transport,
    Re: NodeElections,
{
    pub node_id: NodeId,
    pub ticket: RoundTicket,
    pub peers_above: Vec<NodeId>,
    pub transport: Tr,
    pub election_administrator: Re,
}

/// Runs one round: asks the higher-priority peers, waits for an answer until the deadline
/// and posts the result to the node. A cancelled round posts nothing.
pub fn run_election_round<Tr, Re>(params: StartElectionParams<Tr, Re>)
where
    Tr: Transport,
    Re: NodeElections,
{
    let node_id = params.node_id;
    let RoundTicket {
        epoch,
        deadline,
        answer_rx,
    } = params.ticket;
    let mut round = ElectionRound::new(epoch, deadline);

    if params.peers_above.is_empty() {
        info!("Node {} has no higher-priority peers for epoch {}", node_id, epoch);
        round.won = true;
        params.election_administrator.conclude_round(round.into_summary());
        return;
    }

    let election = Message::Election {
        from: node_id,
        epoch,
    };
    let notify_result = notify_peers(
        election,
        node_id,
        params.peers_above.clone(),
        &params.transport,
    );
    if let Err(err) = notify_result {
        info!(
            "Node {} cannot reach any higher-priority peer for epoch {}: {}",
            node_id, epoch, err
        );
        round.won = true;
        params.election_administrator.conclude_round(round.into_summary());
        return;
    }

    if !await_answers(&mut round, &answer_rx) {
        debug!("Node {} election round for epoch {} stopped", node_id, epoch);
        return;
    }

    if round.won {
        info!(
            "Node {} got no answer from {:?} for epoch {}",
            node_id, params.peers_above, epoch
        );
    } else {
        info!(
            "Node {} outranked by {:?} for epoch {}",
            node_id, round.answered_by, epoch
        );
    }

    params.election_administrator.conclude_round(round.into_summary());
}

/// Waits for the first answer or the deadline. Returns false when the round was cancelled.
fn await_answers(round: &mut ElectionRound, answer_rx: &Receiver<NodeId>) -> bool {
    let timeout = round.deadline.saturating_duration_since(Instant::now());

    match answer_rx.recv_timeout(timeout) {
        Ok(peer_id) => {
            round.answered_by.insert(peer_id);
            round.answered_by.extend(answer_rx.try_iter());
            round.won = false;
            true
        }
        Err(RecvTimeoutError::Timeout) => {
            round.won = true;
            true
        }
        Err(RecvTimeoutError::Disconnected) => false,
    }
}
