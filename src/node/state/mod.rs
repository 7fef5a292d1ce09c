use std::cmp;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use derive_more::Display;
use parking_lot::Mutex;

use crate::communication::peers::Message;
use crate::errors::Discard;
use crate::leadership::status::{ElectionTrigger, RoundSummary};
use crate::NodeId;


pub type ProtectedNode = Arc<Mutex<Node>>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum NodeStatus {
    Follower,
    Candidate,
    Leader,
}

/// Round handle kept by the node. Dropping it disconnects the answer channel,
/// which tells the round worker the round was cancelled.
#[derive(Debug)]
struct ActiveRound {
    epoch: u64,
    deadline: Instant,
    answer_tx: Sender<NodeId>,
}

/// Issued when a round starts: the round worker owns it for the rest of the round.
#[derive(Debug)]
pub struct RoundTicket {
    pub epoch: u64,
    pub deadline: Instant,
    pub answer_rx: Receiver<NodeId>,
}

/// What the node does about an accepted Election message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ElectionResponse {
    /// The sender is outranked: reply, and challenge when no round of our own is running.
    Answer { reply: Message, challenge: bool },

    /// The sitting leader is asked by a lower node: reply and repeat the Coordinator to it.
    Reassert { reply: Message, coordinator: Message },

    /// The sender outranks this node: stay silent and wait for its Coordinator.
    Defer,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoordinatorAccepted {
    pub leader_changed: bool,
    pub challenge: bool,

    /// Set when a sitting leader keeps its role against a lower claimant.
    pub reassert: Option<Message>,
}

/// Observable node state.
#[derive(Clone, Debug, Eq, PartialEq, Display)]
#[display(
    fmt = "Node {} {} (leader {:?}, epoch {})",
    node_id,
    role,
    current_leader,
    epoch
)]
pub struct StatusReport {
    pub node_id: NodeId,
    pub role: NodeStatus,
    pub current_leader: Option<NodeId>,
    pub epoch: u64,
    pub election_in_progress: bool,
    pub last_round: Option<RoundSummary>,
}

/// Election state of one node. All mutation happens under the node lock; no method here
/// performs I/O, the workers send whatever the methods return after unlocking.
#[derive(Debug)]
pub struct Node {
    pub id: NodeId,
    pub status: NodeStatus,
    current_leader_id: Option<NodeId>,

    epoch: u64,
    observed_epoch: u64,
    resolved_epoch: u64,

    last_election_started: Option<Instant>,
    active_round: Option<ActiveRound>,
    last_round: Option<RoundSummary>,
}

impl Node {
    pub fn new(id: NodeId) -> Node {
        Node {
            id,
            status: NodeStatus::Follower,
            current_leader_id: None,
            epoch: 0,
            observed_epoch: 0,
            resolved_epoch: 0,
            last_election_started: None,
            active_round: None,
            last_round: None,
        }
    }

    pub fn get_epoch(&self) -> u64 {
        self.epoch
    }
    pub fn get_current_leader_id(&self) -> Option<NodeId> {
        self.current_leader_id
    }
    pub fn get_last_election_started(&self) -> Option<Instant> {
        self.last_election_started
    }
    pub fn is_election_in_progress(&self) -> bool {
        self.active_round.is_some()
    }

    pub fn status_report(&self) -> StatusReport {
        StatusReport {
            node_id: self.id,
            role: self.status,
            current_leader: self.current_leader_id,
            epoch: self.epoch,
            election_in_progress: self.is_election_in_progress(),
            last_round: self.last_round.clone(),
        }
    }

    /// Checks whether the trigger still makes sense for the current state.
    pub fn check_trigger(&self, trigger: ElectionTrigger) -> Result<(), Discard> {
        match trigger {
            ElectionTrigger::LeaderTimeout { observed_epoch } => {
                if self.status == NodeStatus::Leader {
                    return Err(Discard::NotApplicable);
                }
                if self.epoch > observed_epoch {
                    return Err(Discard::StaleMessage);
                }
                Ok(())
            }
            ElectionTrigger::Manual | ElectionTrigger::Challenge { .. } => Ok(()),
        }
    }

    /// Opens a new round for the next epoch. At most one round is active at a time.
    pub fn begin_round(&mut self, round_timeout: Duration) -> Result<RoundTicket, Discard> {
        if let Some(round) = &self.active_round {
            trace!("Node {} round for epoch {} is still active", self.id, round.epoch);
            return Err(Discard::DuplicateRound);
        }

        let epoch = cmp::max(self.epoch, self.observed_epoch) + 1;
        let now = Instant::now();
        let deadline = now + round_timeout;
        let (answer_tx, answer_rx): (Sender<NodeId>, Receiver<NodeId>) =
            crossbeam_channel::unbounded();

        self.epoch = epoch;
        self.status = NodeStatus::Candidate;
        self.last_election_started = Some(now);
        self.active_round = Some(ActiveRound {
            epoch,
            deadline,
            answer_tx,
        });

        info!("Node {} Status changed to Candidate for epoch {}", self.id, epoch);

        Ok(RoundTicket {
            epoch,
            deadline,
            answer_rx,
        })
    }

    pub fn on_election(&mut self, from: NodeId, epoch: u64) -> Result<ElectionResponse, Discard> {
        if from == self.id {
            return Err(Discard::NotApplicable);
        }
        if epoch < self.resolved_epoch && self.active_round.is_none() {
            return Err(Discard::StaleMessage);
        }

        self.observed_epoch = cmp::max(self.observed_epoch, epoch);

        if from < self.id {
            let reply = Message::Answer {
                from: self.id,
                epoch,
            };
            if self.status == NodeStatus::Leader {
                return Ok(ElectionResponse::Reassert {
                    reply,
                    coordinator: self.reassert_leadership(),
                });
            }

            return Ok(ElectionResponse::Answer {
                reply,
                challenge: self.active_round.is_none(),
            });
        }

        let round_superseded = match &self.active_round {
            Some(round) => round.epoch <= epoch,
            None => false,
        };
        if round_superseded {
            self.cancel_round();
        }
        if self.current_leader_id == Some(self.id) {
            self.current_leader_id = None;
        }
        if self.status != NodeStatus::Follower && self.active_round.is_none() {
            self.status = NodeStatus::Follower;
            info!(
                "Node {} Status changed to Follower: Node {} outranks it (epoch {})",
                self.id, from, epoch
            );
        }

        Ok(ElectionResponse::Defer)
    }

    /// Returns the channel of the round the answer belongs to.
    pub fn on_answer(&self, from: NodeId, epoch: u64) -> Result<Sender<NodeId>, Discard> {
        if from <= self.id {
            return Err(Discard::NotApplicable);
        }

        match &self.active_round {
            Some(round) if round.epoch == epoch => Ok(round.answer_tx.clone()),
            _ if epoch < self.epoch => Err(Discard::StaleMessage),
            _ => Err(Discard::NoMatchingRound),
        }
    }

    pub fn on_coordinator(
        &mut self,
        from: NodeId,
        epoch: u64,
    ) -> Result<CoordinatorAccepted, Discard> {
        if epoch < self.epoch {
            return Err(Discard::StaleMessage);
        }

        if self.status == NodeStatus::Leader && from < self.id {
            self.observed_epoch = cmp::max(self.observed_epoch, epoch);
            return Ok(CoordinatorAccepted {
                leader_changed: false,
                challenge: false,
                reassert: Some(self.reassert_leadership()),
            });
        }

        let previous_leader = self.current_leader_id;

        self.epoch = epoch;
        self.observed_epoch = cmp::max(self.observed_epoch, epoch);
        self.resolved_epoch = cmp::max(self.resolved_epoch, epoch);
        self.current_leader_id = Some(from);
        self.cancel_round();

        if from != self.id {
            self.status = NodeStatus::Follower;
        }

        let leader_changed = previous_leader != Some(from);
        if leader_changed {
            info!(
                "Node {} Status changed to {} of Node {} for epoch {}",
                self.id, self.status, from, epoch
            );
        }

        Ok(CoordinatorAccepted {
            leader_changed,
            challenge: from < self.id,
            reassert: None,
        })
    }

    /// Closes the round the summary belongs to. Returns the Coordinator message to
    /// broadcast when the node won.
    pub fn conclude_round(&mut self, summary: &RoundSummary) -> Result<Option<Message>, Discard> {
        match &self.active_round {
            Some(round) if round.epoch == summary.epoch => {}
            _ => return Err(Discard::NoMatchingRound),
        }

        self.active_round = None;
        self.resolved_epoch = cmp::max(self.resolved_epoch, summary.epoch);
        self.last_round = Some(summary.clone());

        if summary.won {
            return Ok(Some(self.become_leader()));
        }

        self.status = NodeStatus::Follower;
        info!(
            "Node {} Status changed to Follower for epoch {}: outranked by {:?}",
            self.id, summary.epoch, summary.answered_by
        );
        Ok(None)
    }

    /// Announces at the highest epoch seen so far: nodes that lost newer rounds while this
    /// one was running must still accept the Coordinator.
    pub fn become_leader(&mut self) -> Message {
        self.epoch = cmp::max(self.epoch, self.observed_epoch);
        self.resolved_epoch = cmp::max(self.resolved_epoch, self.epoch);
        self.status = NodeStatus::Leader;
        self.current_leader_id = Some(self.id);

        info!("Node {} became the leader for epoch {}", self.id, self.epoch);

        self.coordinator_message()
    }

    /// Keeps the leader role and lifts the epoch to the highest one seen.
    fn reassert_leadership(&mut self) -> Message {
        let epoch = cmp::max(self.epoch, self.observed_epoch);
        if epoch > self.epoch {
            info!("Node {} reasserts leadership at epoch {}", self.id, epoch);
        }
        self.epoch = epoch;
        self.resolved_epoch = cmp::max(self.resolved_epoch, epoch);

        self.coordinator_message()
    }

    pub fn coordinator_message(&self) -> Message {
        Message::Coordinator {
            from: self.id,
            epoch: self.epoch,
        }
    }

    /// Drops the active round, if any. The round worker notices the disconnected channel.
    pub fn cancel_round(&mut self) -> bool {
        match self.active_round.take() {
            Some(round) => {
                debug!(
                    "Node {} election round for epoch {} cancelled ({:?} before deadline)",
                    self.id,
                    round.epoch,
                    round.deadline.saturating_duration_since(Instant::now())
                );
                true
            }
            None => false,
        }
    }
}
