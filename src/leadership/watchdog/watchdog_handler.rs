use crossbeam_channel::{Receiver, Sender};

use crate::NodeId;

/// Evidence that the leader is alive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LeaderConfirmationEvent {
    /// Heartbeat or Coordinator accepted from the leader.
    Heartbeat { leader_id: NodeId, epoch: u64 },

    /// Leadership changed locally: start counting from scratch.
    ResetWatchdogCounter,
}

pub trait ResetLeadershipStatusWatchdog: Clone {
    fn confirm_leader(&self, leader_id: NodeId, epoch: u64);
    fn reset_leadership_status_watchdog(&self);
}

pub trait ResetLeadershipEventChannelRx {
    fn reset_leadership_watchdog_rx(&self) -> &Receiver<LeaderConfirmationEvent>;
}

#[derive(Debug, Clone)]
pub struct LeadershipStatusWatchdogHandler {
    reset_leadership_watchdog_tx: Sender<LeaderConfirmationEvent>,
    reset_leadership_watchdog_rx: Receiver<LeaderConfirmationEvent>,
}

impl LeadershipStatusWatchdogHandler {
    pub fn new() -> LeadershipStatusWatchdogHandler {
        let (reset_leadership_watchdog_tx, reset_leadership_watchdog_rx): (
            Sender<LeaderConfirmationEvent>,
            Receiver<LeaderConfirmationEvent>,
        ) = crossbeam_channel::unbounded();

        LeadershipStatusWatchdogHandler {
            reset_leadership_watchdog_tx,
            reset_leadership_watchdog_rx,
        }
    }

    fn send(&self, event: LeaderConfirmationEvent) {
        if let Err(err) = self.reset_leadership_watchdog_tx.send(event) {
            error!("Cannot send leadership confirmation event: {}", err);
        }
    }
}

impl Default for LeadershipStatusWatchdogHandler {
    fn default() -> Self {
        LeadershipStatusWatchdogHandler::new()
    }
}

impl ResetLeadershipStatusWatchdog for LeadershipStatusWatchdogHandler {
    fn confirm_leader(&self, leader_id: NodeId, epoch: u64) {
        self.send(LeaderConfirmationEvent::Heartbeat { leader_id, epoch });
    }

    fn reset_leadership_status_watchdog(&self) {
        self.send(LeaderConfirmationEvent::ResetWatchdogCounter);
    }
}

impl ResetLeadershipEventChannelRx for LeadershipStatusWatchdogHandler {
    fn reset_leadership_watchdog_rx(&self) -> &Receiver<LeaderConfirmationEvent> {
        &self.reset_leadership_watchdog_rx
    }
}
