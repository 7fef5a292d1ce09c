use crossbeam_channel::{Receiver, Sender};

use crate::leadership::status::{ElectionTrigger, LeaderElectionEvent, RoundSummary};

/// Posts election events to the node's own queue.
pub trait NodeElections: Clone + Send + 'static {
    fn start_election(&self, trigger: ElectionTrigger);
    fn conclude_round(&self, summary: RoundSummary);
}

pub trait NodeElectionsChannelRx {
    fn leader_election_event_rx(&self) -> &Receiver<LeaderElectionEvent>;
}

#[derive(Debug, Clone)]
pub struct ElectionsAdministrator {
    leader_election_tx: Sender<LeaderElectionEvent>,
    leader_election_rx: Receiver<LeaderElectionEvent>,
}

impl ElectionsAdministrator {
    pub fn new() -> ElectionsAdministrator {
        let (leader_election_tx, leader_election_rx): (
            Sender<LeaderElectionEvent>,
            Receiver<LeaderElectionEvent>,
        ) = crossbeam_channel::unbounded();

        ElectionsAdministrator {
            leader_election_tx,
            leader_election_rx,
        }
    }

    fn post(&self, event: LeaderElectionEvent) {
        if let Err(err) = self.leader_election_tx.send(event) {
            error!("Cannot send leader election event: {}", err);
        }
    }
}

impl Default for ElectionsAdministrator {
    fn default() -> Self {
        ElectionsAdministrator::new()
    }
}

impl NodeElections for ElectionsAdministrator {
    fn start_election(&self, trigger: ElectionTrigger) {
        self.post(LeaderElectionEvent::StartElection(trigger));
    }

    fn conclude_round(&self, summary: RoundSummary) {
        self.post(LeaderElectionEvent::ConcludeRound(summary));
    }
}

impl NodeElectionsChannelRx for ElectionsAdministrator {
    fn leader_election_event_rx(&self) -> &Receiver<LeaderElectionEvent> {
        &self.leader_election_rx
    }
}
