use std::collections::BTreeSet;

use derive_more::Display;

use crate::NodeId;

pub mod administrator;
pub mod node_leadership_fsm;

#[derive(Clone, Debug)]
pub enum LeaderElectionEvent {
    StartElection(ElectionTrigger),
    ConcludeRound(RoundSummary),
}

/// Why the node wants a new election round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum ElectionTrigger {
    #[display(fmt = "external request")]
    Manual,

    /// Failure detector gave up on the leader while the node was at this epoch.
    #[display(fmt = "leader timeout at epoch {}", observed_epoch)]
    LeaderTimeout { observed_epoch: u64 },

    /// A lower-priority node ran an election or claimed leadership.
    #[display(fmt = "challenge from Node {}", from)]
    Challenge { from: NodeId },
}

/// Result of a finished election round.
#[derive(Clone, Debug, Eq, PartialEq, Display)]
#[display(fmt = "epoch {} won {} answered by {:?}", epoch, won, answered_by)]
pub struct RoundSummary {
    pub epoch: u64,
    pub won: bool,
    pub answered_by: BTreeSet<NodeId>,
}
