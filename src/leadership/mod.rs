use std::time::Duration;

pub mod election;
pub mod heartbeat_sender;
pub mod status;
pub mod watchdog;

/// Source of the election round deadline.
pub trait ElectionTimer: Send + Sync + 'static {
    fn next_election_timeout(&self) -> Duration;
}
