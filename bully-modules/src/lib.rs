//! In-process building blocks for the `bully` crate: a transport with fault injection,
//! a membership directory, priority assignment and election timers.

#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use]
extern crate log;
extern crate bully;
extern crate crossbeam_channel;

mod cluster;
mod communication;
mod election;

pub use cluster::priority::PriorityAssignment;
pub use cluster::ClusterMembership;
pub use communication::inproc::inproc_transport::{InProcTransport, UnreachableMode};
pub use communication::mailbox::Mailbox;
pub use election::fixed_election_timer::FixedElectionTimer;
pub use election::randomized_election_timer::RandomizedElectionTimer;
