//! # Bully leader election
//!
//! Every node has a unique, totally ordered priority (its `NodeId`). The highest-priority
//! node that can be reached becomes the leader; followers watch the leader's heartbeats and
//! run a new election when it goes silent.
//!
//! The crate consumes two injected collaborators: a [`Transport`] that moves [`Message`]s
//! between nodes and a [`PeerDirectory`] with the membership. In-process implementations
//! live in the `bully-modules` crate.

#![warn(missing_debug_implementations, unsafe_code)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate crossbeam_channel;

mod common;
mod communication;
mod errors;
mod leadership;
mod membership;
mod node;
mod request_handler;

/// Node priority. Unique within the cluster; higher wins.
pub type NodeId = u64;

pub use communication::peers::{Message, MessageKind, Transport, TransportChannels};
pub use errors::{new_err, BullyError, Discard};
pub use leadership::status::{ElectionTrigger, RoundSummary};
pub use leadership::ElectionTimer;
pub use membership::{MembershipSnapshot, PeerDirectory};
pub use node::configuration::{NodeConfiguration, NodeTimings};
pub use node::state::{NodeStatus, StatusReport};
pub use node::NodeHandle;

/// Starts the node workers. Fails when the configuration is invalid or the membership
/// cannot be read.
pub fn start_node<Tr, Pd, Et>(
    node_config: NodeConfiguration<Tr, Pd, Et>,
) -> Result<NodeHandle, BullyError>
where
    Tr: Transport + TransportChannels,
    Pd: PeerDirectory,
    Et: ElectionTimer,
{
    node::start_node(node_config)
}
