use crossbeam_channel::Receiver;
use derive_more::Display;

use crate::errors::BullyError;
use crate::NodeId;

/// Election protocol message. The epoch lets receivers discard messages from superseded rounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum Message {
    /// Candidate asks higher-priority peers whether any of them is alive.
    #[display(fmt = "Election (from {}, epoch {})", from, epoch)]
    Election { from: NodeId, epoch: u64 },

    /// Higher-priority peer tells the candidate to stand down.
    #[display(fmt = "Answer (from {}, epoch {})", from, epoch)]
    Answer { from: NodeId, epoch: u64 },

    /// Winner announcement. Leaders repeat it as a heartbeat.
    #[display(fmt = "Coordinator (from {}, epoch {})", from, epoch)]
    Coordinator { from: NodeId, epoch: u64 },
}

/// Message kind without the payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum MessageKind {
    Election,
    Answer,
    Coordinator,
}

impl Message {
    pub fn sender(&self) -> NodeId {
        match *self {
            Message::Election { from, .. }
            | Message::Answer { from, .. }
            | Message::Coordinator { from, .. } => from,
        }
    }

    pub fn epoch(&self) -> u64 {
        match *self {
            Message::Election { epoch, .. }
            | Message::Answer { epoch, .. }
            | Message::Coordinator { epoch, .. } => epoch,
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Election { .. } => MessageKind::Election,
            Message::Answer { .. } => MessageKind::Answer,
            Message::Coordinator { .. } => MessageKind::Coordinator,
        }
    }
}

/// Outbound side of the transport. Delivery is best-effort: an error or a silent drop
/// both mean the destination is unreachable for now.
pub trait Transport: Clone + Send + Sync + 'static {
    /// Sends the message to the destination node.
    fn send(&self, destination_node_id: NodeId, message: Message) -> Result<(), BullyError>;
}

/// Inbound side of the transport.
pub trait TransportChannels {
    /// Returns the inbound message stream of the node. Messages from one sender arrive in
    /// send order.
    fn message_rx(&self, node_id: NodeId) -> Result<Receiver<Message>, BullyError>;
}
