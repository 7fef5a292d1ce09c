use crate::communication::mailbox::Mailbox;

use bully::{new_err, BullyError, Message, MessageKind, NodeId, Transport, TransportChannels};
use crossbeam_channel::Receiver;
use parking_lot::{Mutex, RwLock};
use rand::Rng;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How an unreachable node looks to the senders.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum UnreachableMode {
    /// `send` returns an error.
    Fail,

    /// `send` succeeds and the message is lost.
    Drop,
}

#[derive(Debug, Default)]
struct FaultPlan {
    unreachable: HashMap<NodeId, UnreachableMode>,
    drop_rate: f64,
    latency: Option<Duration>,
}

enum Fault {
    Unreachable(NodeId, UnreachableMode),
    RandomDrop,
}

/// In-memory implementation of the Transport and TransportChannels traits with fault
/// injection. Clones share mailboxes, faults and counters.
#[derive(Clone, Debug)]
pub struct InProcTransport {
    mailboxes: Arc<RwLock<HashMap<NodeId, Mailbox<Message>>>>,
    faults: Arc<RwLock<FaultPlan>>,
    sent: Arc<Mutex<HashMap<(NodeId, MessageKind), usize>>>,
}

impl InProcTransport {
    /// Creates new instance of the InProcTransport with a mailbox per node.
    pub fn new(nodes: Vec<NodeId>) -> InProcTransport {
        let transport = InProcTransport {
            mailboxes: Arc::new(RwLock::new(HashMap::new())),
            faults: Arc::new(RwLock::new(FaultPlan::default())),
            sent: Arc::new(Mutex::new(HashMap::new())),
        };

        for node_id in nodes {
            transport.add_node(node_id);
        }

        transport
    }

    pub fn add_node(&self, node_id: NodeId) {
        let mailbox = Mailbox::new(format!("Inbound channel NodeId={}", node_id));

        self.mailboxes.write().entry(node_id).or_insert(mailbox);
    }

    /// Cuts the node off: nothing reaches it and nothing it sends gets out.
    pub fn set_unreachable(&self, node_id: NodeId, mode: UnreachableMode) {
        info!("Transport - Node {} unreachable ({:?})", node_id, mode);
        self.faults.write().unreachable.insert(node_id, mode);
    }

    pub fn set_reachable(&self, node_id: NodeId) {
        info!("Transport - Node {} reachable", node_id);
        self.faults.write().unreachable.remove(&node_id);
    }

    /// Probability of losing any single message, clamped to 0..=1.
    pub fn set_drop_rate(&self, drop_rate: f64) {
        let drop_rate = if drop_rate.is_nan() {
            0.0
        } else {
            drop_rate.max(0.0).min(1.0)
        };
        self.faults.write().drop_rate = drop_rate;
    }

    /// Delay applied by the sender before each delivery.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.faults.write().latency = latency;
    }

    /// Number of messages of the kind the node tried to send.
    pub fn sent_count(&self, from: NodeId, kind: MessageKind) -> usize {
        self.sent.lock().get(&(from, kind)).cloned().unwrap_or(0)
    }

    fn find_fault(
        &self,
        from: NodeId,
        destination_node_id: NodeId,
    ) -> (Option<Fault>, Option<Duration>) {
        let faults = self.faults.read();

        for node_id in &[from, destination_node_id] {
            if let Some(mode) = faults.unreachable.get(node_id) {
                return (Some(Fault::Unreachable(*node_id, *mode)), faults.latency);
            }
        }

        if faults.drop_rate > 0.0 && rand::thread_rng().gen_bool(faults.drop_rate) {
            return (Some(Fault::RandomDrop), faults.latency);
        }

        (None, faults.latency)
    }
}

impl Transport for InProcTransport {
    fn send(&self, destination_node_id: NodeId, message: Message) -> Result<(), BullyError> {
        let from = message.sender();
        *self.sent.lock().entry((from, message.kind())).or_insert(0) += 1;

        let (fault, latency) = self.find_fault(from, destination_node_id);
        match fault {
            Some(Fault::Unreachable(node_id, UnreachableMode::Fail)) => {
                return new_err(
                    format!("Cannot send {} to Node {}", message, destination_node_id),
                    format!("Node {} unreachable", node_id),
                );
            }
            Some(Fault::Unreachable(node_id, UnreachableMode::Drop)) => {
                trace!(
                    "Transport - {} to Node {} lost: Node {} unreachable",
                    message,
                    destination_node_id,
                    node_id
                );
                return Ok(());
            }
            Some(Fault::RandomDrop) => {
                trace!("Transport - {} to Node {} dropped", message, destination_node_id);
                return Ok(());
            }
            None => {}
        }

        if let Some(latency) = latency {
            thread::sleep(latency);
        }

        let mailbox = self.mailboxes.read().get(&destination_node_id).cloned();
        match mailbox {
            Some(mailbox) => {
                trace!("Destination Node {} Sending {}", destination_node_id, message);
                mailbox.deliver(message)
            }
            None => new_err(
                format!("Cannot send {}", message),
                format!("unknown Node {}", destination_node_id),
            ),
        }
    }
}

impl TransportChannels for InProcTransport {
    fn message_rx(&self, node_id: NodeId) -> Result<Receiver<Message>, BullyError> {
        match self.mailboxes.read().get(&node_id) {
            Some(mailbox) => Ok(mailbox.rx()),
            None => new_err(
                "Cannot open inbound channel".to_string(),
                format!("unknown Node {}", node_id),
            ),
        }
    }
}
