use rayon::prelude::*;

use crate::communication::peers::{Message, Transport};
use crate::errors;
use crate::errors::BullyError;
use crate::NodeId;

/// Sends the message to every peer in parallel. Returns the peers the transport accepted
/// the message for, or an error when no peer could be reached at all.
pub fn notify_peers<Tr: Transport>(
    message: Message,
    node_id: NodeId,
    peers: Vec<NodeId>,
    transport: &Tr,
) -> Result<Vec<NodeId>, BullyError> {
    if peers.is_empty() {
        return Ok(Vec::new());
    }

    let responses: Vec<(NodeId, Result<(), BullyError>)> = peers
        .into_par_iter()
        .map(|peer_id| (peer_id, transport.send(peer_id, message)))
        .collect();

    let mut delivered = Vec::new();
    let mut errors = Vec::new();
    for (peer_id, result) in responses {
        match result {
            Ok(()) => delivered.push(peer_id),
            Err(err) => {
                debug!("Node {} cannot send {} to Node {}: {}", node_id, message, peer_id, err);
                errors.push(err);
            }
        }
    }

    if delivered.is_empty() {
        return errors::new_multiple_err(
            format!("Cannot send {} to any peer", message.kind()),
            errors,
        );
    }

    trace!("Node {} sent {} to {:?}", node_id, message, delivered);
    Ok(delivered)
}
