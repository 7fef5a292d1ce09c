use crossbeam_channel::Receiver;

use crate::communication::peer_notifier::notify_peers;
use crate::communication::peers::Transport;
use crate::membership::PeerDirectory;
use crate::node::configuration::NodeTimings;
use crate::node::state::{NodeStatus, ProtectedNode};

pub struct SendHeartbeatParams<Tr, Pd>
where
    Tr: Transport,
    Pd: PeerDirectory,
{
    pub protected_node: ProtectedNode,
    pub peer_directory: Pd,
    pub transport: Tr,
    pub timings: NodeTimings,
}

/// Leaders repeat their Coordinator message so the followers' failure detectors stay quiet.
pub fn send_leader_heartbeats<Tr, Pd>(
    params: SendHeartbeatParams<Tr, Pd>,
    terminate_worker_rx: Receiver<()>,
) where
    Tr: Transport,
    Pd: PeerDirectory,
{
    info!("Leader heartbeat sender worker started");
    loop {
        let heartbeat_timeout = crossbeam_channel::after(params.timings.leader_heartbeat_period());
        select!(
            recv(terminate_worker_rx) -> res  => {
                if res.is_err() {
                    error!("Abnormal exit for leader heartbeat sender worker");
                }
                break
            },
            recv(heartbeat_timeout) -> _  => {
                send_heartbeat(&params)
            },
        );
    }
    info!("Leader heartbeat sender worker stopped");
}

fn send_heartbeat<Tr, Pd>(params: &SendHeartbeatParams<Tr, Pd>)
where
    Tr: Transport,
    Pd: PeerDirectory,
{
    let (node_id, heartbeat) = {
        let node = params.protected_node.lock();
        if node.status != NodeStatus::Leader {
            return;
        }
        (node.id, node.coordinator_message())
    };

    let peers = match params.peer_directory.peers(node_id) {
        Ok(peers) => peers,
        Err(err) => {
            error!("Node {} cannot read membership for heartbeat: {}", node_id, err);
            return;
        }
    };

    trace!("Node {} Send heartbeat {}", node_id, heartbeat);
    if let Err(err) = notify_peers(heartbeat, node_id, peers, &params.transport) {
        warn!("Node {} Send heartbeat failed: {}", node_id, err)
    }
}
