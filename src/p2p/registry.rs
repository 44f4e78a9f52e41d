use std::collections::HashMap;

use log::{debug, info};
use tokio::sync::mpsc::UnboundedSender;

use super::Message;
use super::error::PeerError;

/// Stable handle for one live connection.
pub type PeerId = u64;

#[derive(Debug)]
struct PeerHandle {
    addr: String,
    outbound: UnboundedSender<Message>,
}

/// Live peer connections keyed by [`PeerId`].
///
/// Each entry owns the sending half of the connection's outbound queue. A
/// send that finds the queue closed means the writer is gone, and the entry
/// is dropped on the spot. The same address may be registered more than once.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    next_id: PeerId,
    peers: HashMap<PeerId, PeerHandle>,
}

impl PeerRegistry {
    pub fn add(&mut self, addr: String, outbound: UnboundedSender<Message>) -> PeerId {
        let id = self.next_id;
        self.next_id += 1;
        info!("peer {id} connected ({addr}), {} live", self.peers.len() + 1);
        self.peers.insert(id, PeerHandle { addr, outbound });
        id
    }

    pub fn remove(&mut self, id: PeerId) -> bool {
        match self.peers.remove(&id) {
            Some(peer) => {
                info!("peer {id} ({}) disconnected, {} live", peer.addr, self.peers.len());
                true
            }
            None => false,
        }
    }

    pub fn send(&mut self, id: PeerId, message: Message) -> Result<(), PeerError> {
        let peer = self.peers.get(&id).ok_or(PeerError::Disconnected(id))?;
        if peer.outbound.send(message).is_err() {
            self.remove(id);
            return Err(PeerError::Disconnected(id));
        }
        Ok(())
    }

    /// Deliver `message` to every peer; returns how many accepted it.
    pub fn broadcast(&mut self, message: &Message) -> usize {
        let ids: Vec<PeerId> = self.peers.keys().copied().collect();
        let mut delivered = 0;
        for id in ids {
            match self.send(id, message.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => debug!("broadcast skipped peer {id}: {e}"),
            }
        }
        delivered
    }

    pub fn addresses(&self) -> Vec<String> {
        self.peers.values().map(|p| p.addr.clone()).collect()
    }
}
