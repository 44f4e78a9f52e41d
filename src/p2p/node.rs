use std::sync::Mutex;

use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;

use super::protocol::{Decision, reconcile};
use super::registry::{PeerId, PeerRegistry};
use super::Message;
use crate::blockchain::{Block, ChainStore, StoreError, is_valid_chain};
use crate::miner::{CancelToken, Miner};

/// Chain and peers behind one lock, so validation, mutation and the
/// resulting broadcast always see the same chain state.
#[derive(Debug, Default)]
struct NodeState {
    chain: ChainStore,
    peers: PeerRegistry,
}

/// Shared handle used by peer connections and HTTP handlers alike.
pub struct Node {
    state: Mutex<NodeState>,
    miner: Miner,
    shutdown: CancelToken,
}

impl Node {
    pub fn new(miner: Miner) -> Self {
        Self {
            state: Mutex::new(NodeState::default()),
            miner,
            shutdown: CancelToken::new(),
        }
    }

    pub fn miner(&self) -> &Miner {
        &self.miner
    }

    /// Fires when the node is shutting down; in-flight mining stops on it.
    pub fn shutdown_token(&self) -> &CancelToken {
        &self.shutdown
    }

    pub fn blocks(&self) -> Vec<Block> {
        let state = self.state.lock().expect("mutex poisoned");
        state.chain.blocks().to_vec()
    }

    pub fn latest(&self) -> Block {
        let state = self.state.lock().expect("mutex poisoned");
        state.chain.latest().clone()
    }

    pub fn chain_len(&self) -> usize {
        let state = self.state.lock().expect("mutex poisoned");
        state.chain.len()
    }

    pub fn is_chain_valid(&self) -> bool {
        let state = self.state.lock().expect("mutex poisoned");
        is_valid_chain(state.chain.blocks())
    }

    pub fn peer_addresses(&self) -> Vec<String> {
        let state = self.state.lock().expect("mutex poisoned");
        state.peers.addresses()
    }

    /// Register a fresh connection and probe it with `QueryLatest`.
    pub fn connect_peer(&self, addr: String, outbound: UnboundedSender<Message>) -> PeerId {
        let mut state = self.state.lock().expect("mutex poisoned");
        let id = state.peers.add(addr, outbound);
        if let Err(e) = state.peers.send(id, Message::QueryLatest) {
            debug!("probe to peer {id} failed: {e}");
        }
        id
    }

    pub fn disconnect_peer(&self, id: PeerId) {
        let mut state = self.state.lock().expect("mutex poisoned");
        state.peers.remove(id);
    }

    /// Append a locally mined block and announce it to every peer.
    pub fn submit_block(&self, block: Block) -> Result<Block, StoreError> {
        let mut state = self.state.lock().expect("mutex poisoned");
        let latest = state.chain.append(block)?.clone();
        let delivered = state.peers.broadcast(&Message::response_latest(&latest));
        info!(
            "block #{} added, announced to {} peer(s)",
            latest.index, delivered
        );
        Ok(latest)
    }

    /// Decode a raw text frame from `from`. Bad frames are logged and dropped.
    pub fn handle_frame(&self, from: PeerId, text: &str) {
        match Message::decode(text) {
            Ok(Some(message)) => self.handle_message(from, message),
            Ok(None) => debug!("ignoring unknown message type from peer {from}"),
            Err(e) => warn!("dropping frame from peer {from}: {e}"),
        }
    }

    pub fn handle_message(&self, from: PeerId, message: Message) {
        let mut state = self.state.lock().expect("mutex poisoned");
        let NodeState { chain, peers } = &mut *state;

        match message {
            Message::QueryLatest => {
                debug!("peer {from} queried latest block");
                reply(peers, from, Message::response_latest(chain.latest()));
            }
            Message::QueryAll => {
                debug!("peer {from} queried full chain");
                reply(peers, from, Message::ResponseChain(chain.blocks().to_vec()));
            }
            Message::ResponseChain(blocks) => {
                debug!("peer {from} sent {} block(s)", blocks.len());
                match reconcile(chain.latest(), blocks) {
                    Decision::Ignore => {}
                    Decision::Append(block) => match chain.append(block) {
                        Ok(latest) => {
                            peers.broadcast(&Message::response_latest(latest));
                        }
                        Err(e) => warn!("block from peer {from} discarded: {e}"),
                    },
                    Decision::QueryAll => reply(peers, from, Message::QueryAll),
                    Decision::Replace(candidate) => match chain.replace(candidate) {
                        Ok(latest) => {
                            info!("chain replaced with peer {from}'s, now at #{}", latest.index);
                            peers.broadcast(&Message::response_latest(latest));
                        }
                        Err(e) => warn!("chain from peer {from} discarded: {e}"),
                    },
                }
            }
        }
    }
}

fn reply(peers: &mut PeerRegistry, to: PeerId, message: Message) {
    if let Err(e) = peers.send(to, message) {
        debug!("reply to peer {to} dropped: {e}");
    }
}
