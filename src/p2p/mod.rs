//! Peer-to-peer gossip: wire messages, the peer registry, chain
//! reconciliation and the websocket transport.

mod connection;
mod error;
mod message;
mod node;
mod protocol;
mod registry;

pub use connection::{connect, serve, spawn_connect};
pub use error::PeerError;
pub use message::Message;
pub use node::Node;
pub use registry::PeerId;
