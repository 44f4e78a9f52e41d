use thiserror::Error;
use tokio_tungstenite::tungstenite;

use super::PeerId;

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("peer {0} is not connected")]
    Disconnected(PeerId),

    #[error("invalid peer address: {0:?}")]
    InvalidAddress(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}
