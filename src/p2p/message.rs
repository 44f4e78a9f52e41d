use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::Block;

const QUERY_LATEST: i64 = 0;
const QUERY_ALL: i64 = 1;
const RESPONSE_BLOCKCHAIN: i64 = 2;

/// Gossip message exchanged over a peer connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    QueryLatest,
    QueryAll,
    /// One block (a tip) or a whole chain; only the length tells them apart.
    ResponseChain(Vec<Block>),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response frame carries no data")]
    MissingData,
}

/// On-the-wire shape: `{"type": n}` plus a JSON-encoded block array in `data`.
#[derive(Serialize, Deserialize)]
struct Frame {
    #[serde(rename = "type")]
    kind: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

impl Message {
    pub fn response_latest(latest: &Block) -> Self {
        Message::ResponseChain(vec![latest.clone()])
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        let frame = match self {
            Message::QueryLatest => Frame {
                kind: QUERY_LATEST,
                data: None,
            },
            Message::QueryAll => Frame {
                kind: QUERY_ALL,
                data: None,
            },
            Message::ResponseChain(blocks) => Frame {
                kind: RESPONSE_BLOCKCHAIN,
                data: Some(serde_json::to_string(blocks)?),
            },
        };
        Ok(serde_json::to_string(&frame)?)
    }

    /// Decode a text frame. Unknown message types yield `Ok(None)`.
    pub fn decode(text: &str) -> Result<Option<Self>, CodecError> {
        let frame: Frame = serde_json::from_str(text)?;
        let message = match frame.kind {
            QUERY_LATEST => Message::QueryLatest,
            QUERY_ALL => Message::QueryAll,
            RESPONSE_BLOCKCHAIN => {
                let data = frame.data.ok_or(CodecError::MissingData)?;
                Message::ResponseChain(serde_json::from_str(&data)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}
