use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::p2p::Node;

/// Shared application state handed to every handler.
pub struct AppState {
    pub node: Arc<Node>,
}

#[derive(Deserialize)]
pub struct MineRequest {
    pub data: String,
}

#[derive(Deserialize)]
pub struct AddPeerRequest {
    pub peer: String,
}

#[derive(Serialize, Deserialize)]
pub struct AddPeerResponse {
    pub peer: String,
    pub remote: String,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub height: u64,
    pub peers: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
