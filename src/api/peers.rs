use actix_web::{HttpResponse, Responder, get, post, web};
use log::warn;

use super::models::{AddPeerRequest, AddPeerResponse, AppState, ErrorResponse};
use crate::p2p::{self, PeerError};

/// List `address:port` of every live peer connection.
#[get("/peers")]
pub async fn get_peers(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.node.peer_addresses())
}

/// Dial a new peer; the session (and its `QueryLatest` probe) starts once
/// the websocket handshake completes.
#[post("/addPeer")]
pub async fn add_peer(state: web::Data<AppState>, req: web::Json<AddPeerRequest>) -> impl Responder {
    let peer = req.into_inner().peer;
    match p2p::connect(state.node.clone(), &peer).await {
        Ok(remote) => HttpResponse::Ok().json(AddPeerResponse {
            peer,
            remote: remote.to_string(),
        }),
        Err(e @ PeerError::InvalidAddress(_)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(e))
        }
        Err(e) => {
            warn!("addPeer {peer} failed: {e}");
            HttpResponse::BadGateway().json(ErrorResponse::new(e))
        }
    }
}
