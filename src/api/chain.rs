use actix_web::{HttpResponse, Responder, get, post, web};
use log::{error, info, warn};
use std::time::Instant;

use super::models::{AppState, ErrorResponse, HealthResponse, MineRequest, ValidateResponse};

/// Liveness probe reporting the tip height and live peer count.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        height: state.node.latest().index,
        peers: state.node.peer_addresses().len(),
    })
}

/// Get the full chain in index order.
#[get("/blocks")]
pub async fn get_blocks(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.node.blocks())
}

/// Validate the chain this node currently holds.
#[get("/validate")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.node.is_chain_valid(),
        length: state.node.chain_len(),
    })
}

/// Mine a block carrying `data` on top of the current tip, append it and
/// announce it to peers.
///
/// The proof-of-work search runs on the blocking pool so it never stalls
/// HTTP or peer traffic. If the tip moves while mining (a peer's block
/// arrived first), the result no longer extends the chain and is refused.
#[post("/mineBlock")]
pub async fn mine_block(state: web::Data<AppState>, req: web::Json<MineRequest>) -> impl Responder {
    let node = state.node.clone();
    let data = req.into_inner().data;
    let predecessor = node.latest();
    let miner = node.miner().clone();
    let cancel = node.shutdown_token().clone();

    info!(
        "MINER - mining block #{} (difficulty {})",
        predecessor.index + 1,
        miner.difficulty()
    );
    let t0 = Instant::now();
    let mined = web::block(move || miner.mine(&data, &predecessor, &cancel)).await;

    let block = match mined {
        Ok(Some(block)) => block,
        Ok(None) => {
            return HttpResponse::ServiceUnavailable()
                .json(ErrorResponse::new("node is shutting down"));
        }
        Err(e) => {
            error!("MINER - worker failed: {e}");
            return HttpResponse::InternalServerError().json(ErrorResponse::new(e));
        }
    };

    match node.submit_block(block) {
        Ok(block) => {
            info!(
                "MINER - sealed block #{} (hash={}, nonce={}) in {} ms",
                block.index,
                block.hash,
                block.nonce,
                t0.elapsed().as_millis()
            );
            HttpResponse::Ok().json(block)
        }
        Err(e) => {
            warn!("MINER - mined block refused: {e}");
            HttpResponse::Conflict().json(ErrorResponse::new(e))
        }
    }
}
