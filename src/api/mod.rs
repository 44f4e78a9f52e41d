mod chain;
pub mod models;
mod peers;

use actix_web::web::ServiceConfig;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(chain::health_check)
        .service(chain::get_blocks)
        .service(chain::mine_block)
        .service(chain::validate_chain)
        .service(peers::get_peers)
        .service(peers::add_peer);
}
