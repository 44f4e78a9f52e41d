mod api;
mod blockchain;
mod config;
mod miner;
mod p2p;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use tokio::net::TcpListener;

use api::AppState;
use config::NodeConfig;
use miner::Miner;
use p2p::Node;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let node = Arc::new(Node::new(Miner::new(config.difficulty)));

    println!(
        "⛓️ Starting ledger node: http://{}:{} p2p ws://{}:{} (difficulty {})",
        config.host, config.http_port, config.host, config.p2p_port, config.difficulty
    );

    let listener = TcpListener::bind((config.host.as_str(), config.p2p_port)).await?;
    tokio::spawn(p2p::serve(node.clone(), listener));

    for peer in &config.peers {
        p2p::spawn_connect(node.clone(), peer.clone());
    }

    let state = web::Data::new(AppState { node: node.clone() });
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .disable_signals()
    .bind((config.host.as_str(), config.http_port))?
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutting down");
            node.shutdown_token().cancel();
            handle.stop(true).await;
        }
    });

    server.await
}
