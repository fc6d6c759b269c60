//! Process bootstrap: configuration, tracing, wiring, serve.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use gavel::adapters::websocket::{auction_event_router, websocket_router, RoomManager, WebSocketState};
use gavel::application::{
    BroadcastChatHandler, JoinAuctionHandler, LeaveAuctionHandler, PlaceBidHandler,
    RemoveConnectionHandler,
};
use gavel::config::AppConfig;
use gavel::domain::auction::BidLedger;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let room_manager = Arc::new(RoomManager::new());
    let ledger = Arc::new(BidLedger::new());

    let router = auction_event_router(
        Arc::new(JoinAuctionHandler::new(
            room_manager.clone(),
            ledger.clone(),
            room_manager.clone(),
        )),
        Arc::new(PlaceBidHandler::new(ledger, room_manager.clone())),
        Arc::new(LeaveAuctionHandler::new(room_manager.clone())),
        Arc::new(BroadcastChatHandler::new(
            room_manager.clone(),
            room_manager.clone(),
            config.websocket.max_chat_chars,
        )),
    );
    if let Err(err) = router.validate() {
        eprintln!("event routing misconfigured: {err}");
        std::process::exit(1);
    }

    let state = WebSocketState::new(
        room_manager.clone(),
        Arc::new(router),
        Arc::new(RemoveConnectionHandler::new(room_manager)),
        config.websocket.max_frame_bytes,
    );

    let app = websocket_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr = match config.server.socket_addr() {
        Ok(addr) => addr,
        Err(err) => {
            eprintln!("invalid bind address: {err}");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "auction room service listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%err, "failed to bind listener");
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(%err, "server error");
        std::process::exit(1);
    }
}
