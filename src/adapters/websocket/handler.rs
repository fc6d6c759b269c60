//! WebSocket upgrade handler and connection lifecycle.
//!
//! Connection lifecycle:
//! 1. Upgrade to WebSocket and assign a ConnectionId
//! 2. Register the outbound queue with the room manager
//! 3. Writer task drains the queue onto the socket; reader task parses
//!    envelopes and routes them through the dispatch table
//! 4. When either task ends, the connection is removed from all rooms
//!    and unregistered — abrupt disconnects leave no stale membership

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};

use crate::application::{RemoveConnectionCommand, RemoveConnectionHandler};
use crate::domain::auction::ConnectionId;

use super::{
    dispatch::EventRouter,
    messages::{InboundFrame, ServerFrame},
    rooms::RoomManager,
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub room_manager: Arc<RoomManager>,
    pub router: Arc<EventRouter>,
    pub remove_connection: Arc<RemoveConnectionHandler>,
    /// Hard cap on inbound frame size, from config.
    pub max_frame_bytes: usize,
}

impl WebSocketState {
    pub fn new(
        room_manager: Arc<RoomManager>,
        router: Arc<EventRouter>,
        remove_connection: Arc<RemoveConnectionHandler>,
        max_frame_bytes: usize,
    ) -> Self {
        Self {
            room_manager,
            router,
            remove_connection,
            max_frame_bytes,
        }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.max_message_size(state.max_frame_bytes)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = ConnectionId::new();

    let mut outbound = state.room_manager.register(connection_id).await;
    tracing::info!(%connection_id, "websocket connected");

    // Writer: drain the outbound queue onto the socket. Delivery is
    // fire-and-forget; a failed send just ends the connection.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            let frame = ServerFrame::from(event);
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(err) => {
                    tracing::error!(%connection_id, %err, "failed to serialize frame");
                    continue;
                }
            };
            if sender.send(Message::Text(json)).await.is_err() {
                tracing::debug!(%connection_id, "send failed, closing connection");
                break;
            }
        }
    });

    // Reader: parse envelopes and route them.
    let router = Arc::clone(&state.router);
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => match serde_json::from_str::<InboundFrame>(&text) {
                    Ok(frame) => router.dispatch(connection_id, frame).await,
                    Err(err) => {
                        tracing::warn!(%connection_id, %err, "malformed frame");
                    }
                },
                Ok(Message::Binary(_)) => {
                    tracing::warn!(%connection_id, "binary messages not supported");
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level, handled by axum.
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(%connection_id, "client sent close frame");
                    break;
                }
                Err(err) => {
                    tracing::debug!(%connection_id, %err, "receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    // Same cleanup path for graceful and abrupt disconnects.
    state
        .remove_connection
        .handle(RemoveConnectionCommand { connection_id })
        .await;
    state.room_manager.unregister(&connection_id).await;
    tracing::info!(%connection_id, "websocket disconnected");
}

/// Create the axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        BroadcastChatHandler, JoinAuctionHandler, LeaveAuctionHandler, PlaceBidHandler,
    };
    use crate::domain::auction::BidLedger;
    use crate::adapters::websocket::dispatch::auction_event_router;

    fn test_state() -> WebSocketState {
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
                512,
            )),
        );

        WebSocketState::new(
            room_manager.clone(),
            Arc::new(router),
            Arc::new(RemoveConnectionHandler::new(room_manager)),
            64 * 1024,
        )
    }

    #[test]
    fn state_router_validates() {
        let state = test_state();
        assert!(state.router.validate().is_ok());
    }

    #[test]
    fn websocket_router_builds() {
        let _router: axum::Router = websocket_router().with_state(test_state());
    }
}
