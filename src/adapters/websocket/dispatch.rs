//! Explicit event dispatch table.
//!
//! Inbound event names map to handlers through a plain table built at
//! startup and validated against the full expected event set before the
//! server accepts connections. No reflection, no attribute-based
//! discovery: what routes where is visible in one place.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use thiserror::Error;

use crate::application::{
    BroadcastChatCommand, BroadcastChatHandler, JoinAuctionCommand, JoinAuctionHandler,
    LeaveAuctionCommand, LeaveAuctionHandler, PlaceBidCommand, PlaceBidHandler,
};
use crate::domain::auction::{AuctionId, ConnectionId};

use super::messages::{InboundFrame, NewBidPayload};

/// The complete inbound vocabulary. `validate` checks the table against
/// this list.
pub const EXPECTED_EVENTS: &[&str] = &["join_auction", "new_bid", "leave_auction", "message"];

type EventHandlerFn = Box<dyn Fn(ConnectionId, Value) -> BoxFuture<'static, ()> + Send + Sync>;

/// Errors detected while validating the dispatch table at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no handler registered for event '{0}'")]
    MissingHandler(&'static str),

    #[error("handler registered twice for event '{0}'")]
    DuplicateHandler(&'static str),

    #[error("handler registered for event '{0}' which is not in the expected set")]
    UnexpectedHandler(String),
}

/// Maps inbound event names to handler functions.
pub struct EventRouter {
    routes: HashMap<&'static str, EventHandlerFn>,
    duplicates: Vec<&'static str>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Registers a handler for an event name. Double registration is
    /// recorded and reported by [`EventRouter::validate`].
    pub fn route<F, Fut>(mut self, event: &'static str, handler: F) -> Self
    where
        F: Fn(ConnectionId, Value) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let boxed: EventHandlerFn = Box::new(move |connection_id, data| {
            Box::pin(handler(connection_id, data))
        });
        if self.routes.insert(event, boxed).is_some() {
            self.duplicates.push(event);
        }
        self
    }

    /// Checks the table covers exactly the expected event set.
    pub fn validate(&self) -> Result<(), DispatchError> {
        if let Some(event) = self.duplicates.first().copied() {
            return Err(DispatchError::DuplicateHandler(event));
        }
        for event in EXPECTED_EVENTS.iter().copied() {
            if !self.routes.contains_key(event) {
                return Err(DispatchError::MissingHandler(event));
            }
        }
        for event in self.routes.keys() {
            if !EXPECTED_EVENTS.contains(event) {
                return Err(DispatchError::UnexpectedHandler(event.to_string()));
            }
        }
        Ok(())
    }

    /// Routes a frame to its handler. Unknown event names are logged
    /// and ignored; they are a client bug, not a server error.
    pub async fn dispatch(&self, connection_id: ConnectionId, frame: InboundFrame) {
        match self.routes.get(frame.event.as_str()) {
            Some(handler) => handler(connection_id, frame.data).await,
            None => {
                tracing::warn!(
                    %connection_id,
                    event = %frame.event,
                    "ignoring unknown event"
                );
            }
        }
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the production dispatch table over the application handlers.
///
/// Malformed payloads are logged and dropped before any handler runs;
/// amount validation beyond parsing (e.g. zero bids) belongs to
/// [`PlaceBidHandler`].
pub fn auction_event_router(
    join: Arc<JoinAuctionHandler>,
    bid: Arc<PlaceBidHandler>,
    leave: Arc<LeaveAuctionHandler>,
    chat: Arc<BroadcastChatHandler>,
) -> EventRouter {
    EventRouter::new()
        .route("join_auction", move |connection_id, data| {
            let join = Arc::clone(&join);
            async move {
                match serde_json::from_value::<String>(data) {
                    Ok(auction_id) => {
                        join.handle(JoinAuctionCommand {
                            connection_id,
                            auction_id: AuctionId::new(auction_id),
                        })
                        .await;
                    }
                    Err(err) => {
                        tracing::warn!(%connection_id, %err, "malformed join_auction payload");
                    }
                }
            }
        })
        .route("new_bid", move |connection_id, data| {
            let bid = Arc::clone(&bid);
            async move {
                match serde_json::from_value::<NewBidPayload>(data) {
                    Ok(payload) => {
                        bid.handle(PlaceBidCommand {
                            connection_id,
                            auction_id: AuctionId::new(payload.auction_id),
                            amount: payload.bid_amount,
                        })
                        .await;
                    }
                    Err(err) => {
                        tracing::warn!(%connection_id, %err, "malformed new_bid payload");
                    }
                }
            }
        })
        .route("leave_auction", move |connection_id, data| {
            let leave = Arc::clone(&leave);
            async move {
                match serde_json::from_value::<String>(data) {
                    Ok(auction_id) => {
                        leave
                            .handle(LeaveAuctionCommand {
                                connection_id,
                                auction_id: AuctionId::new(auction_id),
                            })
                            .await;
                    }
                    Err(err) => {
                        tracing::warn!(%connection_id, %err, "malformed leave_auction payload");
                    }
                }
            }
        })
        .route("message", move |connection_id, data| {
            let chat = Arc::clone(&chat);
            async move {
                // Chat is free-text: accept strings as-is and stringify
                // anything else rather than reject it.
                let text = match data {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                chat.handle(BroadcastChatCommand {
                    connection_id,
                    text,
                })
                .await;
            }
        })
}
