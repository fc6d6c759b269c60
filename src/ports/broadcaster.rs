//! Broadcaster port - Interface for delivering events to clients.
//!
//! The core treats delivery as fire-and-forget: no confirmation, no
//! retry. A failed send (e.g. a client that disconnected mid-delivery)
//! is the transport's concern and must never surface as a handler error.

use async_trait::async_trait;

use crate::domain::auction::{AuctionId, BidAmount, ConnectionId};

/// An event delivered to clients. The adapter maps each variant onto
/// its wire event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Highest bid at join time, unicast to the joining connection.
    CurrentBid(BidAmount),
    /// New highest bid, broadcast to the auction's room.
    BidUpdated(BidAmount),
    /// Rejection reason, unicast to the offending bidder.
    BidError(String),
    /// Free-text chat line, broadcast to every connected client.
    Chat(String),
}

/// Port for delivering events to one connection, to a room, or to all
/// connections.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Delivers an event to exactly one connection.
    async fn send_to_connection(&self, connection_id: &ConnectionId, event: OutboundEvent);

    /// Delivers an event to every connection currently in the auction's
    /// room. A room with no members is a no-op.
    async fn send_to_room(&self, auction_id: &AuctionId, event: OutboundEvent);

    /// Delivers an event to every currently connected client.
    async fn send_to_all(&self, event: OutboundEvent);
}
