//! Wire message types for the auction WebSocket protocol.
//!
//! Every frame, in both directions, is a JSON envelope:
//!
//! ```json
//! {"event": "<name>", "data": <payload>}
//! ```
//!
//! Event names are fixed for wire compatibility with existing clients:
//! inbound `join_auction`, `new_bid`, `leave_auction`, `message`;
//! outbound `current_bid`, `bid_updated`, `bid_error`, `message`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::auction::BidAmount;
use crate::ports::OutboundEvent;

// ============================================
// Client → Server
// ============================================

/// Raw inbound envelope. The event name is kept as a string so the
/// dispatch table can route on it explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Payload of a `new_bid` event.
///
/// `bidAmount` deserializes into `u64` minor units; negative or
/// fractional amounts fail parsing and never reach the handlers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBidPayload {
    pub auction_id: String,
    pub bid_amount: u64,
}

// ============================================
// Server → Client
// ============================================

/// All frames the server sends, tagged with their wire event name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerFrame {
    /// Highest bid at join time (unicast).
    CurrentBid(BidAmount),
    /// New highest bid (room broadcast).
    BidUpdated(BidAmount),
    /// Human-readable rejection reason (unicast).
    BidError(String),
    /// Chat line, already prefixed with the sender tag (global).
    Message(String),
}

impl From<OutboundEvent> for ServerFrame {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::CurrentBid(amount) => ServerFrame::CurrentBid(amount),
            OutboundEvent::BidUpdated(amount) => ServerFrame::BidUpdated(amount),
            OutboundEvent::BidError(reason) => ServerFrame::BidError(reason),
            OutboundEvent::Chat(line) => ServerFrame::Message(line),
        }
    }
}
