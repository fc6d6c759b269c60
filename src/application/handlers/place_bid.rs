//! PlaceBidHandler - the critical correctness path.
//!
//! Arbitrates a bid through the ledger and produces exactly one side
//! effect: a room-wide `bid_updated` broadcast on acceptance, or a
//! single `bid_error` unicast to the bidder on rejection.

use std::sync::Arc;

use crate::domain::auction::{AuctionId, BidAmount, BidError, BidLedger, ConnectionId};
use crate::ports::{Broadcaster, OutboundEvent};

/// Command to place a bid on an auction.
#[derive(Debug, Clone)]
pub struct PlaceBidCommand {
    pub connection_id: ConnectionId,
    pub auction_id: AuctionId,
    /// Raw amount in minor units, straight off the wire. Validated here
    /// before the ledger is consulted.
    pub amount: u64,
}

/// Outcome of a bid, reported to the caller for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// Bid won the arbitration; the room was notified.
    Accepted(BidAmount),
    /// Bid lost or was invalid; only the bidder was notified.
    Rejected,
}

/// Handler for `new_bid` events. Bids never touch membership; the room
/// is only a broadcast scope here.
pub struct PlaceBidHandler {
    ledger: Arc<BidLedger>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl PlaceBidHandler {
    pub fn new(ledger: Arc<BidLedger>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { ledger, broadcaster }
    }

    pub async fn handle(&self, command: PlaceBidCommand) -> BidOutcome {
        let amount = match BidAmount::try_new(command.amount) {
            Ok(amount) => amount,
            Err(err) => {
                tracing::debug!(
                    connection_id = %command.connection_id,
                    auction_id = %command.auction_id,
                    amount = command.amount,
                    "rejected malformed bid"
                );
                self.reject(&command.connection_id, err).await;
                return BidOutcome::Rejected;
            }
        };

        match self.ledger.try_accept(&command.auction_id, amount) {
            Ok(new_highest) => {
                tracing::info!(
                    connection_id = %command.connection_id,
                    auction_id = %command.auction_id,
                    amount = %new_highest,
                    "new highest bid"
                );
                self.broadcaster
                    .send_to_room(&command.auction_id, OutboundEvent::BidUpdated(new_highest))
                    .await;
                BidOutcome::Accepted(new_highest)
            }
            Err(err) => {
                tracing::debug!(
                    connection_id = %command.connection_id,
                    auction_id = %command.auction_id,
                    amount = %amount,
                    "bid rejected"
                );
                self.reject(&command.connection_id, err).await;
                BidOutcome::Rejected
            }
        }
    }

    async fn reject(&self, connection_id: &ConnectionId, err: BidError) {
        self.broadcaster
            .send_to_connection(connection_id, OutboundEvent::BidError(err.to_string()))
            .await;
    }
}
