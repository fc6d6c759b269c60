//! JoinAuctionHandler - a connection enters an auction room.

use std::sync::Arc;

use crate::domain::auction::{AuctionId, BidAmount, BidLedger, ConnectionId};
use crate::ports::{Broadcaster, OutboundEvent, RoomRegistry};

/// Command to join an auction room.
#[derive(Debug, Clone)]
pub struct JoinAuctionCommand {
    pub connection_id: ConnectionId,
    pub auction_id: AuctionId,
}

/// Handler for `join_auction` events.
///
/// Registers membership, then unicasts the current highest bid to the
/// joining connection only. Joins never broadcast to the room: no other
/// member is affected. Re-joining is idempotent and simply re-sends the
/// current bid.
pub struct JoinAuctionHandler {
    rooms: Arc<dyn RoomRegistry>,
    ledger: Arc<BidLedger>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl JoinAuctionHandler {
    pub fn new(
        rooms: Arc<dyn RoomRegistry>,
        ledger: Arc<BidLedger>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            rooms,
            ledger,
            broadcaster,
        }
    }

    /// Returns the highest bid that was unicast to the joiner.
    pub async fn handle(&self, command: JoinAuctionCommand) -> BidAmount {
        self.rooms
            .join(&command.connection_id, &command.auction_id)
            .await;

        let current = self.ledger.highest(&command.auction_id);

        tracing::info!(
            connection_id = %command.connection_id,
            auction_id = %command.auction_id,
            current_bid = %current,
            "connection joined auction"
        );

        self.broadcaster
            .send_to_connection(&command.connection_id, OutboundEvent::CurrentBid(current))
            .await;

        current
    }
}
