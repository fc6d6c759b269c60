//! LeaveAuctionHandler - a connection departs an auction room.

use std::sync::Arc;

use crate::domain::auction::{AuctionId, ConnectionId};
use crate::ports::RoomRegistry;

/// Command to leave an auction room.
#[derive(Debug, Clone)]
pub struct LeaveAuctionCommand {
    pub connection_id: ConnectionId,
    pub auction_id: AuctionId,
}

/// Handler for `leave_auction` events.
///
/// Remaining members are deliberately not notified of departures, and
/// leaving a room never joined is a no-op. Leaving also severs the
/// connection's global chat subscription; only a fresh connection
/// restores it.
pub struct LeaveAuctionHandler {
    rooms: Arc<dyn RoomRegistry>,
}

impl LeaveAuctionHandler {
    pub fn new(rooms: Arc<dyn RoomRegistry>) -> Self {
        Self { rooms }
    }

    pub async fn handle(&self, command: LeaveAuctionCommand) {
        self.rooms
            .leave(&command.connection_id, &command.auction_id)
            .await;
        self.rooms.sever_chat(&command.connection_id).await;

        tracing::info!(
            connection_id = %command.connection_id,
            auction_id = %command.auction_id,
            "connection left auction"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::RecordingRooms;

    #[tokio::test]
    async fn leave_delegates_to_the_registry() {
        let rooms = Arc::new(RecordingRooms::new());
        let handler = LeaveAuctionHandler::new(rooms.clone());
        let connection_id = ConnectionId::new();

        handler
            .handle(LeaveAuctionCommand {
                connection_id,
                auction_id: AuctionId::new("A1"),
            })
            .await;

        assert_eq!(rooms.left(), vec![(connection_id, AuctionId::new("A1"))]);
    }

    #[tokio::test]
    async fn double_leave_is_idempotent() {
        let rooms = Arc::new(RecordingRooms::new());
        let handler = LeaveAuctionHandler::new(rooms.clone());
        let connection_id = ConnectionId::new();
        let command = LeaveAuctionCommand {
            connection_id,
            auction_id: AuctionId::new("A1"),
        };

        handler.handle(command.clone()).await;
        handler.handle(command).await;

        // Both calls reach the registry; the registry treats the second
        // as a no-op.
        assert_eq!(rooms.left().len(), 2);
    }

    #[tokio::test]
    async fn leave_severs_the_chat_subscription() {
        let rooms = Arc::new(RecordingRooms::new());
        let handler = LeaveAuctionHandler::new(rooms.clone());
        let connection_id = ConnectionId::new();
        assert!(!rooms.chat_severed(&connection_id).await);

        handler
            .handle(LeaveAuctionCommand {
                connection_id,
                auction_id: AuctionId::new("A1"),
            })
            .await;

        assert!(rooms.chat_severed(&connection_id).await);
    }
}
