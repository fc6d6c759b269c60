//! RemoveConnectionHandler - disconnect cleanup.
//!
//! The transport invokes this when a socket closes, gracefully or not,
//! so abrupt disconnects cannot leave stale room membership behind.

use std::sync::Arc;

use crate::domain::auction::{AuctionId, ConnectionId};
use crate::ports::RoomRegistry;

/// Command to remove a connection from every room it belongs to.
#[derive(Debug, Clone)]
pub struct RemoveConnectionCommand {
    pub connection_id: ConnectionId,
}

/// Handler wired to the transport's disconnect path.
pub struct RemoveConnectionHandler {
    rooms: Arc<dyn RoomRegistry>,
}

impl RemoveConnectionHandler {
    pub fn new(rooms: Arc<dyn RoomRegistry>) -> Self {
        Self { rooms }
    }

    /// Returns the auctions the connection was removed from.
    pub async fn handle(&self, command: RemoveConnectionCommand) -> Vec<AuctionId> {
        let left = self.rooms.leave_all(&command.connection_id).await;

        tracing::info!(
            connection_id = %command.connection_id,
            rooms_left = left.len(),
            "connection removed from all rooms"
        );

        left
    }
}
