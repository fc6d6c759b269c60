//! BroadcastChatHandler - global free-text messaging.
//!
//! Auction-independent path: any connection may emit a message which is
//! delivered to every connected client, tagged with a truncated sender
//! id. No ordering guarantee across senders beyond natural delivery
//! order, and no invariants beyond "delivered to all currently
//! connected clients at time of send". Connections whose chat
//! subscription was severed by a room leave have their frames dropped.

use std::sync::Arc;

use crate::domain::auction::ConnectionId;
use crate::ports::{Broadcaster, OutboundEvent, RoomRegistry};

/// Command to broadcast a chat message to all connections.
#[derive(Debug, Clone)]
pub struct BroadcastChatCommand {
    pub connection_id: ConnectionId,
    pub text: String,
}

/// Handler for `message` events.
pub struct BroadcastChatHandler {
    rooms: Arc<dyn RoomRegistry>,
    broadcaster: Arc<dyn Broadcaster>,
    max_message_chars: usize,
}

impl BroadcastChatHandler {
    pub fn new(
        rooms: Arc<dyn RoomRegistry>,
        broadcaster: Arc<dyn Broadcaster>,
        max_message_chars: usize,
    ) -> Self {
        Self {
            rooms,
            broadcaster,
            max_message_chars,
        }
    }

    /// Returns the line as delivered to clients, or `None` when the
    /// sender's chat subscription has been severed.
    pub async fn handle(&self, command: BroadcastChatCommand) -> Option<String> {
        if self.rooms.chat_severed(&command.connection_id).await {
            tracing::debug!(
                connection_id = %command.connection_id,
                "dropping chat from severed subscription"
            );
            return None;
        }

        let text: String = command
            .text
            .chars()
            .take(self.max_message_chars)
            .collect();

        let line = format!("user-{}: {}", command.connection_id.short(), text);

        tracing::debug!(
            connection_id = %command.connection_id,
            chars = line.len(),
            "broadcasting chat message"
        );

        self.broadcaster
            .send_to_all(OutboundEvent::Chat(line.clone()))
            .await;

        Some(line)
    }
}
