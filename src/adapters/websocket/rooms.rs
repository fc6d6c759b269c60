//! WebSocket room management and in-process event delivery.
//!
//! Rooms are organized by auction ID, so a bid update reaches exactly
//! the connections watching that auction:
//!
//! ```text
//! Room: auction-A1      Room: auction-A2
//! ├── conn-a            ├── conn-d
//! ├── conn-b            └── conn-e
//! └── conn-c
//! ```
//!
//! The manager is the single source of truth for membership. It
//! implements both transport ports: [`RoomRegistry`] (grouping) and
//! [`Broadcaster`] (delivery). Delivery pushes events onto each
//! connection's outbound queue; the socket writer task drains it.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::domain::auction::{AuctionId, ConnectionId};
use crate::ports::{Broadcaster, OutboundEvent, RoomRegistry};

/// Tracks connections, their outbound queues, and room membership.
///
/// # Thread Safety
///
/// Uses `RwLock` on both maps since broadcasts (reads) vastly outnumber
/// joins/leaves (writes). Membership and connection locks are never
/// held at the same time.
pub struct RoomManager {
    /// Map of connection_id → outbound event queue for that connection.
    connections: RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<OutboundEvent>>>,

    /// Map of auction_id → members of that room.
    rooms: RwLock<HashMap<AuctionId, HashSet<ConnectionId>>>,

    /// Connections whose global chat subscription was torn down by a
    /// room leave. Cleared when the connection id registers again.
    severed_chat: RwLock<HashSet<ConnectionId>>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            rooms: RwLock::new(HashMap::new()),
            severed_chat: RwLock::new(HashSet::new()),
        }
    }

    /// Registers a connection and returns the receiving end of its
    /// outbound queue. The caller owns draining it onto the socket.
    pub async fn register(&self, connection_id: ConnectionId) -> mpsc::UnboundedReceiver<OutboundEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().await.insert(connection_id, tx);
        // A fresh connection starts with chat routing intact.
        self.severed_chat.write().await.remove(&connection_id);
        rx
    }

    /// Removes a connection's outbound queue.
    ///
    /// Room membership is cleaned up separately via
    /// [`RoomRegistry::leave_all`]; the disconnect path calls both.
    pub async fn unregister(&self, connection_id: &ConnectionId) {
        self.connections.write().await.remove(connection_id);
        self.severed_chat.write().await.remove(connection_id);
    }

    /// Number of currently registered connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Number of members in an auction's room (0 if the room does not
    /// exist).
    pub async fn member_count(&self, auction_id: &AuctionId) -> usize {
        self.rooms
            .read()
            .await
            .get(auction_id)
            .map(|members| members.len())
            .unwrap_or(0)
    }

    /// All rooms that currently have at least one member.
    pub async fn active_rooms(&self) -> Vec<AuctionId> {
        self.rooms.read().await.keys().cloned().collect()
    }

    async fn deliver(&self, connection_id: &ConnectionId, event: OutboundEvent) {
        let connections = self.connections.read().await;
        if let Some(tx) = connections.get(connection_id) {
            if tx.send(event).is_err() {
                // Receiver side already dropped; the writer task is
                // gone and disconnect cleanup will follow.
                tracing::debug!(%connection_id, "dropping event for closed connection");
            }
        }
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for RoomManager {
    async fn join(&self, connection_id: &ConnectionId, auction_id: &AuctionId) {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(auction_id.clone())
            .or_default()
            .insert(*connection_id);
    }

    async fn leave(&self, connection_id: &ConnectionId, auction_id: &AuctionId) {
        let mut rooms = self.rooms.write().await;
        if let Some(members) = rooms.get_mut(auction_id) {
            members.remove(connection_id);
            if members.is_empty() {
                rooms.remove(auction_id);
            }
        }
    }

    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<AuctionId> {
        let mut rooms = self.rooms.write().await;
        let mut left = Vec::new();

        rooms.retain(|auction_id, members| {
            if members.remove(connection_id) {
                left.push(auction_id.clone());
            }
            !members.is_empty()
        });

        left
    }

    async fn sever_chat(&self, connection_id: &ConnectionId) {
        self.severed_chat.write().await.insert(*connection_id);
    }

    async fn chat_severed(&self, connection_id: &ConnectionId) -> bool {
        self.severed_chat.read().await.contains(connection_id)
    }
}

#[async_trait]
impl Broadcaster for RoomManager {
    async fn send_to_connection(&self, connection_id: &ConnectionId, event: OutboundEvent) {
        self.deliver(connection_id, event).await;
    }

    async fn send_to_room(&self, auction_id: &AuctionId, event: OutboundEvent) {
        let members: Vec<ConnectionId> = {
            let rooms = self.rooms.read().await;
            match rooms.get(auction_id) {
                Some(members) => members.iter().copied().collect(),
                None => return,
            }
        };

        for connection_id in members {
            self.deliver(&connection_id, event.clone()).await;
        }
    }

    async fn send_to_all(&self, event: OutboundEvent) {
        let targets: Vec<ConnectionId> = {
            let connections = self.connections.read().await;
            connections.keys().copied().collect()
        };

        for connection_id in targets {
            self.deliver(&connection_id, event.clone()).await;
        }
    }
}
