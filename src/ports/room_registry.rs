//! RoomRegistry port - Interface to the transport's channel grouping.
//!
//! Room membership is conceptually owned by the core, but its mechanical
//! storage is delegated to the transport. The transport's grouping
//! primitive is the single source of truth; the core never keeps a
//! second copy that could desynchronize from it.

use async_trait::async_trait;

use crate::domain::auction::{AuctionId, ConnectionId};

/// Port for grouping connections into named auction rooms.
///
/// All operations are side effects only. Joining a room the connection
/// is already in and leaving a room it never joined are both no-ops,
/// not errors.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Adds a connection to an auction's room. Idempotent.
    async fn join(&self, connection_id: &ConnectionId, auction_id: &AuctionId);

    /// Removes a connection from an auction's room. Idempotent.
    async fn leave(&self, connection_id: &ConnectionId, auction_id: &AuctionId);

    /// Removes a connection from every room it belongs to.
    ///
    /// This is the integration point the transport must invoke on
    /// disconnect so abrupt closes cannot leave stale membership.
    /// Returns the auctions the connection was removed from.
    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<AuctionId>;

    /// Tears down the connection's global chat subscription.
    ///
    /// Leaving an auction severs chat for that connection; only a fresh
    /// connection restores it. Idempotent.
    async fn sever_chat(&self, connection_id: &ConnectionId);

    /// Whether the connection's chat subscription has been severed.
    async fn chat_severed(&self, connection_id: &ConnectionId) -> bool;
}
