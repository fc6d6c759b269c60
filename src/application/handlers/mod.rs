//! Application handlers - one per inbound event.
//!
//! Together these form the auction room service: they orchestrate the
//! ledger and the two transport ports, and they own every broadcast
//! decision. The transport adapter only parses frames and dispatches.

mod broadcast_chat;
mod join_auction;
mod leave_auction;
mod place_bid;
mod remove_connection;

pub use broadcast_chat::{BroadcastChatCommand, BroadcastChatHandler};
pub use join_auction::{JoinAuctionCommand, JoinAuctionHandler};
pub use leave_auction::{LeaveAuctionCommand, LeaveAuctionHandler};
pub use place_bid::{BidOutcome, PlaceBidCommand, PlaceBidHandler};
pub use remove_connection::{RemoveConnectionCommand, RemoveConnectionHandler};

#[cfg(test)]
pub(crate) mod test_support {
    //! Recording fakes for the two ports, shared by handler tests.

    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::auction::{AuctionId, ConnectionId};
    use crate::ports::{Broadcaster, OutboundEvent, RoomRegistry};

    /// One delivery captured by [`RecordingBroadcaster`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum Delivery {
        Unicast(ConnectionId, OutboundEvent),
        Room(AuctionId, OutboundEvent),
        All(OutboundEvent),
    }

    /// Broadcaster that records every delivery in order.
    pub struct RecordingBroadcaster {
        sent: Mutex<Vec<Delivery>>,
    }

    impl RecordingBroadcaster {
        pub fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn deliveries(&self) -> Vec<Delivery> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Broadcaster for RecordingBroadcaster {
        async fn send_to_connection(&self, connection_id: &ConnectionId, event: OutboundEvent) {
            self.sent
                .lock()
                .unwrap()
                .push(Delivery::Unicast(*connection_id, event));
        }

        async fn send_to_room(&self, auction_id: &AuctionId, event: OutboundEvent) {
            self.sent
                .lock()
                .unwrap()
                .push(Delivery::Room(auction_id.clone(), event));
        }

        async fn send_to_all(&self, event: OutboundEvent) {
            self.sent.lock().unwrap().push(Delivery::All(event));
        }
    }

    /// Room registry that records calls and tracks membership in memory.
    pub struct RecordingRooms {
        joined: Mutex<Vec<(ConnectionId, AuctionId)>>,
        left: Mutex<Vec<(ConnectionId, AuctionId)>>,
        membership: Mutex<HashMap<ConnectionId, Vec<AuctionId>>>,
        severed: Mutex<HashSet<ConnectionId>>,
    }

    impl RecordingRooms {
        pub fn new() -> Self {
            Self {
                joined: Mutex::new(Vec::new()),
                left: Mutex::new(Vec::new()),
                membership: Mutex::new(HashMap::new()),
                severed: Mutex::new(HashSet::new()),
            }
        }

        pub fn joined(&self) -> Vec<(ConnectionId, AuctionId)> {
            self.joined.lock().unwrap().clone()
        }

        pub fn left(&self) -> Vec<(ConnectionId, AuctionId)> {
            self.left.lock().unwrap().clone()
        }

        pub fn seed_membership(&self, connection_id: ConnectionId, auctions: &[&str]) {
            self.membership.lock().unwrap().insert(
                connection_id,
                auctions.iter().map(|a| AuctionId::new(*a)).collect(),
            );
        }
    }

    #[async_trait]
    impl RoomRegistry for RecordingRooms {
        async fn join(&self, connection_id: &ConnectionId, auction_id: &AuctionId) {
            self.joined
                .lock()
                .unwrap()
                .push((*connection_id, auction_id.clone()));
            let mut membership = self.membership.lock().unwrap();
            let rooms = membership.entry(*connection_id).or_default();
            if !rooms.contains(auction_id) {
                rooms.push(auction_id.clone());
            }
        }

        async fn leave(&self, connection_id: &ConnectionId, auction_id: &AuctionId) {
            self.left
                .lock()
                .unwrap()
                .push((*connection_id, auction_id.clone()));
            if let Some(rooms) = self.membership.lock().unwrap().get_mut(connection_id) {
                rooms.retain(|a| a != auction_id);
            }
        }

        async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<AuctionId> {
            self.membership
                .lock()
                .unwrap()
                .remove(connection_id)
                .unwrap_or_default()
        }

        async fn sever_chat(&self, connection_id: &ConnectionId) {
            self.severed.lock().unwrap().insert(*connection_id);
        }

        async fn chat_severed(&self, connection_id: &ConnectionId) -> bool {
            self.severed.lock().unwrap().contains(connection_id)
        }
    }
}
