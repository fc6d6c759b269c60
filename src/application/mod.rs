//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports. Each inbound event has exactly one handler.

pub mod handlers;

pub use handlers::{
    BidOutcome, BroadcastChatCommand, BroadcastChatHandler, JoinAuctionCommand,
    JoinAuctionHandler, LeaveAuctionCommand, LeaveAuctionHandler, PlaceBidCommand,
    PlaceBidHandler, RemoveConnectionCommand, RemoveConnectionHandler,
};
