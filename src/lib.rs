//! Gavel - Real-time Auction Room Service
//!
//! Clients join named auctions over a WebSocket, submit competing bids,
//! and receive live updates of the current highest bid. The core
//! guarantees a single, monotonically increasing highest bid per
//! auction under concurrent submissions, and fans out state changes to
//! exactly the members of that auction's room.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
