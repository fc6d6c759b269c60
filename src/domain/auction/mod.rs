//! Auction domain - bid arbitration and the value objects around it.
//!
//! This is the only part of the system with real invariants: a single,
//! monotonically increasing highest bid per auction under concurrent
//! submissions. Everything here is pure state and logic; no I/O.

mod bid;
mod errors;
mod ids;
mod ledger;

pub use bid::BidAmount;
pub use errors::BidError;
pub use ids::{AuctionId, ConnectionId};
pub use ledger::BidLedger;
