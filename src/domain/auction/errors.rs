//! Error types for the auction domain.

use thiserror::Error;

use super::BidAmount;

/// The only domain error: a bid that does not beat the current highest.
///
/// Surfaced to the offending connection as a `bid_error` event, never
/// propagated to the room and never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BidError {
    /// Bid was not strictly greater than the current highest bid.
    /// Ties are rejected.
    #[error("bid must exceed current highest bid")]
    TooLow {
        /// The highest bid at the time of rejection.
        current: BidAmount,
    },

    /// Bid amount failed validation before reaching the ledger.
    #[error("bid amount must be greater than zero")]
    InvalidAmount,
}
