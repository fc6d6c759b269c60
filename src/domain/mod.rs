//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `auction` - Bid arbitration: ledger, amounts, identifiers, errors

pub mod auction;
