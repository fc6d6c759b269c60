//! Bid amount value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::BidError;

/// A monetary bid amount in minor units (e.g. cents).
///
/// Fixed-point on purpose: bids are compared with strict ordering, and
/// floating point would make equality and ordering hazardous. Negative
/// amounts are unrepresentable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BidAmount(u64);

impl BidAmount {
    /// The baseline floor for an auction with no accepted bids.
    pub const ZERO: Self = Self(0);

    /// Creates a BidAmount without validation.
    ///
    /// Zero is a valid *stored* baseline but never a valid bid; use
    /// [`BidAmount::try_new`] when constructing from client input.
    pub fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Creates a BidAmount from client input, rejecting zero.
    pub fn try_new(minor_units: u64) -> Result<Self, BidError> {
        if minor_units == 0 {
            return Err(BidError::InvalidAmount);
        }
        Ok(Self(minor_units))
    }

    /// Returns the amount in minor units.
    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BidAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
