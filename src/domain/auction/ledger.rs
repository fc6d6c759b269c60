//! BidLedger - authoritative store of the highest bid per auction.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use super::{AuctionId, BidAmount, BidError};

/// Single authoritative store of the highest bid per auction.
///
/// Owns the highest-bid mapping exclusively; the raw map is never exposed
/// for external mutation. An absent entry is semantically a highest bid
/// of [`BidAmount::ZERO`], and stored values are monotonically
/// non-decreasing: they only change through an accepted bid that is
/// strictly greater than the current value.
///
/// # Concurrency
///
/// Arbitration is serialized *per auction*, not globally. Each auction
/// gets its own entry lock, so two simultaneous bids on the same auction
/// race for one mutex (exactly one wins the compare-and-update) while
/// bids on independent auctions never contend. The outer `RwLock` guards
/// only the entry map itself and is write-locked solely on first
/// reference to an auction.
pub struct BidLedger {
    entries: RwLock<HashMap<AuctionId, Arc<Mutex<BidAmount>>>>,
}

impl BidLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the current highest bid, or the zero baseline when the
    /// auction has never seen an accepted bid. Pure read; never creates
    /// an entry.
    pub fn highest(&self, auction_id: &AuctionId) -> BidAmount {
        self.entries
            .read()
            .expect("bid ledger lock poisoned")
            .get(auction_id)
            .map(|entry| *entry.lock().expect("bid entry lock poisoned"))
            .unwrap_or(BidAmount::ZERO)
    }

    /// Atomically compares `amount` against the stored highest bid and
    /// accepts it only when strictly greater.
    ///
    /// Returns the new highest on acceptance. On rejection the state is
    /// unchanged and the error carries the highest bid the amount lost
    /// to. The read-compare-write happens under the auction's entry
    /// lock, so no other bid can interleave between the comparison and
    /// the store.
    pub fn try_accept(
        &self,
        auction_id: &AuctionId,
        amount: BidAmount,
    ) -> Result<BidAmount, BidError> {
        let entry = self.entry(auction_id);
        let mut current = entry.lock().expect("bid entry lock poisoned");

        if amount > *current {
            *current = amount;
            Ok(amount)
        } else {
            Err(BidError::TooLow { current: *current })
        }
    }

    /// Number of auctions that have been referenced by a bid.
    pub fn auction_count(&self) -> usize {
        self.entries
            .read()
            .expect("bid ledger lock poisoned")
            .len()
    }

    /// Returns the entry lock for an auction, creating the zero-baseline
    /// entry on first reference.
    fn entry(&self, auction_id: &AuctionId) -> Arc<Mutex<BidAmount>> {
        if let Some(entry) = self
            .entries
            .read()
            .expect("bid ledger lock poisoned")
            .get(auction_id)
        {
            return Arc::clone(entry);
        }

        let mut entries = self.entries.write().expect("bid ledger lock poisoned");
        Arc::clone(entries.entry(auction_id.clone()).or_default())
    }
}

impl Default for BidLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn auction(id: &str) -> AuctionId {
        AuctionId::new(id)
    }

    #[test]
    fn highest_returns_zero_for_unknown_auction() {
        let ledger = BidLedger::new();
        assert_eq!(ledger.highest(&auction("A1")), BidAmount::ZERO);
        assert_eq!(ledger.auction_count(), 0);
    }

    #[test]
    fn first_bid_above_zero_is_accepted() {
        let ledger = BidLedger::new();
        let accepted = ledger.try_accept(&auction("A1"), BidAmount::new(100));
        assert_eq!(accepted, Ok(BidAmount::new(100)));
        assert_eq!(ledger.highest(&auction("A1")), BidAmount::new(100));
    }

    #[test]
    fn lower_bid_is_rejected_and_state_unchanged() {
        let ledger = BidLedger::new();
        ledger.try_accept(&auction("A1"), BidAmount::new(100)).unwrap();

        let result = ledger.try_accept(&auction("A1"), BidAmount::new(50));
        assert_eq!(
            result,
            Err(BidError::TooLow {
                current: BidAmount::new(100)
            })
        );
        assert_eq!(ledger.highest(&auction("A1")), BidAmount::new(100));
    }

    #[test]
    fn equal_bid_is_rejected() {
        let ledger = BidLedger::new();
        ledger.try_accept(&auction("A1"), BidAmount::new(100)).unwrap();

        let result = ledger.try_accept(&auction("A1"), BidAmount::new(100));
        assert_eq!(
            result,
            Err(BidError::TooLow {
                current: BidAmount::new(100)
            })
        );
    }

    #[test]
    fn higher_bid_replaces_previous_highest() {
        let ledger = BidLedger::new();
        ledger.try_accept(&auction("A1"), BidAmount::new(100)).unwrap();
        ledger.try_accept(&auction("A1"), BidAmount::new(150)).unwrap();
        assert_eq!(ledger.highest(&auction("A1")), BidAmount::new(150));
    }

    #[test]
    fn auctions_are_independent() {
        let ledger = BidLedger::new();
        ledger.try_accept(&auction("A1"), BidAmount::new(100)).unwrap();
        ledger.try_accept(&auction("A2"), BidAmount::new(30)).unwrap();

        assert_eq!(ledger.highest(&auction("A1")), BidAmount::new(100));
        assert_eq!(ledger.highest(&auction("A2")), BidAmount::new(30));
        assert_eq!(ledger.auction_count(), 2);
    }

    #[test]
    fn accepted_bids_form_a_strictly_increasing_sequence() {
        let ledger = BidLedger::new();
        let bids = [100u64, 50, 150, 150, 75, 200, 10];

        let mut last_accepted = BidAmount::ZERO;
        for bid in bids {
            if let Ok(new_highest) = ledger.try_accept(&auction("A1"), BidAmount::new(bid)) {
                assert!(new_highest > last_accepted);
                last_accepted = new_highest;
            }
        }

        assert_eq!(ledger.highest(&auction("A1")), BidAmount::new(200));
    }

    #[test]
    fn concurrent_bids_admit_exactly_the_strictly_increasing_winners() {
        let ledger = Arc::new(BidLedger::new());
        let auction_id = auction("contested");

        // 32 threads all bidding distinct amounts; the final highest
        // must be the maximum, and the count of accepted bids must
        // equal the length of the increasing chain the ledger admitted.
        let handles: Vec<_> = (1..=32u64)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                let auction_id = auction_id.clone();
                thread::spawn(move || {
                    ledger
                        .try_accept(&auction_id, BidAmount::new(i * 10))
                        .is_ok()
                })
            })
            .collect();

        let accepted: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();

        assert_eq!(ledger.highest(&auction_id), BidAmount::new(320));
        // At least the maximum bid was accepted, and every acceptance
        // was strictly above the previous one, so 1 <= accepted <= 32.
        assert!((1..=32).contains(&accepted));
    }

    #[test]
    fn two_concurrent_bids_exactly_one_wins_from_baseline() {
        for _ in 0..50 {
            let ledger = Arc::new(BidLedger::new());
            let auction_id = auction("pair");

            let a = {
                let ledger = Arc::clone(&ledger);
                let auction_id = auction_id.clone();
                thread::spawn(move || ledger.try_accept(&auction_id, BidAmount::new(100)))
            };
            let b = {
                let ledger = Arc::clone(&ledger);
                let auction_id = auction_id.clone();
                thread::spawn(move || ledger.try_accept(&auction_id, BidAmount::new(200)))
            };

            let res_a = a.join().unwrap();
            let res_b = b.join().unwrap();

            // 200 always ends up stored; 100 either won first and was
            // then outbid, or lost outright.
            assert_eq!(ledger.highest(&auction_id), BidAmount::new(200));
            assert!(res_b.is_ok());
            if let Err(BidError::TooLow { current }) = res_a {
                assert_eq!(current, BidAmount::new(200));
            }
        }
    }
}
