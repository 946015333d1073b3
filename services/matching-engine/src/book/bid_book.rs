//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::{OrderId, UserId};
use types::numeric::{Amount, Price};
use types::order::Order;

use super::price_level::{LevelEntry, PriceLevel};

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels keyed ascending; iterated in reverse for best-first
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order's remainder into the bid book
    pub fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.price).or_default();
        level.insert(order.id, order.user_id, order.remaining());
    }

    /// Remove an order from the bid book
    ///
    /// Returns the removed remainder if the order was found
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Amount> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id)?;
        // Remove empty price levels to keep the book clean
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(removed)
    }

    /// Reduce an order's remainder at the given price after a fill
    ///
    /// Empty levels are pruned. Returns the order's new remainder, or
    /// None if the order is not resting at that price or the reduction
    /// exceeds its remainder.
    pub fn reduce(&mut self, order_id: &OrderId, price: Price, amount: Amount) -> Option<Amount> {
        let level = self.levels.get_mut(&price)?;
        let remaining = level.reduce(order_id, amount)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(remaining)
    }

    /// Get the best bid (highest price) and its aggregate amount
    pub fn best_bid(&self) -> Option<(Price, Amount)> {
        // BTreeMap iter is ascending, so we need the last entry
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_amount()))
    }

    /// Get the best bid price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Peek the front (oldest) order at the given price level
    pub fn peek_front(&self, price: Price) -> Option<LevelEntry> {
        self.levels.get(&price).and_then(|level| level.peek_front())
    }

    /// Check whether the given user has a resting bid at or above `limit`
    ///
    /// Used for self-trade rejection before an incoming sell mutates state.
    pub fn crosses_user(&self, limit: Price, user_id: &UserId) -> bool {
        self.levels
            .range(limit..)
            .any(|(_, level)| level.contains_user(user_id))
    }

    /// Get the aggregate amount resting at an exact price
    pub fn amount_at(&self, price: Price) -> Amount {
        self.levels
            .get(&price)
            .map(|level| level.total_amount())
            .unwrap_or_else(Amount::zero)
    }

    /// Top N price levels, best (highest) first
    pub fn top_n(&self, n: usize) -> Vec<(Price, Amount)> {
        self.levels
            .iter()
            .rev()
            .take(n)
            .map(|(price, level)| (*price, level.total_amount()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{TokenId, UserId};
    use types::order::{OrderDraft, Side};

    fn create_test_order(price: u64, amount: &str) -> Order {
        Order::new(
            OrderDraft {
                token_id: TokenId::new(),
                user_id: UserId::new(),
                side: Side::Buy,
                price: Price::from_u64(price),
                amount: Amount::from_str(amount).unwrap(),
            },
            1708123456789000000,
        )
    }

    #[test]
    fn test_bid_book_insert() {
        let mut book = BidBook::new();
        book.insert(&create_test_order(50000, "1.5"));

        assert_eq!(book.level_count(), 1);
        assert!(!book.is_empty());
    }

    #[test]
    fn test_bid_book_best_bid() {
        let mut book = BidBook::new();

        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&create_test_order(51000, "2.0")); // Higher price
        book.insert(&create_test_order(49000, "1.5")); // Lower price

        let (best_price, best_amount) = book.best_bid().unwrap();
        assert_eq!(best_price, Price::from_u64(51000)); // Highest price
        assert_eq!(best_amount, Amount::from_str("2.0").unwrap());
    }

    #[test]
    fn test_bid_book_remove() {
        let mut book = BidBook::new();
        let order = create_test_order(50000, "1.0");

        book.insert(&order);
        assert_eq!(book.level_count(), 1);

        let removed = book.remove(&order.id, order.price);
        assert_eq!(removed, Some(Amount::from_str("1.0").unwrap()));
        assert!(book.is_empty());
    }

    #[test]
    fn test_bid_book_reduce_prunes_empty_level() {
        let mut book = BidBook::new();
        let order = create_test_order(50000, "1.0");
        book.insert(&order);

        let remaining = book
            .reduce(&order.id, order.price, Amount::from_str("1.0").unwrap())
            .unwrap();
        assert!(remaining.is_zero());
        assert!(book.is_empty());
        assert!(book.best_price().is_none());
    }

    #[test]
    fn test_bid_book_top_n() {
        let mut book = BidBook::new();

        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&create_test_order(51000, "2.0"));
        book.insert(&create_test_order(49000, "1.5"));
        book.insert(&create_test_order(52000, "0.5"));

        let top = book.top_n(2);

        // Top 2 levels, highest prices first
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, Price::from_u64(52000));
        assert_eq!(top[1].0, Price::from_u64(51000));
    }

    #[test]
    fn test_bid_book_aggregates_same_price() {
        let mut book = BidBook::new();

        book.insert(&create_test_order(50000, "1.0"));
        book.insert(&create_test_order(50000, "2.0"));

        assert_eq!(book.level_count(), 1);

        let (price, total) = book.best_bid().unwrap();
        assert_eq!(price, Price::from_u64(50000));
        assert_eq!(total, Amount::from_str("3.0").unwrap());
        assert_eq!(book.amount_at(price), Amount::from_str("3.0").unwrap());
    }

    #[test]
    fn test_bid_book_crosses_user() {
        let mut book = BidBook::new();
        let order = create_test_order(50000, "1.0");
        let user = order.user_id;
        book.insert(&order);

        // An incoming sell at or below 50000 would hit this user's bid
        assert!(book.crosses_user(Price::from_u64(50000), &user));
        assert!(book.crosses_user(Price::from_u64(49000), &user));
        // A sell above the bid does not cross it
        assert!(!book.crosses_user(Price::from_u64(51000), &user));
        assert!(!book.crosses_user(Price::from_u64(50000), &UserId::new()));
    }
}
