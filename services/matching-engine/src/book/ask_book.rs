//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::{OrderId, UserId};
use types::numeric::{Amount, Price};
use types::order::Order;

use super::price_level::{LevelEntry, PriceLevel};

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    /// Price levels keyed ascending (best ask first)
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order's remainder into the ask book
    pub fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.price).or_default();
        level.insert(order.id, order.user_id, order.remaining());
    }

    /// Remove an order from the ask book
    ///
    /// Returns the removed remainder if the order was found
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Amount> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id)?;
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

    /// Get the best ask (lowest price) and its aggregate amount
    pub fn best_ask(&self) -> Option<(Price, Amount)> {
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.total_amount()))
    }

    /// Get the best ask price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Peek the front (oldest) order at the given price level
    pub fn peek_front(&self, price: Price) -> Option<LevelEntry> {
        self.levels.get(&price).and_then(|level| level.peek_front())
    }

    /// Check whether the given user has a resting ask at or below `limit`
    ///
    /// Used for self-trade rejection before an incoming buy mutates state.
    pub fn crosses_user(&self, limit: Price, user_id: &UserId) -> bool {
        self.levels
            .range(..=limit)
            .any(|(_, level)| level.contains_user(user_id))
    }

    /// Get the aggregate amount resting at an exact price
    pub fn amount_at(&self, price: Price) -> Amount {
        self.levels
            .get(&price)
            .map(|level| level.total_amount())
            .unwrap_or_else(Amount::zero)
    }

    /// Top N price levels, best (lowest) first
    pub fn top_n(&self, n: usize) -> Vec<(Price, Amount)> {
        self.levels
            .iter()
            .take(n)
            .map(|(price, level)| (*price, level.total_amount()))
            .collect()
    }

    /// Check if the ask book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
