//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at a specific price point.
//! Orders are maintained in FIFO (First-In-First-Out) order to enforce
//! time priority: among equal prices, the earliest-created order fills
//! first. The level's aggregate amount must always equal the sum of its
//! entries' remainders.

use std::collections::VecDeque;
use types::ids::{OrderId, UserId};
use types::numeric::Amount;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
/// Orders are stored as OrderId references with their remaining amounts.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<LevelEntry>,
    /// Total open amount at this level
    total_amount: Amount,
}

/// Entry in the price level queue
#[derive(Debug, Clone, Copy)]
pub struct LevelEntry {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub remaining: Amount,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_amount: Amount::zero(),
        }
    }

    /// Insert an order at the back of the queue (time priority)
    pub fn insert(&mut self, order_id: OrderId, user_id: UserId, remaining: Amount) {
        self.orders.push_back(LevelEntry {
            order_id,
            user_id,
            remaining,
        });
        self.total_amount = self.total_amount + remaining;
    }

    /// Remove an order from the queue by OrderId
    ///
    /// Returns the remaining amount of the removed order, or None if not found
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Amount> {
        let position = self
            .orders
            .iter()
            .position(|entry| &entry.order_id == order_id)?;
        let entry = self.orders.remove(position)?;

        self.total_amount = self
            .total_amount
            .checked_sub(entry.remaining)
            .unwrap_or_else(Amount::zero);

        Some(entry.remaining)
    }

    /// Peek at the front order without removing it
    pub fn peek_front(&self) -> Option<LevelEntry> {
        self.orders.front().copied()
    }

    /// Reduce an order's remaining amount after a fill
    ///
    /// The entry is removed when its remainder reaches zero. Returns the
    /// new remainder, or None if the order is not at this level or the
    /// reduction exceeds its remainder.
    pub fn reduce(&mut self, order_id: &OrderId, amount: Amount) -> Option<Amount> {
        let position = self
            .orders
            .iter()
            .position(|entry| &entry.order_id == order_id)?;

        let new_remaining = self.orders[position].remaining.checked_sub(amount)?;

        if new_remaining.is_zero() {
            self.orders.remove(position);
        } else {
            self.orders[position].remaining = new_remaining;
        }

        self.total_amount = self
            .total_amount
            .checked_sub(amount)
            .unwrap_or_else(Amount::zero);

        Some(new_remaining)
    }

    /// Check whether any entry at this level belongs to the given user
    pub fn contains_user(&self, user_id: &UserId) -> bool {
        self.orders.iter().any(|entry| &entry.user_id == user_id)
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total open amount at this price level
    pub fn total_amount(&self) -> Amount {
        self.total_amount
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
