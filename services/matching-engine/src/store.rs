//! Order store
//!
//! Holds full order records for one token and owns lifecycle transitions.
//! Orders are created on submission, mutated only through fills and
//! cancellation, and never deleted: terminal states are retained for
//! history.

use std::collections::HashMap;
use types::errors::CoreError;
use types::ids::OrderId;
use types::numeric::Amount;
use types::order::{Order, OrderDraft, Side};

/// In-memory order store for a single token's book
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: HashMap<OrderId, Order>,
}

impl OrderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
        }
    }

    /// Create an order from a draft
    ///
    /// Assigns id and timestamps, initializes `filled_amount = 0` and
    /// `status = open`. Rejects zero amounts with `InvalidOrder`; the
    /// `Price` type already guarantees a positive price.
    pub fn submit(&mut self, draft: OrderDraft, timestamp: i64) -> Result<Order, CoreError> {
        if draft.amount.is_zero() {
            return Err(CoreError::invalid_order("amount must be positive"));
        }

        let order = Order::new(draft, timestamp);
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    /// Increase an order's `filled_amount` and recompute its status
    ///
    /// Fails with `NotFound` for unknown ids and `InvariantViolation` if
    /// the fill would exceed the order amount. Returns the updated order.
    pub fn apply_fill(
        &mut self,
        order_id: &OrderId,
        fill: Amount,
        timestamp: i64,
    ) -> Result<Order, CoreError> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CoreError::order_not_found(order_id))?;
        order.add_fill(fill, timestamp)?;
        Ok(order.clone())
    }

    /// Cancel an order
    ///
    /// Fails with `InvalidTransition` if the order is filled or already
    /// cancelled. Returns the cancelled order.
    pub fn cancel(&mut self, order_id: &OrderId, timestamp: i64) -> Result<Order, CoreError> {
        let order = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| CoreError::order_not_found(order_id))?;
        order.cancel(timestamp)?;
        Ok(order.clone())
    }

    /// Look up an order by id
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// All open/partial orders, optionally filtered by side
    pub fn open_orders(&self, side: Option<Side>) -> Vec<Order> {
        let mut open: Vec<Order> = self
            .orders
            .values()
            .filter(|o| o.is_resting() && side.map_or(true, |s| o.side == s))
            .cloned()
            .collect();
        open.sort_by_key(|o| o.created_at);
        open
    }

    /// Total number of orders ever stored
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
