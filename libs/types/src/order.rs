//! Order lifecycle types
//!
//! An order is created on submission, mutated only by the matching engine,
//! and never deleted: terminal states are retained for history.

use crate::errors::CoreError;
use crate::ids::{OrderId, TokenId, UserId};
use crate::numeric::{Amount, Price};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Lowercase wire label, matching the persisted representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status
///
/// Derives deterministically from `filled_amount` vs `amount`, except
/// `Cancelled` which is set explicitly and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// No fills yet, resting or about to match
    Open,
    /// Partially matched, remainder resting
    Partial,
    /// Completely matched (terminal)
    Filled,
    /// Cancelled by user or system (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further fills or transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }

    /// Lowercase wire label, matching the persisted representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Partial => "partial",
            OrderStatus::Filled => "filled",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order submission before the store has assigned id and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub token_id: TokenId,
    pub user_id: UserId,
    pub side: Side,
    pub price: Price,
    pub amount: Amount,
}

/// Complete order record
///
/// Field names mirror the persisted `orders` representation exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub token_id: TokenId,
    pub user_id: UserId,
    pub side: Side,
    pub price: Price,
    pub amount: Amount,
    pub filled_amount: Amount,
    pub status: OrderStatus,
    pub created_at: i64, // Unix nanos
    pub updated_at: i64, // Unix nanos
}

impl Order {
    /// Create a new open order from a draft
    pub fn new(draft: OrderDraft, timestamp: i64) -> Self {
        Self {
            id: OrderId::new(),
            token_id: draft.token_id,
            user_id: draft.user_id,
            side: draft.side,
            price: draft.price,
            amount: draft.amount,
            filled_amount: Amount::zero(),
            status: OrderStatus::Open,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Unfilled remainder: `amount - filled_amount`
    pub fn remaining(&self) -> Amount {
        self.amount
            .checked_sub(self.filled_amount)
            .unwrap_or_else(Amount::zero)
    }

    /// Check if order is completely filled
    pub fn is_filled(&self) -> bool {
        self.filled_amount == self.amount
    }

    /// Check if order has any fills
    pub fn has_fills(&self) -> bool {
        !self.filled_amount.is_zero()
    }

    /// Check if order is resting on the book (open or partial)
    pub fn is_resting(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Increase `filled_amount` and recompute status
    ///
    /// Fails with `InvariantViolation` if the fill would exceed the order
    /// amount or the order is already terminal. `filled_amount` is
    /// monotonically non-decreasing.
    pub fn add_fill(&mut self, fill: Amount, timestamp: i64) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::InvariantViolation {
                detail: format!("fill applied to terminal order {}", self.id),
            });
        }

        let new_filled = self.filled_amount + fill;
        if new_filled > self.amount {
            return Err(CoreError::InvariantViolation {
                detail: format!(
                    "fill {} would exceed order {} amount {} (filled {})",
                    fill, self.id, self.amount, self.filled_amount
                ),
            });
        }

        self.filled_amount = new_filled;
        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else if self.has_fills() {
            OrderStatus::Partial
        } else {
            OrderStatus::Open
        };
        self.updated_at = timestamp;

        Ok(())
    }

    /// Cancel the order
    ///
    /// Fails with `InvalidTransition` if the order is already terminal.
    pub fn cancel(&mut self, timestamp: i64) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::InvalidTransition {
                order_id: self.id.to_string(),
                reason: format!("cannot cancel order in status {}", self.status),
            });
        }

        self.status = OrderStatus::Cancelled;
        self.updated_at = timestamp;
        Ok(())
    }
}
