//! Change-notification events
//!
//! One event per committed mutation: order acceptance, executed match, or
//! cancellation. Downstream presentation layers subscribe instead of
//! re-querying on a generic change signal. Events are published only after
//! the per-token state transition commits.

use serde::{Deserialize, Serialize};
use types::order::{Order, Side};
use types::trade::Trade;

/// An event emitted by the matching engine after a committed mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum BookEvent {
    /// An order was accepted and registered on the book
    OrderAccepted { order: Order },

    /// A trade was executed between a maker and a taker
    TradeExecuted {
        trade: Trade,
        /// Side of the incoming (taker) order
        taker_side: Side,
    },

    /// A resting order was cancelled
    OrderCancelled { order: Order },
}

impl BookEvent {
    /// Event type as a string label for logging
    pub fn label(&self) -> &'static str {
        match self {
            BookEvent::OrderAccepted { .. } => "OrderAccepted",
            BookEvent::TradeExecuted { .. } => "TradeExecuted",
            BookEvent::OrderCancelled { .. } => "OrderCancelled",
        }
    }

    /// Token the event belongs to
    pub fn token_id(&self) -> types::ids::TokenId {
        match self {
            BookEvent::OrderAccepted { order } => order.token_id,
            BookEvent::TradeExecuted { trade, .. } => trade.token_id,
            BookEvent::OrderCancelled { order } => order.token_id,
        }
    }
}
