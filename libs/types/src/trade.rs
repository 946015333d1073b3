//! Trade execution types
//!
//! A trade references exactly one buy order and one sell order on the same
//! token. Trades are immutable once created and only ever appended.

use crate::ids::{OrderId, TokenId, TradeId};
use crate::numeric::{Amount, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An executed trade
///
/// Field names mirror the persisted `trades` representation exactly; the
/// per-token `sequence` is internal feed bookkeeping and stays off the wire.
/// Price is always the resting (maker) order's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub token_id: TokenId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub amount: Amount,
    pub created_at: i64, // Unix nanos

    /// Per-token monotonic sequence assigned at execution
    #[serde(skip)]
    pub sequence: u64,
}

impl Trade {
    /// Create a new trade record
    pub fn new(
        sequence: u64,
        token_id: TokenId,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        amount: Amount,
        created_at: i64,
    ) -> Self {
        Self {
            id: TradeId::new(),
            token_id,
            buy_order_id,
            sell_order_id,
            price,
            amount,
            created_at,
            sequence,
        }
    }

    /// Trade notional (price × amount)
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.amount.as_decimal()
    }
}
