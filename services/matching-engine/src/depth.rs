//! Book aggregator
//!
//! Derives the top-N aggregated bid/ask view from the price levels, for
//! consumption by any presentation layer. Pure read, no side effects.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::TokenId;
use types::numeric::{Amount, Price};

/// One aggregated price level in a book view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: Price,
    pub amount: Amount,
    /// Notional at this level (price × amount)
    pub total: Decimal,
}

impl Level {
    /// Build a level from an aggregate (price, amount) pair
    pub fn new(price: Price, amount: Amount) -> Self {
        Self {
            price,
            amount,
            total: price.as_decimal() * amount.as_decimal(),
        }
    }
}

/// Aggregated top-of-book view for one token
///
/// Bids are ordered by price descending, asks ascending (best first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookView {
    pub token_id: TokenId,
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
}

impl BookView {
    /// Build a view from best-first aggregate pairs
    pub fn new(
        token_id: TokenId,
        bids: Vec<(Price, Amount)>,
        asks: Vec<(Price, Amount)>,
    ) -> Self {
        Self {
            token_id,
            bids: bids.into_iter().map(|(p, a)| Level::new(p, a)).collect(),
            asks: asks.into_iter().map(|(p, a)| Level::new(p, a)).collect(),
        }
    }

    /// Best bid level, if any
    pub fn best_bid(&self) -> Option<&Level> {
        self.bids.first()
    }

    /// Best ask level, if any
    pub fn best_ask(&self) -> Option<&Level> {
        self.asks.first()
    }

    /// Spread between best ask and best bid
    ///
    /// None when either side is empty; never reported as zero-by-default.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.price.as_decimal() - bid.price.as_decimal()),
            _ => None,
        }
    }

    /// Mid-market price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => {
                Some((bid.price.as_decimal() + ask.price.as_decimal()) / Decimal::from(2))
            }
            _ => None,
        }
    }
}
