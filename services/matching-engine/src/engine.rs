//! Matching engine core
//!
//! One `TokenBook` owns all mutable state for a single token: bid/ask
//! books, order store, trade feed, and trade sequencing. A submission is
//! one atomic unit; the caller holds exclusive access for its duration
//! and publishes the returned events only after the call returns.
//!
//! Per incoming order the engine runs: validate → register → match loop
//! (strict price-then-time priority, maker price) → settle remainder.

use tracing::debug;
use types::errors::CoreError;
use types::ids::{OrderId, TokenId};
use types::order::{Order, OrderDraft, OrderStatus, Side};
use types::trade::Trade;

use crate::book::{AskBook, BidBook};
use crate::config::EngineConfig;
use crate::depth::BookView;
use crate::events::BookEvent;
use crate::feed::TradeFeed;
use crate::matching::{crossing, executor::TradeExecutor};
use crate::store::OrderStore;

/// Result of submitting an order
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Order rests on the book untouched (no match)
    Resting { order: Order },
    /// Order matched partially; the remainder rests at its original price
    PartiallyFilled { order: Order, trades: Vec<Trade> },
    /// Order was completely filled
    Filled { order: Order, trades: Vec<Trade> },
}

impl SubmitOutcome {
    /// The submitted order in its post-commit state
    pub fn order(&self) -> &Order {
        match self {
            SubmitOutcome::Resting { order } => order,
            SubmitOutcome::PartiallyFilled { order, .. } => order,
            SubmitOutcome::Filled { order, .. } => order,
        }
    }

    /// Trades produced by the submission, oldest first
    pub fn trades(&self) -> &[Trade] {
        match self {
            SubmitOutcome::Resting { .. } => &[],
            SubmitOutcome::PartiallyFilled { trades, .. } => trades,
            SubmitOutcome::Filled { trades, .. } => trades,
        }
    }
}

/// Order book and matching state for a single token
///
/// All mutations serialize through the single owner of this value.
pub struct TokenBook {
    token_id: TokenId,
    config: EngineConfig,
    bids: BidBook,
    asks: AskBook,
    store: OrderStore,
    feed: TradeFeed,
    executor: TradeExecutor,
}

impl TokenBook {
    /// Create an empty book for the given token
    pub fn new(token_id: TokenId, config: EngineConfig) -> Self {
        Self {
            token_id,
            config,
            bids: BidBook::new(),
            asks: AskBook::new(),
            store: OrderStore::new(),
            feed: TradeFeed::new(token_id),
            executor: TradeExecutor::new(1),
        }
    }

    /// Submit an order: validate, register, match, settle remainder
    ///
    /// Returns the outcome plus the events to publish after commit.
    /// Validation failures reject synchronously with no mutation.
    pub fn submit(
        &mut self,
        draft: OrderDraft,
        timestamp: i64,
    ) -> Result<(SubmitOutcome, Vec<BookEvent>), CoreError> {
        // Validate (no mutation on failure)
        if draft.token_id != self.token_id {
            return Err(CoreError::InvariantViolation {
                detail: format!(
                    "order for token {} routed to book {}",
                    draft.token_id, self.token_id
                ),
            });
        }
        if draft.amount.is_zero() {
            return Err(CoreError::invalid_order("amount must be positive"));
        }
        if !self.config.allow_self_trade {
            let crosses_own = match draft.side {
                Side::Buy => self.asks.crosses_user(draft.price, &draft.user_id),
                Side::Sell => self.bids.crosses_user(draft.price, &draft.user_id),
            };
            if crosses_own {
                return Err(CoreError::invalid_order(
                    "submission would cross the user's own resting order",
                ));
            }
        }

        // Register: create the order and add its full amount to its level
        let mut order = self.store.submit(draft, timestamp)?;
        match order.side {
            Side::Buy => self.bids.insert(&order),
            Side::Sell => self.asks.insert(&order),
        }

        let mut events = vec![BookEvent::OrderAccepted {
            order: order.clone(),
        }];
        let mut trades = Vec::new();
        let taker_side = order.side;

        // Match loop: best price first, earliest order first within a level
        while !order.remaining().is_zero() {
            let maker_price = match taker_side {
                Side::Buy => self.asks.best_price(),
                Side::Sell => self.bids.best_price(),
            };
            let Some(maker_price) = maker_price else {
                break;
            };
            if !crossing::incoming_can_match(taker_side, order.price, maker_price) {
                break;
            }

            let maker_entry = match taker_side {
                Side::Buy => self.asks.peek_front(maker_price),
                Side::Sell => self.bids.peek_front(maker_price),
            }
            .ok_or_else(|| CoreError::InvariantViolation {
                detail: format!("empty price level {} left in book", maker_price),
            })?;

            let match_amount = order.remaining().min(maker_entry.remaining);

            // Fills on both orders
            self.store
                .apply_fill(&maker_entry.order_id, match_amount, timestamp)?;
            order = self.store.apply_fill(&order.id, match_amount, timestamp)?;

            // Ledger reductions on both resting levels; a fully filled
            // maker leaves the book here
            let maker_reduced = match taker_side {
                Side::Buy => self
                    .asks
                    .reduce(&maker_entry.order_id, maker_price, match_amount),
                Side::Sell => self
                    .bids
                    .reduce(&maker_entry.order_id, maker_price, match_amount),
            };
            let taker_reduced = match taker_side {
                Side::Buy => self.bids.reduce(&order.id, order.price, match_amount),
                Side::Sell => self.asks.reduce(&order.id, order.price, match_amount),
            };
            if maker_reduced.is_none() || taker_reduced.is_none() {
                return Err(CoreError::InvariantViolation {
                    detail: format!(
                        "ledger out of sync with fills at level {}",
                        maker_price
                    ),
                });
            }

            // Trade at the maker's price
            let trade = self.executor.execute(
                self.token_id,
                maker_entry.order_id,
                order.id,
                taker_side,
                maker_price,
                match_amount,
                timestamp,
            );
            self.feed.append(trade.clone());
            events.push(BookEvent::TradeExecuted {
                trade: trade.clone(),
                taker_side,
            });
            trades.push(trade);
        }

        debug!(
            token_id = %self.token_id,
            order_id = %order.id,
            status = %order.status,
            trades = trades.len(),
            "order submission committed"
        );

        let outcome = match order.status {
            OrderStatus::Filled => SubmitOutcome::Filled { order, trades },
            OrderStatus::Partial => SubmitOutcome::PartiallyFilled { order, trades },
            _ => SubmitOutcome::Resting { order },
        };
        Ok((outcome, events))
    }

    /// Cancel a resting order
    ///
    /// Fails with `InvalidTransition` for filled or already-cancelled
    /// orders and `NotFound` for unknown ids, without altering any state.
    pub fn cancel(
        &mut self,
        order_id: &OrderId,
        timestamp: i64,
    ) -> Result<(Order, Vec<BookEvent>), CoreError> {
        let existing = self
            .store
            .get(order_id)
            .ok_or_else(|| CoreError::order_not_found(order_id))?;
        let (side, price) = (existing.side, existing.price);

        let cancelled = self.store.cancel(order_id, timestamp)?;

        let removed = match side {
            Side::Buy => self.bids.remove(order_id, price),
            Side::Sell => self.asks.remove(order_id, price),
        };
        if removed.is_none() {
            return Err(CoreError::InvariantViolation {
                detail: format!("resting order {} missing from its price level", order_id),
            });
        }

        debug!(token_id = %self.token_id, order_id = %order_id, "order cancelled");

        let events = vec![BookEvent::OrderCancelled {
            order: cancelled.clone(),
        }];
        Ok((cancelled, events))
    }

    /// Aggregated top-of-book view (§ Book Aggregator)
    pub fn view(&self, depth: usize) -> BookView {
        BookView::new(self.token_id, self.bids.top_n(depth), self.asks.top_n(depth))
    }

    /// Spread between best ask and best bid, None when a side is empty
    pub fn spread(&self) -> Option<rust_decimal::Decimal> {
        match (self.bids.best_price(), self.asks.best_price()) {
            (Some(bid), Some(ask)) => Some(ask.as_decimal() - bid.as_decimal()),
            _ => None,
        }
    }

    /// Most recent trades, newest first
    pub fn recent_trades(&self, limit: usize) -> Vec<Trade> {
        self.feed.recent(limit)
    }

    /// Look up an order by id
    pub fn get_order(&self, order_id: &OrderId) -> Option<Order> {
        self.store.get(order_id).cloned()
    }

    /// All open/partial orders, oldest first
    pub fn open_orders(&self) -> Vec<Order> {
        self.store.open_orders(None)
    }

    /// Token this book belongs to
    pub fn token_id(&self) -> TokenId {
        self.token_id
    }

    /// Bid-side ledger (read-only)
    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    /// Ask-side ledger (read-only)
    pub fn asks(&self) -> &AskBook {
        &self.asks
    }
}
