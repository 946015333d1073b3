//! Exchange service front
//!
//! Owns one `TokenBook` per registered token behind a per-token async
//! mutex: submissions for the same token serialize, different tokens
//! proceed fully in parallel. Readers take the same lock briefly so they
//! always observe a committed snapshot, never a level mid-adjustment.
//!
//! Change notifications go out on a broadcast channel strictly after the
//! per-token lock is released; the critical section never performs I/O
//! and never re-enters the lock.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use types::errors::CoreError;
use types::ids::{OrderId, TokenId, UserId};
use types::numeric::{Amount, Price};
use types::order::{Order, OrderDraft, Side};
use types::token::{MarketStats, Token};
use types::trade::Trade;

use crate::config::EngineConfig;
use crate::depth::BookView;
use crate::engine::{SubmitOutcome, TokenBook};
use crate::events::BookEvent;

/// Concurrent front for all per-token books
pub struct Exchange {
    config: EngineConfig,
    /// Registered token metadata (read-mostly)
    tokens: DashMap<TokenId, Token>,
    /// One single-writer book per token
    books: DashMap<TokenId, Arc<Mutex<TokenBook>>>,
    /// Order id → owning token, for cancel/lookup routing
    order_index: DashMap<OrderId, TokenId>,
    /// Change-notification channel (post-commit only)
    events: broadcast::Sender<BookEvent>,
}

impl Exchange {
    /// Create an exchange with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer);
        Self {
            config,
            tokens: DashMap::new(),
            books: DashMap::new(),
            order_index: DashMap::new(),
            events,
        }
    }

    /// Register a token and create its empty book
    pub fn register_token(&self, token: Token) {
        let token_id = token.id;
        info!(token_id = %token_id, symbol = %token.symbol, "token registered");
        self.books
            .entry(token_id)
            .or_insert_with(|| Arc::new(Mutex::new(TokenBook::new(token_id, self.config))));
        self.tokens.insert(token_id, token);
    }

    /// Look up a registered token
    pub fn get_token(&self, token_id: &TokenId) -> Result<Token, CoreError> {
        self.tokens
            .get(token_id)
            .map(|t| t.clone())
            .ok_or_else(|| CoreError::token_not_found(token_id))
    }

    /// Refresh a token's market statistics (external market-data feed)
    pub fn update_market_stats(
        &self,
        token_id: &TokenId,
        stats: MarketStats,
    ) -> Result<(), CoreError> {
        let mut token = self
            .tokens
            .get_mut(token_id)
            .ok_or_else(|| CoreError::token_not_found(token_id))?;
        token.current_price = stats.current_price;
        token.price_change_24h = stats.price_change_24h;
        token.volume_24h = stats.volume_24h;
        Ok(())
    }

    /// Subscribe to committed-mutation events
    pub fn subscribe(&self) -> broadcast::Receiver<BookEvent> {
        self.events.subscribe()
    }

    /// Submit an order
    ///
    /// Price and amount arrive as raw decimals from the caller and are
    /// validated here; rejection leaves no trace.
    pub async fn submit_order(
        &self,
        token_id: TokenId,
        user_id: UserId,
        side: Side,
        price: Decimal,
        amount: Decimal,
    ) -> Result<SubmitOutcome, CoreError> {
        let price =
            Price::try_new(price).ok_or_else(|| CoreError::invalid_order("price must be positive"))?;
        let amount = Amount::try_new(amount)
            .filter(|a| !a.is_zero())
            .ok_or_else(|| CoreError::invalid_order("amount must be positive"))?;

        let book = self.book(&token_id)?;
        let draft = OrderDraft {
            token_id,
            user_id,
            side,
            price,
            amount,
        };

        let (outcome, events) = {
            let mut book = book.lock().await;
            book.submit(draft, now_nanos())?
        };

        self.order_index.insert(outcome.order().id, token_id);
        info!(
            token_id = %token_id,
            order_id = %outcome.order().id,
            side = %side,
            trades = outcome.trades().len(),
            "order submitted"
        );
        self.publish(events);
        Ok(outcome)
    }

    /// Cancel a resting order
    pub async fn cancel_order(&self, order_id: &OrderId) -> Result<Order, CoreError> {
        let token_id = *self
            .order_index
            .get(order_id)
            .ok_or_else(|| CoreError::order_not_found(order_id))?;
        let book = self.book(&token_id)?;

        let (cancelled, events) = {
            let mut book = book.lock().await;
            book.cancel(order_id, now_nanos())?
        };

        info!(token_id = %token_id, order_id = %order_id, "order cancelled");
        self.publish(events);
        Ok(cancelled)
    }

    /// Aggregated book view, at most `depth` levels per side
    pub async fn get_book(&self, token_id: &TokenId, depth: usize) -> Result<BookView, CoreError> {
        let book = self.book(token_id)?;
        let book = book.lock().await;
        Ok(book.view(depth))
    }

    /// Aggregated book view at the default depth
    pub async fn get_book_default(&self, token_id: &TokenId) -> Result<BookView, CoreError> {
        self.get_book(token_id, self.config.default_depth).await
    }

    /// Best-ask minus best-bid, None when either side is empty
    pub async fn spread(&self, token_id: &TokenId) -> Result<Option<Decimal>, CoreError> {
        let book = self.book(token_id)?;
        let book = book.lock().await;
        Ok(book.spread())
    }

    /// Most recent trades, newest first
    pub async fn get_recent_trades(
        &self,
        token_id: &TokenId,
        limit: usize,
    ) -> Result<Vec<Trade>, CoreError> {
        let book = self.book(token_id)?;
        let book = book.lock().await;
        Ok(book.recent_trades(limit))
    }

    /// Look up an order by id
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Order, CoreError> {
        let token_id = *self
            .order_index
            .get(order_id)
            .ok_or_else(|| CoreError::order_not_found(order_id))?;
        let book = self.book(&token_id)?;
        let book = book.lock().await;
        book.get_order(order_id)
            .ok_or_else(|| CoreError::order_not_found(order_id))
    }

    /// All open/partial orders for a token, oldest first
    pub async fn open_orders(&self, token_id: &TokenId) -> Result<Vec<Order>, CoreError> {
        let book = self.book(token_id)?;
        let book = book.lock().await;
        Ok(book.open_orders())
    }

    fn book(&self, token_id: &TokenId) -> Result<Arc<Mutex<TokenBook>>, CoreError> {
        self.books
            .get(token_id)
            .map(|b| Arc::clone(&b))
            .ok_or_else(|| CoreError::token_not_found(token_id))
    }

    /// Publish committed events. Lagging subscribers drop events from the
    /// buffer; nobody listening is not an error.
    fn publish(&self, events: Vec<BookEvent>) {
        for event in events {
            if self.events.send(event).is_err() {
                warn!("book event dropped: no active subscribers");
                break;
            }
        }
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Current wall-clock time in Unix nanoseconds
fn now_nanos() -> i64 {
    Utc::now().timestamp_nanos_opt().unwrap_or(0)
}
