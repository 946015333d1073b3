//! Trade feed
//!
//! Append-only sequence of executed trades for one token. Appends happen
//! only inside the matching engine's commit; history is never mutated or
//! deleted.

use types::ids::TokenId;
use types::trade::Trade;

/// Append-only trade history for a single token
#[derive(Debug)]
pub struct TradeFeed {
    token_id: TokenId,
    trades: Vec<Trade>,
}

impl TradeFeed {
    /// Create an empty feed for the given token
    pub fn new(token_id: TokenId) -> Self {
        Self {
            token_id,
            trades: Vec::new(),
        }
    }

    /// Append an executed trade
    pub fn append(&mut self, trade: Trade) {
        debug_assert_eq!(trade.token_id, self.token_id);
        self.trades.push(trade);
    }

    /// Most recent trades, newest first
    pub fn recent(&self, limit: usize) -> Vec<Trade> {
        self.trades.iter().rev().take(limit).cloned().collect()
    }

    /// Full history, oldest first
    pub fn all(&self) -> &[Trade] {
        &self.trades
    }

    /// Number of recorded trades
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Check if no trades have executed yet
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Token this feed belongs to
    pub fn token_id(&self) -> TokenId {
        self.token_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::OrderId;
    use types::numeric::{Amount, Price};

    const T0: i64 = 1708123456789000000;

    fn make_trade(token_id: TokenId, sequence: u64, price: u64) -> Trade {
        Trade::new(
            sequence,
            token_id,
            OrderId::new(),
            OrderId::new(),
            Price::from_u64(price),
            Amount::from_str("1.0").unwrap(),
            T0 + sequence as i64 * 1000,
        )
    }

    #[test]
    fn test_append_and_len() {
        let token_id = TokenId::new();
        let mut feed = TradeFeed::new(token_id);
        assert!(feed.is_empty());

        feed.append(make_trade(token_id, 1, 50));
        feed.append(make_trade(token_id, 2, 51));

        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_recent_newest_first() {
        let token_id = TokenId::new();
        let mut feed = TradeFeed::new(token_id);

        for seq in 1..=5 {
            feed.append(make_trade(token_id, seq, 50));
        }

        let recent = feed.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].sequence, 5);
        assert_eq!(recent[1].sequence, 4);
        assert_eq!(recent[2].sequence, 3);
    }

    #[test]
    fn test_recent_limit_exceeds_history() {
        let token_id = TokenId::new();
        let mut feed = TradeFeed::new(token_id);
        feed.append(make_trade(token_id, 1, 50));

        assert_eq!(feed.recent(100).len(), 1);
    }

    #[test]
    fn test_history_retained_in_order() {
        let token_id = TokenId::new();
        let mut feed = TradeFeed::new(token_id);

        for seq in 1..=3 {
            feed.append(make_trade(token_id, seq, 50));
        }

        let all = feed.all();
        assert_eq!(all[0].sequence, 1);
        assert_eq!(all[2].sequence, 3);
    }
}
