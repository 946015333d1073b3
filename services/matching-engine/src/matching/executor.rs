//! Trade execution logic
//!
//! Builds trade records for matches, assigning per-token monotonic
//! sequence numbers. The execution price is always the maker's price;
//! the buy/sell order references are set from the taker's side.

use types::ids::{OrderId, TokenId};
use types::numeric::{Amount, Price};
use types::order::Side;
use types::trade::Trade;

/// Trade executor with sequence generation for one token's book
#[derive(Debug)]
pub struct TradeExecutor {
    sequence_counter: u64,
}

impl TradeExecutor {
    /// Create a new executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            sequence_counter: starting_sequence,
        }
    }

    /// Get next sequence number (monotonically increasing)
    fn next_sequence(&mut self) -> u64 {
        let seq = self.sequence_counter;
        self.sequence_counter += 1;
        seq
    }

    /// Execute a match between a maker and a taker order
    ///
    /// `taker_side` is the incoming order's side; it determines which
    /// order id lands in `buy_order_id` vs `sell_order_id`.
    pub fn execute(
        &mut self,
        token_id: TokenId,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
        taker_side: Side,
        maker_price: Price,
        amount: Amount,
        timestamp: i64,
    ) -> Trade {
        let (buy_order_id, sell_order_id) = match taker_side {
            Side::Buy => (taker_order_id, maker_order_id),
            Side::Sell => (maker_order_id, taker_order_id),
        };

        Trade::new(
            self.next_sequence(),
            token_id,
            buy_order_id,
            sell_order_id,
            maker_price,
            amount,
            timestamp,
        )
    }

    /// Current sequence counter (next trade's sequence)
    pub fn current_sequence(&self) -> u64 {
        self.sequence_counter
    }
}
