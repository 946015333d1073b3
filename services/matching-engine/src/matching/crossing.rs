//! Crossing detection logic
//!
//! Determines when a bid and ask can match based on price compatibility

use types::numeric::Price;
use types::order::Side;

/// Check if a bid and ask can match at given prices
///
/// For a buy order to match with a sell order:
/// - Buy price must be >= sell price
pub fn can_match(bid_price: Price, ask_price: Price) -> bool {
    bid_price >= ask_price
}

/// Check if an incoming order can match against a resting order
///
/// Returns true if the incoming order price crosses the resting order price
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price, // Buy crosses sell if bid >= ask
        Side::Sell => incoming_price <= resting_price, // Sell crosses buy if ask <= bid
    }
}
