//! Types library for the token order book core
//!
//! This library provides all core type definitions shared between the
//! matching core and its collaborators (persistence, market-data feed, UI),
//! ensuring type safety and deterministic decimal behavior.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, TradeId, UserId, TokenId)
//! - `numeric`: Fixed-point decimal types (Price, Amount)
//! - `token`: Token metadata and market statistics
//! - `order`: Order lifecycle types
//! - `trade`: Trade execution types
//! - `errors`: Error taxonomy

// Public modules
pub mod errors;
pub mod ids;
pub mod numeric;
pub mod order;
pub mod token;
pub mod trade;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::token::*;
    pub use crate::trade::*;
}
