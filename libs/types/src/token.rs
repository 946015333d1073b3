//! Token metadata and market statistics
//!
//! Tokens are registered with the service and read-only to the matching
//! core. Price/volume statistics are refreshed by an external market-data
//! collaborator, never by matching itself.

use crate::ids::TokenId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tradeable token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub symbol: String,
    pub name: String,
    pub total_supply: Decimal,
    /// Unix nanos of the airdrop distribution, if scheduled
    pub airdrop_date: Option<i64>,
    pub current_price: Decimal,
    pub price_change_24h: Decimal,
    pub volume_24h: Decimal,
    pub created_at: i64, // Unix nanos
}

impl Token {
    /// Create a token with zeroed market statistics
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        total_supply: Decimal,
        created_at: i64,
    ) -> Self {
        Self {
            id: TokenId::new(),
            symbol: symbol.into(),
            name: name.into(),
            total_supply,
            airdrop_date: None,
            current_price: Decimal::ZERO,
            price_change_24h: Decimal::ZERO,
            volume_24h: Decimal::ZERO,
            created_at,
        }
    }
}

/// A market statistics refresh from the external market-data collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub current_price: Decimal,
    pub price_change_24h: Decimal,
    pub volume_24h: Decimal,
}
