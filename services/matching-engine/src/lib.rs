//! Order Book Maintenance & Matching Core
//!
//! Accepts buy/sell order submissions, maintains consistent per-token order
//! books, aggregates resting liquidity by price level, and matches crossing
//! orders into trades under strict price-time priority.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Deterministic matching (same inputs → same outputs)
//! - Trades execute at the maker's price
//! - Ledger aggregates always reconcile with open/partial order remainders
//! - One atomic commit per submission; events publish only after commit
//!
//! # Architecture
//!
//! ```text
//! submit / cancel
//!       │
//!  ┌────▼─────┐   per-token lock   ┌───────────┐
//!  │ Exchange │ ──────────────────▶│ TokenBook │
//!  └────┬─────┘                    └─────┬─────┘
//!       │                     bids/asks, │ store, feed
//!       │ broadcast (post-commit)        │
//!       ▼                                ▼
//!   subscribers                   BookView / Trades
//! ```

pub mod book;
pub mod config;
pub mod depth;
pub mod engine;
pub mod events;
pub mod feed;
pub mod matching;
pub mod service;
pub mod store;

pub use config::EngineConfig;
pub use depth::{BookView, Level};
pub use engine::{SubmitOutcome, TokenBook};
pub use events::BookEvent;
pub use service::Exchange;
