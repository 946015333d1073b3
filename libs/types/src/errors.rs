//! Error taxonomy for the order book core
//!
//! Four classes, using thiserror:
//! - `InvalidOrder`: user-correctable, rejected before any mutation
//! - `InvalidTransition`: cancel/fill on a terminal or unknown order
//! - `InvariantViolation`: internal consistency failure, indicates a bug
//! - `NotFound`: unknown order or token id

use crate::numeric::NumericError;
use thiserror::Error;

/// Top-level error for all core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error("Invalid transition for order {order_id}: {reason}")]
    InvalidTransition { order_id: String, reason: String },

    #[error("Invariant violation: {detail}")]
    InvariantViolation { detail: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl CoreError {
    /// Invalid order rejection with a human-readable reason
    pub fn invalid_order(reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            reason: reason.into(),
        }
    }

    /// Unknown order id
    pub fn order_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "order",
            id: id.to_string(),
        }
    }

    /// Unknown token id
    pub fn token_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "token",
            id: id.to_string(),
        }
    }
}

impl From<NumericError> for CoreError {
    fn from(err: NumericError) -> Self {
        Self::InvalidOrder {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_order_display() {
        let err = CoreError::invalid_order("price must be positive");
        assert_eq!(err.to_string(), "Invalid order: price must be positive");
    }

    #[test]
    fn test_not_found_display() {
        let err = CoreError::token_not_found("abc");
        assert_eq!(err.to_string(), "token not found: abc");
    }

    #[test]
    fn test_from_numeric_error() {
        let err: CoreError = NumericError::Unparseable("x".to_string()).into();
        assert!(matches!(err, CoreError::InvalidOrder { .. }));
    }
}
