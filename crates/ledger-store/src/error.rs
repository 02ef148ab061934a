//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (ledger-core)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds lookups, duplicates, balance,         │
//! │       │                      snapshot and config failures              │
//! │       ▼                                                                 │
//! │  Caller (Shop trait consumer)                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a HARD failure: the operation is aborted and nothing
//! is mutated. Soft issues travel as `Diagnostics` inside successful results.

use ledger_core::{CoreError, Diagnostics, Money, ValidationError};
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Account, product or bundle not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Name already taken.
    #[error("{entity} '{id}' already exists")]
    AlreadyExists { entity: String, id: String },

    /// The account cannot cover the order total; nothing was debited.
    ///
    /// Carries the pricing diagnostics so callers still learn which line
    /// items were dropped.
    #[error("Insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        account: String,
        required: Money,
        available: Money,
        diagnostics: Diagnostics,
    },

    /// Snapshot bytes could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Snapshot was written by an incompatible format version.
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshot { found: u32, expected: u32 },

    /// Configuration could not be loaded, parsed or saved.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::AlreadyExists {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// True for any "does not exist" failure, including a missing account
    /// reported by the pricing engine.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. } | StoreError::Core(CoreError::AccountNotFound(_))
        )
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Snapshot(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::already_exists("account", "Pavel_007");
        assert_eq!(err.to_string(), "account 'Pavel_007' already exists");

        let err = StoreError::not_found("product", "Apple");
        assert_eq!(err.to_string(), "product not found: Apple");

        let err = StoreError::InsufficientBalance {
            account: "Dimas".to_string(),
            required: Money::from_cents(6050),
            available: Money::from_cents(1000),
            diagnostics: Diagnostics::new(),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance for Dimas: required 60.50, available 10.00"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(StoreError::not_found("bundle", "x").is_not_found());
        assert!(StoreError::from(CoreError::AccountNotFound("x".into())).is_not_found());
        assert!(!StoreError::already_exists("bundle", "x").is_not_found());
    }
}
