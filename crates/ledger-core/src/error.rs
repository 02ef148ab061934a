//! # Error Types
//!
//! Domain-specific error types for ledger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ledger-core errors (this file) - HARD failures                        │
//! │  ├── CoreError        - Pricing and parsing failures                   │
//! │  └── ValidationError  - Malformed catalog input                        │
//! │                                                                         │
//! │  ledger-store errors (separate crate)                                  │
//! │  └── StoreError       - Lookups, duplicates, balance, snapshots        │
//! │                                                                         │
//! │  Soft issues are NOT errors: see `diagnostics::Diagnostic`             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Hard failures from the pricing core. Any of these aborts the operation
/// with no mutation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The account named in a pricing request does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// An order could not be encoded into a canonical fingerprint.
    ///
    /// Pricing never surfaces this as a hard error; it is downgraded to a
    /// diagnostic and the order is priced without the cache.
    #[error("Order serialization failed: {0}")]
    Serialization(String),

    /// A kind, tier or sort key string did not name a known variant.
    #[error("Unknown {kind}: '{value}'")]
    UnknownKind { kind: String, value: String },

    /// A computed amount left the representable range.
    #[error("Amount out of range while {0}")]
    AmountOutOfRange(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog input validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Price is not valid for the product kind.
    #[error("Invalid price for '{product}': {reason}")]
    InvalidPrice { product: String, reason: String },

    /// Bundle discount percentage outside 1-99.
    #[error("Invalid discount {pct}%: must be between {min} and {max}")]
    InvalidDiscount { pct: String, min: u32, max: u32 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Bundle members break the composition rules.
    #[error("Invalid bundle '{bundle}': {reason}")]
    Composition { bundle: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
