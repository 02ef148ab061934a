//! # ledger-core: Pure Pricing Logic for the Shop Ledger
//!
//! This crate holds the part of the ledger with real design content: turning
//! a heterogeneous order into a total. Everything here is deterministic and
//! free of I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop Ledger Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              ledger-store (Store, Shop trait)                   │   │
//! │  │   register, deposit, catalog CRUD, place, import/export         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │  pricing  │  │ fingerprint │  │   money   │  │validation│  │   │
//! │  │   │  Engine   │──│  cache key  │  │  cents    │  │  rules   │  │   │
//! │  │   │  Cache    │  └─────────────┘  └───────────┘  └──────────┘  │   │
//! │  │   └───────────┘                                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Account, Product, Bundle, Order)
//! - [`money`] - Minor-unit money with round-half-up conversion
//! - [`fingerprint`] - Canonical order encoding used as the cache key
//! - [`pricing`] - Pricing engine and order cache
//! - [`diagnostics`] - Soft, non-fatal notices about dropped line items
//! - [`error`] - Hard error types
//! - [`validation`] - Catalog rules (prices, discounts, bundle composition)
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use ledger_core::{Account, AccountTier, Money, Order, PricingEngine, Product, ProductKind};
//!
//! let mut accounts = HashMap::new();
//! accounts.insert("Dimas".to_string(), Account::new("Dimas", AccountTier::Premium));
//!
//! let order = Order::default()
//!     .with_product(Product::new("banana", Money::from_major(40.0), ProductKind::Normal))
//!     .with_product(Product::sample("sapre"))
//!     .with_product(Product::new("apple", Money::from_major(30.0), ProductKind::Premium));
//!
//! let mut engine = PricingEngine::default();
//! let quote = engine.calculate(&accounts, "Dimas", &order).unwrap();
//!
//! // banana 40 × 0.80 + apple 30 × 0.95, sample dropped with a notice
//! assert_eq!(quote.total.to_major(), 60.5);
//! assert_eq!(quote.diagnostics.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod diagnostics;
pub mod error;
pub mod fingerprint;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fingerprint::{fingerprint, Fingerprint};
pub use money::Money;
pub use pricing::{CoefficientTable, OrderCache, PricingEngine, Quote};
pub use types::*;

// =============================================================================
// Constants
// =============================================================================

/// Largest price, deposit, or balance the ledger accepts, in cents
/// (one trillion major units).
///
/// ## Business Reason
/// Keeps every tier coefficient and bundle sum far inside `i64`, so the
/// overflow checks in pricing only trip on corrupt input.
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000_000;
