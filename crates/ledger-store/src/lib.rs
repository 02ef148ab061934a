//! # ledger-store: In-Memory Shop Ledger
//!
//! Owns the ledger state (accounts, products, bundles, order cache) and
//! exposes it through the [`Shop`] capability trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shop Ledger Data Flow                            │
//! │                                                                         │
//! │  Caller (seed binary, tests, front ends)                               │
//! │       │  &mut dyn Shop                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ledger-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌──────────┐  ┌───────────┐  │   │
//! │  │   │  accounts  │  │  catalog   │  │  orders  │  │ snapshot  │  │   │
//! │  │   │  register  │  │  products  │  │ calculate│  │  export   │  │   │
//! │  │   │  deposit   │  │  bundles   │  │  place   │  │  import   │  │   │
//! │  │   └────────────┘  └────────────┘  └────┬─────┘  └───────────┘  │   │
//! │  │          config.rs (TOML + env)         │   telemetry.rs        │   │
//! │  └─────────────────────────────────────────┼───────────────────────┘   │
//! │                                            ▼                            │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        ledger-core (PricingEngine, OrderCache, validation)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Store` struct and constructors
//! - [`shop`] - The `Shop` trait
//! - [`accounts`] - Account registration, tiers, deposits, listing
//! - [`catalog`] - Product and bundle CRUD
//! - [`orders`] - Order pricing and placement
//! - [`snapshot`] - Whole-state export and import
//! - [`config`] - TOML configuration with environment overrides
//! - [`telemetry`] - Logging initialization
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use ledger_core::{AccountTier, Money, Order, Product, ProductKind};
//! use ledger_store::{Shop, Store};
//!
//! let mut store = Store::new();
//! store.register_account("Dimas").unwrap();
//! store.set_account_tier("Dimas", AccountTier::Premium).unwrap();
//! store.deposit_balance("Dimas", Money::from_major(100.0)).unwrap();
//!
//! let order = Order::default()
//!     .with_product(Product::new("banana", Money::from_major(40.0), ProductKind::Normal))
//!     .with_product(Product::new("apple", Money::from_major(30.0), ProductKind::Premium));
//!
//! let placement = store.place_order("Dimas", &order).unwrap();
//! assert_eq!(placement.balance.to_major(), 39.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accounts;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod shop;
pub mod snapshot;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::LedgerConfig;
pub use error::{StoreError, StoreResult};
pub use orders::Placement;
pub use shop::Shop;
pub use snapshot::{StoreSnapshot, SNAPSHOT_VERSION};
pub use store::Store;
