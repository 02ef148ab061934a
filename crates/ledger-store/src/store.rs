//! # In-Memory Store
//!
//! The single owner of all ledger state.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             Store                                       │
//! │                                                                         │
//! │   accounts  HashMap<String, Account>   ← accounts.rs                   │
//! │   products  HashMap<String, Product>   ← catalog.rs                    │
//! │   bundles   HashMap<String, Bundle>    ← catalog.rs                    │
//! │   engine    PricingEngine              ← orders.rs (owns order cache)  │
//! │                                                                         │
//! │   snapshot.rs reads and replaces all four at once                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! A `Store` is a plain value with `&mut self` mutators. Sharing it across
//! threads means wrapping the whole store in one lock; balance debits and
//! cache inserts are read-modify-write sequences.

use std::collections::HashMap;

use ledger_core::{Account, AccountTier, Bundle, PricingEngine, Product};

use crate::config::LedgerConfig;

/// In-memory ledger: accounts, catalog, and the pricing engine.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) accounts: HashMap<String, Account>,
    pub(crate) products: HashMap<String, Product>,
    pub(crate) bundles: HashMap<String, Bundle>,
    pub(crate) engine: PricingEngine,
    pub(crate) default_tier: AccountTier,
}

impl Store {
    /// Creates an empty store with default coefficients.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store using configured coefficients and default tier.
    pub fn with_config(config: &LedgerConfig) -> Self {
        Store {
            engine: PricingEngine::new(config.pricing),
            default_tier: config.accounts.default_tier,
            ..Self::default()
        }
    }

    /// Number of distinct order shapes in the pricing cache.
    pub fn cached_order_count(&self) -> usize {
        self.engine.cache().len()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    pub fn bundle(&self, name: &str) -> Option<&Bundle> {
        self.bundles.get(name)
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::Multiplier;

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert_eq!(store.account_count(), 0);
        assert_eq!(store.cached_order_count(), 0);
        assert!(store.product("banana").is_none());
        assert!(store.bundle("combo").is_none());
    }

    #[test]
    fn test_with_config() {
        let mut config = LedgerConfig::default();
        config.accounts.default_tier = AccountTier::Premium;
        config.pricing.premium_account_normal_product = Multiplier::from_bps(7000);

        let store = Store::with_config(&config);
        assert_eq!(store.default_tier, AccountTier::Premium);
        assert_eq!(
            store.engine().coefficients().premium_account_normal_product.bps(),
            7000
        );
    }
}
