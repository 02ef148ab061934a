//! # Pricing Engine
//!
//! Turns an order into a total for a given account, memoizing the result
//! per order shape.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     calculate(account, order)                           │
//! │                                                                         │
//! │  1. Account lookup ──────────── missing? → CoreError                   │
//! │     Amount range check ──────── out of range? → CoreError              │
//! │  2. Cache lookup (submitted shape) ── hit? → return cached total       │
//! │  3. Filter pass                                                        │
//! │     ├── drop sample products         ┐ each drop: diagnostic +         │
//! │     └── drop malformed bundles       ┘ cache re-check on reduced order │
//! │  4. Price pass (filtered copy, integer cents)                          │
//! │     ├── product: price × coefficient(tier, kind)                       │
//! │     └── bundle:  member price × bundle discount                        │
//! │  5. Cache lookup (reduced shape) ─── hit? → return cached total        │
//! │     otherwise store and return the fresh total                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The price pass uses checked arithmetic. A total that does not fit in
//! `i64` cents fails with [`CoreError::AmountOutOfRange`] and nothing is
//! cached.
//!
//! ## Cache Semantics
//! Entries are keyed by [`Fingerprint`] and never invalidated or evicted.
//! Catalog price changes do not reach totals that were already cached.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{CoreError, CoreResult};
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::money::Money;
use crate::types::{
    Account, AccountTier, Bundle, BundleKind, Multiplier, Order, Product, ProductKind,
};
use crate::validation::validate_order_amounts;

// =============================================================================
// Coefficients
// =============================================================================

/// Price coefficients for each account tier × product kind cell.
///
/// | Tier    | Normal | Premium |
/// |---------|--------|---------|
/// | Normal  | ×1.00  | ×1.50   |
/// | Premium | ×0.80  | ×0.95   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoefficientTable {
    #[serde(default = "default_normal_normal")]
    pub normal_account_normal_product: Multiplier,
    #[serde(default = "default_normal_premium")]
    pub normal_account_premium_product: Multiplier,
    #[serde(default = "default_premium_normal")]
    pub premium_account_normal_product: Multiplier,
    #[serde(default = "default_premium_premium")]
    pub premium_account_premium_product: Multiplier,
}

fn default_normal_normal() -> Multiplier {
    Multiplier::ONE
}

fn default_normal_premium() -> Multiplier {
    Multiplier::from_bps(15_000)
}

fn default_premium_normal() -> Multiplier {
    Multiplier::from_bps(8_000)
}

fn default_premium_premium() -> Multiplier {
    Multiplier::from_bps(9_500)
}

impl Default for CoefficientTable {
    fn default() -> Self {
        CoefficientTable {
            normal_account_normal_product: default_normal_normal(),
            normal_account_premium_product: default_normal_premium(),
            premium_account_normal_product: default_premium_normal(),
            premium_account_premium_product: default_premium_premium(),
        }
    }
}

impl CoefficientTable {
    /// Looks up the coefficient for a product line.
    pub fn coefficient(&self, tier: AccountTier, kind: ProductKind) -> Multiplier {
        match (tier, kind) {
            (AccountTier::Normal, ProductKind::Normal) => self.normal_account_normal_product,
            (AccountTier::Normal, ProductKind::Premium) => self.normal_account_premium_product,
            (AccountTier::Premium, ProductKind::Normal) => self.premium_account_normal_product,
            (AccountTier::Premium, ProductKind::Premium) => self.premium_account_premium_product,
            // Samples are free.
            (_, ProductKind::Sample) => Multiplier::ZERO,
        }
    }

    /// Iterates over every configured cell, for validation.
    pub fn cells(&self) -> [(&'static str, Multiplier); 4] {
        [
            ("normal_account_normal_product", self.normal_account_normal_product),
            ("normal_account_premium_product", self.normal_account_premium_product),
            ("premium_account_normal_product", self.premium_account_normal_product),
            ("premium_account_premium_product", self.premium_account_premium_product),
        ]
    }
}

// =============================================================================
// Order Cache
// =============================================================================

/// Fingerprint → total. Unbounded; grows by one entry per distinct priced
/// order shape.
#[derive(Debug, Clone, Default)]
pub struct OrderCache {
    entries: HashMap<Fingerprint, Money>,
}

impl OrderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Fingerprint) -> Option<Money> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: Fingerprint, total: Money) {
        self.entries.insert(key, total);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by fingerprint, for deterministic snapshots.
    pub fn to_sorted(&self) -> BTreeMap<Fingerprint, Money> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

impl FromIterator<(Fingerprint, Money)> for OrderCache {
    fn from_iter<I: IntoIterator<Item = (Fingerprint, Money)>>(iter: I) -> Self {
        OrderCache {
            entries: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The outcome of pricing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Total in minor units; convert with [`Money::to_major`] for display.
    pub total: Money,
    /// Soft notices about dropped line items.
    pub diagnostics: Diagnostics,
    /// True when the total came from the order cache.
    pub from_cache: bool,
}

/// Result of the filter pass.
enum Filtered {
    /// A reduced order matched a cached shape; stop here.
    Hit(Money),
    /// The order with every invalid line item removed.
    Reduced(Order),
}

// =============================================================================
// Engine
// =============================================================================

/// Prices orders and owns the order cache.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    coefficients: CoefficientTable,
    cache: OrderCache,
}

impl PricingEngine {
    pub fn new(coefficients: CoefficientTable) -> Self {
        PricingEngine {
            coefficients,
            cache: OrderCache::new(),
        }
    }

    pub fn coefficients(&self) -> &CoefficientTable {
        &self.coefficients
    }

    pub fn cache(&self) -> &OrderCache {
        &self.cache
    }

    /// Replaces the cache wholesale (snapshot import).
    pub fn replace_cache(&mut self, cache: OrderCache) {
        self.cache = cache;
    }

    /// Computes the total for `order` as bought by `account_name`.
    ///
    /// Fails when the account does not exist, when a line price lies outside
    /// `0..=MAX_AMOUNT_CENTS`, or when the total overflows. Every other
    /// problem is reported as a [`Diagnostic`] next to the best achievable
    /// total.
    ///
    /// ## Example
    /// ```rust
    /// use std::collections::HashMap;
    /// use ledger_core::money::Money;
    /// use ledger_core::pricing::PricingEngine;
    /// use ledger_core::types::{Account, AccountTier, Order, Product, ProductKind};
    ///
    /// let mut accounts = HashMap::new();
    /// accounts.insert("Dimas".to_string(), Account::new("Dimas", AccountTier::Premium));
    ///
    /// let order = Order::default()
    ///     .with_product(Product::new("banana", Money::from_major(40.0), ProductKind::Normal))
    ///     .with_product(Product::new("apple", Money::from_major(30.0), ProductKind::Premium));
    ///
    /// let mut engine = PricingEngine::default();
    /// let quote = engine.calculate(&accounts, "Dimas", &order).unwrap();
    /// assert_eq!(quote.total.to_major(), 60.5);
    /// ```
    pub fn calculate(
        &mut self,
        accounts: &HashMap<String, Account>,
        account_name: &str,
        order: &Order,
    ) -> CoreResult<Quote> {
        let account = accounts
            .get(account_name)
            .ok_or_else(|| CoreError::AccountNotFound(account_name.to_string()))?;
        validate_order_amounts(order)?;

        let mut diagnostics = Diagnostics::new();

        if let Some(total) = self.lookup(order, &mut diagnostics) {
            debug!(account = %account_name, total = %total, "Order served from cache");
            return Ok(Quote {
                total,
                diagnostics,
                from_cache: true,
            });
        }

        let reduced = match self.filter(order, &mut diagnostics) {
            Filtered::Hit(total) => {
                debug!(
                    account = %account_name,
                    total = %total,
                    dropped = diagnostics.len(),
                    "Reduced order served from cache"
                );
                return Ok(Quote {
                    total,
                    diagnostics,
                    from_cache: true,
                });
            }
            Filtered::Reduced(reduced) => reduced,
        };

        let total = self.price(account.tier, order, &reduced)?;

        match fingerprint(&reduced) {
            Ok(key) => {
                if let Some(cached) = self.cache.get(&key) {
                    debug!(account = %account_name, total = %cached, "Reduced order already cached");
                    return Ok(Quote {
                        total: cached,
                        diagnostics,
                        from_cache: true,
                    });
                }
                self.cache.insert(key, total);
                debug!(
                    account = %account_name,
                    total = %total,
                    cached_orders = self.cache.len(),
                    "Order priced and cached"
                );
            }
            Err(err) => diagnostics.push(Diagnostic::FingerprintUnavailable {
                reason: err.to_string(),
            }),
        }

        Ok(Quote {
            total,
            diagnostics,
            from_cache: false,
        })
    }

    /// Cache lookup that downgrades fingerprint failures to a diagnostic.
    fn lookup(&self, order: &Order, diagnostics: &mut Diagnostics) -> Option<Money> {
        match fingerprint(order) {
            Ok(key) => self.cache.get(&key),
            Err(err) => {
                diagnostics.push(Diagnostic::FingerprintUnavailable {
                    reason: err.to_string(),
                });
                None
            }
        }
    }

    /// Builds the reduced order, re-checking the cache after every drop.
    fn filter(&self, order: &Order, diagnostics: &mut Diagnostics) -> Filtered {
        let mut products: Vec<Product> = Vec::with_capacity(order.products.len());
        for (idx, product) in order.products.iter().enumerate() {
            if !product.is_sample() {
                products.push(product.clone());
                continue;
            }

            debug!(product = %product.name, "Dropping sample product from plain order");
            diagnostics.push(Diagnostic::SampleProductDropped {
                product: product.name.clone(),
            });

            let candidate = Order {
                products: products
                    .iter()
                    .chain(&order.products[idx + 1..])
                    .cloned()
                    .collect(),
                bundles: order.bundles.clone(),
            };
            if let Some(total) = self.lookup(&candidate, diagnostics) {
                return Filtered::Hit(total);
            }
        }

        let mut bundles: Vec<Bundle> = Vec::with_capacity(order.bundles.len());
        for (idx, bundle) in order.bundles.iter().enumerate() {
            let Some(rejection) = reject_bundle(bundle, &order.products) else {
                bundles.push(bundle.clone());
                continue;
            };

            debug!(bundle = %bundle.name, reason = %rejection, "Dropping bundle");
            diagnostics.push(rejection);

            let candidate = Order {
                products: products.clone(),
                bundles: bundles
                    .iter()
                    .chain(&order.bundles[idx + 1..])
                    .cloned()
                    .collect(),
            };
            if let Some(total) = self.lookup(&candidate, diagnostics) {
                return Filtered::Hit(total);
            }
        }

        Filtered::Reduced(Order { products, bundles })
    }

    /// Sums every surviving line in minor units.
    fn price(&self, tier: AccountTier, submitted: &Order, reduced: &Order) -> CoreResult<Money> {
        let mut total = Money::zero();

        for product in &reduced.products {
            let coefficient = self.coefficients.coefficient(tier, product.kind);
            total = add_line(total, product.price.checked_scale(coefficient))?;
        }

        for bundle in &reduced.bundles {
            // A sample bundle is priced from the order's own two loose
            // products, not from its members.
            let members = match bundle.kind {
                BundleKind::Normal => &bundle.products,
                BundleKind::Sample => &submitted.products,
            };
            for member in members {
                total = add_line(total, member.price.checked_scale(bundle.discount))?;
            }
        }

        Ok(total)
    }
}

/// Adds one scaled line to a running total; `None` means the line itself
/// overflowed.
fn add_line(total: Money, line: Option<Money>) -> CoreResult<Money> {
    line.and_then(|line| total.checked_add(line))
        .ok_or_else(|| CoreError::AmountOutOfRange("pricing an order".to_string()))
}

/// Returns why a bundle cannot be priced, if it cannot.
///
/// `loose` is the order's product list as submitted.
fn reject_bundle(bundle: &Bundle, loose: &[Product]) -> Option<Diagnostic> {
    match bundle.kind {
        BundleKind::Normal => bundle
            .first_sample()
            .map(|sample| Diagnostic::BundleContainsSample {
                bundle: bundle.name.clone(),
                product: sample.name.clone(),
            }),
        BundleKind::Sample => {
            if loose.len() != 2 {
                return Some(Diagnostic::SampleBundleProductCount {
                    bundle: bundle.name.clone(),
                    count: loose.len(),
                });
            }

            let (mut regular, mut samples) = (0usize, 0usize);
            for product in loose {
                if product.is_sample() {
                    samples += 1;
                } else {
                    regular += 1;
                }
                if regular > 1 || samples > 1 {
                    return Some(Diagnostic::SampleBundleComposition {
                        bundle: bundle.name.clone(),
                        product: product.name.clone(),
                    });
                }
            }
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
