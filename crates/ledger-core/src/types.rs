//! # Domain Types
//!
//! Core domain types used throughout the shop ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Account      │   │    Product      │   │     Bundle      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  name (key)     │   │  name (key)     │       │
//! │  │  balance        │   │  price          │   │  products       │       │
//! │  │  tier           │   │  kind           │   │  kind, discount │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────┐   ┌─────────────────┐         │
//! │  │  Order (transient request value)    │   │   Multiplier    │         │
//! │  │  products: Vec<Product>             │   │  bps (u32)      │         │
//! │  │  bundles:  Vec<Bundle>              │   │  9500 = ×0.95   │         │
//! │  └─────────────────────────────────────┘   └─────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders embed full product and bundle values rather than catalog names,
//! so a quote never depends on the catalog's current contents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Multiplier
// =============================================================================

/// A price multiplier in basis points (10000 = ×1.00).
///
/// ## Why Basis Points?
/// Tier coefficients (×1.50, ×0.95) and bundle discounts (32% off = ×0.68)
/// are applied to integer cents, so the factor itself is kept integral too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Multiplier(u32);

impl Multiplier {
    /// ×1.00, the identity multiplier.
    pub const ONE: Multiplier = Multiplier(10_000);

    /// ×0.00
    pub const ZERO: Multiplier = Multiplier(0);

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Multiplier(bps)
    }

    /// Builds the discount factor `1 - pct/100` for a bundle.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::types::Multiplier;
    ///
    /// assert_eq!(Multiplier::from_discount_pct(32.0).bps(), 6800);
    /// assert_eq!(Multiplier::from_discount_pct(12.5).bps(), 8750);
    /// ```
    pub fn from_discount_pct(pct: f64) -> Self {
        Multiplier(((100.0 - pct) * 100.0).round().max(0.0) as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the factor as a float (for display only).
    #[inline]
    pub fn factor(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier::ONE
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{:.4}", self.factor())
    }
}

// =============================================================================
// Kinds and Tiers
// =============================================================================

/// Account classification driving the pricing coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountTier {
    #[default]
    Normal,
    Premium,
}

/// What kind of catalog entry a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    #[default]
    Normal,
    Premium,
    /// Free sample. Only valid as part of a sample bundle.
    Sample,
}

/// Bundle composition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleKind {
    /// Two or more non-sample products, no samples.
    #[default]
    Normal,
    /// Exactly one non-sample product paired with one sample.
    Sample,
}

/// Ordering for account listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSortKey {
    #[default]
    Name,
    NameDescending,
    /// Ascending balance, ties broken by name.
    Balance,
}

macro_rules! impl_kind_str {
    ($ty:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($ty::$variant => write!(f, $text),)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($ty::$variant),)+
                    other => Err(CoreError::UnknownKind {
                        kind: $what.to_string(),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

impl_kind_str!(AccountTier, "account tier", { Normal => "normal", Premium => "premium" });
impl_kind_str!(ProductKind, "product kind", {
    Normal => "normal",
    Premium => "premium",
    Sample => "sample",
});
impl_kind_str!(BundleKind, "bundle kind", { Normal => "normal", Sample => "sample" });
impl_kind_str!(AccountSortKey, "sort key", {
    Name => "name",
    NameDescending => "name_descending",
    Balance => "balance",
});

// =============================================================================
// Account
// =============================================================================

/// A customer account. Never deleted; the balance changes only through
/// deposits and order settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub balance: Money,
    pub tier: AccountTier,
}

impl Account {
    pub fn new(name: impl Into<String>, tier: AccountTier) -> Self {
        Account {
            name: name.into(),
            balance: Money::zero(),
            tier,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, also used by value as an order line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog key.
    pub name: String,
    /// Positive for normal and premium products, zero for samples.
    pub price: Money,
    pub kind: ProductKind,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Money, kind: ProductKind) -> Self {
        Product {
            name: name.into(),
            price,
            kind,
        }
    }

    /// A zero-priced sample product.
    pub fn sample(name: impl Into<String>) -> Self {
        Product::new(name, Money::zero(), ProductKind::Sample)
    }

    #[inline]
    pub fn is_sample(&self) -> bool {
        self.kind == ProductKind::Sample
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// A named group of products sold together at a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub name: String,
    /// Member products, main product first.
    pub products: Vec<Product>,
    pub kind: BundleKind,
    /// Factor applied to every member's price (`1 - pct/100`).
    pub discount: Multiplier,
}

impl Bundle {
    pub fn new(
        name: impl Into<String>,
        products: Vec<Product>,
        kind: BundleKind,
        discount: Multiplier,
    ) -> Self {
        Bundle {
            name: name.into(),
            products,
            kind,
            discount,
        }
    }

    /// Returns the first sample member, if any.
    pub fn first_sample(&self) -> Option<&Product> {
        self.products.iter().find(|p| p.is_sample())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A request to buy: loose products plus bundles. Never stored; only its
/// fingerprint and computed total end up in the order cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub products: Vec<Product>,
    pub bundles: Vec<Bundle>,
}

impl Order {
    pub fn new(products: Vec<Product>, bundles: Vec<Bundle>) -> Self {
        Order { products, bundles }
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub fn with_bundle(mut self, bundle: Bundle) -> Self {
        self.bundles.push(bundle);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.bundles.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_from_discount_pct() {
        assert_eq!(Multiplier::from_discount_pct(1.0).bps(), 9900);
        assert_eq!(Multiplier::from_discount_pct(99.0).bps(), 100);
        assert_eq!(Multiplier::from_discount_pct(32.0).factor(), 0.68);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("premium".parse::<AccountTier>().unwrap(), AccountTier::Premium);
        assert_eq!(" Sample ".parse::<ProductKind>().unwrap(), ProductKind::Sample);
        assert_eq!("normal".parse::<BundleKind>().unwrap(), BundleKind::Normal);
        assert_eq!(
            "name_descending".parse::<AccountSortKey>().unwrap(),
            AccountSortKey::NameDescending
        );

        let err = "gold".parse::<AccountTier>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownKind { .. }));
        assert_eq!(err.to_string(), "Unknown account tier: 'gold'");
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [ProductKind::Normal, ProductKind::Premium, ProductKind::Sample] {
            assert_eq!(kind.to_string().parse::<ProductKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AccountTier::default(), AccountTier::Normal);
        assert_eq!(Multiplier::default(), Multiplier::ONE);
        assert!(Order::default().is_empty());
    }

    #[test]
    fn test_new_account_starts_empty() {
        let account = Account::new("Dimas", AccountTier::Premium);
        assert!(account.balance.is_zero());
        assert_eq!(account.tier, AccountTier::Premium);
    }

    #[test]
    fn test_bundle_first_sample() {
        let bundle = Bundle::new(
            "taster",
            vec![
                Product::new("tea", Money::from_cents(500), ProductKind::Normal),
                Product::sample("biscuit"),
            ],
            BundleKind::Sample,
            Multiplier::from_discount_pct(10.0),
        );
        assert_eq!(bundle.first_sample().map(|p| p.name.as_str()), Some("biscuit"));
    }
}
