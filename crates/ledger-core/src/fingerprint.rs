//! # Order Fingerprinting
//!
//! A fingerprint is the canonical JSON encoding of an order. It is the
//! order cache's only key, so two orders share a fingerprint exactly when
//! they list the same products and bundles, in the same sequence, with the
//! same field values.
//!
//! ## Why JSON Is Canonical Here
//! ```text
//! Order ─► Vec<Product>, Vec<Bundle>     sequences keep submission order
//!            │
//!            └─► struct fields           serde emits declaration order
//!                  └─► Money, Multiplier integers, no float formatting
//! ```
//! No hash maps take part in the encoding, so iteration order cannot leak
//! into the key.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::Order;

/// Content-derived cache key for an order shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the fingerprint of an order.
///
/// ## Example
/// ```rust
/// use ledger_core::fingerprint::fingerprint;
/// use ledger_core::money::Money;
/// use ledger_core::types::{Order, Product, ProductKind};
///
/// let order = Order::default()
///     .with_product(Product::new("banana", Money::from_cents(4000), ProductKind::Normal));
/// assert_eq!(fingerprint(&order).unwrap(), fingerprint(&order.clone()).unwrap());
/// ```
pub fn fingerprint(order: &Order) -> CoreResult<Fingerprint> {
    serde_json::to_string(order)
        .map(Fingerprint)
        .map_err(|e| CoreError::Serialization(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Bundle, BundleKind, Multiplier, Product, ProductKind};

    fn banana() -> Product {
        Product::new("banana", Money::from_cents(4000), ProductKind::Normal)
    }

    fn apple() -> Product {
        Product::new("apple", Money::from_cents(3000), ProductKind::Premium)
    }

    #[test]
    fn test_identical_orders_share_fingerprint() {
        let a = Order::new(vec![banana(), apple()], vec![]);
        let b = Order::new(vec![banana(), apple()], vec![]);
        assert_eq!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn test_sequence_order_matters() {
        let a = Order::new(vec![banana(), apple()], vec![]);
        let b = Order::new(vec![apple(), banana()], vec![]);
        assert_ne!(fingerprint(&a).unwrap(), fingerprint(&b).unwrap());
    }

    #[test]
    fn test_field_values_matter() {
        let a = Order::new(vec![banana()], vec![]);

        let mut pricier = banana();
        pricier.price = Money::from_cents(4001);
        let b = Order::new(vec![pricier], vec![]);

        let mut premium = banana();
        premium.kind = ProductKind::Premium;
        let c = Order::new(vec![premium], vec![]);

        let fa = fingerprint(&a).unwrap();
        assert_ne!(fa, fingerprint(&b).unwrap());
        assert_ne!(fa, fingerprint(&c).unwrap());
    }

    #[test]
    fn test_bundles_are_part_of_the_key() {
        let bundle = Bundle::new(
            "fruit",
            vec![banana(), apple()],
            BundleKind::Normal,
            Multiplier::from_discount_pct(10.0),
        );
        let plain = Order::new(vec![banana()], vec![]);
        let bundled = plain.clone().with_bundle(bundle.clone());

        let mut deeper = bundle;
        deeper.discount = Multiplier::from_discount_pct(20.0);
        let deeper = plain.clone().with_bundle(deeper);

        assert_ne!(fingerprint(&plain).unwrap(), fingerprint(&bundled).unwrap());
        assert_ne!(fingerprint(&bundled).unwrap(), fingerprint(&deeper).unwrap());
    }

    #[test]
    fn test_empty_order_fingerprint_is_stable() {
        let key = fingerprint(&Order::default()).unwrap();
        assert_eq!(key.as_str(), r#"{"products":[],"bundles":[]}"#);
    }
}
