//! # Diagnostics
//!
//! Soft, non-fatal notices produced while pricing an order. A diagnostic
//! never aborts an operation: the offending line item is dropped and the
//! notice travels back next to a usable total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single notice about a dropped or adjusted line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A sample product was listed as a plain order line.
    SampleProductDropped { product: String },

    /// A normal bundle contained a sample member.
    BundleContainsSample { bundle: String, product: String },

    /// A sample bundle was ordered without exactly two loose products.
    SampleBundleProductCount { bundle: String, count: usize },

    /// A sample bundle's two loose products were not one regular item plus
    /// one sample.
    SampleBundleComposition { bundle: String, product: String },

    /// The order could not be fingerprinted; it was priced without the cache.
    FingerprintUnavailable { reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SampleProductDropped { product } => {
                write!(f, "sample product '{}' in plain order dropped", product)
            }
            Diagnostic::BundleContainsSample { bundle, product } => write!(
                f,
                "bundle '{}' dropped: sample product '{}' in a normal bundle",
                bundle, product
            ),
            Diagnostic::SampleBundleProductCount { bundle, count } => write!(
                f,
                "sample bundle '{}' dropped: order has {} products, expected 2",
                bundle, count
            ),
            Diagnostic::SampleBundleComposition { bundle, product } => write!(
                f,
                "sample bundle '{}' dropped: '{}' repeats a product class",
                bundle, product
            ),
            Diagnostic::FingerprintUnavailable { reason } => {
                write!(f, "order not cached: {}", reason)
            }
        }
    }
}

/// An ordered, accumulating list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.0.contains(diagnostic)
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One notice per line.
impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_lines() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(diagnostics.to_string(), "");

        diagnostics.push(Diagnostic::SampleProductDropped {
            product: "sapre".to_string(),
        });
        diagnostics.push(Diagnostic::SampleBundleProductCount {
            bundle: "taster".to_string(),
            count: 0,
        });

        assert_eq!(
            diagnostics.to_string(),
            "sample product 'sapre' in plain order dropped\n\
             sample bundle 'taster' dropped: order has 0 products, expected 2"
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_serializes_as_tagged_list() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::SampleProductDropped {
            product: "sapre".to_string(),
        });
        let json = serde_json::to_string(&diagnostics).unwrap();
        assert_eq!(json, r#"[{"kind":"sample_product_dropped","product":"sapre"}]"#);
    }
}
