//! # Validation Module
//!
//! Catalog and account input validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Types                                                        │
//! │  └── Kinds and tiers are closed enums; unknown strings fail in FromStr │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (hard errors, nothing is mutated)                │
//! │  ├── Prices vs. product kind                                           │
//! │  ├── Amount ceiling (MAX_AMOUNT_CENTS)                                 │
//! │  ├── Discount percentage range                                         │
//! │  └── Bundle composition rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store (uniqueness, existence)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order lines only get a range check ([`validate_order_amounts`]);
//! samples and malformed bundles in an order are dropped by the pricing
//! engine with a diagnostic instead of failing.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Bundle, BundleKind, Multiplier, Order, Product};
use crate::MAX_AMOUNT_CENTS;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Inclusive bounds for a bundle discount percentage.
pub const MIN_DISCOUNT_PCT: u32 = 1;
pub const MAX_DISCOUNT_PCT: u32 = 99;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an account, product or bundle name.
///
/// ## Example
/// ```rust
/// use ledger_core::validation::validate_name;
///
/// assert!(validate_name("account", "Dimas").is_ok());
/// assert!(validate_name("account", "  ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product's price against its kind.
///
/// ## Rules
/// - Normal and premium products must cost more than zero
/// - Samples carry no price (exactly zero)
/// - No price exceeds [`MAX_AMOUNT_CENTS`]
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_name("product name", &product.name)?;

    if product.is_sample() {
        if !product.price.is_zero() {
            return Err(ValidationError::InvalidPrice {
                product: product.name.clone(),
                reason: "sample products carry no price".to_string(),
            });
        }
    } else if !product.price.is_positive() {
        return Err(ValidationError::InvalidPrice {
            product: product.name.clone(),
            reason: "price must be positive".to_string(),
        });
    }

    validate_amount(&format!("price of '{}'", product.name), product.price)
}

/// Validates a bundle discount percentage and converts it to the stored
/// multiplier.
///
/// ## Example
/// ```rust
/// use ledger_core::validation::validate_discount_pct;
///
/// assert_eq!(validate_discount_pct(25.0).unwrap().bps(), 7500);
/// assert!(validate_discount_pct(0.0).is_err());
/// assert!(validate_discount_pct(100.0).is_err());
/// ```
pub fn validate_discount_pct(pct: f64) -> ValidationResult<Multiplier> {
    // NaN fails both comparisons, so test the accepted range positively.
    let in_range = pct >= MIN_DISCOUNT_PCT as f64 && pct <= MAX_DISCOUNT_PCT as f64;
    if !in_range {
        return Err(ValidationError::InvalidDiscount {
            pct: pct.to_string(),
            min: MIN_DISCOUNT_PCT,
            max: MAX_DISCOUNT_PCT,
        });
    }
    Ok(Multiplier::from_discount_pct(pct))
}

/// Validates a deposit amount.
pub fn validate_deposit(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "deposit amount".to_string(),
        });
    }
    validate_amount("deposit amount", amount)
}

/// Validates that an amount lies in `0..=MAX_AMOUNT_CENTS`.
///
/// ## Example
/// ```rust
/// use ledger_core::money::Money;
/// use ledger_core::validation::validate_amount;
///
/// assert!(validate_amount("balance", Money::from_major(100.0)).is_ok());
/// assert!(validate_amount("balance", Money::from_cents(-1)).is_err());
/// assert!(validate_amount("price", Money::from_major(1e17)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() || amount.cents() > MAX_AMOUNT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_AMOUNT_CENTS,
        });
    }
    Ok(())
}

/// Range-checks every price in an order, loose lines and bundle members.
///
/// Kinds are not checked: a priced sample is still a valid order line and
/// is dropped during pricing.
pub fn validate_order_amounts(order: &Order) -> ValidationResult<()> {
    let members = order.bundles.iter().flat_map(|b| b.products.iter());
    for product in order.products.iter().chain(members) {
        validate_amount(&format!("price of '{}'", product.name), product.price)?;
    }
    Ok(())
}

/// Validates a stored bundle discount multiplier (1-99% off).
pub fn validate_discount(discount: Multiplier) -> ValidationResult<()> {
    let min_bps = (100 - MAX_DISCOUNT_PCT) * 100;
    let max_bps = (100 - MIN_DISCOUNT_PCT) * 100;
    if discount.bps() < min_bps || discount.bps() > max_bps {
        return Err(ValidationError::InvalidDiscount {
            pct: (100.0 - discount.factor() * 100.0).to_string(),
            min: MIN_DISCOUNT_PCT,
            max: MAX_DISCOUNT_PCT,
        });
    }
    Ok(())
}

// =============================================================================
// Bundle Composition
// =============================================================================

/// Builds a bundle from a main product and its companions, enforcing the
/// composition rules.
///
/// ## Rules
/// ```text
/// no samples at all      → Normal bundle, 2+ products
/// any sample present     → Sample bundle: exactly one non-sample product
///                          plus exactly one sample
/// ```
///
/// Members are stored main product first.
pub fn compose_bundle(
    name: &str,
    main: Product,
    discount_pct: f64,
    additional: Vec<Product>,
) -> ValidationResult<Bundle> {
    validate_name("bundle name", name)?;
    let discount = validate_discount_pct(discount_pct)?;

    // Main first, then the companions in call order. A bundle's fingerprint
    // bytes follow this order.
    let mut products = Vec::with_capacity(additional.len() + 1);
    products.push(main);
    products.extend(additional);

    let kind = bundle_kind(name, &products)?;
    Ok(Bundle::new(name, products, kind, discount))
}

/// Re-checks a stored bundle: name, discount, members, and that its kind
/// matches what [`compose_bundle`] would derive from the same members.
pub fn validate_bundle(bundle: &Bundle) -> ValidationResult<()> {
    validate_name("bundle name", &bundle.name)?;
    validate_discount(bundle.discount)?;

    let derived = bundle_kind(&bundle.name, &bundle.products)?;
    if derived != bundle.kind {
        return Err(ValidationError::Composition {
            bundle: bundle.name.clone(),
            reason: format!("members make a {} bundle, not {}", derived, bundle.kind),
        });
    }
    Ok(())
}

/// Derives the bundle kind from members stored main first.
fn bundle_kind(name: &str, products: &[Product]) -> ValidationResult<BundleKind> {
    let composition = |reason: &str| ValidationError::Composition {
        bundle: name.to_string(),
        reason: reason.to_string(),
    };

    let [main, first_additional, ..] = products else {
        return Err(composition("bundle has only one product"));
    };
    let leading_samples = main.is_sample() || first_additional.is_sample();

    for product in products {
        validate_product(product)?;
    }

    let samples = products.iter().filter(|p| p.is_sample()).count();
    if samples == 0 {
        Ok(BundleKind::Normal)
    } else if !leading_samples {
        Err(composition("normal bundle cannot contain sample products"))
    } else if products.len() != 2 {
        Err(composition("sample bundle has exactly two products"))
    } else if samples != 1 {
        Err(composition("sample bundle needs one non-sample product"))
    } else {
        Ok(BundleKind::Sample)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
