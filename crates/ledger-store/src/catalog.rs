//! # Catalog Operations
//!
//! Product and bundle CRUD.
//!
//! ## Check Order
//! ```text
//! add_product       price rule → duplicate name
//! modify_product    price rule → missing name
//! add_bundle        discount   → duplicate name → composition rules
//! change_discount   discount   → missing name
//! ```
//!
//! Editing the catalog never touches the order cache: previously priced
//! order shapes keep their cached totals.

use ledger_core::validation::{compose_bundle, validate_discount_pct, validate_product};
use ledger_core::Product;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    // =========================================================================
    // Products
    // =========================================================================

    pub fn add_product(&mut self, product: Product) -> StoreResult<()> {
        validate_product(&product)?;

        if self.products.contains_key(&product.name) {
            return Err(StoreError::already_exists("product", &product.name));
        }

        info!(product = %product.name, price = %product.price, kind = %product.kind, "Product added");
        self.products.insert(product.name.clone(), product);
        Ok(())
    }

    /// Replaces an existing catalog entry wholesale.
    pub fn modify_product(&mut self, product: Product) -> StoreResult<()> {
        validate_product(&product)?;

        let entry = self
            .products
            .get_mut(&product.name)
            .ok_or_else(|| StoreError::not_found("product", &product.name))?;

        info!(product = %product.name, price = %product.price, kind = %product.kind, "Product modified");
        *entry = product;
        Ok(())
    }

    pub fn remove_product(&mut self, name: &str) -> StoreResult<()> {
        self.products
            .remove(name)
            .ok_or_else(|| StoreError::not_found("product", name))?;

        info!(product = %name, "Product removed");
        Ok(())
    }

    // =========================================================================
    // Bundles
    // =========================================================================

    /// Composes and registers a bundle.
    ///
    /// The bundle is normal unless a sample is involved, in which case it
    /// must pair exactly one regular product with one sample.
    pub fn add_bundle(
        &mut self,
        name: &str,
        main: Product,
        discount_pct: f64,
        additional: Vec<Product>,
    ) -> StoreResult<()> {
        validate_discount_pct(discount_pct)?;

        if self.bundles.contains_key(name) {
            return Err(StoreError::already_exists("bundle", name));
        }

        let bundle = compose_bundle(name, main, discount_pct, additional)?;
        info!(
            bundle = %name,
            kind = %bundle.kind,
            members = bundle.products.len(),
            discount = %bundle.discount,
            "Bundle added"
        );
        self.bundles.insert(name.to_string(), bundle);
        Ok(())
    }

    pub fn change_bundle_discount(&mut self, name: &str, discount_pct: f64) -> StoreResult<()> {
        let discount = validate_discount_pct(discount_pct)?;

        let bundle = self
            .bundles
            .get_mut(name)
            .ok_or_else(|| StoreError::not_found("bundle", name))?;

        debug!(bundle = %name, from = %bundle.discount, to = %discount, "Changing bundle discount");
        bundle.discount = discount;
        Ok(())
    }

    pub fn remove_bundle(&mut self, name: &str) -> StoreResult<()> {
        self.bundles
            .remove(name)
            .ok_or_else(|| StoreError::not_found("bundle", name))?;

        info!(bundle = %name, "Bundle removed");
        Ok(())
    }
}
