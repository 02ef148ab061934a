//! # State Snapshots
//!
//! Whole-store export and import as a versioned JSON document.
//!
//! ## Format
//! ```text
//! {
//!   "version": 1,
//!   "exported_at": "2026-10-19T12:00:00Z",
//!   "accounts": [ { "name", "balance", "tier" }, ... ]   ← sorted by name
//!   "products": [ { "name", "price", "kind" }, ... ]     ← sorted by name
//!   "bundles":  [ { "name", "products", "kind", "discount" }, ... ]
//!   "orders":   { "<fingerprint>": <total cents>, ... }  ← sorted by key
//! }
//! ```
//!
//! Import is all-or-nothing: the document is decoded and checked in full
//! before any map is replaced. Checks applied to every entry:
//!
//! - accounts: non-blank name, balance in `0..=MAX_AMOUNT_CENTS`
//! - products: the same price and kind rules as `add_product`
//! - bundles: the same composition rules as `add_bundle`, and the stored
//!   kind must match the members
//! - orders: cached totals are never negative

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use ledger_core::validation::{validate_amount, validate_bundle, validate_name, validate_product};
use ledger_core::{Account, Bundle, Fingerprint, Money, OrderCache, Product, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of the whole store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub accounts: Vec<Account>,
    pub products: Vec<Product>,
    pub bundles: Vec<Bundle>,
    #[serde(default)]
    pub orders: BTreeMap<Fingerprint, Money>,
}

impl StoreSnapshot {
    /// Captures the store with deterministic ordering.
    pub fn capture(store: &Store) -> Self {
        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            accounts: sorted_values(&store.accounts, |a| &a.name),
            products: sorted_values(&store.products, |p| &p.name),
            bundles: sorted_values(&store.bundles, |b| &b.name),
            orders: store.engine.cache().to_sorted(),
        }
    }
}

fn sorted_values<T: Clone>(map: &HashMap<String, T>, key: impl Fn(&T) -> &String) -> Vec<T> {
    let mut values: Vec<T> = map.values().cloned().collect();
    values.sort_by(|a, b| key(a).cmp(key(b)));
    values
}

/// Builds a name-keyed map, rejecting repeated names.
fn index_by_name<T>(
    entity: &str,
    items: Vec<T>,
    key: impl Fn(&T) -> &String,
) -> StoreResult<HashMap<String, T>> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        let name = key(&item).clone();
        if map.contains_key(&name) {
            return Err(StoreError::Snapshot(format!(
                "duplicate {} '{}' in snapshot",
                entity, name
            )));
        }
        map.insert(name, item);
    }
    Ok(map)
}

/// Applies the catalog and account rules to every decoded entry.
fn validate_snapshot(snapshot: &StoreSnapshot) -> StoreResult<()> {
    let invalid = |entity: &str, name: &str, err: ValidationError| {
        StoreError::Snapshot(format!("invalid {} '{}': {}", entity, name, err))
    };

    for account in &snapshot.accounts {
        validate_name("account name", &account.name)
            .and_then(|()| validate_amount("balance", account.balance))
            .map_err(|e| invalid("account", &account.name, e))?;
    }
    for product in &snapshot.products {
        validate_product(product).map_err(|e| invalid("product", &product.name, e))?;
    }
    for bundle in &snapshot.bundles {
        validate_bundle(bundle).map_err(|e| invalid("bundle", &bundle.name, e))?;
    }
    if let Some((key, total)) = snapshot.orders.iter().find(|(_, total)| total.is_negative()) {
        return Err(StoreError::Snapshot(format!(
            "negative cached total {} for order {}",
            total, key
        )));
    }
    Ok(())
}

impl Store {
    /// Serializes the whole store.
    pub fn export_state(&self) -> StoreResult<Vec<u8>> {
        let snapshot = StoreSnapshot::capture(self);
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        info!(
            accounts = snapshot.accounts.len(),
            products = snapshot.products.len(),
            bundles = snapshot.bundles.len(),
            orders = snapshot.orders.len(),
            bytes = bytes.len(),
            "State exported"
        );
        Ok(bytes)
    }

    /// Replaces the whole store with a previously exported snapshot.
    ///
    /// On any error the current state is left untouched.
    pub fn import_state(&mut self, bytes: &[u8]) -> StoreResult<()> {
        let snapshot: StoreSnapshot = serde_json::from_slice(bytes).map_err(|e| {
            warn!(error = %e, "Rejected malformed snapshot");
            StoreError::from(e)
        })?;

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(version = snapshot.version, "Rejected snapshot version");
            return Err(StoreError::UnsupportedSnapshot {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        validate_snapshot(&snapshot)
            .inspect_err(|e| warn!(error = %e, "Rejected invalid snapshot"))?;

        let accounts = index_by_name("account", snapshot.accounts, |a| &a.name)?;
        let products = index_by_name("product", snapshot.products, |p| &p.name)?;
        let bundles = index_by_name("bundle", snapshot.bundles, |b| &b.name)?;
        let cache: OrderCache = snapshot.orders.into_iter().collect();

        info!(
            accounts = accounts.len(),
            products = products.len(),
            bundles = bundles.len(),
            orders = cache.len(),
            exported_at = %snapshot.exported_at,
            "State imported"
        );

        self.accounts = accounts;
        self.products = products;
        self.bundles = bundles;
        self.engine.replace_cache(cache);
        Ok(())
    }
}
