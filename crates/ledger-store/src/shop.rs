//! # Shop Capability
//!
//! The full operation set a caller needs to run the shop, independent of
//! where the state lives. [`Store`] is the in-memory implementation.
//!
//! ```text
//! ┌────────────────────┐     ┌──────────────────────────────────────────┐
//! │ caller             │     │ Shop                                     │
//! │  (seed, tests,     │────►│  accounts  register / tier / deposit     │
//! │   front ends)      │     │  catalog   products / bundles            │
//! └────────────────────┘     │  orders    calculate / place             │
//!                            │  state     import / export               │
//!                            └──────────────────┬───────────────────────┘
//!                                               │ impl
//!                                               ▼
//!                                          Store (memory)
//! ```

use ledger_core::{Account, AccountSortKey, AccountTier, Money, Order, Product, Quote};

use crate::error::StoreResult;
use crate::orders::Placement;
use crate::store::Store;

/// Everything a shop front end can ask of the ledger.
pub trait Shop {
    // Accounts
    fn register_account(&mut self, name: &str) -> StoreResult<()>;
    fn set_account_tier(&mut self, name: &str, tier: AccountTier) -> StoreResult<()>;
    fn deposit_balance(&mut self, name: &str, amount: Money) -> StoreResult<()>;
    fn balance(&self, name: &str) -> StoreResult<Money>;
    fn list_accounts(&self, sort: AccountSortKey) -> Vec<Account>;

    // Products
    fn add_product(&mut self, product: Product) -> StoreResult<()>;
    fn modify_product(&mut self, product: Product) -> StoreResult<()>;
    fn remove_product(&mut self, name: &str) -> StoreResult<()>;

    // Bundles
    fn add_bundle(
        &mut self,
        name: &str,
        main: Product,
        discount_pct: f64,
        additional: Vec<Product>,
    ) -> StoreResult<()>;
    fn change_bundle_discount(&mut self, name: &str, discount_pct: f64) -> StoreResult<()>;
    fn remove_bundle(&mut self, name: &str) -> StoreResult<()>;

    // Orders
    fn calculate_order(&mut self, account: &str, order: &Order) -> StoreResult<Quote>;
    fn place_order(&mut self, account: &str, order: &Order) -> StoreResult<Placement>;

    // State
    fn import_state(&mut self, bytes: &[u8]) -> StoreResult<()>;
    fn export_state(&self) -> StoreResult<Vec<u8>>;
}

impl Shop for Store {
    fn register_account(&mut self, name: &str) -> StoreResult<()> {
        Store::register_account(self, name)
    }

    fn set_account_tier(&mut self, name: &str, tier: AccountTier) -> StoreResult<()> {
        Store::set_account_tier(self, name, tier)
    }

    fn deposit_balance(&mut self, name: &str, amount: Money) -> StoreResult<()> {
        Store::deposit_balance(self, name, amount)
    }

    fn balance(&self, name: &str) -> StoreResult<Money> {
        Store::balance(self, name)
    }

    fn list_accounts(&self, sort: AccountSortKey) -> Vec<Account> {
        Store::list_accounts(self, sort)
    }

    fn add_product(&mut self, product: Product) -> StoreResult<()> {
        Store::add_product(self, product)
    }

    fn modify_product(&mut self, product: Product) -> StoreResult<()> {
        Store::modify_product(self, product)
    }

    fn remove_product(&mut self, name: &str) -> StoreResult<()> {
        Store::remove_product(self, name)
    }

    fn add_bundle(
        &mut self,
        name: &str,
        main: Product,
        discount_pct: f64,
        additional: Vec<Product>,
    ) -> StoreResult<()> {
        Store::add_bundle(self, name, main, discount_pct, additional)
    }

    fn change_bundle_discount(&mut self, name: &str, discount_pct: f64) -> StoreResult<()> {
        Store::change_bundle_discount(self, name, discount_pct)
    }

    fn remove_bundle(&mut self, name: &str) -> StoreResult<()> {
        Store::remove_bundle(self, name)
    }

    fn calculate_order(&mut self, account: &str, order: &Order) -> StoreResult<Quote> {
        Store::calculate_order(self, account, order)
    }

    fn place_order(&mut self, account: &str, order: &Order) -> StoreResult<Placement> {
        Store::place_order(self, account, order)
    }

    fn import_state(&mut self, bytes: &[u8]) -> StoreResult<()> {
        Store::import_state(self, bytes)
    }

    fn export_state(&self) -> StoreResult<Vec<u8>> {
        Store::export_state(self)
    }
}
