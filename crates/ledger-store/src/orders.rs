//! # Order Placement
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      place_order(account, order)                        │
//! │                                                                         │
//! │  1. Account exists?             no  → Core(AccountNotFound)            │
//! │  2. PricingEngine::calculate    err → propagated unchanged             │
//! │     total < 0?                  yes → Core(AmountOutOfRange)           │
//! │  3. balance < total (cents)?    yes → InsufficientBalance, no debit    │
//! │  4. balance -= total                                                   │
//! │  5. Placement { total, balance, diagnostics }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ledger_core::{CoreError, Diagnostics, Money, Order, Quote};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Outcome of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Amount debited.
    pub total: Money,
    /// Account balance after the debit.
    pub balance: Money,
    /// Notices carried over from pricing.
    pub diagnostics: Diagnostics,
}

impl Store {
    /// Prices an order for an account without charging it.
    ///
    /// The result may be served from, or stored into, the order cache.
    pub fn calculate_order(&mut self, account_name: &str, order: &Order) -> StoreResult<Quote> {
        Ok(self.engine.calculate(&self.accounts, account_name, order)?)
    }

    /// Prices an order and debits the account.
    pub fn place_order(&mut self, account_name: &str, order: &Order) -> StoreResult<Placement> {
        let quote = self.engine.calculate(&self.accounts, account_name, order)?;
        if quote.total.is_negative() {
            warn!(account = %account_name, total = %quote.total, "Order blocked: negative total");
            return Err(CoreError::AmountOutOfRange(format!(
                "placing an order for '{}'",
                account_name
            ))
            .into());
        }

        let account = self
            .accounts
            .get_mut(account_name)
            .ok_or_else(|| CoreError::AccountNotFound(account_name.to_string()))?;

        if account.balance < quote.total {
            warn!(
                account = %account_name,
                required = %quote.total,
                available = %account.balance,
                "Order blocked: insufficient balance"
            );
            return Err(StoreError::InsufficientBalance {
                account: account_name.to_string(),
                required: quote.total,
                available: account.balance,
                diagnostics: quote.diagnostics,
            });
        }

        account.balance = account
            .balance
            .checked_sub(quote.total)
            .ok_or_else(|| CoreError::AmountOutOfRange("debiting an account".to_string()))?;
        info!(
            account = %account_name,
            total = %quote.total,
            balance = %account.balance,
            dropped = quote.diagnostics.len(),
            "Order placed"
        );

        Ok(Placement {
            total: quote.total,
            balance: account.balance,
            diagnostics: quote.diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{AccountTier, Diagnostic, Product, ProductKind, ValidationError};

    fn dimas_store(deposit: f64) -> Store {
        let mut store = Store::new();
        store.register_account("Dimas").unwrap();
        store.set_account_tier("Dimas", AccountTier::Premium).unwrap();
        store.deposit_balance("Dimas", Money::from_major(deposit)).unwrap();
        store
    }

    fn fruit_order() -> Order {
        Order::default()
            .with_product(Product::new("banana", Money::from_major(40.0), ProductKind::Normal))
            .with_product(Product::new("apple", Money::from_major(30.0), ProductKind::Premium))
    }

    #[test]
    fn test_calculate_does_not_debit() {
        let mut store = dimas_store(100.0);
        let quote = store.calculate_order("Dimas", &fruit_order()).unwrap();
        assert_eq!(quote.total.to_major(), 60.5);
        assert_eq!(store.balance("Dimas").unwrap().to_major(), 100.0);
        assert_eq!(store.cached_order_count(), 1);
    }

    #[test]
    fn test_calculate_unknown_account() {
        let mut store = Store::new();
        let err = store.calculate_order("Ghost", &fruit_order()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.cached_order_count(), 0);
    }

    #[test]
    fn test_place_debits_total() {
        let mut store = dimas_store(100.0);
        let placement = store.place_order("Dimas", &fruit_order()).unwrap();

        assert_eq!(placement.total, Money::from_cents(6050));
        assert_eq!(placement.balance, Money::from_cents(3950));
        assert!(placement.diagnostics.is_empty());
        assert_eq!(store.balance("Dimas").unwrap(), Money::from_cents(3950));
    }

    #[test]
    fn test_place_exact_balance() {
        let mut store = dimas_store(60.5);
        let placement = store.place_order("Dimas", &fruit_order()).unwrap();
        assert!(placement.balance.is_zero());
    }

    #[test]
    fn test_place_insufficient_balance_leaves_account() {
        let mut store = dimas_store(60.49);
        let order = fruit_order().with_product(Product::sample("sapre"));

        let err = store.place_order("Dimas", &order).unwrap_err();
        match err {
            StoreError::InsufficientBalance {
                required,
                available,
                diagnostics,
                ..
            } => {
                assert_eq!(required, Money::from_cents(6050));
                assert_eq!(available, Money::from_cents(6049));
                assert!(diagnostics.contains(&Diagnostic::SampleProductDropped {
                    product: "sapre".to_string()
                }));
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
        assert_eq!(store.balance("Dimas").unwrap(), Money::from_cents(6049));
    }

    #[test]
    fn test_place_unknown_account() {
        let mut store = Store::new();
        let err = store.place_order("Ghost", &Order::default()).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::AccountNotFound(_))));
    }

    #[test]
    fn test_place_huge_premium_line_is_rejected() {
        let mut store = Store::new();
        store.register_account("Pavel_007").unwrap();
        store.deposit_balance("Pavel_007", Money::from_major(1.0)).unwrap();

        let yacht = Product::new("yacht", Money::from_major(1e17), ProductKind::Premium);
        let order = Order::default().with_product(yacht);

        let err = store.place_order("Pavel_007", &order).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(store.balance("Pavel_007").unwrap(), Money::from_cents(100));
        assert_eq!(store.cached_order_count(), 0);
    }

    #[test]
    fn test_place_carries_diagnostics() {
        let mut store = dimas_store(100.0);
        let order = fruit_order().with_product(Product::sample("sapre"));
        let placement = store.place_order("Dimas", &order).unwrap();
        assert_eq!(placement.total.to_major(), 60.5);
        assert_eq!(placement.diagnostics.len(), 1);
    }
}
