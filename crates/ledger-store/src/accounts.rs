//! # Account Operations
//!
//! Registration, tier changes, deposits, and listing.

use std::cmp::Ordering;

use ledger_core::validation::{validate_amount, validate_deposit, validate_name};
use ledger_core::{Account, AccountSortKey, AccountTier, Money};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

const ENTITY: &str = "account";

impl Store {
    /// Registers a new account with zero balance and the default tier.
    pub fn register_account(&mut self, name: &str) -> StoreResult<()> {
        validate_name("account name", name)?;

        if self.accounts.contains_key(name) {
            return Err(StoreError::already_exists(ENTITY, name));
        }

        let account = Account::new(name, self.default_tier);
        info!(account = %name, tier = %account.tier, "Account registered");
        self.accounts.insert(name.to_string(), account);
        Ok(())
    }

    pub fn set_account_tier(&mut self, name: &str, tier: AccountTier) -> StoreResult<()> {
        let account = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| StoreError::not_found(ENTITY, name))?;

        debug!(account = %name, from = %account.tier, to = %tier, "Changing account tier");
        account.tier = tier;
        Ok(())
    }

    /// Credits `amount` to an account.
    ///
    /// A missing account is reported before a non-positive amount. The
    /// resulting balance may not exceed `MAX_AMOUNT_CENTS`.
    pub fn deposit_balance(&mut self, name: &str, amount: Money) -> StoreResult<()> {
        let account = self
            .accounts
            .get_mut(name)
            .ok_or_else(|| StoreError::not_found(ENTITY, name))?;
        validate_deposit(amount)?;

        let balance = account.balance + amount;
        validate_amount("balance", balance)?;
        account.balance = balance;
        info!(account = %name, amount = %amount, balance = %account.balance, "Balance deposited");
        Ok(())
    }

    pub fn balance(&self, name: &str) -> StoreResult<Money> {
        self.accounts
            .get(name)
            .map(|account| account.balance)
            .ok_or_else(|| StoreError::not_found(ENTITY, name))
    }

    /// Snapshot of all accounts in the requested order.
    pub fn list_accounts(&self, sort: AccountSortKey) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| compare_accounts(a, b, sort));
        accounts
    }
}

fn compare_accounts(a: &Account, b: &Account, sort: AccountSortKey) -> Ordering {
    match sort {
        AccountSortKey::Name => a.name.cmp(&b.name),
        AccountSortKey::NameDescending => b.name.cmp(&a.name),
        AccountSortKey::Balance => a
            .balance
            .cmp(&b.balance)
            .then_with(|| a.name.cmp(&b.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::{ValidationError, MAX_AMOUNT_CENTS};

    fn names(accounts: &[Account]) -> Vec<&str> {
        accounts.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_register_starts_empty() {
        let mut store = Store::new();
        store.register_account("Pavel_007").unwrap();

        assert_eq!(store.balance("Pavel_007").unwrap(), Money::zero());
        let listed = store.list_accounts(AccountSortKey::Name);
        assert_eq!(listed[0].tier, AccountTier::Normal);
    }

    #[test]
    fn test_register_twice_fails() {
        let mut store = Store::new();
        store.register_account("Pavel_007").unwrap();
        let err = store.register_account("Pavel_007").unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[test]
    fn test_register_blank_name_fails() {
        let mut store = Store::new();
        let err = store.register_account("  ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::Required { .. })));
    }

    #[test]
    fn test_set_tier() {
        let mut store = Store::new();
        store.register_account("Dimas").unwrap();
        store.set_account_tier("Dimas", AccountTier::Premium).unwrap();
        assert_eq!(store.accounts["Dimas"].tier, AccountTier::Premium);

        assert!(store
            .set_account_tier("Ghost", AccountTier::Premium)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_deposit() {
        let mut store = Store::new();
        store.register_account("Dimas").unwrap();
        store.deposit_balance("Dimas", Money::from_major(100.0)).unwrap();
        store.deposit_balance("Dimas", Money::from_cents(50)).unwrap();
        assert_eq!(store.balance("Dimas").unwrap(), Money::from_cents(10_050));
    }

    #[test]
    fn test_deposit_checks_account_before_amount() {
        let mut store = Store::new();
        let err = store.deposit_balance("Ghost", Money::from_cents(-5)).unwrap_err();
        assert!(err.is_not_found());

        store.register_account("Dimas").unwrap();
        let err = store.deposit_balance("Dimas", Money::zero()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert_eq!(store.balance("Dimas").unwrap(), Money::zero());
    }

    #[test]
    fn test_deposit_is_capped() {
        let mut store = Store::new();
        store.register_account("Dimas").unwrap();

        let err = store
            .deposit_balance("Dimas", Money::from_major(1e17))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(store.balance("Dimas").unwrap(), Money::zero());

        store
            .deposit_balance("Dimas", Money::from_cents(MAX_AMOUNT_CENTS))
            .unwrap();
        let err = store.deposit_balance("Dimas", Money::from_cents(1)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "balance"
        ));
        assert_eq!(
            store.balance("Dimas").unwrap(),
            Money::from_cents(MAX_AMOUNT_CENTS)
        );
    }

    #[test]
    fn test_list_sorting() {
        let mut store = Store::new();
        for (name, cents) in [("carol", 500), ("alice", 900), ("bob", 500)] {
            store.register_account(name).unwrap();
            store.deposit_balance(name, Money::from_cents(cents)).unwrap();
        }

        assert_eq!(
            names(&store.list_accounts(AccountSortKey::Name)),
            ["alice", "bob", "carol"]
        );
        assert_eq!(
            names(&store.list_accounts(AccountSortKey::NameDescending)),
            ["carol", "bob", "alice"]
        );
        assert_eq!(
            names(&store.list_accounts(AccountSortKey::Balance)),
            ["bob", "carol", "alice"]
        );
    }

    #[test]
    fn test_list_empty() {
        assert!(Store::new().list_accounts(AccountSortKey::Balance).is_empty());
    }
}
