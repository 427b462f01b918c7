// Session controller: owns the application state (registry + store) and
// exposes the operations the menus call. Every mutation is flushed to disk
// before control returns to the caller.

use crate::account::Account;
use crate::registry::Registry;
use crate::store::Store;
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

/// Result of a mutating operation together with whether it reached disk.
/// A failed save does not undo the change: memory stays authoritative.
#[derive(Debug)]
pub struct Committed<T> {
    pub outcome: T,
    pub persisted: Result<()>,
}

/// Application state for one run of the program.
#[derive(Debug)]
pub struct Bank {
    registry: Registry,
    store: Store,
}

/// A logged-in account. Borrows the bank for as long as it is open.
#[derive(Debug)]
pub struct Session<'a> {
    bank: &'a mut Bank,
    account_number: String,
}

impl Bank {
    /// Load the registry from `store`.
    pub fn open(store: Store) -> Result<Self> {
        let registry = store.load()?;
        Ok(Bank { registry, store })
    }

    /// Load the registry, or fall back to an empty one when the file cannot
    /// be read. The load error is handed back so the caller can report it;
    /// the next save overwrites the unreadable file.
    pub fn open_or_empty(store: Store) -> (Self, Option<anyhow::Error>) {
        match store.load() {
            Ok(registry) => (Bank { registry, store }, None),
            Err(e) => {
                warn!(error = %e, "falling back to an empty registry");
                (Bank::empty(store), Some(e))
            }
        }
    }

    /// Start with no accounts, still saving to `store`.
    pub fn empty(store: Store) -> Self {
        Bank {
            registry: Registry::new(),
            store,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Create an account and save. Fails only for an invalid kind or when no
    /// account number could be assigned.
    pub fn create_account(&mut self, holder_name: &str, kind: &str) -> Result<Committed<String>> {
        let number = self.registry.create(holder_name, kind)?;
        Ok(self.commit(number))
    }

    /// Open a session for `account_number`, or `None` when it is unknown.
    pub fn login(&mut self, account_number: &str) -> Option<Session<'_>> {
        let account_number = account_number.trim();
        if self.registry.lookup(account_number).is_none() {
            info!(account_number, "login for unknown account");
            return None;
        }
        info!(account_number, "logged in");
        Some(Session {
            bank: self,
            account_number: account_number.to_string(),
        })
    }

    /// Write the registry to disk.
    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.registry).map_err(|e| {
            error!(error = %e, "failed to save accounts");
            e
        })
    }

    fn commit<T>(&self, outcome: T) -> Committed<T> {
        Committed {
            outcome,
            persisted: self.persist(),
        }
    }
}

impl<'a> Session<'a> {
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn account(&self) -> Result<&Account> {
        self.bank
            .registry
            .lookup(&self.account_number)
            .ok_or_else(|| anyhow!("Account {} is no longer registered", self.account_number))
    }

    fn account_mut(&mut self) -> Result<&mut Account> {
        let number = &self.account_number;
        self.bank
            .registry
            .lookup_mut(number)
            .ok_or_else(|| anyhow!("Account {} is no longer registered", number))
    }

    /// Account snapshot with the balance rendered by `format_amount`.
    pub fn details<F>(&self, format_amount: F) -> Result<String>
    where
        F: Fn(Decimal) -> String,
    {
        Ok(self.account()?.details_with(format_amount))
    }

    /// Deposit and save. The outcome is `false` when the amount was ignored
    /// (not positive, or the balance would overflow).
    pub fn deposit(&mut self, amount: Decimal) -> Result<Committed<bool>> {
        let account = self.account_mut()?;
        let deposited = account.deposit(amount);
        let balance = account.balance();
        info!(account_number = %self.account_number, %amount, %balance, deposited, "deposit");
        Ok(self.bank.commit(deposited))
    }

    /// Withdraw and save. The outcome is `false` for insufficient funds.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Committed<bool>> {
        let account = self.account_mut()?;
        let withdrawn = account.withdraw(amount);
        let balance = account.balance();
        info!(account_number = %self.account_number, %amount, %balance, withdrawn, "withdraw");
        Ok(self.bank.commit(withdrawn))
    }

    pub fn interest(&self) -> Result<Decimal> {
        Ok(self.account()?.calculate_interest())
    }

    /// End the session, handing the bank back to the caller.
    pub fn logout(self) -> &'a mut Bank {
        info!(account_number = %self.account_number, "logged out");
        self.bank
    }
}
