// Account registry: the in-memory source of truth, keyed by account number.

use crate::account::{Account, AccountKind};
use anyhow::{bail, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Length of a generated account number.
pub const ACCOUNT_NUMBER_LEN: usize = 6;

/// How many fresh numbers `create` draws before giving up on collisions.
pub const MAX_NUMBER_ATTEMPTS: usize = 32;

/// All known accounts. The registry owns every `Account`; callers borrow
/// them through `lookup` / `lookup_mut`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Registry {
    accounts: BTreeMap<String, Account>,
}

/// Draw a new account number: the leading characters of a random v4 UUID.
pub fn generate_account_number() -> String {
    Uuid::new_v4().simple().to_string()[..ACCOUNT_NUMBER_LEN].to_string()
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zero-balance account of the given kind ("savings" or
    /// "current", any case) and return its number.
    pub fn create(&mut self, holder_name: &str, kind: &str) -> Result<String> {
        self.create_with(holder_name, kind, generate_account_number)
    }

    /// Like `create`, drawing candidate numbers from `next_number`.
    pub fn create_with<F>(&mut self, holder_name: &str, kind: &str, mut next_number: F) -> Result<String>
    where
        F: FnMut() -> String,
    {
        let kind: AccountKind = kind.parse()?;

        for _ in 0..MAX_NUMBER_ATTEMPTS {
            let number = next_number();
            if self.accounts.contains_key(&number) {
                debug!(account_number = %number, "account number collision, drawing again");
                continue;
            }
            let account = Account::open(number.clone(), holder_name.to_string(), kind);
            self.accounts.insert(number.clone(), account);
            info!(account_number = %number, kind = %kind, "account created");
            return Ok(number);
        }

        bail!(
            "Could not find a free account number after {} attempts",
            MAX_NUMBER_ATTEMPTS
        )
    }

    /// Add an existing account, e.g. one read back from disk.
    pub fn insert(&mut self, account: Account) -> Result<()> {
        if self.accounts.contains_key(account.account_number()) {
            bail!("Duplicate account number {}", account.account_number());
        }
        self.accounts
            .insert(account.account_number().to_string(), account);
        Ok(())
    }

    pub fn lookup(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn lookup_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(account_number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts ordered by account number.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}
