// Account model: the two account variants and their withdraw/interest
// policies. Amounts are plain decimals here; currency symbols belong to the
// UI layer.

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far below zero a current account may go.
pub const OVERDRAFT_LIMIT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Flat interest rate applied by savings accounts (4%).
pub const SAVINGS_INTEREST_RATE: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// The account variant. It decides which withdraw and interest policy applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Interest-bearing, never overdrawn.
    Savings,
    /// No interest, overdraft down to `-OVERDRAFT_LIMIT`.
    Current,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "savings",
            AccountKind::Current => "current",
        }
    }
}

impl FromStr for AccountKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("savings") {
            Ok(AccountKind::Savings)
        } else if trimmed.eq_ignore_ascii_case("current") {
            Ok(AccountKind::Current)
        } else {
            bail!("Invalid account type '{}': expected Savings or Current", trimmed)
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bank account. Fields are private so the balance can only move
/// through `deposit` and `withdraw`.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    account_number: String,
    holder_name: String,
    balance: Decimal,
    kind: AccountKind,
}

impl Account {
    /// Open a fresh account with a zero balance.
    pub fn open(account_number: String, holder_name: String, kind: AccountKind) -> Self {
        Self::with_balance(account_number, holder_name, kind, Decimal::ZERO)
    }

    /// Rebuild an account from stored state.
    pub(crate) fn with_balance(
        account_number: String,
        holder_name: String,
        kind: AccountKind,
        balance: Decimal,
    ) -> Self {
        Account {
            account_number,
            holder_name,
            balance,
            kind,
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Add `amount` to the balance. Non-positive amounts, and amounts that
    /// would push the balance past `Decimal::MAX`, leave it unchanged and
    /// return `false`.
    pub fn deposit(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            return false;
        }
        match self.balance.checked_add(amount) {
            Some(balance) => {
                self.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Try to take `amount` out of the account. Returns `false` (and leaves
    /// the balance alone) when the variant's limit would be crossed or the
    /// amount is not positive.
    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO || amount > self.available() {
            return false;
        }
        self.balance -= amount;
        true
    }

    /// Largest amount a withdrawal may take right now.
    pub fn available(&self) -> Decimal {
        match self.kind {
            AccountKind::Savings => self.balance,
            AccountKind::Current => self.balance.saturating_add(OVERDRAFT_LIMIT),
        }
    }

    /// Interest on the current balance. Pure: the balance is not touched.
    pub fn calculate_interest(&self) -> Decimal {
        match self.kind {
            AccountKind::Savings => self.balance * SAVINGS_INTEREST_RATE,
            AccountKind::Current => Decimal::ZERO,
        }
    }

    /// Human readable snapshot of the account.
    pub fn details(&self) -> String {
        self.details_with(|amount| amount.to_string())
    }

    /// Same as `details`, rendering the balance with `format_amount`.
    pub fn details_with<F>(&self, format_amount: F) -> String
    where
        F: Fn(Decimal) -> String,
    {
        format!(
            "Account No: {}\nName: {}\nType: {}\nBalance: {}",
            self.account_number,
            self.holder_name,
            self.kind,
            format_amount(self.balance)
        )
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn account_with(kind: AccountKind, balance: &str) -> Account {
        Account::with_balance("abc123".to_string(), "Test".to_string(), kind, dec(balance))
    }

    #[test]
    fn test_constants() {
        assert_eq!(OVERDRAFT_LIMIT, dec("5000"));
        assert_eq!(SAVINGS_INTEREST_RATE, dec("0.04"));
    }

    #[test]
    fn test_open_starts_at_zero() {
        let account = Account::open("abc123".into(), "Asha".into(), AccountKind::Savings);
        assert_eq!(account.account_number(), "abc123");
        assert_eq!(account.holder_name(), "Asha");
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.kind(), AccountKind::Savings);
    }

    #[rstest]
    #[case("savings", AccountKind::Savings)]
    #[case("Savings", AccountKind::Savings)]
    #[case("  CURRENT ", AccountKind::Current)]
    #[case("current", AccountKind::Current)]
    fn test_kind_parses_case_insensitively(#[case] input: &str, #[case] expected: AccountKind) {
        assert_eq!(input.parse::<AccountKind>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("checking")]
    #[case("saving")]
    fn test_kind_rejects_unknown(#[case] input: &str) {
        let err = input.parse::<AccountKind>().unwrap_err();
        assert!(err.to_string().contains("Invalid account type"));
    }

    #[rstest]
    #[case(AccountKind::Savings)]
    #[case(AccountKind::Current)]
    fn test_deposit_ignores_non_positive(#[case] kind: AccountKind) {
        let mut account = account_with(kind, "100");
        assert!(!account.deposit(Decimal::ZERO));
        assert!(!account.deposit(dec("-50")));
        assert_eq!(account.balance(), dec("100"));

        assert!(account.deposit(dec("25.50")));
        assert_eq!(account.balance(), dec("125.50"));
    }

    #[rstest]
    #[case(AccountKind::Savings, "79228162514264337593543950335", "1")]
    #[case(AccountKind::Savings, "1", "79228162514264337593543950335")]
    #[case(AccountKind::Current, "79228162514264337593543950000", "1000")]
    fn test_deposit_refuses_overflow(
        #[case] kind: AccountKind,
        #[case] balance: &str,
        #[case] amount: &str,
    ) {
        let mut account = account_with(kind, balance);
        assert!(!account.deposit(dec(amount)));
        assert_eq!(account.balance(), dec(balance));
    }

    #[rstest]
    #[case("1000", "1000", true, "0")]
    #[case("1000", "999.99", true, "0.01")]
    #[case("1000", "1000.01", false, "1000")]
    #[case("0", "1", false, "0")]
    fn test_savings_withdraw(
        #[case] balance: &str,
        #[case] amount: &str,
        #[case] ok: bool,
        #[case] after: &str,
    ) {
        let mut account = account_with(AccountKind::Savings, balance);
        assert_eq!(account.withdraw(dec(amount)), ok);
        assert_eq!(account.balance(), dec(after));
    }

    #[rstest]
    #[case("0", "5000", true, "-5000")]
    #[case("0", "5000.01", false, "0")]
    #[case("-4000", "1000", true, "-5000")]
    #[case("-4000", "1001", false, "-4000")]
    #[case("200", "5200", true, "-5000")]
    fn test_current_withdraw(
        #[case] balance: &str,
        #[case] amount: &str,
        #[case] ok: bool,
        #[case] after: &str,
    ) {
        let mut account = account_with(AccountKind::Current, balance);
        assert_eq!(account.withdraw(dec(amount)), ok);
        assert_eq!(account.balance(), dec(after));
    }

    #[rstest]
    #[case("79228162514264337593543950335", "1", "79228162514264337593543950334")]
    #[case("79228162514264337593543950000", "79228162514264337593543950335", "-335")]
    fn test_current_withdraw_near_max_balance(
        #[case] balance: &str,
        #[case] amount: &str,
        #[case] after: &str,
    ) {
        let mut account = account_with(AccountKind::Current, balance);
        assert_eq!(account.available(), Decimal::MAX);
        assert!(account.withdraw(dec(amount)));
        assert_eq!(account.balance(), dec(after));
    }

    #[rstest]
    #[case(AccountKind::Savings)]
    #[case(AccountKind::Current)]
    fn test_withdraw_rejects_non_positive(#[case] kind: AccountKind) {
        let mut account = account_with(kind, "100");
        assert!(!account.withdraw(Decimal::ZERO));
        assert!(!account.withdraw(dec("-500")));
        assert_eq!(account.balance(), dec("100"));
    }

    #[test]
    fn test_savings_interest() {
        let account = account_with(AccountKind::Savings, "1000");
        assert_eq!(account.calculate_interest(), dec("40"));
        assert_eq!(account.balance(), dec("1000"));

        let account = account_with(AccountKind::Savings, "0");
        assert_eq!(account.calculate_interest(), Decimal::ZERO);
    }

    #[rstest]
    #[case("1000")]
    #[case("0")]
    #[case("-3000")]
    fn test_current_interest_is_zero(#[case] balance: &str) {
        let account = account_with(AccountKind::Current, balance);
        assert_eq!(account.calculate_interest(), Decimal::ZERO);
    }

    #[test]
    fn test_details() {
        let account = account_with(AccountKind::Current, "-12.5");
        let details = account.details();
        assert!(details.contains("Account No: abc123"));
        assert!(details.contains("Name: Test"));
        assert!(details.contains("Type: current"));
        assert!(details.contains("Balance: -12.5"));
        assert_eq!(account.to_string(), details);

        let formatted = account.details_with(|amount| format!("<{}>", amount));
        assert!(formatted.contains("Balance: <-12.5>"));
        assert!(formatted.contains("Account No: abc123"));
    }
}
