// UI layer: interactive menus built on `dialoguer`. This is the only place
// that knows about prompts, colors and the currency symbol; everything else
// is delegated to `session::Bank`.

use crate::session::{Bank, Committed, Session};
use anyhow::Result;
use crossterm::style::{style, Stylize};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

/// Symbol shown in front of every amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount for display: `₹1000.00`, `-₹5000.00`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", CURRENCY_SYMBOL, rounded.abs())
    } else {
        format!("{}{:.2}", CURRENCY_SYMBOL, rounded.abs())
    }
}

/// Parse a user-entered amount. Only strictly positive decimals are accepted.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    Decimal::from_str(input.trim())
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}

/// Top-level menu. Runs until the user picks "Exit", then saves once more.
pub fn main_menu(bank: &mut Bank) -> Result<()> {
    loop {
        println!("\n=== Welcome to Console Bank ===");
        let items = vec!["Create account", "Login", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_create(bank)?,
            1 => handle_login(bank)?,
            2 => break,
            _ => {}
        }
    }

    let result = with_spinner("Saving accounts...", || bank.persist());
    if let Err(e) = result {
        report_failure(&format!(
            "Error saving accounts to {}: {:#}",
            bank.store().path().display(),
            e
        ));
    }
    println!("Thank you for using Console Bank.");
    Ok(())
}

/// Ask for a name and an account type, then create the account.
fn handle_create(bank: &mut Bank) -> Result<()> {
    let name: String = Input::new().with_prompt("Holder name").interact_text()?;
    let kinds = vec!["Savings", "Current"];
    let kind = kinds[Select::new()
        .with_prompt("Account type")
        .items(&kinds)
        .default(0)
        .interact()?];

    match with_spinner("Creating account...", || bank.create_account(&name, kind)) {
        Ok(created) => {
            report_success("Account created successfully!");
            println!("Your account number: {}", style(&created.outcome).bold());
            report_save(&created);
        }
        Err(e) => report_failure(&format!("{:#}", e)),
    }
    Ok(())
}

/// Ask for an account number and open the dashboard when it exists.
fn handle_login(bank: &mut Bank) -> Result<()> {
    let number: String = Input::new().with_prompt("Account number").interact_text()?;
    match bank.login(&number) {
        Some(session) => dashboard(session),
        None => {
            report_failure("Account not found.");
            Ok(())
        }
    }
}

/// Per-account menu, left through "Logout".
fn dashboard(mut session: Session<'_>) -> Result<()> {
    loop {
        println!("\n--- Dashboard ({}) ---", session.account_number());
        let items = vec![
            "View account details",
            "Deposit",
            "Withdraw",
            "Calculate interest",
            "Logout",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => match session.details(format_money) {
                Ok(details) => println!("{}", details),
                Err(e) => report_failure(&format!("{:#}", e)),
            },
            1 => {
                let Some(amount) = prompt_amount("Amount to deposit")? else {
                    continue;
                };
                match with_spinner("Saving...", || session.deposit(amount)) {
                    Ok(deposit) => {
                        if deposit.outcome {
                            report_success("Amount deposited.");
                        } else {
                            report_failure("Amount not deposited: the balance would overflow.");
                        }
                        report_save(&deposit);
                    }
                    Err(e) => report_failure(&format!("{:#}", e)),
                }
            }
            2 => {
                let Some(amount) = prompt_amount("Amount to withdraw")? else {
                    continue;
                };
                match with_spinner("Saving...", || session.withdraw(amount)) {
                    Ok(withdrawal) => {
                        if withdrawal.outcome {
                            report_success("Amount withdrawn.");
                        } else {
                            report_failure("Insufficient funds.");
                        }
                        report_save(&withdrawal);
                    }
                    Err(e) => report_failure(&format!("{:#}", e)),
                }
            }
            3 => match session.interest() {
                Ok(interest) => println!("Interest: {}", format_money(interest)),
                Err(e) => report_failure(&format!("{:#}", e)),
            },
            4 => {
                session.logout();
                return Ok(());
            }
            _ => {}
        }
    }
}

/// Prompt for an amount; `None` (after telling the user) when it is not a
/// positive decimal.
fn prompt_amount(prompt: &str) -> Result<Option<Decimal>> {
    let raw: String = Input::new().with_prompt(prompt).interact_text()?;
    let amount = parse_amount(&raw);
    if amount.is_none() {
        report_failure("Please enter a positive amount.");
    }
    Ok(amount)
}

/// Run `work` while a spinner shows `message`.
fn with_spinner<T>(message: &'static str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = work();
    spinner.finish_and_clear();
    result
}

fn report_save<T>(committed: &Committed<T>) {
    if let Err(e) = &committed.persisted {
        report_failure(&format!("Error saving accounts: {:#}", e));
    }
}

fn report_success(message: &str) {
    println!("{}", style(message).green());
}

fn report_failure(message: &str) {
    println!("{}", style(message).red());
}
