// Persistence module: reads and writes the account registry as a small,
// versioned JSON document. Every save rewrites the whole file.

use crate::account::{Account, AccountKind};
use crate::registry::Registry;
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used inside the home directory.
pub const DATA_FILE_NAME: &str = ".console_bank_accounts.json";

/// Current version of the on-disk record schema.
pub const SCHEMA_VERSION: u32 = 1;

/// Handle on the file that holds the registry between runs.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

/// Top-level document written to disk.
#[derive(Serialize, Deserialize, Debug)]
struct AccountsFile {
    version: u32,
    accounts: Vec<AccountRecord>,
}

/// One account, field by field. Kept separate from `Account` so the file
/// layout does not change when the in-memory type does.
#[derive(Serialize, Deserialize, Debug)]
struct AccountRecord {
    account_number: String,
    holder_name: String,
    kind: AccountKind,
    balance: Decimal,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        AccountRecord {
            account_number: account.account_number().to_string(),
            holder_name: account.holder_name().to_string(),
            kind: account.kind(),
            balance: account.balance(),
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account::with_balance(
            record.account_number,
            record.holder_name,
            record.kind,
            record.balance,
        )
    }
}

impl Store {
    /// Store at the fixed location in the user's home directory, or the
    /// current directory when no home directory is known.
    pub fn at_default_location() -> Self {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Store::at(dir.join(DATA_FILE_NAME))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole registry, replacing whatever the file held before.
    pub fn save(&self, registry: &Registry) -> Result<()> {
        let document = AccountsFile {
            version: SCHEMA_VERSION,
            accounts: registry.iter().map(AccountRecord::from).collect(),
        };

        let file = File::create(&self.path)
            .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document).context("Failed to encode accounts")?;
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!(path = %self.path.display(), accounts = registry.len(), "accounts saved");
        Ok(())
    }

    /// Read the registry back. A missing file is an empty registry; a file
    /// that cannot be parsed is an error and the caller decides what to do.
    pub fn load(&self) -> Result<Registry> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no accounts file yet, starting empty");
            return Ok(Registry::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let document: AccountsFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;

        if document.version != SCHEMA_VERSION {
            bail!(
                "Unsupported accounts file version {} (expected {})",
                document.version,
                SCHEMA_VERSION
            );
        }

        let mut registry = Registry::new();
        for record in document.accounts {
            registry.insert(Account::from(record))?;
        }

        info!(path = %self.path.display(), accounts = registry.len(), "accounts loaded");
        Ok(registry)
    }
}
