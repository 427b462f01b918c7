// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `account`: account variants and their deposit/withdraw/interest rules.
// - `registry`: the in-memory map of accounts keyed by account number.
// - `store`: reading and writing the registry to the accounts file.
// - `session`: application state, login and the per-account operations.
// - `ui`: terminal menus that drive `session`.
pub mod account;
pub mod registry;
pub mod session;
pub mod store;
pub mod ui;

pub use account::{Account, AccountKind, OVERDRAFT_LIMIT, SAVINGS_INTEREST_RATE};
pub use registry::Registry;
pub use session::{Bank, Committed, Session};
pub use store::Store;
