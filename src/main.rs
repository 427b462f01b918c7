// Entrypoint for the console bank.
// - Sets up logging on stderr so it stays out of the menus.
// - Loads the accounts file; if it cannot be read we report it and start
//   with an empty registry.

use console_bank::{session::Bank, store::Store, ui::main_menu};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (mut bank, load_error) = Bank::open_or_empty(Store::at_default_location());
    if let Some(e) = load_error {
        println!("Error loading accounts: {:#}", e);
    }

    // Blocks until the user exits.
    main_menu(&mut bank)?;
    Ok(())
}
