//! # Stockcart CLI Library
//!
//! Argument parsing, logging setup and command dispatch for the `stockcart`
//! binary. `main.rs` only maps the outcome to an exit code.
//!
//! ## Module Organization
//! ```text
//! stockcart_cli/
//! ├── lib.rs          ◄─── You are here (Cli, run, tracing)
//! ├── state/
//! │   └── mod.rs      ◄─── AppState: session + collected notices
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── show / add / remove / update
//! └── error.rs        ◄─── CliError printed as JSON
//! ```
//!
//! ## Streams
//! ```text
//! stdout ── cart + totals (pretty JSON), after every command
//! stderr ── notices ("⚠ ..."), logs, CliError JSON
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::cart::{self, CartResponse};
use error::CliResult;
use state::AppState;
use stockcart_core::ProductId;

#[derive(Debug, Parser)]
#[command(name = "stockcart", version, about = "Stock-constrained shopping cart")]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },

    /// Remove a product line
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Set the amount of a product already in the cart
    Update {
        /// Product id
        id: ProductId,

        /// Requested amount
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// What a command produced: the cart afterwards and any notices raised.
#[derive(Debug)]
pub struct Outcome {
    pub response: CartResponse,
    pub notices: Vec<String>,
}

impl Outcome {
    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// Opens the session, runs one command and closes the session again.
pub async fn run(cli: Cli) -> CliResult<Outcome> {
    let state = AppState::open(cli.config).await?;

    let response = match cli.command {
        Command::Show => cart::show(&state),
        Command::Add { id } => cart::add(&state, id).await,
        Command::Remove { id } => cart::remove(&state, id).await,
        Command::Update { id, amount } => cart::update(&state, id, amount).await,
    };

    let notices = state.notices();
    state.close().await;

    info!(
        items = response.items.len(),
        notices = notices.len(),
        "Command finished"
    );

    Ok(Outcome { response, notices })
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockcart=trace` - Show trace for stockcart crates only
/// - Default: warnings, plus INFO from stockcart crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stockcart=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update_with_negative_amount() {
        let cli = Cli::try_parse_from(["stockcart", "update", "3", "-1"]).unwrap();

        match cli.command {
            Command::Update { id, amount } => {
                assert_eq!(id, ProductId::new(3));
                assert_eq!(amount, -1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::try_parse_from(["stockcart", "add", "7", "--config", "/tmp/cart.toml"])
            .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cart.toml")));
        assert!(matches!(cli.command, Command::Add { id } if id == ProductId::new(7)));
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["stockcart", "remove", "abc"]).is_err());
    }
}
