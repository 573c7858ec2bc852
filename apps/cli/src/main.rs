//! # Stockcart Entry Point
//!
//! ## Exit Codes
//! - `0` - command ran, no notices
//! - `1` - command ran but raised a notice (cart unchanged)
//! - `2` - startup failed (config, database, catalog client)

use std::process::ExitCode;

use clap::Parser;

use stockcart_cli::error::CliError;
use stockcart_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let outcome = match run(cli).await {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{}", err.to_json());
            return ExitCode::from(2);
        }
    };

    match serde_json::to_string_pretty(&outcome.response) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            eprintln!("{}", CliError::from(err).to_json());
            return ExitCode::from(2);
        }
    }

    if outcome.has_notices() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
