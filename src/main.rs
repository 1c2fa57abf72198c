//! Ledger Grid CLI
//!
//! Command-line interface for querying transaction tables stored as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- statement.csv > page.csv
//! cargo run -- --sort Amount:desc --filter Currency:regex:^CZK$ statement.csv
//! cargo run -- --strategy async --page 2 --page-size 20 statement.csv
//! cargo run -- --schema columns.csv --date-format %Y-%m-%d --all export.csv
//! ```
//!
//! The program loads the input file, applies the filters and sort rules, and
//! writes the selected page (header included) to stdout. Diagnostics go to
//! stderr; set `RUST_LOG` to change their verbosity.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed row, unknown column, etc.)

use ledger_grid::cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
