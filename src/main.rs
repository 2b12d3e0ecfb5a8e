//! Transaction Analyzer CLI
//!
//! Loads a transaction file and prints a summary of totals, type balance
//! and monthly activity.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use std::env;
use std::io;
use std::process;
use transaction_analyzer::{
    load_transactions, write_report, AnalyzerError, Result, TransactionAnalyzer,
};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let input_path = env::args().nth(1).ok_or(AnalyzerError::MissingArgument)?;

    let transactions = load_transactions(&input_path)?;
    let analyzer = TransactionAnalyzer::new(transactions);

    let stdout = io::stdout();
    let handle = stdout.lock();
    write_report(&analyzer, handle)?;

    Ok(())
}
