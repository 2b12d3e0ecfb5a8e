//! # Transaction Analyzer
//!
//! Loads card transaction records and answers aggregate questions about
//! them: totals, filters by type, date, merchant and amount, and monthly
//! frequency.
//!
//! ## Design Principles
//!
//! - **Coerce once**: amounts and dates are parsed when a record is loaded,
//!   so queries never see malformed values
//! - **Exact arithmetic**: amounts are `rust_decimal` values summed with
//!   overflow checks
//! - **Explicit failures**: aggregates over nothing return `EmptyCollection`
//! - **Stable ordering**: filters keep insertion order, month ties go to the
//!   earliest month
//!
//! ## Example
//!
//! ```no_run
//! use transaction_analyzer::{load_transactions, TransactionAnalyzer};
//!
//! let transactions = load_transactions("transactions.json").unwrap();
//! let analyzer = TransactionAnalyzer::new(transactions);
//! println!("{}", analyzer.total_amount().unwrap());
//! ```

pub mod amount;
pub mod analyzer;
pub mod error;
pub mod loader;
pub mod report;
pub mod transaction;

pub use amount::Amount;
pub use analyzer::{TransactionAnalyzer, TypeBalance};
pub use error::{AnalyzerError, Result};
pub use loader::{from_csv_reader, from_json_reader, load_transactions};
pub use report::write_report;
pub use transaction::{
    parse_date, JsonTransactionRecord, Transaction, TransactionRecord, TxType,
};
