//! Reads transaction files into typed records.
//!
//! Two formats share one schema: a JSON array of objects, or a CSV file
//! whose header row carries the same keys. Loading is all-or-nothing: the
//! first malformed record aborts the load.

use crate::error::{AnalyzerError, Result};
use crate::transaction::{JsonTransactionRecord, Transaction, TransactionRecord};
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads transactions from `path`, choosing the format by file extension.
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let transactions = match extension.as_deref() {
        Some("json") => from_json_reader(BufReader::new(File::open(path)?))?,
        Some("csv") => from_csv_reader(BufReader::new(File::open(path)?))?,
        _ => {
            return Err(AnalyzerError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    };

    info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Reads a JSON array of transaction objects.
pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let records: Vec<JsonTransactionRecord> = serde_json::from_reader(reader)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| -> Result<Transaction> {
            coerce(index, record.into_record(index)?)
        })
        .collect()
}

/// Reads CSV with a header row naming the transaction keys.
///
/// Every field is read as text, so ids like `007` are kept verbatim.
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<TransactionRecord>()
        .enumerate()
        .map(|(index, result)| -> Result<Transaction> { coerce(index, result?) })
        .collect()
}

fn coerce(index: usize, record: TransactionRecord) -> Result<Transaction> {
    let tx = record.parse(index)?;
    debug!("Record {}: {}", index, tx);
    Ok(tx)
}
