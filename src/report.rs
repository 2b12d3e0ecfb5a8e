//! Human-readable summary of the analyzer's queries.

use crate::analyzer::TransactionAnalyzer;
use crate::error::{AnalyzerError, Result};
use std::fmt::Display;
use std::io::Write;

/// Writes one `label: value` line per summary query.
///
/// Queries that have nothing to aggregate print `n/a` instead of failing
/// the whole report.
pub fn write_report<W: Write>(analyzer: &TransactionAnalyzer, mut writer: W) -> Result<()> {
    writeln!(writer, "transactions: {}", analyzer.len())?;
    writeln!(writer, "total amount: {}", analyzer.total_amount()?)?;
    writeln!(
        writer,
        "average amount: {}",
        or_na(analyzer.average_transaction_amount())?
    )?;
    writeln!(writer, "total debit: {}", analyzer.total_debit_amount()?)?;
    writeln!(writer, "total credit: {}", analyzer.total_credit_amount()?)?;

    let types: Vec<&str> = analyzer
        .unique_transaction_types()
        .into_iter()
        .map(|t| t.as_str())
        .collect();
    writeln!(writer, "transaction types: {}", types.join(", "))?;
    writeln!(
        writer,
        "most common type: {}",
        analyzer.most_transaction_types()
    )?;
    writeln!(
        writer,
        "busiest month: {}",
        or_na(analyzer.most_transactions_month().map(|m| m.name()))?
    )?;
    writeln!(
        writer,
        "busiest debit month: {}",
        or_na(analyzer.most_debit_transactions_month().map(|m| m.name()))?
    )?;

    writeln!(writer, "descriptions:")?;
    for description in analyzer.transaction_descriptions() {
        writeln!(writer, "  - {}", description)?;
    }

    writer.flush()?;
    Ok(())
}

/// Renders an empty-collection failure as `n/a`; other errors propagate.
fn or_na<T: Display>(value: Result<T>) -> Result<String> {
    match value {
        Ok(v) => Ok(v.to_string()),
        Err(AnalyzerError::EmptyCollection { .. }) => Ok("n/a".to_string()),
        Err(e) => Err(e),
    }
}
