//! Query engine over an in-memory collection of transactions.
//!
//! Every query is a single pass over the collection with no caching between
//! calls. Only [`TransactionAnalyzer::add_transaction`] mutates state.

use crate::amount::Amount;
use crate::error::{AnalyzerError, Result};
use crate::transaction::{parse_date, Transaction, TxType};
use chrono::{Datelike, Month};
use log::debug;
use std::fmt;

/// Which of the two known transaction types occurs more often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeBalance {
    Debit,
    Credit,
    Equal,
}

impl fmt::Display for TypeBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeBalance::Debit => "debit",
            TypeBalance::Credit => "credit",
            TypeBalance::Equal => "equal",
        })
    }
}

/// Owns an ordered collection of transactions and answers queries over it.
///
/// # Ordering
///
/// Insertion order is preserved and every filter returns matches in that
/// order. Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct TransactionAnalyzer {
    transactions: Vec<Transaction>,
}

impl TransactionAnalyzer {
    /// Creates an analyzer over an initial sequence.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        TransactionAnalyzer { transactions }
    }

    /// Appends a transaction; later queries see it.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        debug!("Adding transaction {}", transaction.id());
        self.transactions.push(transaction);
    }

    /// Returns the whole collection in insertion order.
    pub fn all_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of transactions held.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Returns `true` if no transactions are held.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct type tags in first-seen order.
    pub fn unique_transaction_types(&self) -> Vec<&TxType> {
        let mut seen: Vec<&TxType> = Vec::new();
        for tx in &self.transactions {
            if !seen.contains(&tx.tx_type()) {
                seen.push(tx.tx_type());
            }
        }
        seen
    }

    /// Sum of every amount. Zero for an empty collection.
    pub fn total_amount(&self) -> Result<Amount> {
        sum_amounts(&self.transactions, "total amount")
    }

    /// Sum of amounts whose date matches every given component.
    ///
    /// `month` is 1-based. A `None` component matches any value.
    pub fn total_amount_by_date(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Amount> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(AnalyzerError::InvalidDateComponent {
                    component: "month",
                    value: m,
                });
            }
        }
        if let Some(d) = day {
            if !(1..=31).contains(&d) {
                return Err(AnalyzerError::InvalidDateComponent {
                    component: "day",
                    value: d,
                });
            }
        }

        let matching = self.filter(|tx| {
            let date = tx.date();
            year.map_or(true, |y| date.year() == y)
                && month.map_or(true, |m| date.month() == m)
                && day.map_or(true, |d| date.day() == d)
        });
        sum_amounts(matching, "total amount by date")
    }

    /// Transactions whose type equals `tx_type` exactly.
    pub fn transactions_by_type(&self, tx_type: &TxType) -> Vec<&Transaction> {
        self.filter(|tx| tx.tx_type() == tx_type)
    }

    /// Transactions dated within `[start, end]`, both `YYYY-MM-DD`.
    ///
    /// A reversed range yields no matches rather than an error.
    pub fn transactions_in_date_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<&Transaction>> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        Ok(self.filter(|tx| tx.date() >= start && tx.date() <= end))
    }

    /// Transactions whose merchant equals `merchant` exactly.
    pub fn transactions_by_merchant(&self, merchant: &str) -> Vec<&Transaction> {
        self.filter(|tx| tx.merchant() == merchant)
    }

    /// Mean amount across the collection, rounded to 4 decimal places.
    pub fn average_transaction_amount(&self) -> Result<Amount> {
        self.total_amount()?
            .mean_over(self.transactions.len())
            .ok_or(AnalyzerError::EmptyCollection {
                operation: "average transaction amount",
            })
    }

    /// Transactions with an amount within `[min, max]`.
    pub fn transactions_by_amount_range(&self, min: Amount, max: Amount) -> Vec<&Transaction> {
        self.filter(|tx| tx.amount() >= min && tx.amount() <= max)
    }

    /// Sum of debit amounts.
    pub fn total_debit_amount(&self) -> Result<Amount> {
        sum_amounts(self.transactions_by_type(&TxType::Debit), "total debit amount")
    }

    /// Sum of credit amounts.
    pub fn total_credit_amount(&self) -> Result<Amount> {
        sum_amounts(
            self.transactions_by_type(&TxType::Credit),
            "total credit amount",
        )
    }

    /// Calendar month with the most transactions, years merged.
    ///
    /// On a tie the earliest month wins.
    pub fn most_transactions_month(&self) -> Result<Month> {
        busiest_month(self.transactions.iter()).ok_or(AnalyzerError::EmptyCollection {
            operation: "most transactions month",
        })
    }

    /// Like [`most_transactions_month`](Self::most_transactions_month), over
    /// debit transactions only.
    pub fn most_debit_transactions_month(&self) -> Result<Month> {
        busiest_month(self.transactions_by_type(&TxType::Debit).into_iter()).ok_or(
            AnalyzerError::EmptyCollection {
                operation: "most debit transactions month",
            },
        )
    }

    /// Compares the debit and credit counts. Other tags are ignored.
    pub fn most_transaction_types(&self) -> TypeBalance {
        let (debits, credits) =
            self.transactions
                .iter()
                .fold((0usize, 0usize), |(d, c), tx| match tx.tx_type() {
                    TxType::Debit => (d + 1, c),
                    TxType::Credit => (d, c + 1),
                    TxType::Other(_) => (d, c),
                });

        match debits.cmp(&credits) {
            std::cmp::Ordering::Greater => TypeBalance::Debit,
            std::cmp::Ordering::Less => TypeBalance::Credit,
            std::cmp::Ordering::Equal => TypeBalance::Equal,
        }
    }

    /// Transactions dated strictly before `date` (`YYYY-MM-DD`).
    pub fn transactions_before_date(&self, date: &str) -> Result<Vec<&Transaction>> {
        let cutoff = parse_date(date)?;
        Ok(self.filter(|tx| tx.date() < cutoff))
    }

    /// First transaction with the given id, if any.
    pub fn find_transaction_by_id(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id() == id)
    }

    /// Descriptions in collection order.
    pub fn transaction_descriptions(&self) -> Vec<&str> {
        self.transactions
            .iter()
            .map(Transaction::description)
            .collect()
    }

    fn filter<F>(&self, predicate: F) -> Vec<&Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        self.transactions.iter().filter(|tx| predicate(*tx)).collect()
    }
}

/// Sums amounts, failing instead of overflowing.
fn sum_amounts<'a, I>(transactions: I, operation: &'static str) -> Result<Amount>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    Amount::checked_sum(transactions.into_iter().map(Transaction::amount))
        .ok_or(AnalyzerError::AmountOverflow { operation })
}

/// Counts transactions per calendar month and returns the most frequent one.
///
/// Months are visited January to December and only a strictly greater count
/// replaces the current best, so ties resolve to the earliest month.
fn busiest_month<'a, I>(transactions: I) -> Option<Month>
where
    I: Iterator<Item = &'a Transaction>,
{
    let mut counts = [0usize; 12];
    for tx in transactions {
        counts[tx.date().month0() as usize] += 1;
    }

    let mut best: Option<(usize, usize)> = None;
    for (month0, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((month0, count));
        }
    }

    best.and_then(|(month0, _)| Month::try_from(month0 as u8 + 1).ok())
}
