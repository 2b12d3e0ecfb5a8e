//! Transaction models for input parsing and internal representation.

use crate::amount::Amount;
use crate::error::{AnalyzerError, Result};
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Date format used by input records and query arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| AnalyzerError::InvalidDate {
        input: input.to_string(),
    })
}

/// Raw transaction record with every field kept as text.
///
/// This is the CSV row shape; JSON input goes through
/// [`JsonTransactionRecord`] first. Coercion into typed values happens once
/// in [`TransactionRecord::parse`].
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: String,

    pub transaction_date: String,

    pub transaction_amount: String,

    pub transaction_type: String,

    pub transaction_description: String,

    pub merchant_name: String,

    pub card_type: String,
}

impl TransactionRecord {
    /// Coerces the raw record into a typed transaction.
    ///
    /// `index` is the record's position in the input and is only used for
    /// error reporting.
    pub fn parse(self, index: usize) -> Result<Transaction> {
        let date = NaiveDate::parse_from_str(self.transaction_date.trim(), DATE_FORMAT).map_err(
            |e| AnalyzerError::MalformedRecord {
                index,
                field: "transaction_date",
                message: format!("'{}': {}", self.transaction_date, e),
            },
        )?;

        let amount = Amount::from_str(&self.transaction_amount).map_err(|e| {
            AnalyzerError::MalformedRecord {
                index,
                field: "transaction_amount",
                message: format!("'{}': {}", self.transaction_amount, e),
            }
        })?;

        let tx_type = TxType::parse(&self.transaction_type);
        if let TxType::Other(tag) = &tx_type {
            warn!(
                "Record {}: unrecognized transaction type '{}', keeping as-is",
                index, tag
            );
        }

        Ok(Transaction::new(
            self.transaction_id,
            date,
            amount,
            tx_type,
            self.transaction_description,
            self.merchant_name,
            self.card_type,
        ))
    }
}

/// Raw transaction object as read from JSON.
///
/// Id and amount may be a JSON string or a bare number. Numbers keep the
/// exact literal from the input (`serde_json` is built with
/// `arbitrary_precision`), so `007`-style ids and long amounts survive.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonTransactionRecord {
    pub transaction_id: Value,

    pub transaction_date: String,

    pub transaction_amount: Value,

    pub transaction_type: String,

    pub transaction_description: String,

    pub merchant_name: String,

    pub card_type: String,
}

impl JsonTransactionRecord {
    /// Flattens id and amount to text, rejecting any other JSON type.
    pub fn into_record(self, index: usize) -> Result<TransactionRecord> {
        Ok(TransactionRecord {
            transaction_id: value_text(self.transaction_id, index, "transaction_id")?,
            transaction_date: self.transaction_date,
            transaction_amount: value_text(self.transaction_amount, index, "transaction_amount")?,
            transaction_type: self.transaction_type,
            transaction_description: self.transaction_description,
            merchant_name: self.merchant_name,
            card_type: self.card_type,
        })
    }
}

fn value_text(value: Value, index: usize, field: &'static str) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(AnalyzerError::MalformedRecord {
            index,
            field,
            message: format!("expected a string or a number, got {}", other),
        }),
    }
}

/// Transaction type tag.
///
/// Only `debit` and `credit` carry meaning for the queries; any other tag is
/// preserved verbatim so that filters and the unique-type listing still see it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TxType {
    /// Money leaving the account.
    Debit,

    /// Money entering the account.
    Credit,

    /// Any other tag found in the input.
    Other(String),
}

impl TxType {
    /// Maps a raw tag to its variant. Matching is exact and case-sensitive.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "debit" => TxType::Debit,
            "credit" => TxType::Credit,
            other => TxType::Other(other.to_string()),
        }
    }

    /// Returns the tag as it appears in input.
    pub fn as_str(&self) -> &str {
        match self {
            TxType::Debit => "debit",
            TxType::Credit => "credit",
            TxType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TxType {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A single transaction. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "transaction_id")]
    id: String,

    #[serde(rename = "transaction_date")]
    date: NaiveDate,

    #[serde(rename = "transaction_amount")]
    amount: Amount,

    #[serde(rename = "transaction_type")]
    tx_type: TxType,

    #[serde(rename = "transaction_description")]
    description: String,

    #[serde(rename = "merchant_name")]
    merchant: String,

    card_type: String,
}

impl Transaction {
    /// Creates a transaction from already-typed field values.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        amount: Amount,
        tx_type: TxType,
        description: impl Into<String>,
        merchant: impl Into<String>,
        card_type: impl Into<String>,
    ) -> Self {
        Transaction {
            id: id.into(),
            date,
            amount,
            tx_type,
            description: description.into(),
            merchant: merchant.into(),
            card_type: card_type.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn tx_type(&self) -> &TxType {
        &self.tx_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    pub fn card_type(&self) -> &str {
        &self.card_type
    }

    /// Renders all seven fields as a JSON object, keyed like the input.
    ///
    /// Intended for display and logging; the output is not read back.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} ({}, {})",
            self.id,
            self.date.format(DATE_FORMAT),
            self.tx_type,
            self.amount,
            self.merchant,
            self.description,
            self.card_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: &str, date: &str, tx_type: &str) -> TransactionRecord {
        TransactionRecord {
            transaction_id: "7".to_string(),
            transaction_date: date.to_string(),
            transaction_amount: amount.to_string(),
            transaction_type: tx_type.to_string(),
            transaction_description: "Groceries".to_string(),
            merchant_name: "SuperMart".to_string(),
            card_type: "Visa".to_string(),
        }
    }

    #[test]
    fn test_parse_debit() {
        let tx = record("42.5", "2019-03-15", "debit").parse(0).unwrap();
        assert_eq!(tx.id(), "7");
        assert_eq!(tx.date(), NaiveDate::from_ymd_opt(2019, 3, 15).unwrap());
        assert_eq!(tx.amount().to_string(), "42.5000");
        assert_eq!(tx.tx_type(), &TxType::Debit);
        assert_eq!(tx.description(), "Groceries");
        assert_eq!(tx.merchant(), "SuperMart");
        assert_eq!(tx.card_type(), "Visa");
    }

    #[test]
    fn test_parse_keeps_unknown_type() {
        let tx = record("1", "2019-03-15", "refund").parse(0).unwrap();
        assert_eq!(tx.tx_type(), &TxType::Other("refund".to_string()));
    }

    #[test]
    fn test_type_matching_is_case_sensitive() {
        assert_eq!(TxType::parse("Debit"), TxType::Other("Debit".to_string()));
        assert_eq!(TxType::parse("credit"), TxType::Credit);
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        let err = record("12,50", "2019-03-15", "debit").parse(4).unwrap_err();
        match err {
            AnalyzerError::MalformedRecord { index, field, .. } => {
                assert_eq!(index, 4);
                assert_eq!(field, "transaction_amount");
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let err = record("1", "15/03/2019", "debit").parse(2).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::MalformedRecord {
                index: 2,
                field: "transaction_date",
                ..
            }
        ));
    }

    #[test]
    fn test_json_numeric_amount_keeps_literal() {
        let json = r#"{
            "transaction_id": 7,
            "transaction_date": "2019-01-01",
            "transaction_amount": 100.123456789012345678,
            "transaction_type": "credit",
            "transaction_description": "Refund",
            "merchant_name": "SuperMart",
            "card_type": "Visa"
        }"#;
        let record = serde_json::from_str::<JsonTransactionRecord>(json)
            .unwrap()
            .into_record(0)
            .unwrap();
        assert_eq!(record.transaction_id, "7");
        assert_eq!(record.transaction_amount, "100.123456789012345678");

        let tx = record.parse(0).unwrap();
        assert_eq!(tx.amount().to_string(), "100.123456789012345678");
    }

    #[test]
    fn test_json_string_id_is_verbatim() {
        let json = r#"{
            "transaction_id": "007",
            "transaction_date": "2019-01-01",
            "transaction_amount": "5",
            "transaction_type": "debit",
            "transaction_description": "Coffee",
            "merchant_name": "Bean Bar",
            "card_type": "Visa"
        }"#;
        let record = serde_json::from_str::<JsonTransactionRecord>(json)
            .unwrap()
            .into_record(0)
            .unwrap();
        assert_eq!(record.transaction_id, "007");
    }

    #[test]
    fn test_json_rejects_non_scalar_amount() {
        let json = r#"{
            "transaction_id": "1",
            "transaction_date": "2019-01-01",
            "transaction_amount": null,
            "transaction_type": "debit",
            "transaction_description": "Coffee",
            "merchant_name": "Bean Bar",
            "card_type": "Visa"
        }"#;
        let err = serde_json::from_str::<JsonTransactionRecord>(json)
            .unwrap()
            .into_record(3)
            .unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::MalformedRecord {
                index: 3,
                field: "transaction_amount",
                ..
            }
        ));
    }

    #[test]
    fn test_to_json_contains_all_fields() {
        let tx = record("100", "2019-01-01", "debit").parse(0).unwrap();
        let json = tx.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["transaction_id"], "7");
        assert_eq!(value["transaction_date"], "2019-01-01");
        assert_eq!(value["transaction_amount"], "100.0000");
        assert_eq!(value["transaction_type"], "debit");
        assert_eq!(value["transaction_description"], "Groceries");
        assert_eq!(value["merchant_name"], "SuperMart");
        assert_eq!(value["card_type"], "Visa");
    }

    #[test]
    fn test_parse_date_argument() {
        assert_eq!(
            parse_date(" 2020-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );
        assert!(matches!(
            parse_date("2019-02-30"),
            Err(AnalyzerError::InvalidDate { .. })
        ));
    }
}
