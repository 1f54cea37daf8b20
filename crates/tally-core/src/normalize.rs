//! Transaction normalization
//!
//! Maps heterogeneous raw records (string-keyed JSON maps from CSV
//! ingestion, API payloads, or statement extractions) into the canonical
//! [`Transaction`] model so analytics, budgeting, and payoff planning can
//! operate on one schema. The dynamic shape never propagates past this
//! module.
//!
//! Missing optional fields never error; each has a defined fallback. The
//! only fatal conditions are an unparseable (or absent) date and a
//! malformed amount.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::money::decimal_from_value;

/// An untyped raw transaction record. Field presence and format vary by
/// source; no invariants hold until [`normalize`] has run.
pub type RawRecord = Map<String, Value>;

/// Keys that may carry the transaction date, in lookup order.
const DATE_KEYS: [&str; 3] = ["date", "timestamp", "datetime"];

/// Keys that may carry the merchant name, in lookup order.
const MERCHANT_KEYS: [&str; 2] = ["merchant", "payee"];

/// Merchant sentinel when neither the merchant fields nor the description help.
const UNKNOWN_MERCHANT: &str = "Unknown";

/// Parse a date string, trying formats in fixed priority order.
///
/// Dates with day <= 12 are ambiguous between the US and international
/// forms; the US form wins by policy. Known limitation, not resolvable
/// from the data itself.
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2025-03-14 (ISO)
        "%m/%d/%Y", // 03/14/2025 (US)
        "%d/%m/%Y", // 14/03/2025 (international)
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::DateParse(s.to_string()))
}

/// Render a raw field as a string, if it has a sensible string form.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First key whose value renders as a non-empty string.
fn first_non_empty(raw: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .filter_map(value_to_string)
        .find(|s| !s.is_empty())
}

/// Normalize a single raw transaction record.
///
/// Field handling:
/// - date: first non-empty of `date`/`timestamp`/`datetime`; absence or an
///   unrecognized format is fatal to the record
/// - merchant: `merchant`, then `payee`, then the first word of
///   `description`, then `"Unknown"`
/// - amount: decimal-converted; absent defaults to exact zero, malformed
///   is an error
/// - currency: uppercased, `"USD"` when absent
pub fn normalize(raw: &RawRecord) -> Result<Transaction> {
    let date = match first_non_empty(raw, &DATE_KEYS) {
        Some(s) => parse_date(&s)?,
        None => return Err(Error::DateParse("missing date field".to_string())),
    };

    let merchant = match first_non_empty(raw, &MERCHANT_KEYS) {
        Some(m) => m,
        None => {
            let desc = raw
                .get("description")
                .and_then(value_to_string)
                .unwrap_or_default();
            match desc.split_whitespace().next() {
                Some(first_word) => first_word.to_string(),
                None => UNKNOWN_MERCHANT.to_string(),
            }
        }
    };

    let amount = match raw.get("amount") {
        None | Some(Value::Null) => Decimal::ZERO,
        Some(value) => decimal_from_value(value)?,
    };

    let currency = match raw.get("currency") {
        None | Some(Value::Null) => "USD".to_string(),
        Some(value) => value_to_string(value)
            .unwrap_or_else(|| "USD".to_string())
            .to_uppercase(),
    };

    Ok(Transaction {
        date,
        merchant,
        amount,
        currency,
        category: raw.get("category").and_then(value_to_string),
        description: raw
            .get("description")
            .and_then(value_to_string)
            .unwrap_or_default(),
        account: raw.get("account").and_then(value_to_string),
    })
}

/// Normalize a batch of raw records, element-wise and order-preserving.
///
/// No record is dropped: the first failure propagates, and whether to skip
/// the offending record or abort the batch is the caller's decision.
pub fn normalize_all(raws: &[RawRecord]) -> Result<Vec<Transaction>> {
    let transactions = raws.iter().map(normalize).collect::<Result<Vec<_>>>()?;
    debug!("Normalized {} transactions", transactions.len());
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawRecord {
        value.as_object().expect("test record is an object").clone()
    }

    #[test]
    fn test_normalize_full_record() {
        let raw = record(json!({
            "date": "2025-03-14",
            "merchant": "Netflix",
            "amount": "-15.49",
            "currency": "usd",
            "category": "Entertainment",
            "description": "NETFLIX.COM monthly",
            "account": "visa-1234",
        }));

        let tx = normalize(&raw).unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(tx.merchant, "Netflix");
        assert_eq!(tx.amount, dec!(-15.49));
        assert_eq!(tx.currency, "USD");
        assert_eq!(tx.category.as_deref(), Some("Entertainment"));
        assert_eq!(tx.account.as_deref(), Some("visa-1234"));
    }

    #[test]
    fn test_date_format_priority() {
        // US form wins for day <= 12
        let raw = record(json!({"date": "03/04/2025"}));
        let tx = normalize(&raw).unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());

        // Month 13 is impossible in the US form, so the international
        // form gets its turn
        let raw = record(json!({"date": "13/05/2024"}));
        let tx = normalize(&raw).unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 5, 13).unwrap());
    }

    #[test]
    fn test_date_fallback_keys() {
        let raw = record(json!({"timestamp": "2024-01-15", "amount": 1}));
        assert!(normalize(&raw).is_ok());

        // Empty string counts as absent, next key is consulted
        let raw = record(json!({"date": "", "datetime": "2024-01-15"}));
        assert!(normalize(&raw).is_ok());
    }

    #[test]
    fn test_missing_or_bad_date_is_fatal() {
        let raw = record(json!({"merchant": "Acme", "amount": "10.00"}));
        assert!(matches!(normalize(&raw), Err(Error::DateParse(_))));

        let raw = record(json!({"date": "March 14, 2025"}));
        match normalize(&raw) {
            Err(Error::DateParse(value)) => assert_eq!(value, "March 14, 2025"),
            other => panic!("expected DateParse, got {:?}", other),
        }
    }

    #[test]
    fn test_merchant_fallback_chain() {
        let raw = record(json!({"date": "2024-01-01", "payee": "Landlord"}));
        assert_eq!(normalize(&raw).unwrap().merchant, "Landlord");

        let raw = record(json!({"date": "2024-01-01", "description": "STARBUCKS #1234 SEATTLE"}));
        assert_eq!(normalize(&raw).unwrap().merchant, "STARBUCKS");

        let raw = record(json!({"date": "2024-01-01", "description": "   "}));
        assert_eq!(normalize(&raw).unwrap().merchant, "Unknown");

        let raw = record(json!({"date": "2024-01-01"}));
        assert_eq!(normalize(&raw).unwrap().merchant, "Unknown");
    }

    #[test]
    fn test_amount_defaults_and_errors() {
        // Missing amount is zero, not an error
        let raw = record(json!({"date": "2024-01-01"}));
        assert_eq!(normalize(&raw).unwrap().amount, Decimal::ZERO);

        let raw = record(json!({"date": "2024-01-01", "amount": null}));
        assert_eq!(normalize(&raw).unwrap().amount, Decimal::ZERO);

        // A present but malformed amount is surfaced, never defaulted
        let raw = record(json!({"date": "2024-01-01", "amount": "lots"}));
        assert!(matches!(normalize(&raw), Err(Error::NumericConversion(_))));
    }

    #[test]
    fn test_amount_precision_survives() {
        let raw = record(json!({"date": "2024-01-01", "amount": 19.999}));
        let tx = normalize(&raw).unwrap();
        assert_eq!(tx.amount.to_string(), "19.999");
    }

    #[test]
    fn test_currency_default() {
        let raw = record(json!({"date": "2024-01-01"}));
        assert_eq!(normalize(&raw).unwrap().currency, "USD");

        let raw = record(json!({"date": "2024-01-01", "currency": "eur"}));
        assert_eq!(normalize(&raw).unwrap().currency, "EUR");
    }

    #[test]
    fn test_normalize_all_propagates_first_failure() {
        let raws = vec![
            record(json!({"date": "2024-01-01", "amount": "5.00"})),
            record(json!({"date": "not a date", "amount": "5.00"})),
        ];
        assert!(normalize_all(&raws).is_err());

        let good = vec![
            record(json!({"date": "2024-01-01", "amount": "5.00"})),
            record(json!({"date": "2024-01-02", "amount": "-2.50"})),
        ];
        let txs = normalize_all(&good).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
