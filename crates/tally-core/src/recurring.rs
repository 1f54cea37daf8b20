//! Recurring-charge detection
//!
//! A fixed heuristic, not a learned model: group by merchant, test for a
//! roughly monthly cadence between consecutive charges, and report the
//! average amount for merchants that match.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{RecurringCharge, Transaction};
use crate::money::quantize_cents;

/// A merchant is recurring when the median day-interval between its
/// consecutive charges falls in this window.
const MONTHLY_INTERVAL_DAYS: std::ops::RangeInclusive<i64> = 27..=33;

/// Identify merchants with a roughly monthly charge cadence.
///
/// Transactions with an empty merchant are excluded entirely; merchants
/// with fewer than two transactions cannot establish a cadence. Output
/// order follows first-seen merchant order.
///
/// The "median" here is the lower-middle element of the sorted interval
/// list (`intervals[n / 2]`), which for even-length lists is not the
/// arithmetic median. Changing the selection would change which merchants
/// are flagged, so it stays as is.
pub fn detect_recurring(transactions: &[Transaction]) -> Vec<RecurringCharge> {
    // Group by merchant, preserving first-seen order
    let mut groups: Vec<(String, Vec<&Transaction>)> = Vec::new();
    let mut group_index: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

    for tx in transactions {
        if tx.merchant.is_empty() {
            continue;
        }
        match group_index.get(tx.merchant.as_str()) {
            Some(&i) => groups[i].1.push(tx),
            None => {
                group_index.insert(tx.merchant.as_str(), groups.len());
                groups.push((tx.merchant.clone(), vec![tx]));
            }
        }
    }

    let mut recurring = Vec::new();

    for (merchant, mut txs) in groups {
        // Need at least 2 transactions to observe an interval
        if txs.len() < 2 {
            continue;
        }

        txs.sort_by_key(|t| t.date);

        let mut intervals: Vec<i64> = txs
            .windows(2)
            .map(|w| (w[1].date - w[0].date).num_days())
            .collect();
        intervals.sort_unstable();

        let median = intervals[intervals.len() / 2];
        if !MONTHLY_INTERVAL_DAYS.contains(&median) {
            continue;
        }

        let total: Decimal = txs.iter().map(|t| t.amount.abs()).sum();
        let average = quantize_cents(total / Decimal::from(txs.len()));

        debug!(
            merchant = %merchant,
            median_interval = median,
            average = %average,
            "Detected recurring charge"
        );
        recurring.push(RecurringCharge {
            merchant,
            average_amount: average,
        });
    }

    recurring
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn tx(merchant: &str, date: (i32, u32, u32), amount: Decimal) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            merchant: merchant.to_string(),
            amount,
            currency: "USD".to_string(),
            category: None,
            description: String::new(),
            account: None,
        }
    }

    #[test]
    fn test_monthly_cadence_detected() {
        let txs = vec![
            tx("Netflix", (2024, 1, 1), dec!(-15.49)),
            tx("Netflix", (2024, 2, 1), dec!(-15.49)),
            tx("Netflix", (2024, 3, 2), dec!(-15.49)),
        ];
        let found = detect_recurring(&txs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].merchant, "Netflix");
        assert_eq!(found[0].average_amount.to_string(), "15.49");
    }

    #[test]
    fn test_single_transaction_not_recurring() {
        let txs = vec![tx("Netflix", (2024, 1, 1), dec!(-15.49))];
        assert!(detect_recurring(&txs).is_empty());
    }

    #[test]
    fn test_irregular_cadence_not_recurring() {
        let txs = vec![
            tx("Cafe", (2024, 1, 1), dec!(-4.50)),
            tx("Cafe", (2024, 1, 3), dec!(-4.50)),
            tx("Cafe", (2024, 1, 9), dec!(-4.50)),
        ];
        assert!(detect_recurring(&txs).is_empty());
    }

    #[test]
    fn test_lower_middle_median_selection() {
        // Intervals sorted: [25, 31] -> element at index 1 is 31, inside
        // the monthly window even though the arithmetic median (28) and
        // one raw interval are not what a strict reading would pick
        let txs = vec![
            tx("Gym", (2024, 1, 1), dec!(-30.00)),
            tx("Gym", (2024, 2, 1), dec!(-30.00)),
            tx("Gym", (2024, 2, 26), dec!(-30.00)),
        ];
        let found = detect_recurring(&txs);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].merchant, "Gym");
    }

    #[test]
    fn test_average_over_varying_amounts() {
        let txs = vec![
            tx("Power Co", (2024, 1, 5), dec!(-80.10)),
            tx("Power Co", (2024, 2, 5), dec!(-95.25)),
            tx("Power Co", (2024, 3, 5), dec!(-70.00)),
        ];
        let found = detect_recurring(&txs);
        assert_eq!(found.len(), 1);
        // mean(80.10, 95.25, 70.00) = 81.783... -> 81.78
        assert_eq!(found[0].average_amount.to_string(), "81.78");
    }

    #[test]
    fn test_output_follows_first_seen_order() {
        let txs = vec![
            tx("Spotify", (2024, 1, 10), dec!(-10.99)),
            tx("Netflix", (2024, 1, 1), dec!(-15.49)),
            tx("Spotify", (2024, 2, 10), dec!(-10.99)),
            tx("Netflix", (2024, 2, 1), dec!(-15.49)),
        ];
        let found = detect_recurring(&txs);
        let order: Vec<&str> = found.iter().map(|r| r.merchant.as_str()).collect();
        assert_eq!(order, vec!["Spotify", "Netflix"]);
    }

    #[test]
    fn test_unsorted_input_dates() {
        // Grouping sorts by date before measuring intervals
        let txs = vec![
            tx("Netflix", (2024, 3, 2), dec!(-15.49)),
            tx("Netflix", (2024, 1, 1), dec!(-15.49)),
            tx("Netflix", (2024, 2, 1), dec!(-15.49)),
        ];
        assert_eq!(detect_recurring(&txs).len(), 1);
    }
}
