//! Summary statistics over normalized transactions

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::models::{CategoryTotal, Summary, Transaction};
use crate::money::quantize_cents;

/// Category bucket for transactions that carry no category.
const UNCATEGORIZED: &str = "Uncategorized";

/// Compute summary statistics for a set of transactions.
///
/// Positive amounts count as income; everything else contributes its
/// absolute value to expenses (an exact zero lands on the expense side and
/// contributes nothing). Every transaction's absolute amount also lands in
/// its category bucket, in first-seen category order.
///
/// The three totals and each category total are quantized independently
/// from the full-precision running sums, so no figure is ever more than
/// half a cent from the exact value.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut category_index: HashMap<String, usize> = HashMap::new();

    for tx in transactions {
        if tx.amount > Decimal::ZERO {
            total_income += tx.amount;
        } else {
            total_expense += tx.amount.abs();
        }

        let category = tx
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);

        match category_index.get(category) {
            Some(&i) => categories[i].total += tx.amount.abs(),
            None => {
                category_index.insert(category.to_string(), categories.len());
                categories.push(CategoryTotal {
                    category: category.to_string(),
                    total: tx.amount.abs(),
                });
            }
        }
    }

    for entry in &mut categories {
        entry.total = quantize_cents(entry.total);
    }

    debug!(
        transactions = transactions.len(),
        categories = categories.len(),
        "Summarized transactions"
    );

    Summary {
        total_income: quantize_cents(total_income),
        total_expense: quantize_cents(total_expense),
        net_cash_flow: quantize_cents(total_income - total_expense),
        category_totals: categories,
    }
}
