//! Rule-based budget proposals
//!
//! Allocates monthly income across categories according to percentage
//! rules, defaulting to the 50/30/20 model (needs/wants/savings) when the
//! caller supplies none. Spending in categories no rule names is pooled
//! into an "other" line rather than rejected.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

use crate::models::{BudgetLine, BudgetRule, CategoryTotal};
use crate::money::quantize_cents;

/// Catch-all line for spending outside the rule set.
const OTHER_CATEGORY: &str = "other";

/// The default 50/30/20 allocation.
pub fn default_rules() -> Vec<BudgetRule> {
    vec![
        BudgetRule {
            category: "needs".to_string(),
            share: dec!(0.50),
        },
        BudgetRule {
            category: "wants".to_string(),
            share: dec!(0.30),
        },
        BudgetRule {
            category: "savings".to_string(),
            share: dec!(0.20),
        },
    ]
}

/// Generate a budget allocation from income and current spending.
///
/// One line per rule, in rule order, each `quantize_cents(income * share)`.
/// Spending in categories the rules don't cover is summed into a trailing
/// "other" line (present as soon as any unknown category exists, even at
/// zero spend).
pub fn propose_budget(
    total_income: Decimal,
    expenses_by_category: &[CategoryTotal],
    custom_rules: Option<&[BudgetRule]>,
) -> Vec<BudgetLine> {
    let defaults = default_rules();
    let rules: &[BudgetRule] = match custom_rules {
        Some(rules) if !rules.is_empty() => rules,
        _ => &defaults,
    };

    let mut budget: Vec<BudgetLine> = rules
        .iter()
        .map(|rule| BudgetLine {
            category: rule.category.clone(),
            amount: quantize_cents(total_income * rule.share),
        })
        .collect();

    let known: HashSet<&str> = rules.iter().map(|r| r.category.as_str()).collect();
    let mut other: Option<Decimal> = None;
    for expense in expenses_by_category {
        if !known.contains(expense.category.as_str()) {
            *other.get_or_insert(Decimal::ZERO) += expense.total;
        }
    }

    if let Some(total) = other {
        budget.push(BudgetLine {
            category: OTHER_CATEGORY.to_string(),
            amount: quantize_cents(total),
        });
    }

    budget
}
