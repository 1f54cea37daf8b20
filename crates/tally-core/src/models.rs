//! Domain models for tally

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A normalized financial transaction.
///
/// Produced once per raw record by [`crate::normalize`]; immutable
/// afterwards. Every instance has a parsed date and an exact decimal amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Merchant or payee name; never empty ("Unknown" when unresolvable)
    pub merchant: String,
    /// Positive = income/credit, negative = expense/debit
    pub amount: Decimal,
    /// 3-letter uppercase code; "USD" when the source carried none
    pub currency: String,
    pub category: Option<String>,
    pub description: String,
    pub account: Option<String>,
}

/// A debt account supplied to the payoff simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    /// Unique within a simulation run
    pub name: String,
    pub balance: Decimal,
    /// Annual percentage rate as a decimal (e.g. 0.2499 for 24.99%)
    pub apr: Decimal,
    pub min_payment: Decimal,
}

/// Debt payoff prioritization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffMethod {
    /// Pay highest-APR balances first
    Avalanche,
    /// Pay lowest balances first
    Snowball,
}

impl PayoffMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Avalanche => "avalanche",
            Self::Snowball => "snowball",
        }
    }
}

impl std::str::FromStr for PayoffMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avalanche" => Ok(Self::Avalanche),
            "snowball" => Ok(Self::Snowball),
            _ => Err(format!("Unknown payoff method: {}", s)),
        }
    }
}

impl std::fmt::Display for PayoffMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One debt's remaining balance inside a monthly snapshot.
///
/// The balance is always at scale 2, so it serializes as a two-decimal
/// string (e.g. "1234.50").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtBalance {
    pub name: String,
    pub balance: Decimal,
}

/// End-of-month state for every debt, paid off or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// 1-based month index
    pub month: u32,
    /// Debts in that month's priority order
    pub debts: Vec<DebtBalance>,
}

/// Result of a payoff simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffResult {
    pub method: PayoffMethod,
    /// Number of simulated months
    pub months: u32,
    pub schedule: Vec<MonthSnapshot>,
    /// True iff every balance reached zero before the month cap
    pub done: bool,
}

/// Quantized total for one spending category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Summary statistics over a set of transactions.
///
/// `category_totals` preserves first-seen category order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_cash_flow: Decimal,
    pub category_totals: Vec<CategoryTotal>,
}

/// A merchant flagged as a recurring monthly charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringCharge {
    pub merchant: String,
    /// Quantized mean absolute charge amount over the group
    pub average_amount: Decimal,
}

/// A budget allocation rule: a share of income for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRule {
    pub category: String,
    /// Fraction of income in the 0..=1 range (e.g. 0.50)
    pub share: Decimal,
}

/// One line of a proposed budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payoff_method_roundtrip() {
        assert_eq!(
            "avalanche".parse::<PayoffMethod>().unwrap(),
            PayoffMethod::Avalanche
        );
        assert_eq!(
            "Snowball".parse::<PayoffMethod>().unwrap(),
            PayoffMethod::Snowball
        );
        assert!("velocity".parse::<PayoffMethod>().is_err());
        assert_eq!(PayoffMethod::Avalanche.to_string(), "avalanche");
    }

    #[test]
    fn test_amounts_serialize_as_decimal_strings() {
        let balance = DebtBalance {
            name: "visa".to_string(),
            balance: crate::money::quantize_cents(dec!(1234.5)),
        };
        let json = serde_json::to_string(&balance).unwrap();
        assert!(json.contains("\"1234.50\""), "got {}", json);
    }
}
