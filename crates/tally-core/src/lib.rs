//! Tally Core Library
//!
//! Deterministic financial analytics for the tally cash-flow tool:
//! - Exact decimal money arithmetic (no binary floating point anywhere)
//! - Normalization of heterogeneous raw records into canonical transactions
//! - CSV ingestion with configurable column mapping
//! - Spending summaries and category breakdowns
//! - Recurring-charge detection (fixed monthly-cadence heuristic)
//! - Multi-account debt payoff simulation (avalanche / snowball)
//! - Rule-based budget proposals
//! - Pluggable narrative/report rendering seams
//!
//! Every operation is a synchronous pure function over explicitly passed
//! inputs: no shared state, no I/O beyond the CSV helpers, and inputs are
//! never mutated. Persistence, transport, and rich rendering belong to the
//! layers consuming this crate.

pub mod analytics;
pub mod budget;
pub mod error;
pub mod ingest;
pub mod models;
pub mod money;
pub mod normalize;
pub mod payoff;
pub mod recurring;
pub mod report;

pub use analytics::summarize;
pub use budget::{default_rules, propose_budget};
pub use error::{Error, Result};
pub use ingest::{ingest_csv, ingest_csv_path};
pub use models::{
    BudgetLine, BudgetRule, CategoryTotal, Debt, DebtBalance, MonthSnapshot, PayoffMethod,
    PayoffResult, RecurringCharge, Summary, Transaction,
};
pub use money::{add, decimal_from_value, quantize_cents, to_decimal};
pub use normalize::{normalize, normalize_all, RawRecord};
pub use payoff::payoff_plan;
pub use recurring::detect_recurring;
pub use report::{NarrativeGenerator, PlainNarrative, ReportRenderer, TextRenderer};
