//! Command implementations
//!
//! Each command loads its inputs, calls into tally-core, and prints the
//! result. Nothing here computes anything financial.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use tally_core::{
    detect_recurring, ingest_csv_path, normalize_all, payoff_plan, propose_budget, summarize,
    to_decimal, BudgetRule, Debt, NarrativeGenerator, PayoffMethod, PlainNarrative, RawRecord,
    ReportRenderer, TextRenderer, Transaction,
};

/// Budget rules file: a list of [[rule]] tables.
#[derive(Deserialize)]
struct RulesFile {
    rule: Vec<BudgetRule>,
}

/// Load a TOML column map ("source header" = "canonical field").
fn load_column_map(path: Option<&Path>) -> Result<Option<HashMap<String, String>>> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read column map {}", path.display()))?;
            let map: HashMap<String, String> =
                toml::from_str(&text).context("Invalid column map TOML")?;
            Ok(Some(map))
        }
        None => Ok(None),
    }
}

/// Load and normalize a transactions file.
///
/// JSON files are arrays of raw records; anything else is treated as CSV.
fn load_transactions(file: &Path, column_map: Option<&Path>) -> Result<Vec<Transaction>> {
    let raws: Vec<RawRecord> = if file.extension().is_some_and(|ext| ext == "json") {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        serde_json::from_str(&text).context("Expected a JSON array of raw records")?
    } else {
        let map = load_column_map(column_map)?;
        ingest_csv_path(file, map.as_ref())
            .with_context(|| format!("Failed to ingest {}", file.display()))?
    };

    let transactions = normalize_all(&raws)?;
    info!(
        count = transactions.len(),
        file = %file.display(),
        "Loaded transactions"
    );
    Ok(transactions)
}

/// Load a debts file (JSON array).
fn load_debts(file: &Path) -> Result<Vec<Debt>> {
    let text =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let debts: Vec<Debt> = serde_json::from_str(&text)
        .context("Expected a JSON array of {name, balance, apr, min_payment}")?;
    Ok(debts)
}

pub fn cmd_summary(file: &Path, column_map: Option<&Path>, json: bool) -> Result<()> {
    let transactions = load_transactions(file, column_map)?;
    let summary = summarize(&transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Transactions:  {}", transactions.len());
    println!("Total income:  {:>12}", summary.total_income);
    println!("Total expense: {:>12}", summary.total_expense);
    println!("Net cash flow: {:>12}", summary.net_cash_flow);

    if !summary.category_totals.is_empty() {
        println!();
        println!("By category:");
        for entry in &summary.category_totals {
            println!("  {:<24} {:>12}", entry.category, entry.total);
        }
    }

    Ok(())
}

pub fn cmd_recurring(file: &Path, column_map: Option<&Path>, json: bool) -> Result<()> {
    let transactions = load_transactions(file, column_map)?;
    let recurring = detect_recurring(&transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&recurring)?);
        return Ok(());
    }

    if recurring.is_empty() {
        println!("No recurring charges detected.");
        return Ok(());
    }

    println!("Recurring charges (~monthly):");
    for charge in &recurring {
        println!("  {:<24} {:>12}/mo", charge.merchant, charge.average_amount);
    }

    Ok(())
}

pub fn cmd_payoff(
    file: &Path,
    extra: &str,
    method: &str,
    show_schedule: bool,
    json: bool,
) -> Result<()> {
    let debts = load_debts(file)?;
    let extra = to_decimal(extra).context("Invalid --extra amount")?;
    let method: PayoffMethod = method.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let result = payoff_plan(&debts, extra, method);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Method:  {}", result.method);
    println!("Months:  {}", result.months);
    if result.done {
        println!("Paid off after {} month(s).", result.months);
    } else {
        println!("Not paid off within {} months under these inputs.", result.months);
    }

    if show_schedule {
        println!();
        for snapshot in &result.schedule {
            let balances: Vec<String> = snapshot
                .debts
                .iter()
                .map(|d| format!("{}={}", d.name, d.balance))
                .collect();
            println!("  month {:>3}  {}", snapshot.month, balances.join("  "));
        }
    } else if let Some(last) = result.schedule.last() {
        println!();
        println!("Final balances:");
        for d in &last.debts {
            println!("  {:<24} {:>12}", d.name, d.balance);
        }
    }

    Ok(())
}

pub fn cmd_budget(
    file: &Path,
    column_map: Option<&Path>,
    income: Option<&str>,
    rules: Option<&Path>,
) -> Result<()> {
    let transactions = load_transactions(file, column_map)?;
    let summary = summarize(&transactions);

    let income: Decimal = match income {
        Some(raw) => to_decimal(raw).context("Invalid --income amount")?,
        None => summary.total_income,
    };

    let custom_rules = match rules {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read rules {}", path.display()))?;
            let parsed: RulesFile = toml::from_str(&text).context("Invalid rules TOML")?;
            Some(parsed.rule)
        }
        None => None,
    };

    let budget = propose_budget(income, &summary.category_totals, custom_rules.as_deref());

    println!("Budget for income {}:", income);
    for line in &budget {
        println!("  {:<24} {:>12}", line.category, line.amount);
    }

    Ok(())
}

pub fn cmd_report(file: &Path, column_map: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let transactions = load_transactions(file, column_map)?;
    let summary = summarize(&transactions);

    let narrative = PlainNarrative.narrative(&summary);
    let report = TextRenderer.render(&summary, &narrative);

    match output {
        Some(path) => {
            fs::write(path, &report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}
