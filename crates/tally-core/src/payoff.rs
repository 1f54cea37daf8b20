//! Debt payoff simulation
//!
//! Deterministic month-by-month amortization over a set of debt accounts.
//! Two prioritization strategies are supported: avalanche (highest APR
//! first) and snowball (lowest balance first). The output is a full
//! schedule of monthly balances until every debt is paid off or the month
//! cap is reached.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use crate::models::{Debt, DebtBalance, MonthSnapshot, PayoffMethod, PayoffResult};
use crate::money::quantize_cents;

/// Hard cap on simulated months. Substitutes for convergence detection:
/// with a high enough APR, minimum payments never cover accrued interest
/// and balances grow forever. Hitting the cap is reported as `done: false`,
/// not an error.
const MAX_MONTHS: u32 = 600;

fn monthly_rate(apr: Decimal) -> Decimal {
    apr / dec!(12)
}

/// Order the working list by current-state priority.
///
/// Avalanche: APR descending, ties broken by balance ascending.
/// Snowball: balance ascending, ties broken by APR descending.
/// Both sorts are stable, so fully tied debts keep their relative order.
fn sort_by_priority(debts: &mut [Debt], method: PayoffMethod) {
    match method {
        PayoffMethod::Avalanche => {
            debts.sort_by(|a, b| b.apr.cmp(&a.apr).then(a.balance.cmp(&b.balance)))
        }
        PayoffMethod::Snowball => {
            debts.sort_by(|a, b| a.balance.cmp(&b.balance).then(b.apr.cmp(&a.apr)))
        }
    }
}

/// Simulate a payoff schedule for multiple debts.
///
/// The caller's debts are never mutated: the simulation works on a
/// defensive copy with balances and minimum payments quantized to cents
/// up front. `extra_payment` is the amount applied each month beyond
/// minimums, in priority order; zero (or negative) extra is legal and
/// simply leaves only the minimum payments.
///
/// Each month, in order:
/// 1. re-sort the full list by current-state priority; balances change,
///    so relative priority can flip mid-simulation
/// 2. accrue one month of interest (APR / 12) on every open balance
/// 3. pay minimums, capped at the remaining balance
/// 4. walk the priority order paying out of the extra budget
/// 5. record a snapshot of every debt, paid off or not
///
/// A debt that enters at zero balance accrues nothing and receives
/// nothing, but still appears pinned at 0.00 in every snapshot.
pub fn payoff_plan(debts: &[Debt], extra_payment: Decimal, method: PayoffMethod) -> PayoffResult {
    let mut working: Vec<Debt> = debts
        .iter()
        .map(|d| Debt {
            name: d.name.clone(),
            balance: quantize_cents(d.balance),
            apr: d.apr,
            min_payment: quantize_cents(d.min_payment),
        })
        .collect();
    let extra_payment = quantize_cents(extra_payment);

    let mut schedule = Vec::new();
    let mut month: u32 = 0;

    while month < MAX_MONTHS && working.iter().any(|d| d.balance > Decimal::ZERO) {
        month += 1;

        // Priority is re-derived from current state every month, not
        // frozen at month 1
        sort_by_priority(&mut working, method);

        // Accrue monthly interest
        for d in &mut working {
            if d.balance <= Decimal::ZERO {
                continue;
            }
            let interest = quantize_cents(d.balance * monthly_rate(d.apr));
            d.balance = quantize_cents(d.balance + interest);
        }

        // Pay minimums
        for d in &mut working {
            if d.balance <= Decimal::ZERO {
                continue;
            }
            let payment = d.min_payment.min(d.balance);
            d.balance = quantize_cents(d.balance - payment);
        }

        // Apply the extra budget in priority order
        let mut remaining_extra = extra_payment;
        for d in &mut working {
            if remaining_extra <= Decimal::ZERO {
                break;
            }
            if d.balance <= Decimal::ZERO {
                continue;
            }
            let payment = remaining_extra.min(d.balance);
            d.balance = quantize_cents(d.balance - payment);
            remaining_extra = quantize_cents(remaining_extra - payment);
        }

        schedule.push(MonthSnapshot {
            month,
            debts: working
                .iter()
                .map(|d| DebtBalance {
                    name: d.name.clone(),
                    balance: d.balance,
                })
                .collect(),
        });
    }

    let done = working.iter().all(|d| d.balance <= Decimal::ZERO);
    info!(
        method = %method,
        months = month,
        done,
        "Payoff simulation complete"
    );

    PayoffResult {
        method,
        months: month,
        schedule,
        done,
    }
}
