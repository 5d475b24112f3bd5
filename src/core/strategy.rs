use log::debug;

use super::engine::{PROJECTION_MONTH_CAP, validate_snapshot};
use super::error::{PayoffResult, ensure_non_negative};
use super::types::{DebtSnapshot, RunStatus, Strategy, StrategyComparison, StrategyRun};

/// Working copy of one debt for the duration of a strategy run.
#[derive(Debug, Clone, Copy)]
struct OpenDebt {
    balance: f64,
    monthly_rate: f64,
    minimum_payment: f64,
}

impl OpenDebt {
    fn from_snapshot(debt: &DebtSnapshot) -> Self {
        Self {
            balance: debt.current_balance(),
            monthly_rate: debt.monthly_rate(),
            minimum_payment: debt.minimum_payment,
        }
    }

    fn is_open(&self) -> bool {
        self.balance > 0.0
    }
}

/// Returns the snapshots in the order the strategy pays them. The sort is
/// stable, so ties keep their input order.
pub fn priority_order(debts: &[DebtSnapshot], strategy: Strategy) -> Vec<&DebtSnapshot> {
    let mut ordered: Vec<&DebtSnapshot> = debts.iter().collect();
    match strategy {
        Strategy::Avalanche => {
            ordered.sort_by(|a, b| b.annual_interest_rate.total_cmp(&a.annual_interest_rate))
        }
        Strategy::Snowball => {
            ordered.sort_by(|a, b| a.current_balance().total_cmp(&b.current_balance()))
        }
    }
    ordered
}

pub fn simulate(
    debts: &[DebtSnapshot],
    total_monthly_budget: f64,
    strategy: Strategy,
) -> PayoffResult<StrategyRun> {
    ensure_non_negative("total monthly budget", total_monthly_budget)?;
    for debt in debts {
        validate_snapshot(debt)?;
    }

    let mut open: Vec<OpenDebt> = priority_order(debts, strategy)
        .into_iter()
        .map(OpenDebt::from_snapshot)
        .filter(OpenDebt::is_open)
        .collect();
    let opening_balance: f64 = open.iter().map(|d| d.balance).sum();

    let mut months = 0;
    let mut total_interest = 0.0;
    while !open.is_empty() && months < PROJECTION_MONTH_CAP {
        months += 1;
        let mut pool = total_monthly_budget;

        for debt in open.iter_mut() {
            let interest = debt.balance * debt.monthly_rate;
            total_interest += interest;
            debt.balance += interest;

            let minimum = debt.minimum_payment.min(debt.balance);
            if pool >= minimum {
                debt.balance -= minimum;
                pool -= minimum;
            } else {
                debt.balance -= pool;
                pool = 0.0;
            }
        }

        if pool > 0.0 {
            if let Some(target) = open.iter_mut().find(|d| d.is_open()) {
                let extra = pool.min(target.balance);
                target.balance -= extra;
            }
        }

        open.retain(OpenDebt::is_open);
    }

    let status = if open.is_empty() {
        RunStatus::PaidOff
    } else {
        RunStatus::CapReached
    };
    debug!("{strategy:?} run finished after {months} months ({status:?})");

    Ok(StrategyRun {
        months,
        total_interest_paid: total_interest,
        total_paid: opening_balance + total_interest,
        status,
    })
}

/// Runs both strategies against the same budget: the sum of minimum payments
/// plus `extra_payment`.
pub fn compare_strategies(
    debts: &[DebtSnapshot],
    extra_payment: f64,
) -> PayoffResult<StrategyComparison> {
    ensure_non_negative("extra payment", extra_payment)?;

    let total_principal: f64 = debts.iter().map(|d| d.current_balance().max(0.0)).sum();
    let monthly_budget: f64 =
        debts.iter().map(|d| d.minimum_payment).sum::<f64>() + extra_payment;

    let avalanche = simulate(debts, monthly_budget, Strategy::Avalanche)?;
    let snowball = simulate(debts, monthly_budget, Strategy::Snowball)?;

    Ok(StrategyComparison {
        total_principal,
        monthly_budget,
        avalanche,
        snowball,
    })
}
