use std::io;

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::{add_months, describe_months};
use super::types::{DebtSnapshot, PaymentPlan, PaymentRecord};

const TOP_DEBTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub months: u32,
    pub total_interest: f64,
    pub total_payments: f64,
    pub payoff_date: Option<NaiveDate>,
    pub time_to_payoff: String,
    /// False when the plan stopped at its cap with a balance left over.
    pub paid_off: bool,
}

pub fn plan_summary(plan: &PaymentPlan, today: NaiveDate) -> PlanSummary {
    let months = plan.months();
    PlanSummary {
        months,
        total_interest: plan.total_interest(),
        total_payments: plan.total_payments(),
        payoff_date: add_months(today, months),
        time_to_payoff: describe_months(months, ", "),
        paid_off: plan.final_balance().is_none_or(|balance| balance <= 0.0),
    }
}

#[derive(Serialize)]
struct PlanCsvRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Payment")]
    payment: f64,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Balance")]
    balance: f64,
}

/// Writes the plan as `Month,Payment,Interest,Balance` rows.
pub fn write_plan_csv<W: io::Write>(plan: &PaymentPlan, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if plan.steps.is_empty() {
        csv_writer.write_record(["Month", "Payment", "Interest", "Balance"])?;
    }
    for step in &plan.steps {
        csv_writer.serialize(PlanCsvRow {
            month: step.month,
            payment: step.payment,
            interest: step.interest,
            balance: step.balance,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub debt_count: usize,
    pub total_balance: f64,
    pub total_minimum_payment: f64,
    pub highest_interest: Vec<u64>,
    pub highest_balance: Vec<u64>,
}

pub fn portfolio_summary(debts: &[DebtSnapshot]) -> PortfolioSummary {
    let mut by_rate: Vec<&DebtSnapshot> = debts.iter().collect();
    by_rate.sort_by(|a, b| b.annual_interest_rate.total_cmp(&a.annual_interest_rate));
    let mut by_balance: Vec<&DebtSnapshot> = debts.iter().collect();
    by_balance.sort_by(|a, b| b.current_balance().total_cmp(&a.current_balance()));

    PortfolioSummary {
        debt_count: debts.len(),
        total_balance: debts.iter().map(DebtSnapshot::current_balance).sum(),
        total_minimum_payment: debts.iter().map(|d| d.minimum_payment).sum(),
        highest_interest: by_rate.iter().take(TOP_DEBTS).map(|d| d.id).collect(),
        highest_balance: by_balance.iter().take(TOP_DEBTS).map(|d| d.id).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub amount: f64,
    pub cumulative: f64,
}

/// Payments in ascending date order with a running total. Payments on the
/// same day keep their recorded order.
pub fn payment_history(payments: &[PaymentRecord]) -> Vec<HistoryPoint> {
    let mut ordered: Vec<&PaymentRecord> = payments.iter().collect();
    ordered.sort_by_key(|p| p.date);

    let mut cumulative = 0.0;
    ordered
        .into_iter()
        .map(|p| {
            cumulative += p.amount;
            HistoryPoint {
                date: p.date,
                amount: p.amount,
                cumulative,
            }
        })
        .collect()
}
