use chrono::NaiveDate;
use log::debug;

use super::calendar::add_months;
use super::error::{PayoffError, PayoffResult, ensure_finite, ensure_non_negative};
use super::types::{DebtSnapshot, PaymentPlan, PayoffOutcome, PlanPolicy, StepResult, monthly_rate};

/// Hard cap for single-debt projections and strategy runs (100 years).
pub const PROJECTION_MONTH_CAP: u32 = 1200;
/// Hard cap for materialized payment plans (30 years).
pub const PLAN_MONTH_CAP: u32 = 360;

const MINIMUM_POLICY_MARGIN: f64 = 1.0;
// Flat add-on over interest; not an optimizing allocation.
const ACCELERATED_POLICY_MARGIN: f64 = 50.0;

pub fn project_payoff(
    balance: f64,
    annual_rate: f64,
    monthly_payment: f64,
    today: NaiveDate,
) -> PayoffResult<PayoffOutcome> {
    ensure_finite("balance", balance)?;
    ensure_non_negative("annual rate", annual_rate)?;
    ensure_finite("monthly payment", monthly_payment)?;

    if balance <= 0.0 {
        return Ok(PayoffOutcome::AlreadyPaidOff);
    }

    let rate = monthly_rate(annual_rate);
    if monthly_payment <= balance * rate {
        return Ok(PayoffOutcome::NeverPayable);
    }

    let mut balance = balance;
    let mut months = 0;
    while balance > 0.0 && months < PROJECTION_MONTH_CAP {
        months += 1;
        let interest = balance * rate;
        let principal_portion = monthly_payment - interest;
        if principal_portion <= 0.0 {
            return Ok(PayoffOutcome::NeverPayable);
        }
        balance -= principal_portion;
    }

    if balance > 0.0 {
        debug!("projection hit the {PROJECTION_MONTH_CAP} month cap with {balance:.2} outstanding");
        return Ok(PayoffOutcome::Unresolved);
    }

    let date = add_months(today, months).ok_or(PayoffError::DateOutOfRange)?;
    Ok(PayoffOutcome::PayoffIn { months, date })
}

/// Minimum-payment projection for a stored debt.
pub fn project_debt(debt: &DebtSnapshot, today: NaiveDate) -> PayoffResult<PayoffOutcome> {
    validate_snapshot(debt)?;
    project_payoff(
        debt.current_balance(),
        debt.annual_interest_rate,
        debt.minimum_payment,
        today,
    )
}

pub fn generate_plan(debt: &DebtSnapshot, policy: PlanPolicy) -> PayoffResult<PaymentPlan> {
    validate_snapshot(debt)?;

    let rate = debt.monthly_rate();
    let margin = match policy {
        PlanPolicy::Minimum => MINIMUM_POLICY_MARGIN,
        PlanPolicy::Accelerated => ACCELERATED_POLICY_MARGIN,
    };

    let mut balance = debt.current_balance();
    let mut steps = Vec::new();
    let mut month = 0;
    while balance > 0.0 && month < PLAN_MONTH_CAP {
        month += 1;
        let interest = balance * rate;
        let mut payment = debt.minimum_payment.max(interest + margin);
        if payment > balance + interest {
            payment = balance + interest;
        }
        balance = balance + interest - payment;
        steps.push(StepResult {
            month,
            payment,
            interest,
            balance,
        });
    }

    debug!(
        "generated {:?} plan for debt {} with {} months",
        policy,
        debt.id,
        steps.len()
    );
    Ok(PaymentPlan { steps })
}

pub(crate) fn validate_snapshot(debt: &DebtSnapshot) -> PayoffResult<()> {
    let field = |name: &str| format!("debt {} {name}", debt.id);
    ensure_non_negative(&field("principal"), debt.principal)?;
    ensure_non_negative(&field("annual interest rate"), debt.annual_interest_rate)?;
    ensure_non_negative(&field("minimum payment"), debt.minimum_payment)?;
    ensure_finite(&field("total paid"), debt.total_paid)?;
    Ok(())
}
