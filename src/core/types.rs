use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlanPolicy {
    Minimum,
    Accelerated,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Strategy {
    Avalanche,
    Snowball,
}

/// Immutable view of a debt record at the start of a simulation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtSnapshot {
    pub id: u64,
    pub name: String,
    pub principal: f64,
    /// Annual rate in percent, e.g. 19.9.
    pub annual_interest_rate: f64,
    pub minimum_payment: f64,
    #[serde(default)]
    pub total_paid: f64,
    pub creation_date: NaiveDate,
}

impl DebtSnapshot {
    pub fn current_balance(&self) -> f64 {
        self.principal - self.total_paid
    }

    pub fn monthly_rate(&self) -> f64 {
        monthly_rate(self.annual_interest_rate)
    }

    pub fn monthly_interest(&self) -> f64 {
        self.current_balance().max(0.0) * self.monthly_rate()
    }
}

/// A recorded payment against a debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: u64,
    pub debt_id: u64,
    pub amount: f64,
    pub date: NaiveDate,
}

pub fn monthly_rate(annual_rate: f64) -> f64 {
    annual_rate / 12.0 / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum PayoffOutcome {
    AlreadyPaidOff,
    NeverPayable,
    PayoffIn { months: u32, date: NaiveDate },
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    PaidOff,
    CapReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRun {
    pub months: u32,
    pub total_interest_paid: f64,
    pub total_paid: f64,
    pub status: RunStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPlan {
    pub steps: Vec<StepResult>,
}

impl PaymentPlan {
    pub fn months(&self) -> u32 {
        self.steps.len() as u32
    }

    pub fn total_interest(&self) -> f64 {
        self.steps.iter().map(|s| s.interest).sum()
    }

    pub fn total_payments(&self) -> f64 {
        self.steps.iter().map(|s| s.payment).sum()
    }

    pub fn final_balance(&self) -> Option<f64> {
        self.steps.last().map(|s| s.balance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyComparison {
    pub total_principal: f64,
    pub monthly_budget: f64,
    pub avalanche: StrategyRun,
    pub snowball: StrategyRun,
}

impl StrategyComparison {
    /// Strategy with the lower interest bill; snowball wins ties.
    pub fn cheaper(&self) -> Strategy {
        if self.avalanche.total_interest_paid < self.snowball.total_interest_paid {
            Strategy::Avalanche
        } else {
            Strategy::Snowball
        }
    }

    pub fn interest_difference(&self) -> f64 {
        (self.avalanche.total_interest_paid - self.snowball.total_interest_paid).abs()
    }

    /// `None` when both strategies finish in the same month.
    pub fn faster(&self) -> Option<Strategy> {
        match self.avalanche.months.cmp(&self.snowball.months) {
            std::cmp::Ordering::Less => Some(Strategy::Avalanche),
            std::cmp::Ordering::Greater => Some(Strategy::Snowball),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn month_difference(&self) -> u32 {
        self.avalanche.months.abs_diff(self.snowball.months)
    }
}
