mod calendar;
mod engine;
mod error;
mod report;
mod strategy;
mod types;

pub use calendar::{add_months, describe_months};
pub use engine::{PLAN_MONTH_CAP, PROJECTION_MONTH_CAP, generate_plan, project_debt, project_payoff};
pub use error::{PayoffError, PayoffResult};
pub use report::{
    HistoryPoint, PlanSummary, PortfolioSummary, payment_history, plan_summary,
    portfolio_summary, write_plan_csv,
};
pub use strategy::{compare_strategies, priority_order, simulate};
pub use types::{
    DebtSnapshot, PaymentPlan, PaymentRecord, PayoffOutcome, PlanPolicy, RunStatus, StepResult, Strategy,
    StrategyComparison, StrategyRun, monthly_rate,
};
