use axum::{
    Router,
    extract::{Json, Query},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    DebtSnapshot, PayoffOutcome, PlanPolicy, PlanSummary, StepResult, Strategy,
    StrategyComparison, StrategyRun, compare_strategies, describe_months, generate_plan,
    plan_summary, project_payoff, simulate, write_plan_csv,
};

mod cli;

pub use cli::{Cli, CliPlanPolicy, Command, execute, run_cli};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPlanPolicy {
    #[serde(alias = "min")]
    Minimum,
    #[serde(alias = "accel", alias = "fast")]
    Accelerated,
}

impl From<ApiPlanPolicy> for PlanPolicy {
    fn from(value: ApiPlanPolicy) -> Self {
        match value {
            ApiPlanPolicy::Minimum => PlanPolicy::Minimum,
            ApiPlanPolicy::Accelerated => PlanPolicy::Accelerated,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiStrategy {
    #[serde(alias = "highest-interest", alias = "highestInterest")]
    Avalanche,
    #[serde(alias = "lowest-balance", alias = "lowestBalance")]
    Snowball,
}

impl From<ApiStrategy> for Strategy {
    fn from(value: ApiStrategy) -> Self {
        match value {
            ApiStrategy::Avalanche => Strategy::Avalanche,
            ApiStrategy::Snowball => Strategy::Snowball,
        }
    }
}

impl From<Strategy> for ApiStrategy {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::Avalanche => ApiStrategy::Avalanche,
            Strategy::Snowball => ApiStrategy::Snowball,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayoffPayload {
    balance: f64,
    #[serde(alias = "interestRate", alias = "rate")]
    annual_rate: f64,
    #[serde(alias = "payment", alias = "minPayment")]
    monthly_payment: f64,
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebtPayload {
    id: Option<u64>,
    name: Option<String>,
    principal: f64,
    #[serde(alias = "interestRate", alias = "rate")]
    annual_interest_rate: f64,
    #[serde(alias = "minPayment")]
    minimum_payment: f64,
    #[serde(default)]
    total_paid: f64,
    creation_date: Option<NaiveDate>,
}

impl DebtPayload {
    fn into_snapshot(self, index: usize, today: NaiveDate) -> DebtSnapshot {
        let id = self.id.unwrap_or(index as u64 + 1);
        DebtSnapshot {
            id,
            name: self.name.unwrap_or_else(|| format!("Debt {id}")),
            principal: self.principal,
            annual_interest_rate: self.annual_interest_rate,
            minimum_payment: self.minimum_payment,
            total_paid: self.total_paid,
            creation_date: self.creation_date.unwrap_or(today),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanPayload {
    debt: DebtPayload,
    policy: Option<ApiPlanPolicy>,
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StrategiesPayload {
    debts: Vec<DebtPayload>,
    #[serde(default, alias = "extra")]
    extra_payment: f64,
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimulatePayload {
    debts: Vec<DebtPayload>,
    #[serde(alias = "totalMonthlyBudget")]
    budget: f64,
    strategy: ApiStrategy,
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayoffResponse {
    outcome: PayoffOutcome,
    time_to_payoff: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResponse {
    debt_id: u64,
    debt_name: String,
    policy: ApiPlanPolicy,
    summary: PlanSummary,
    steps: Vec<StepResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonResponse {
    total_principal: f64,
    monthly_budget: f64,
    avalanche: StrategyRun,
    snowball: StrategyRun,
    cheaper_strategy: ApiStrategy,
    interest_savings: f64,
    faster_strategy: Option<ApiStrategy>,
    time_difference: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    strategy: ApiStrategy,
    run: StrategyRun,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("payoff HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/api/payoff");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/api/payoff", get(payoff_get_handler).post(payoff_post_handler))
        .route("/api/plan", post(plan_handler))
        .route("/api/plan/export", post(plan_export_handler))
        .route("/api/strategies", post(strategies_handler))
        .route("/api/simulate", post(simulate_handler))
        .fallback(not_found_handler)
}

fn today_or_local(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn payoff_get_handler(Query(payload): Query<PayoffPayload>) -> Response {
    respond(payoff_response(payload))
}

async fn payoff_post_handler(Json(payload): Json<PayoffPayload>) -> Response {
    respond(payoff_response(payload))
}

async fn plan_handler(Json(payload): Json<PlanPayload>) -> Response {
    respond(plan_response(payload))
}

async fn plan_export_handler(Json(payload): Json<PlanPayload>) -> Response {
    match plan_csv(payload) {
        Ok((filename, csv)) => {
            let disposition = format!("attachment; filename={filename}");
            let mut response = (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response();
            response.headers_mut().insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            );
            response
        }
        Err(msg) => {
            warn!("plan export rejected: {msg}");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

async fn strategies_handler(Json(payload): Json<StrategiesPayload>) -> Response {
    respond(comparison_response(payload))
}

async fn simulate_handler(Json(payload): Json<SimulatePayload>) -> Response {
    respond(simulate_response(payload))
}

fn respond<T: Serialize>(result: Result<T, String>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(msg) => {
            warn!("request rejected: {msg}");
            error_response(StatusCode::BAD_REQUEST, &msg)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn payoff_response(payload: PayoffPayload) -> Result<PayoffResponse, String> {
    let today = today_or_local(payload.today);
    let outcome = project_payoff(
        payload.balance,
        payload.annual_rate,
        payload.monthly_payment,
        today,
    )
    .map_err(|e| e.to_string())?;
    Ok(PayoffResponse {
        outcome,
        time_to_payoff: describe_outcome(&outcome),
    })
}

fn plan_response(payload: PlanPayload) -> Result<PlanResponse, String> {
    let today = today_or_local(payload.today);
    let policy = payload.policy.unwrap_or(ApiPlanPolicy::Minimum);
    let debt = payload.debt.into_snapshot(0, today);
    let plan = generate_plan(&debt, policy.into()).map_err(|e| e.to_string())?;
    Ok(PlanResponse {
        debt_id: debt.id,
        debt_name: debt.name,
        policy,
        summary: plan_summary(&plan, today),
        steps: plan.steps,
    })
}

fn plan_csv(payload: PlanPayload) -> Result<(String, String), String> {
    let today = today_or_local(payload.today);
    let policy = payload.policy.unwrap_or(ApiPlanPolicy::Minimum);
    let debt = payload.debt.into_snapshot(0, today);
    let plan = generate_plan(&debt, policy.into()).map_err(|e| e.to_string())?;

    let mut buffer = Vec::new();
    write_plan_csv(&plan, &mut buffer).map_err(|e| format!("CSV export failed: {e}"))?;
    let csv = String::from_utf8(buffer).map_err(|e| format!("CSV export failed: {e}"))?;
    let filename = format!(
        "payment_plan_{}_{}.csv",
        sanitize_filename(&debt.name),
        policy_name(policy.into())
    );
    Ok((filename, csv))
}

fn comparison_response(payload: StrategiesPayload) -> Result<ComparisonResponse, String> {
    let debts = snapshots_from_payload(payload.debts, today_or_local(payload.today));
    if debts.is_empty() {
        return Err("No debts found for comparison".to_string());
    }
    let comparison = compare_strategies(&debts, payload.extra_payment).map_err(|e| e.to_string())?;
    Ok(build_comparison_response(&comparison))
}

fn simulate_response(payload: SimulatePayload) -> Result<SimulateResponse, String> {
    let debts = snapshots_from_payload(payload.debts, today_or_local(payload.today));
    let run = simulate(&debts, payload.budget, payload.strategy.into()).map_err(|e| e.to_string())?;
    Ok(SimulateResponse {
        strategy: payload.strategy,
        run,
    })
}

fn snapshots_from_payload(debts: Vec<DebtPayload>, today: NaiveDate) -> Vec<DebtSnapshot> {
    debts
        .into_iter()
        .enumerate()
        .map(|(index, debt)| debt.into_snapshot(index, today))
        .collect()
}

fn build_comparison_response(comparison: &StrategyComparison) -> ComparisonResponse {
    let faster = comparison.faster();
    ComparisonResponse {
        total_principal: comparison.total_principal,
        monthly_budget: comparison.monthly_budget,
        avalanche: comparison.avalanche,
        snowball: comparison.snowball,
        cheaper_strategy: comparison.cheaper().into(),
        interest_savings: comparison.interest_difference(),
        faster_strategy: faster.map(ApiStrategy::from),
        time_difference: faster.map(|_| describe_months(comparison.month_difference(), " and ")),
    }
}

pub(crate) fn describe_outcome(outcome: &PayoffOutcome) -> String {
    match outcome {
        PayoffOutcome::AlreadyPaidOff => "Already paid off".to_string(),
        PayoffOutcome::NeverPayable => "Never (min payment too low)".to_string(),
        PayoffOutcome::PayoffIn { months, .. } => describe_months(*months, ", "),
        PayoffOutcome::Unresolved => "More than 100 years".to_string(),
    }
}

pub(crate) fn policy_name(policy: PlanPolicy) -> &'static str {
    match policy {
        PlanPolicy::Minimum => "minimum",
        PlanPolicy::Accelerated => "accelerated",
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn payoff_payload_parses_aliases_and_date() {
        let json = r#"{
          "balance": 1200,
          "interestRate": 12,
          "payment": 103,
          "today": "2024-01-31"
        }"#;
        let payload: PayoffPayload = serde_json::from_str(json).expect("json should parse");
        assert_approx(payload.annual_rate, 12.0);
        assert_approx(payload.monthly_payment, 103.0);

        let response = payoff_response(payload).expect("valid payload");
        assert_eq!(response.time_to_payoff, "1 year, 1 month");
        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"status\":\"payoff-in\""));
        assert!(json.contains("\"date\":\"2025-02-28\""));
        assert!(json.contains("\"timeToPayoff\""));
    }

    #[test]
    fn payoff_response_reports_never_payable() {
        let payload = PayoffPayload {
            balance: 1_000.0,
            annual_rate: 24.0,
            monthly_payment: 15.0,
            today: None,
        };
        let response = payoff_response(payload).expect("valid payload");
        assert_eq!(response.outcome, PayoffOutcome::NeverPayable);
        assert_eq!(response.time_to_payoff, "Never (min payment too low)");
    }

    #[test]
    fn payoff_response_rejects_negative_rate() {
        let payload = PayoffPayload {
            balance: 1_000.0,
            annual_rate: -3.0,
            monthly_payment: 15.0,
            today: None,
        };
        let err = payoff_response(payload).expect_err("negative rate");
        assert!(err.contains("annual rate"));
    }

    #[test]
    fn plan_payload_defaults_to_minimum_policy() {
        let json = r#"{
          "debt": {
            "name": "Visa",
            "principal": 100,
            "rate": 0,
            "minPayment": 30
          },
          "today": "2024-01-31"
        }"#;
        let payload: PlanPayload = serde_json::from_str(json).expect("json should parse");
        let response = plan_response(payload).expect("valid payload");
        assert_eq!(response.policy, ApiPlanPolicy::Minimum);
        assert_eq!(response.debt_id, 1);
        assert_eq!(response.steps.len(), 4);
        assert_eq!(response.summary.months, 4);
        assert_eq!(
            response.summary.payoff_date,
            NaiveDate::from_ymd_opt(2024, 5, 31)
        );

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"steps\""));
        assert!(json.contains("\"totalInterest\""));
        assert!(json.contains("\"policy\":\"minimum\""));
    }

    #[test]
    fn plan_csv_names_file_after_debt_and_policy() {
        let json = r#"{
          "debt": { "name": "Car Loan", "principal": 1000, "rate": 12, "minPayment": 5 },
          "policy": "accelerated"
        }"#;
        let payload: PlanPayload = serde_json::from_str(json).expect("json should parse");
        let (filename, csv) = plan_csv(payload).expect("valid payload");
        assert_eq!(filename, "payment_plan_Car_Loan_accelerated.csv");
        assert!(csv.starts_with("Month,Payment,Interest,Balance\n"));
        assert_eq!(csv.lines().count(), 21);
    }

    #[test]
    fn comparison_response_reports_cheaper_strategy() {
        let json = r#"{
          "debts": [
            { "name": "Store card", "principal": 500, "rate": 5, "minPayment": 25 },
            { "name": "Credit card", "principal": 4000, "rate": 22, "minPayment": 100 }
          ],
          "extra": 275
        }"#;
        let payload: StrategiesPayload = serde_json::from_str(json).expect("json should parse");
        let response = comparison_response(payload).expect("valid payload");
        assert_eq!(response.cheaper_strategy, ApiStrategy::Avalanche);
        assert_eq!(response.faster_strategy, None);
        assert_eq!(response.time_difference, None);
        assert_approx(response.monthly_budget, 400.0);
        assert!(response.interest_savings > 84.0);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"cheaperStrategy\":\"avalanche\""));
        assert!(json.contains("\"totalInterestPaid\""));
        assert!(json.contains("\"status\":\"paid-off\""));
    }

    #[test]
    fn comparison_response_rejects_empty_debt_list() {
        let payload = StrategiesPayload {
            debts: Vec::new(),
            extra_payment: 0.0,
            today: None,
        };
        let err = comparison_response(payload).expect_err("no debts");
        assert!(err.contains("No debts"));
    }

    #[test]
    fn simulate_payload_parses_strategy_aliases() {
        let json = r#"{
          "debts": [{ "principal": 1000, "rate": 24, "minPayment": 10 }],
          "totalMonthlyBudget": 15,
          "strategy": "lowestBalance"
        }"#;
        let payload: SimulatePayload = serde_json::from_str(json).expect("json should parse");
        assert_eq!(payload.strategy, ApiStrategy::Snowball);
        let response = simulate_response(payload).expect("valid payload");
        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"status\":\"cap-reached\""));
        assert!(json.contains("\"months\":1200"));
    }

    #[test]
    fn debt_lists_take_creation_date_from_injected_today() {
        let json = r#"{
          "debts": [
            { "principal": 1000, "rate": 24, "minPayment": 50 },
            { "principal": 200, "rate": 5, "minPayment": 20, "creationDate": "2023-06-01" }
          ],
          "budget": 100,
          "strategy": "avalanche",
          "today": "2024-02-29"
        }"#;
        let payload: SimulatePayload = serde_json::from_str(json).expect("json should parse");
        let today = today_or_local(payload.today);
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 2, 29).expect("valid date"));

        let debts = snapshots_from_payload(payload.debts, today);
        assert_eq!(debts[0].creation_date, today);
        assert_eq!(debts[0].name, "Debt 1");
        assert_eq!(
            debts[1].creation_date,
            NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid date")
        );

        let json = r#"{ "debts": [], "extra": 10, "today": "2024-02-29" }"#;
        let payload: StrategiesPayload = serde_json::from_str(json).expect("json should parse");
        assert_eq!(payload.today, Some(today));
    }

    #[tokio::test]
    async fn invalid_payoff_request_returns_bad_request_json() {
        let response = payoff_post_handler(Json(PayoffPayload {
            balance: 100.0,
            annual_rate: f64::NAN,
            monthly_payment: 10.0,
            today: None,
        }))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let text = String::from_utf8(body.to_vec()).expect("utf8 body");
        assert!(text.contains("\"error\""));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
