use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::{self, Write as _};
use std::fs::File;
use std::path::PathBuf;

use super::{describe_outcome, policy_name};
use crate::core::{
    DebtSnapshot, PaymentPlan, PayoffOutcome, PlanPolicy, PlanSummary, RunStatus, Strategy,
    StrategyComparison, add_months, compare_strategies, describe_months, generate_plan,
    payment_history, plan_summary, portfolio_summary, project_debt, project_payoff,
    write_plan_csv,
};
use crate::ledger::{Ledger, NewDebt};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliPlanPolicy {
    Minimum,
    Accelerated,
}

impl From<CliPlanPolicy> for PlanPolicy {
    fn from(value: CliPlanPolicy) -> Self {
        match value {
            CliPlanPolicy::Minimum => PlanPolicy::Minimum,
            CliPlanPolicy::Accelerated => PlanPolicy::Accelerated,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "payoff",
    about = "Debt tracker with payoff projections and avalanche/snowball strategy comparison"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "PAYOFF_LEDGER",
        default_value = "debt_ledger.json",
        help = "JSON file holding debts and payments"
    )]
    pub ledger: PathBuf,
    #[arg(
        long,
        global = true,
        help = "Date to project from (YYYY-MM-DD); defaults to the local date"
    )]
    pub today: Option<NaiveDate>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all debts with their time to payoff
    List,
    /// Add a new debt
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        principal: f64,
        #[arg(long, help = "Annual interest rate in percent, e.g. 19.9")]
        rate: f64,
        #[arg(long, help = "Minimum monthly payment")]
        minimum: f64,
    },
    /// Change a debt's name, principal, rate or minimum payment
    Edit {
        #[arg(long)]
        debt: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        principal: Option<f64>,
        #[arg(long, help = "Annual interest rate in percent, e.g. 19.9")]
        rate: Option<f64>,
        #[arg(long, help = "Minimum monthly payment")]
        minimum: Option<f64>,
    },
    /// Record a payment against a debt
    Pay {
        #[arg(long)]
        debt: u64,
        #[arg(long)]
        amount: f64,
        #[arg(long, help = "Payment date; defaults to --today")]
        date: Option<NaiveDate>,
    },
    /// Show a debt with its payment history
    Show {
        #[arg(long)]
        debt: u64,
    },
    /// Generate a month-by-month payment plan for one debt
    Plan {
        #[arg(long)]
        debt: u64,
        #[arg(long, value_enum, default_value_t = CliPlanPolicy::Minimum)]
        policy: CliPlanPolicy,
        #[arg(long, help = "Print every month of the plan")]
        details: bool,
        #[arg(long, help = "Write the plan to a CSV file")]
        export: Option<PathBuf>,
    },
    /// Compare avalanche and snowball payoff across all debts
    Compare {
        #[arg(
            long,
            default_value_t = 0.0,
            help = "Monthly amount paid on top of all minimum payments"
        )]
        extra: f64,
    },
    /// Delete a debt and its payments
    Delete {
        #[arg(long)]
        debt: u64,
        #[arg(long, help = "Confirm the deletion")]
        yes: bool,
    },
    /// Project a balance without touching the ledger
    Project {
        #[arg(long)]
        balance: f64,
        #[arg(long, help = "Annual interest rate in percent")]
        rate: f64,
        #[arg(long)]
        payment: f64,
    },
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

impl Command {
    fn mutates_ledger(&self) -> bool {
        matches!(
            self,
            Command::Add { .. }
                | Command::Edit { .. }
                | Command::Pay { .. }
                | Command::Delete { .. }
        )
    }
}

/// Runs one ledger-backed command: load, execute, save when needed, print.
pub fn run_cli(cli: Cli) -> Result<(), String> {
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    if matches!(cli.command, Command::Project { .. }) {
        let output = execute(&cli.command, &mut Ledger::new(), today)?;
        print!("{output}");
        return Ok(());
    }

    let mut ledger = Ledger::load(&cli.ledger).map_err(|e| e.to_string())?;
    let output = execute(&cli.command, &mut ledger, today)?;
    if cli.command.mutates_ledger() {
        ledger.save(&cli.ledger).map_err(|e| e.to_string())?;
    }
    print!("{output}");
    Ok(())
}

pub fn execute(command: &Command, ledger: &mut Ledger, today: NaiveDate) -> Result<String, String> {
    match command {
        Command::List => render(|out| write_debt_list(out, ledger, today)),
        Command::Add {
            name,
            principal,
            rate,
            minimum,
        } => {
            let debt = NewDebt {
                name: name.clone(),
                principal: *principal,
                annual_interest_rate: *rate,
                minimum_payment: *minimum,
            };
            let id = ledger.add_debt(debt, today).map_err(|e| e.to_string())?;
            let snapshot = ledger.debt(id).map_err(|e| e.to_string())?;
            let outcome = project_debt(snapshot, today).map_err(|e| e.to_string())?;
            render(|out| {
                writeln!(out, "Debt '{name}' added successfully with ID: {id}")?;
                write_payoff_lines(out, &outcome, "Estimated")
            })
        }
        Command::Edit {
            debt,
            name,
            principal,
            rate,
            minimum,
        } => {
            let current = ledger.debt(*debt).map_err(|e| e.to_string())?;
            let edited = NewDebt {
                name: name.clone().unwrap_or_else(|| current.name.clone()),
                principal: principal.unwrap_or(current.principal),
                annual_interest_rate: rate.unwrap_or(current.annual_interest_rate),
                minimum_payment: minimum.unwrap_or(current.minimum_payment),
            };
            ledger.update_debt(*debt, edited).map_err(|e| e.to_string())?;
            let snapshot = ledger.debt(*debt).map_err(|e| e.to_string())?;
            let outcome = project_debt(snapshot, today).map_err(|e| e.to_string())?;
            render(|out| {
                writeln!(
                    out,
                    "Debt '{}' updated. Current balance: ${:.2}",
                    snapshot.name,
                    snapshot.current_balance()
                )?;
                write_payoff_lines(out, &outcome, "Updated")
            })
        }
        Command::Pay { debt, amount, date } => {
            let name = ledger.debt(*debt).map_err(|e| e.to_string())?.name.clone();
            ledger
                .add_payment(*debt, *amount, date.unwrap_or(today))
                .map_err(|e| e.to_string())?;
            let snapshot = ledger.debt(*debt).map_err(|e| e.to_string())?;
            let outcome = project_debt(snapshot, today).map_err(|e| e.to_string())?;
            render(|out| {
                writeln!(
                    out,
                    "Payment of ${amount:.2} applied to '{name}'. New balance: ${:.2}",
                    snapshot.current_balance()
                )?;
                write_payoff_lines(out, &outcome, "Updated")
            })
        }
        Command::Show { debt } => {
            let snapshot = ledger.debt(*debt).map_err(|e| e.to_string())?;
            let outcome = project_debt(snapshot, today).map_err(|e| e.to_string())?;
            render(|out| write_debt_details(out, ledger, snapshot, &outcome))
        }
        Command::Plan {
            debt,
            policy,
            details,
            export,
        } => {
            let snapshot = ledger.debt(*debt).map_err(|e| e.to_string())?;
            let policy = PlanPolicy::from(*policy);
            let plan = generate_plan(snapshot, policy).map_err(|e| e.to_string())?;
            if plan.steps.is_empty() {
                return Err("Unable to generate payment plan: nothing left to pay".to_string());
            }
            if let Some(path) = export {
                let file = File::create(path)
                    .map_err(|e| format!("failed to create {}: {e}", path.display()))?;
                write_plan_csv(&plan, file).map_err(|e| format!("CSV export failed: {e}"))?;
            }

            let summary = plan_summary(&plan, today);
            render(|out| {
                write_plan_summary(out, &snapshot.name, policy, &summary)?;
                if *details {
                    write_plan_steps(out, &plan)?;
                }
                if let Some(path) = export {
                    writeln!(out, "Plan exported to {}", path.display())?;
                }
                Ok(())
            })
        }
        Command::Compare { extra } => {
            let debts = ledger.snapshots();
            if debts.is_empty() {
                return Err("No debts found for comparison.".to_string());
            }
            let comparison = compare_strategies(&debts, *extra).map_err(|e| e.to_string())?;
            render(|out| write_comparison(out, &comparison, today))
        }
        Command::Delete { debt, yes } => {
            let name = ledger.debt(*debt).map_err(|e| e.to_string())?.name.clone();
            if !*yes {
                return Err(format!(
                    "refusing to delete '{name}' without --yes; this cannot be undone"
                ));
            }
            ledger.delete_debt(*debt).map_err(|e| e.to_string())?;
            Ok(format!("Debt '{name}' deleted successfully.\n"))
        }
        Command::Project {
            balance,
            rate,
            payment,
        } => {
            let outcome =
                project_payoff(*balance, *rate, *payment, today).map_err(|e| e.to_string())?;
            render(|out| write_payoff_lines(out, &outcome, "Estimated"))
        }
        Command::Serve { .. } => Err("serve is handled by the binary entry point".to_string()),
    }
}

fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> Result<String, String> {
    let mut out = String::new();
    write(&mut out).map_err(|e| format!("failed to format output: {e}"))?;
    Ok(out)
}

fn write_payoff_lines(out: &mut String, outcome: &PayoffOutcome, label: &str) -> fmt::Result {
    writeln!(out, "{label} time to payoff: {}", describe_outcome(outcome))?;
    if let PayoffOutcome::PayoffIn { date, .. } = outcome {
        writeln!(out, "{label} payoff date: {date}")?;
    }
    Ok(())
}

fn write_debt_list(out: &mut String, ledger: &Ledger, today: NaiveDate) -> fmt::Result {
    if ledger.debts().is_empty() {
        return writeln!(out, "No debts found.");
    }

    writeln!(out, "===== Your Debts =====")?;
    writeln!(
        out,
        "{:<5} {:<20} {:<15} {:<10} {:<15} {:<25}",
        "ID", "Name", "Balance", "Interest", "Min Payment", "Time to Payoff"
    )?;
    writeln!(out, "{}", "-".repeat(90))?;
    for debt in ledger.debts() {
        let payoff = project_debt(debt, today)
            .map(|outcome| describe_outcome(&outcome))
            .unwrap_or_else(|e| e.to_string());
        writeln!(
            out,
            "{:<5} {:<20} {:<15} {:<10} {:<15} {:<25}",
            debt.id,
            debt.name,
            format!("${:.2}", debt.current_balance()),
            format!("{:.2}%", debt.annual_interest_rate),
            format!("${:.2}", debt.minimum_payment),
            payoff
        )?;
    }

    let summary = portfolio_summary(ledger.debts());
    writeln!(
        out,
        "Total balance: ${:.2} across {} debts, minimum payments ${:.2}/month",
        summary.total_balance, summary.debt_count, summary.total_minimum_payment
    )?;

    writeln!(out, "Highest interest:")?;
    for (rank, debt) in ranked(ledger, &summary.highest_interest) {
        writeln!(out, "  {rank}. {} ({:.2}%)", debt.name, debt.annual_interest_rate)?;
    }
    writeln!(out, "Highest balance:")?;
    for (rank, debt) in ranked(ledger, &summary.highest_balance) {
        writeln!(out, "  {rank}. {} (${:.2})", debt.name, debt.current_balance())?;
    }
    Ok(())
}

fn ranked<'a>(
    ledger: &'a Ledger,
    ids: &'a [u64],
) -> impl Iterator<Item = (usize, &'a DebtSnapshot)> {
    ids.iter()
        .filter_map(move |id| ledger.debt(*id).ok())
        .enumerate()
        .map(|(index, debt)| (index + 1, debt))
}

fn write_debt_details(
    out: &mut String,
    ledger: &Ledger,
    debt: &DebtSnapshot,
    outcome: &PayoffOutcome,
) -> fmt::Result {
    writeln!(out, "===== Debt Details: {} =====", debt.name)?;
    writeln!(out, "Principal: ${:.2}", debt.principal)?;
    writeln!(out, "Current Balance: ${:.2}", debt.current_balance())?;
    writeln!(out, "Interest Rate: {:.2}%", debt.annual_interest_rate)?;
    writeln!(out, "Minimum Payment: ${:.2}", debt.minimum_payment)?;
    writeln!(out, "Monthly Interest: ${:.2}", debt.monthly_interest())?;
    writeln!(out, "Total Paid: ${:.2}", debt.total_paid)?;
    writeln!(out, "Created On: {}", debt.creation_date)?;
    write_payoff_lines(out, outcome, "Estimated")?;

    let history = payment_history(&ledger.payments_for_debt(debt.id));
    if history.is_empty() {
        return writeln!(out, "No payment history found.");
    }
    writeln!(out, "===== Payment History =====")?;
    writeln!(out, "{:<12} {:<10} {:<12}", "Date", "Amount", "Cumulative")?;
    for point in history {
        writeln!(
            out,
            "{:<12} {:<10} {:<12}",
            point.date.to_string(),
            format!("${:.2}", point.amount),
            format!("${:.2}", point.cumulative)
        )?;
    }
    Ok(())
}

fn write_plan_summary(
    out: &mut String,
    name: &str,
    policy: PlanPolicy,
    summary: &PlanSummary,
) -> fmt::Result {
    writeln!(out, "===== Payment Plan for {name} =====")?;
    writeln!(out, "Strategy: {}", policy_name(policy))?;
    writeln!(out, "Total Months to Pay Off: {}", summary.months)?;
    if let Some(date) = summary.payoff_date {
        writeln!(out, "Estimated Payoff Date: {date}")?;
    }
    if !summary.paid_off {
        writeln!(out, "Balance remains after {} months", summary.months)?;
    }
    writeln!(out, "Total Interest Paid: ${:.2}", summary.total_interest)?;
    writeln!(out, "Total Amount Paid: ${:.2}", summary.total_payments)
}

fn write_plan_steps(out: &mut String, plan: &PaymentPlan) -> fmt::Result {
    writeln!(
        out,
        "{:>5} {:>12} {:>12} {:>14}",
        "Month", "Payment", "Interest", "Balance"
    )?;
    for step in &plan.steps {
        writeln!(
            out,
            "{:>5} {:>12.2} {:>12.2} {:>14.2}",
            step.month, step.payment, step.interest, step.balance
        )?;
    }
    Ok(())
}

fn write_comparison(
    out: &mut String,
    comparison: &StrategyComparison,
    today: NaiveDate,
) -> fmt::Result {
    writeln!(out, "===== Debt Payoff Strategy Comparison =====")?;
    writeln!(out, "Total Debt Principal: ${:.2}", comparison.total_principal)?;
    writeln!(out, "Monthly Budget: ${:.2}", comparison.monthly_budget)?;
    for (label, run) in [
        ("Avalanche Method (Highest Interest First)", comparison.avalanche),
        ("Snowball Method (Lowest Balance First)", comparison.snowball),
    ] {
        writeln!(out, "{label}:")?;
        writeln!(out, "  Months to Payoff: {}", run.months)?;
        match run.status {
            RunStatus::PaidOff => {
                if let Some(date) = add_months(today, run.months) {
                    writeln!(out, "  Estimated Payoff Date: {date}")?;
                }
            }
            RunStatus::CapReached => writeln!(out, "  Not paid off within 100 years")?,
        }
        writeln!(out, "  Total Interest Paid: ${:.2}", run.total_interest_paid)?;
        writeln!(out, "  Total Amount Paid: ${:.2}", run.total_paid)?;
    }

    writeln!(
        out,
        "The {} method will save you ${:.2} in interest.",
        strategy_label(comparison.cheaper()),
        comparison.interest_difference()
    )?;
    match comparison.faster() {
        Some(faster) => writeln!(
            out,
            "The {} method will pay off your debts {} faster.",
            strategy_label(faster),
            describe_months(comparison.month_difference(), " and ")
        ),
        None => writeln!(
            out,
            "Both methods will take the same amount of time to pay off your debts."
        ),
    }
}

fn strategy_label(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Avalanche => "Avalanche",
        Strategy::Snowball => "Snowball",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).expect("valid date")
    }

    fn add(ledger: &mut Ledger, name: &str, principal: f64, rate: f64, minimum: f64) -> String {
        let command = Command::Add {
            name: name.to_string(),
            principal,
            rate,
            minimum,
        };
        execute(&command, ledger, today()).expect("valid debt")
    }

    #[test]
    fn cli_parses_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "payoff",
            "plan",
            "--debt",
            "3",
            "--policy",
            "accelerated",
            "--ledger",
            "/tmp/ledger.json",
            "--today",
            "2024-02-29",
        ])
        .expect("valid arguments");
        assert_eq!(cli.ledger, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2024, 2, 29));
        match cli.command {
            Command::Plan { debt, policy, .. } => {
                assert_eq!(debt, 3);
                assert_eq!(policy, CliPlanPolicy::Accelerated);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_malformed_date() {
        let err = Cli::try_parse_from(["payoff", "list", "--today", "2024-13-01"])
            .expect_err("invalid date");
        assert!(err.to_string().contains("--today"));
    }

    #[test]
    fn add_reports_estimated_payoff() {
        let mut ledger = Ledger::new();
        let out = add(&mut ledger, "Visa", 1_200.0, 12.0, 103.0);
        assert!(out.contains("added successfully with ID: 1"));
        assert!(out.contains("Estimated time to payoff: 1 year, 1 month"));
        assert!(out.contains("Estimated payoff date: 2025-02-28"));
    }

    #[test]
    fn add_flags_minimum_below_interest() {
        let mut ledger = Ledger::new();
        let out = add(&mut ledger, "Payday", 1_000.0, 24.0, 15.0);
        assert!(out.contains("Never (min payment too low)"));
    }

    #[test]
    fn pay_updates_balance_and_show_lists_history() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Visa", 1_000.0, 12.0, 50.0);
        let pay = Command::Pay {
            debt: 1,
            amount: 200.0,
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
        };
        let out = execute(&pay, &mut ledger, today()).expect("valid payment");
        assert!(out.contains("New balance: $800.00"));

        let out = execute(&Command::Show { debt: 1 }, &mut ledger, today()).expect("exists");
        assert!(out.contains("Current Balance: $800.00"));
        assert!(out.contains("Monthly Interest: $8.00"));
        assert!(out.contains("2024-01-15"));
        assert!(out.contains("$200.00"));
    }

    #[test]
    fn list_shows_totals_and_rankings() {
        let mut ledger = Ledger::new();
        assert_eq!(
            execute(&Command::List, &mut ledger, today()).expect("list"),
            "No debts found.\n"
        );
        add(&mut ledger, "Visa", 1_000.0, 12.0, 50.0);
        add(&mut ledger, "Car", 5_000.0, 6.0, 150.0);
        add(&mut ledger, "Store", 300.0, 24.0, 25.0);
        let out = execute(&Command::List, &mut ledger, today()).expect("list");
        assert!(out.contains("Visa"));
        assert!(out.contains("Total balance: $6300.00 across 3 debts"));

        let (by_rate, by_balance) = out
            .split_once("Highest balance:")
            .expect("balance ranking");
        let by_rate = by_rate
            .split_once("Highest interest:")
            .expect("interest ranking")
            .1;
        assert_eq!(
            by_rate.trim(),
            "1. Store (24.00%)\n  2. Visa (12.00%)\n  3. Car (6.00%)"
        );
        assert_eq!(
            by_balance.trim(),
            "1. Car ($5000.00)\n  2. Visa ($1000.00)\n  3. Store ($300.00)"
        );
    }

    #[test]
    fn edit_keeps_recorded_payments() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Visa", 1_000.0, 12.0, 50.0);
        let pay = Command::Pay {
            debt: 1,
            amount: 200.0,
            date: None,
        };
        execute(&pay, &mut ledger, today()).expect("valid payment");

        let cli = Cli::try_parse_from([
            "payoff",
            "edit",
            "--debt",
            "1",
            "--principal",
            "1200",
            "--rate",
            "18",
        ])
        .expect("valid arguments");
        assert!(cli.command.mutates_ledger());
        let out = execute(&cli.command, &mut ledger, today()).expect("valid edit");
        assert!(out.contains("Debt 'Visa' updated. Current balance: $1000.00"));
        assert!(out.contains("Updated time to payoff"));

        let debt = ledger.debt(1).expect("exists");
        assert_eq!(debt.name, "Visa");
        assert_eq!(debt.principal, 1_200.0);
        assert_eq!(debt.annual_interest_rate, 18.0);
        assert_eq!(debt.minimum_payment, 50.0);
        assert_eq!(debt.total_paid, 200.0);
    }

    #[test]
    fn edit_rejects_invalid_values_and_unknown_debt() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Visa", 1_000.0, 12.0, 50.0);
        let edit = |debt, minimum| Command::Edit {
            debt,
            name: None,
            principal: None,
            rate: None,
            minimum,
        };
        assert!(execute(&edit(1, Some(0.0)), &mut ledger, today()).is_err());
        assert!(execute(&edit(9, None), &mut ledger, today()).is_err());
        assert_eq!(ledger.debt(1).expect("exists").minimum_payment, 50.0);
    }

    #[test]
    fn plan_prints_summary_and_details() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Loan", 100.0, 0.0, 30.0);
        let plan = Command::Plan {
            debt: 1,
            policy: CliPlanPolicy::Minimum,
            details: true,
            export: None,
        };
        let out = execute(&plan, &mut ledger, today()).expect("valid plan");
        assert!(out.contains("Total Months to Pay Off: 4"));
        assert!(out.contains("Estimated Payoff Date: 2024-05-31"));
        assert!(out.contains("Total Amount Paid: $100.00"));
        assert!(out.contains("10.00"));
    }

    #[test]
    fn compare_names_cheaper_method() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Store card", 500.0, 5.0, 25.0);
        add(&mut ledger, "Credit card", 4_000.0, 22.0, 100.0);
        let out = execute(&Command::Compare { extra: 275.0 }, &mut ledger, today())
            .expect("comparison");
        assert!(out.contains("Monthly Budget: $400.00"));
        assert!(out.contains("The Avalanche method will save you $84.43 in interest."));
        assert!(out.contains("Both methods will take the same amount of time"));
    }

    #[test]
    fn compare_without_debts_is_an_error() {
        let mut ledger = Ledger::new();
        let err = execute(&Command::Compare { extra: 0.0 }, &mut ledger, today())
            .expect_err("no debts");
        assert!(err.contains("No debts"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Visa", 1_000.0, 12.0, 50.0);
        let err = execute(&Command::Delete { debt: 1, yes: false }, &mut ledger, today())
            .expect_err("needs --yes");
        assert!(err.contains("--yes"));
        assert_eq!(ledger.debts().len(), 1);

        let out = execute(&Command::Delete { debt: 1, yes: true }, &mut ledger, today())
            .expect("deleted");
        assert!(out.contains("deleted successfully"));
        assert!(ledger.debts().is_empty());
    }

    #[test]
    fn project_does_not_touch_ledger() {
        let mut ledger = Ledger::new();
        let command = Command::Project {
            balance: 10_000.0,
            rate: 12.0,
            payment: 100.0001,
        };
        let out = execute(&command, &mut ledger, today()).expect("valid projection");
        assert_eq!(out, "Estimated time to payoff: More than 100 years\n");
        assert!(ledger.debts().is_empty());
    }
}
