//! Loan Projection CLI
//!
//! Runs a single scenario from a JSON file or from a directory of schedule CSVs

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use loan_projection::schedule::LoadedSchedules;
use loan_projection::{LoanScenario, ScenarioInputs};

#[derive(Debug, Parser)]
#[command(name = "loan-projection", version, about = "Monthly loan and balance projection")]
struct Args {
    /// Scenario JSON file
    #[arg(long, conflicts_with = "schedules")]
    config: Option<PathBuf>,

    /// Directory holding rates.csv, loan_contributions.csv and balance_contributions.csv
    #[arg(long, requires_all = ["start_year", "end_year", "initial_loan"])]
    schedules: Option<PathBuf>,

    #[arg(long)]
    initial_loan: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    initial_balance: f64,

    #[arg(long)]
    start_year: Option<i32>,

    #[arg(long)]
    end_year: Option<i32>,

    /// Full per-period output
    #[arg(long, default_value = "loan_projection_output.csv")]
    output: PathBuf,

    /// Rows printed to the console
    #[arg(long, default_value_t = 24)]
    rows: usize,
}

fn load_inputs(args: &Args) -> anyhow::Result<ScenarioInputs> {
    if let Some(path) = &args.config {
        return ScenarioInputs::from_json_path(path)
            .with_context(|| format!("reading scenario {}", path.display()));
    }

    let Some(dir) = &args.schedules else {
        bail!("either --config or --schedules is required");
    };
    let (Some(initial_loan), Some(start_year), Some(end_year)) =
        (args.initial_loan, args.start_year, args.end_year)
    else {
        bail!("--schedules needs --initial-loan, --start-year and --end-year");
    };

    let loaded = LoadedSchedules::load_from(dir)
        .with_context(|| format!("loading schedules from {}", dir.display()))?;
    Ok(ScenarioInputs::new(initial_loan, args.initial_balance, start_year, end_year)
        .with_schedules(loaded))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let inputs = load_inputs(&args)?;
    let mut scenario = LoanScenario::new(&inputs)?;
    scenario.calculate();

    println!("Projection Results ({} months):", scenario.rows().len());
    println!("{:>6} {:>10} {:>8} {:>12} {:>12} {:>10} {:>14} {:>14}",
        "Period", "Date", "Rate", "LoanContrib", "BalContrib", "Factor", "Loan", "Balance");
    println!("{}", "-".repeat(94));

    for row in scenario.rows().iter().take(args.rows) {
        println!("{:>6} {:>10} {:>8.4} {:>12.2} {:>12.2} {:>10.6} {:>14.2} {:>14.2}",
            row.period,
            row.date,
            row.rate,
            row.loan_contribution,
            row.balance_contribution,
            row.compounding_factor,
            row.loan,
            row.balance,
        );
    }

    if scenario.rows().len() > args.rows {
        println!("... ({} more months)", scenario.rows().len() - args.rows);
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    scenario.write_csv(file)?;
    println!("\nFull results written to: {}", args.output.display());

    let summary = scenario.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.total_periods);
    println!("  Initial Loan: {:.2}", summary.initial_loan);
    println!("  Final Loan: {:.2}", summary.final_loan);
    println!("  Final Balance: {:.2}", summary.final_balance);
    println!("  Compounded Loan Contributions: {:.2}", summary.compounded_loan_contributions);
    println!("  Total Interest: {:.2}", summary.total_interest);
    match summary.payoff_period {
        Some(period) => println!("  Paid Off: period {}", period),
        None => println!("  Paid Off: no"),
    }

    Ok(())
}
