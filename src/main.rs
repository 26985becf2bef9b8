//! Venture Planner CLI
//!
//! Command-line interface for running financial projections

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use venture_planner::{
    plan::{load_expense_categories, load_plan, load_revenue_streams},
    projection::ProjectionResult,
    storage::{self, FINANCIAL_PLAN_KEY},
    FileStore, FinancialPlan, MetricAssumptions, Scenario, ScenarioRunner, Timeframe,
};

#[derive(Parser, Debug)]
#[command(name = "venture_planner", version, about = "Monthly financial projections")]
struct Args {
    /// Plan file (JSON)
    #[arg(long, conflicts_with_all = ["revenue", "expenses"])]
    plan: Option<PathBuf>,

    /// Revenue streams CSV (name,monthlyAmount,growthRate)
    #[arg(long, requires = "expenses")]
    revenue: Option<PathBuf>,

    /// Expense categories CSV (name,monthlyAmount,growthRate,category)
    #[arg(long, requires = "revenue")]
    expenses: Option<PathBuf>,

    /// Load the plan previously saved under this key
    #[arg(long, conflicts_with_all = ["plan", "revenue", "expenses"])]
    load: Option<String>,

    /// Override the plan's scenario (optimistic, realistic, pessimistic)
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Override the plan's timeframe in months (12, 24, 36, 48 or 60)
    #[arg(long)]
    timeframe: Option<u32>,

    /// Override the plan's starting cash
    #[arg(long)]
    starting_cash: Option<f64>,

    /// Calendar year of the first projected month (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Project under all three scenarios
    #[arg(long)]
    compare: bool,

    /// Directory containing metric_assumptions.csv
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Write the full result as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save the plan under this key after projecting
    #[arg(long)]
    save: Option<String>,

    /// Directory for saved plans (default: platform data directory)
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut store = match &args.store_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location(),
    };

    let mut plan = build_plan(&args, &store)?;
    if let Some(scenario) = args.scenario {
        plan.scenario = scenario;
    }
    if let Some(months) = args.timeframe {
        plan.timeframe = Timeframe::try_from(months)?;
    }
    if let Some(cash) = args.starting_cash {
        plan.starting_cash = cash;
    }

    let assumptions = match &args.assumptions {
        Some(dir) => MetricAssumptions::from_csv_path(dir)
            .with_context(|| format!("loading assumptions from {}", dir.display()))?,
        None => MetricAssumptions::default(),
    };
    let runner = ScenarioRunner::with_assumptions(assumptions);
    let year = args.year.unwrap_or_else(|| chrono::Local::now().year());

    println!("Venture Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("=====================\n");
    println!(
        "Plan: {} revenue streams, {} expense categories, {}, starting cash ${:.0}",
        plan.revenue_streams.len(),
        plan.expense_categories.len(),
        plan.timeframe,
        plan.starting_cash
    );

    if args.compare {
        let comparison = runner.compare(&plan, year);
        for result in comparison.iter() {
            print_result(result);
        }
        if let Some(path) = &args.output {
            write_json(path, &comparison)?;
        }
    } else {
        let result = runner.run(&plan, year);
        print_result(&result);
        print_annual(&result);
        if let Some(path) = &args.output {
            write_json(path, &result)?;
        }
    }

    if let Some(key) = &args.save {
        storage::save_plan(&mut store, key, &plan)
            .with_context(|| format!("saving plan under '{}'", key))?;
        println!("\nPlan saved to {} as '{}'", store.root().display(), key);
    }

    Ok(())
}

fn build_plan(args: &Args, store: &FileStore) -> Result<FinancialPlan> {
    if let Some(path) = &args.plan {
        return load_plan(path).with_context(|| format!("loading plan {}", path.display()));
    }

    if let (Some(revenue), Some(expenses)) = (&args.revenue, &args.expenses) {
        let revenue_streams = load_revenue_streams(revenue)
            .with_context(|| format!("loading {}", revenue.display()))?;
        let expense_categories = load_expense_categories(expenses)
            .with_context(|| format!("loading {}", expenses.display()))?;
        let plan = FinancialPlan {
            revenue_streams,
            expense_categories,
            ..FinancialPlan::default()
        };
        return Ok(plan.normalized()?);
    }

    let key = args.load.as_deref().unwrap_or(FINANCIAL_PLAN_KEY);
    match storage::load_plan(store, key)? {
        Some(record) => {
            log::info!("Using plan '{}' saved at {}", key, record.saved_at);
            Ok(record.plan)
        }
        None if args.load.is_some() => bail!("no plan saved under '{}'", key),
        None => {
            log::warn!("No plan given; projecting a blank plan");
            Ok(FinancialPlan::default())
        }
    }
}

fn print_result(result: &ProjectionResult) {
    let metrics = &result.metrics;
    let summary = result.summary();

    println!("\nScenario: {}", result.scenario);
    println!(
        "{:>5} {:>5} {:>12} {:>12} {:>12} {:>14}",
        "Month", "Year", "Revenue", "Expenses", "Cash Flow", "Cumulative"
    );
    println!("{}", "-".repeat(65));

    for row in result.projections.iter().take(12) {
        println!(
            "{:>5} {:>5} {:>12.0} {:>12.0} {:>12.0} {:>14.0}",
            row.month,
            row.year,
            row.revenue,
            row.expenses,
            row.cash_flow,
            row.cumulative_cash_flow
        );
    }
    if result.projections.len() > 12 {
        println!("... ({} more months)", result.projections.len() - 12);
    }

    println!("\nKey Metrics:");
    println!("  Monthly Burn Rate: ${:.0}", metrics.monthly_burn_rate);
    match metrics.runway.months() {
        Some(months) => println!("  Runway: {} months", months),
        None => println!("  Runway: unbounded (not burning cash)"),
    }
    match metrics.break_even_month {
        Some(m) => println!("  Break-even: month {}", m),
        None => println!("  Break-even: not within timeframe"),
    }
    println!("  Gross Margin: {:.1}%", metrics.gross_margin);
    println!("  Net Margin: {:.1}%", metrics.net_margin);
    println!(
        "  CAC: ${:.0}  LTV: ${:.0}  LTV/CAC: {:.1}",
        metrics.cac, metrics.ltv, metrics.ltv_cac_ratio
    );
    println!(
        "  Ending Cash: ${:.0}  Lowest Cash: ${:.0}",
        summary.ending_cash, summary.lowest_cash
    );
}

fn print_annual(result: &ProjectionResult) {
    println!("\nAnnual Totals:");
    for year in result.annual_totals() {
        println!(
            "  {}: revenue ${:.0} expenses ${:.0} cash flow ${:.0} closing cash ${:.0}",
            year.year,
            year.revenue,
            year.expenses,
            year.cash_flow,
            year.closing_cash
        );
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    println!("\nFull results written to: {}", path.display());
    Ok(())
}
