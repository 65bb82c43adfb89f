//! IRR Solver CLI
//!
//! Solves the internal rate of return for cashflows given on the command line,
//! in a period table CSV, or as a JSON batch of scenarios.
//! Solver options come from IRR_TOLERANCE, IRR_MAX_ITERATIONS, IRR_LOWER_BOUND
//! and IRR_UPPER_BOUND, overridden by the matching flags.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use irr_solver::cashflow::load_cashflows;
use irr_solver::{
    annualize_rate, load_scenarios, BatchOutcome, BatchRunner, BisectionSolver, CashflowSeries,
    FailureReason, SolveResult, Solver, SolverOptions,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "irr", version, about = "Internal rate of return solver")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    settings: Settings,
}

#[derive(Args)]
struct Settings {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Convergence tolerance on |NPV| and bracket half-width
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Iteration budget before giving up without a rate
    #[arg(long, global = true)]
    max_iterations: Option<u32>,

    /// Lowest periodic rate searched, as a fraction (must be > -1)
    #[arg(long, global = true, allow_negative_numbers = true)]
    lower_bound: Option<f64>,

    /// Highest periodic rate searched, as a fraction
    #[arg(long, global = true, allow_negative_numbers = true)]
    upper_bound: Option<f64>,

    /// Also report the annual effective rate for this many periods per year
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    periods_per_year: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one series given on the command line
    Solve {
        /// Net cashflows, period 0 first (e.g. -100,30,30)
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            conflicts_with_all = ["spending", "income"],
            required_unless_present = "spending"
        )]
        cashflows: Option<Vec<f64>>,

        /// Spending per period (e.g. 100,0,0)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "income")]
        spending: Option<Vec<f64>>,

        /// Income per period (e.g. 0,60,60)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "spending")]
        income: Option<Vec<f64>>,
    },
    /// Solve a period table CSV with columns period,spending,income
    File { path: PathBuf },
    /// Solve a JSON array of {name, spending, income} scenarios
    Batch { path: PathBuf },
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    result: SolveResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    annual_rate: Option<f64>,
}

impl Settings {
    fn solver_options(&self) -> Result<SolverOptions> {
        let mut options = SolverOptions::try_from_env().context("Invalid solver environment")?;

        if let Some(tolerance) = self.tolerance {
            options.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            options.max_iterations = max_iterations;
        }
        if let Some(lower) = self.lower_bound {
            options.lower_bound = lower;
        }
        if let Some(upper) = self.upper_bound {
            options.upper_bound = upper;
        }

        Ok(options)
    }
}

fn describe_failure(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::NoSignChange => {
            "IRR not found: NPV does not change sign within the searched rate range"
        }
        FailureReason::NoConvergence => {
            "IRR not found: solver did not converge (try a looser tolerance or more iterations)"
        }
        FailureReason::InvalidInput => {
            "Invalid input: need at least two periods of finite cashflows, not all zero"
        }
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn solve_series(series: &CashflowSeries, settings: &Settings) -> Result<ExitCode> {
    let options = settings.solver_options()?;
    let start = Instant::now();
    let result = BisectionSolver::new(options).solve(series);
    log::info!("Solved {} periods in {:?}", series.len(), start.elapsed());

    let annual_rate = settings
        .periods_per_year
        .and_then(|n| result.rate().map(|rate| annualize_rate(rate, n)));

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&Report { result, annual_rate })?);
    } else {
        match result {
            SolveResult::Solved { rate } => {
                println!("IRR = {:.6} %", rate);
                if let Some(annual) = annual_rate {
                    println!("Annual effective = {:.6} %", annual);
                }
            }
            SolveResult::Failed { reason } => println!("{}", describe_failure(reason)),
        }
    }

    Ok(exit_code(!result.is_solved()))
}

fn print_batch(outcomes: &[BatchOutcome]) {
    println!("{:<30} {:>14} {:>14}", "Scenario", "IRR %", "Annual %");
    println!("{}", "-".repeat(60));

    for outcome in outcomes {
        match outcome.result {
            SolveResult::Solved { rate } => {
                let annual = outcome
                    .annual_rate
                    .map(|a| format!("{:.6}", a))
                    .unwrap_or_default();
                println!("{:<30} {:>14.6} {:>14}", outcome.name, rate, annual);
            }
            SolveResult::Failed { reason } => {
                println!("{:<30} {}", outcome.name, describe_failure(reason));
            }
        }
    }
}

fn run_batch(path: &Path, settings: &Settings) -> Result<ExitCode> {
    let scenarios = load_scenarios(path)
        .with_context(|| format!("Unable to load scenarios from {}", path.display()))?;

    let mut runner = BatchRunner::new(settings.solver_options()?);
    if let Some(n) = settings.periods_per_year {
        runner = runner.with_periods_per_year(n);
    }

    let start = Instant::now();
    let outcomes = runner.run(&scenarios);
    log::info!("Solved {} scenarios in {:?}", outcomes.len(), start.elapsed());

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        print_batch(&outcomes);
    }

    Ok(exit_code(outcomes.iter().any(|o| !o.result.is_solved())))
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Solve { cashflows, spending, income } => {
            let series = match (cashflows, spending, income) {
                (Some(cashflows), _, _) => CashflowSeries::new(cashflows),
                (None, Some(spending), Some(income)) => {
                    CashflowSeries::from_spending_income(&spending, &income)?
                }
                _ => anyhow::bail!("Provide --cashflows or both --spending and --income"),
            };
            solve_series(&series, &cli.settings)
        }
        Command::File { path } => {
            let table = load_cashflows(&path)
                .with_context(|| format!("Unable to load {}", path.display()))?;
            solve_series(&table.to_series()?, &cli.settings)
        }
        Command::Batch { path } => run_batch(&path, &cli.settings),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
