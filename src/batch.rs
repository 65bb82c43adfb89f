//! Batch runner for solving many scenarios at once
//!
//! Scenarios are independent, so they are solved in parallel and returned in
//! input order.

use crate::cashflow::CashflowSeries;
use crate::error::Result;
use crate::solver::{annualize_rate, BisectionSolver, FailureReason, SolveResult, Solver, SolverOptions};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One named spending/income scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScenario {
    pub name: String,
    pub spending: Vec<f64>,
    pub income: Vec<f64>,
}

/// Result for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub name: String,
    pub result: SolveResult,
    /// Annual effective rate in percent, when solved and a period count is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<f64>,
}

/// Solves scenarios with shared options
///
/// # Example
/// ```
/// use irr_solver::{BatchRunner, BatchScenario};
///
/// let runner = BatchRunner::default();
/// let outcomes = runner.run(&[BatchScenario {
///     name: "deposit".to_string(),
///     spending: vec![100.0, 0.0],
///     income: vec![0.0, 105.0],
/// }]);
/// assert!(outcomes[0].result.is_solved());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    solver: BisectionSolver,
    periods_per_year: Option<u32>,
}

impl BatchRunner {
    pub fn new(options: SolverOptions) -> Self {
        Self {
            solver: BisectionSolver::new(options),
            periods_per_year: None,
        }
    }

    /// Also report annualised rates for `periods_per_year` periods a year
    pub fn with_periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = Some(periods_per_year).filter(|&n| n > 0);
        self
    }

    pub fn options(&self) -> &SolverOptions {
        self.solver.options()
    }

    /// Solve a single scenario
    pub fn run_one(&self, scenario: &BatchScenario) -> BatchOutcome {
        let result = match CashflowSeries::from_spending_income(&scenario.spending, &scenario.income) {
            Ok(series) => self.solver.solve(&series),
            Err(e) => {
                log::warn!("Scenario {:?}: {}", scenario.name, e);
                SolveResult::failed(FailureReason::InvalidInput)
            }
        };

        if let Some(reason) = result.failure() {
            log::warn!("Scenario {:?} failed: {:?}", scenario.name, reason);
        }

        let annual_rate = self
            .periods_per_year
            .and_then(|n| result.rate().map(|rate| annualize_rate(rate, n)));

        BatchOutcome {
            name: scenario.name.clone(),
            result,
            annual_rate,
        }
    }

    /// Solve all scenarios in parallel, preserving order
    pub fn run(&self, scenarios: &[BatchScenario]) -> Vec<BatchOutcome> {
        scenarios.par_iter().map(|s| self.run_one(s)).collect()
    }
}

/// Load a JSON array of scenarios from a file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<BatchScenario>> {
    let file = File::open(path)?;
    load_scenarios_from_reader(BufReader::new(file))
}

/// Load a JSON array of scenarios from any reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<BatchScenario>> {
    let scenarios: Vec<BatchScenario> = serde_json::from_reader(reader)?;
    log::debug!("Loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}
