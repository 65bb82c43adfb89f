//! IRR solving: result types, options and the solver capability

mod bisection;
mod npv;
mod options;

pub use bisection::BisectionSolver;
pub use npv::npv;
pub use options::{
    SolverOptions, DEFAULT_LOWER_BOUND, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
    DEFAULT_UPPER_BOUND,
};

use crate::cashflow::CashflowSeries;
use serde::{Deserialize, Serialize};

/// Why a solve produced no rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// NPV has the same sign at both bounds, so no root is bracketed
    NoSignChange,
    /// Iteration budget ran out before the tolerance was met
    NoConvergence,
    /// Cashflows or options are malformed or degenerate
    InvalidInput,
}

/// Outcome of a single solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SolveResult {
    /// Rate as a percentage per period (8.0 means 8%)
    Solved { rate: f64 },
    Failed { reason: FailureReason },
}

impl SolveResult {
    pub fn failed(reason: FailureReason) -> Self {
        SolveResult::Failed { reason }
    }

    /// Periodic rate in percent, if solved
    pub fn rate(&self) -> Option<f64> {
        match self {
            SolveResult::Solved { rate } => Some(*rate),
            SolveResult::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            SolveResult::Solved { .. } => None,
            SolveResult::Failed { reason } => Some(*reason),
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved { .. })
    }
}

/// Something that can find the IRR of a cashflow series
pub trait Solver {
    fn solve(&self, cashflows: &CashflowSeries) -> SolveResult;
}

/// Solve with the bisection solver
///
/// # Example
/// ```
/// use irr_solver::{solve, SolverOptions};
///
/// let result = solve(&[-100.0, 30.0, 30.0, 30.0, 30.0], &SolverOptions::default());
/// let rate = result.rate().unwrap();
/// assert!((rate - 7.71).abs() < 0.01);
/// ```
pub fn solve(cashflows: &[f64], options: &SolverOptions) -> SolveResult {
    bisection::bisect(cashflows, options)
}

/// Convert a periodic rate (percent) to an annual effective rate (percent)
///
/// Compounds `(1 + r)` over `periods_per_year` periods, so 1% monthly gives
/// roughly 12.68% a year.
pub fn annualize_rate(periodic_pct: f64, periods_per_year: u32) -> f64 {
    let periodic = periodic_pct / 100.0;
    ((1.0 + periodic).powf(f64::from(periods_per_year)) - 1.0) * 100.0
}
