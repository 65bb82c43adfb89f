//! `/solve` wire contract
//!
//! Request `{ "spending": [...], "income": [...] }`, response
//! `{ "status": 0, "irr": 7.71 }` when solved or `{ "status": n, "reason": ... }`
//! when not. The HTTP handler in `bin/lambda_handler.rs` is a thin wrapper
//! around [`handle_solve`].

use crate::cashflow::CashflowSeries;
use crate::solver::{BisectionSolver, FailureReason, SolveResult, Solver, SolverOptions};
use serde::{Deserialize, Serialize};

pub const STATUS_SOLVED: i32 = 0;
pub const STATUS_NO_SIGN_CHANGE: i32 = 1;
pub const STATUS_NO_CONVERGENCE: i32 = 2;
pub const STATUS_INVALID_INPUT: i32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub spending: Vec<f64>,
    pub income: Vec<f64>,
    /// Sent as "resolve" by older clients; ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub status: i32,
    /// Periodic rate in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// Wire status code for a failure reason
pub fn status_code(reason: FailureReason) -> i32 {
    match reason {
        FailureReason::NoSignChange => STATUS_NO_SIGN_CHANGE,
        FailureReason::NoConvergence => STATUS_NO_CONVERGENCE,
        FailureReason::InvalidInput => STATUS_INVALID_INPUT,
    }
}

impl From<SolveResult> for SolveResponse {
    fn from(result: SolveResult) -> Self {
        match result {
            SolveResult::Solved { rate } => Self {
                status: STATUS_SOLVED,
                irr: Some(rate),
                reason: None,
            },
            SolveResult::Failed { reason } => Self {
                status: status_code(reason),
                irr: None,
                reason: Some(reason),
            },
        }
    }
}

/// Combine the request's columns and solve
pub fn handle_solve(request: &SolveRequest, options: &SolverOptions) -> SolveResponse {
    let result = match CashflowSeries::from_spending_income(&request.spending, &request.income) {
        Ok(series) => BisectionSolver::new(*options).solve(&series),
        Err(e) => {
            log::warn!("Rejecting solve request: {}", e);
            SolveResult::failed(FailureReason::InvalidInput)
        }
    };
    result.into()
}
