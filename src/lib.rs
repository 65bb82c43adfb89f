//! IRR Solver - internal rate of return for periodic spending/income cashflows
//!
//! This library provides:
//! - Net cashflow series built from spending/income columns (CSV or in-memory)
//! - A bisection IRR solver with structured failures instead of panics
//! - Environment-driven solver options
//! - Parallel batch solving of named scenarios
//! - The `/solve` request/response contract used by the HTTP handler

pub mod batch;
pub mod cashflow;
pub mod config;
pub mod error;
pub mod service;
pub mod solver;

// Re-export commonly used types
pub use batch::{load_scenarios, load_scenarios_from_reader, BatchOutcome, BatchRunner, BatchScenario};
pub use cashflow::{CashflowSeries, PeriodTable};
pub use error::{IrrError, Result};
pub use service::{handle_solve, SolveRequest, SolveResponse};
pub use solver::{annualize_rate, npv, solve, BisectionSolver, FailureReason, SolveResult, Solver, SolverOptions};
