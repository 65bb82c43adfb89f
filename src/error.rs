//! Error types for loading and assembling cashflow input
//!
//! Solve failures are not errors: they come back as [`crate::SolveResult::Failed`].

use thiserror::Error;

/// Result alias for the input/config layer
pub type Result<T> = std::result::Result<T, IrrError>;

#[derive(Error, Debug)]
pub enum IrrError {
    #[error("spending has {spending} periods but income has {income}")]
    LengthMismatch { spending: usize, income: usize },

    #[error("expected period {expected} but found period {found}")]
    PeriodOutOfOrder { expected: usize, found: usize },

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
