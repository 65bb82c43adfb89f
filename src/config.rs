//! Solver options from the environment
//!
//! Reads:
//!   IRR_TOLERANCE, IRR_MAX_ITERATIONS, IRR_LOWER_BOUND, IRR_UPPER_BOUND
//! Unset variables keep their defaults.

use crate::error::{IrrError, Result};
use crate::solver::SolverOptions;
use std::env;
use std::str::FromStr;

pub const ENV_TOLERANCE: &str = "IRR_TOLERANCE";
pub const ENV_MAX_ITERATIONS: &str = "IRR_MAX_ITERATIONS";
pub const ENV_LOWER_BOUND: &str = "IRR_LOWER_BOUND";
pub const ENV_UPPER_BOUND: &str = "IRR_UPPER_BOUND";

fn parse_var<T: FromStr>(name: &'static str, value: Option<String>) -> Result<Option<T>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| IrrError::InvalidEnv { name, value: raw }),
    }
}

/// Apply variables from `lookup` over `base`, failing on the first unparsable value
fn options_from<F>(base: SolverOptions, lookup: F) -> Result<SolverOptions>
where
    F: Fn(&str) -> Option<String>,
{
    let mut options = base;

    if let Some(tolerance) = parse_var(ENV_TOLERANCE, lookup(ENV_TOLERANCE))? {
        options.tolerance = tolerance;
    }
    if let Some(max_iterations) = parse_var(ENV_MAX_ITERATIONS, lookup(ENV_MAX_ITERATIONS))? {
        options.max_iterations = max_iterations;
    }
    if let Some(lower) = parse_var(ENV_LOWER_BOUND, lookup(ENV_LOWER_BOUND))? {
        options.lower_bound = lower;
    }
    if let Some(upper) = parse_var(ENV_UPPER_BOUND, lookup(ENV_UPPER_BOUND))? {
        options.upper_bound = upper;
    }

    Ok(options)
}

impl SolverOptions {
    /// Defaults overridden by environment variables, rejecting unparsable values
    pub fn try_from_env() -> Result<Self> {
        options_from(Self::default(), |name| env::var(name).ok())
    }

    /// Defaults overridden by environment variables; unparsable values are ignored
    pub fn from_env() -> Self {
        let mut options = Self::default();
        for name in [ENV_TOLERANCE, ENV_MAX_ITERATIONS, ENV_LOWER_BOUND, ENV_UPPER_BOUND] {
            let single = |key: &str| if key == name { env::var(key).ok() } else { None };
            match options_from(options, single) {
                Ok(updated) => options = updated,
                Err(e) => log::warn!("Ignoring {}", e),
            }
        }
        options
    }
}
