//! Solver configuration

use serde::{Deserialize, Serialize};

/// Default convergence tolerance, applied to both |NPV| and half the bracket width
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Default iteration budget
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Default lower rate bound (-99%)
pub const DEFAULT_LOWER_BOUND: f64 = -0.99;

/// Default upper rate bound (1000%)
pub const DEFAULT_UPPER_BOUND: f64 = 10.0;

/// Tuning for a solve. Bounds are periodic rate fractions, not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    pub tolerance: f64,
    pub max_iterations: u32,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
        }
    }
}

impl SolverOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Whether these options describe a searchable domain
    ///
    /// The lower bound must stay above -1: at r <= -1 the discount base
    /// `1 + r` is zero or negative.
    pub fn is_valid(&self) -> bool {
        self.tolerance.is_finite()
            && self.tolerance > 0.0
            && self.max_iterations > 0
            && self.lower_bound.is_finite()
            && self.upper_bound.is_finite()
            && self.lower_bound > -1.0
            && self.upper_bound > self.lower_bound
    }
}
