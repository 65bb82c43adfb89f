//! Bisection IRR solver
//!
//! Slower than Newton-Raphson but cannot diverge once the root is bracketed.

use super::{npv, FailureReason, SolveResult, Solver, SolverOptions};
use crate::cashflow::CashflowSeries;
use log::{debug, warn};

/// IRR solver that halves a bracketing rate interval until NPV vanishes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BisectionSolver {
    options: SolverOptions,
}

impl BisectionSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }
}

impl Solver for BisectionSolver {
    fn solve(&self, cashflows: &CashflowSeries) -> SolveResult {
        bisect(cashflows.as_slice(), &self.options)
    }
}

/// Reason a request is rejected before any NPV is evaluated
fn check_input(cashflows: &[f64], options: &SolverOptions) -> Result<(), &'static str> {
    if cashflows.len() < 2 {
        return Err("fewer than two periods");
    }
    if cashflows.iter().any(|cf| !cf.is_finite()) {
        return Err("non-finite cashflow");
    }
    if cashflows.iter().all(|&cf| cf == 0.0) {
        return Err("all cashflows are zero");
    }
    if !options.is_valid() {
        return Err("invalid solver options");
    }
    Ok(())
}

pub(super) fn bisect(cashflows: &[f64], options: &SolverOptions) -> SolveResult {
    if let Err(problem) = check_input(cashflows, options) {
        warn!("Rejecting IRR request: {}", problem);
        return SolveResult::failed(FailureReason::InvalidInput);
    }

    let mut low = options.lower_bound;
    let mut high = options.upper_bound;
    let mut npv_low = npv(cashflows, low);
    let npv_high = npv(cashflows, high);

    // Exact root on a bound
    if npv_low == 0.0 {
        return SolveResult::Solved { rate: low * 100.0 };
    }
    if npv_high == 0.0 {
        return SolveResult::Solved { rate: high * 100.0 };
    }

    // Compare signs rather than multiplying: the product overflows for long series
    if npv_low.is_nan() || npv_high.is_nan() || npv_low.signum() == npv_high.signum() {
        debug!(
            "No sign change: NPV({}) = {:e}, NPV({}) = {:e}",
            low, npv_low, high, npv_high
        );
        return SolveResult::failed(FailureReason::NoSignChange);
    }

    for iteration in 0..options.max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid.is_nan() {
            warn!("NPV undefined at rate {} after {} iterations", mid, iteration);
            return SolveResult::failed(FailureReason::NoConvergence);
        }

        if npv_mid.abs() < options.tolerance || (high - low) / 2.0 < options.tolerance {
            debug!("IRR converged in {} iterations: rate = {}", iteration + 1, mid);
            return SolveResult::Solved { rate: mid * 100.0 };
        }

        if npv_mid.signum() == npv_low.signum() {
            low = mid;
            npv_low = npv_mid;
        } else {
            high = mid;
        }
    }

    debug!(
        "IRR did not converge in {} iterations, bracket [{}, {}]",
        options.max_iterations, low, high
    );
    SolveResult::failed(FailureReason::NoConvergence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{annualize_rate, solve};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn default_solve(cashflows: &[f64]) -> SolveResult {
        solve(cashflows, &SolverOptions::default())
    }

    #[test]
    fn test_level_returns() {
        let rate = default_solve(&[-100.0, 30.0, 30.0, 30.0, 30.0]).rate().unwrap();
        assert!((rate - 7.7).abs() < 0.5, "Expected ~7.7%, got {}", rate);
        assert_relative_eq!(rate, 7.713847, epsilon = 1e-4);
    }

    #[test]
    fn test_break_even_is_zero_rate() {
        let rate = default_solve(&[-100.0, 100.0]).rate().unwrap();
        assert!(rate.abs() < 1e-4, "Expected ~0%, got {}", rate);
    }

    #[test]
    fn test_loss_making_series_has_negative_rate() {
        // 10/(1+r) + 10/(1+r)^2 = 100 has its root near r = -63%, inside the default bounds
        let rate = default_solve(&[-100.0, 10.0, 10.0]).rate().unwrap();
        assert_relative_eq!(rate, -62.984378, epsilon = 1e-4);
    }

    #[test]
    fn test_loss_making_series_without_negative_domain() {
        let options = SolverOptions::default().with_bounds(0.0, 10.0);
        let result = solve(&[-100.0, 10.0, 10.0], &options);
        assert_eq!(result.failure(), Some(FailureReason::NoSignChange));
    }

    #[test]
    fn test_all_zero_is_invalid() {
        let result = default_solve(&[0.0, 0.0, 0.0]);
        assert_eq!(result.failure(), Some(FailureReason::InvalidInput));
    }

    #[test]
    fn test_too_short_is_invalid() {
        assert_eq!(default_solve(&[]).failure(), Some(FailureReason::InvalidInput));
        assert_eq!(default_solve(&[-100.0]).failure(), Some(FailureReason::InvalidInput));
    }

    #[test]
    fn test_non_finite_is_invalid() {
        let nan = default_solve(&[-100.0, f64::NAN, 50.0]);
        assert_eq!(nan.failure(), Some(FailureReason::InvalidInput));

        let inf = default_solve(&[-100.0, f64::INFINITY]);
        assert_eq!(inf.failure(), Some(FailureReason::InvalidInput));
    }

    #[test]
    fn test_lower_bound_at_minus_one_is_invalid() {
        let options = SolverOptions::default().with_bounds(-1.0, 10.0);
        let result = solve(&[-100.0, 110.0], &options);
        assert_eq!(result.failure(), Some(FailureReason::InvalidInput));
    }

    #[test]
    fn test_single_sign_has_no_root() {
        let positive = default_solve(&[10.0, 20.0, 30.0]);
        assert_eq!(positive.failure(), Some(FailureReason::NoSignChange));

        let negative = default_solve(&[-10.0, -20.0, 0.0, -5.0]);
        assert_eq!(negative.failure(), Some(FailureReason::NoSignChange));
    }

    #[test]
    fn test_root_on_lower_bound() {
        let options = SolverOptions::default().with_bounds(0.0, 1.0);
        let result = solve(&[-100.0, 100.0], &options);
        assert_eq!(result, SolveResult::Solved { rate: 0.0 });
    }

    #[test]
    fn test_exact_root_at_first_midpoint() {
        // Midpoint of [-0.5, 0.5] is 0, where NPV is exactly zero
        let options = SolverOptions::default()
            .with_bounds(-0.5, 0.5)
            .with_max_iterations(1);
        let result = solve(&[-100.0, 100.0], &options);
        assert_eq!(result, SolveResult::Solved { rate: 0.0 });
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let options = SolverOptions::default()
            .with_tolerance(1e-12)
            .with_max_iterations(5);
        let result = solve(&[-100.0, 30.0, 30.0, 30.0, 30.0], &options);
        assert_eq!(result.failure(), Some(FailureReason::NoConvergence));
    }

    #[test]
    fn test_loan_cashflows() {
        // Loan of $10000 repaid by 12 payments of $900
        let mut cashflows = vec![10000.0];
        cashflows.extend(vec![-900.0; 12]);

        let rate = default_solve(&cashflows).rate().unwrap();
        assert_relative_eq!(rate, 1.204352, epsilon = 1e-4);
        assert!(npv(&cashflows, rate / 100.0).abs() < 1e-2);
    }

    #[test]
    fn test_monthly_rate_annualizes() {
        // $1000 invested, $1100 back after 12 months
        let mut cashflows = vec![-1000.0];
        cashflows.extend(vec![0.0; 11]);
        cashflows.push(1100.0);

        let monthly = default_solve(&cashflows).rate().unwrap();
        assert_relative_eq!(annualize_rate(monthly, 12), 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_infinite_npv_at_bound_still_brackets() {
        // Discounting at -99% overflows after ~155 periods
        let mut cashflows = vec![0.0; 172];
        cashflows[0] = -100.0;
        cashflows[171] = 1.0;

        let rate = default_solve(&cashflows).rate().unwrap();
        assert_relative_eq!(rate, -2.657142, epsilon = 1e-4);
    }

    #[test]
    fn test_undefined_npv_at_bound() {
        let mut cashflows = vec![0.0; 200];
        cashflows[0] = -1.0;
        cashflows[180] = 1.0;
        cashflows[190] = -1.0;

        let result = default_solve(&cashflows);
        assert_eq!(result.failure(), Some(FailureReason::NoSignChange));
    }

    #[test]
    fn test_solver_is_deterministic() {
        let solver = BisectionSolver::default();
        let series = CashflowSeries::new(vec![-250.0, 40.0, 90.0, 60.0, 120.0]);
        assert_eq!(solver.solve(&series), solver.solve(&series));
    }

    proptest! {
        #[test]
        fn prop_single_sign_change_solves(
            outlay in 100.0f64..1000.0,
            returns in proptest::collection::vec(1.0f64..1000.0, 2..8),
        ) {
            let mut cashflows = vec![-outlay];
            cashflows.extend(returns);
            let options = SolverOptions::default();

            let result = solve(&cashflows, &options);
            let rate = result.rate();
            prop_assert!(rate.is_some(), "expected a rate, got {:?}", result);

            // A root lies within one tolerance of the reported rate
            let r = rate.unwrap() / 100.0;
            let margin = 2.0 * options.tolerance;
            let at_rate = npv(&cashflows, r);
            let below = npv(&cashflows, r - margin);
            let above = npv(&cashflows, r + margin);
            prop_assert!(
                at_rate.abs() < options.tolerance || below.signum() != above.signum(),
                "no root near {}: NPV {} .. {}", r, below, above
            );
        }

        #[test]
        fn prop_same_sign_never_solves(
            flows in proptest::collection::vec(0.5f64..1000.0, 2..10),
            negate in any::<bool>(),
        ) {
            let cashflows: Vec<f64> = flows.iter().map(|&cf| if negate { -cf } else { cf }).collect();
            prop_assert_eq!(
                solve(&cashflows, &SolverOptions::default()).failure(),
                Some(FailureReason::NoSignChange)
            );
        }

        #[test]
        fn prop_solve_is_idempotent(
            flows in proptest::collection::vec(-1000.0f64..1000.0, 0..10),
        ) {
            let options = SolverOptions::default();
            prop_assert_eq!(solve(&flows, &options), solve(&flows, &options));
        }
    }
}
