//! Net present value at a periodic rate

/// NPV of `cashflows` at periodic `rate`, period 0 undiscounted
///
/// The discount factor is built by repeated multiplication so every
/// evaluation accumulates rounding the same way. Zero flows are skipped so an
/// overflowed discount factor on a long series cannot turn them into NaN.
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    let factor = 1.0 / (1.0 + rate);
    let mut discount = 1.0;
    let mut total = 0.0;

    for &cf in cashflows {
        if cf != 0.0 {
            total += cf * discount;
        }
        discount *= factor;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_is_plain_sum() {
        assert_relative_eq!(npv(&[-100.0, 30.0, 80.0], 0.0), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_discounting() {
        // -100 + 110/1.1
        assert_relative_eq!(npv(&[-100.0, 110.0], 0.10), 0.0, epsilon = 1e-10);
        // 121/1.21
        assert_relative_eq!(npv(&[0.0, 0.0, 121.0], 0.10), 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_flows_after_overflow() {
        // 100^200 overflows; the trailing zeros must not poison the sum
        let mut cashflows = vec![0.0; 200];
        cashflows[0] = -1.0;
        cashflows[1] = 2.0;
        assert_relative_eq!(npv(&cashflows, -0.99), 199.0, epsilon = 1e-9);
    }

    #[test]
    fn test_matches_powi_form() {
        let cashflows = [-1000.0, 250.0, 300.0, 350.0, 400.0];
        let rate: f64 = 0.0725;
        let expected: f64 = cashflows
            .iter()
            .enumerate()
            .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
            .sum();
        assert_relative_eq!(npv(&cashflows, rate), expected, epsilon = 1e-9);
    }
}
