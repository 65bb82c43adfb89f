//! Net cashflow series and the spending/income table it is derived from

use crate::error::{IrrError, Result};
use serde::{Deserialize, Serialize};

/// Fewest periods a rate can be solved over
pub const MIN_PERIODS: usize = 2;

/// Net cashflow per period (income - spending), period 0 first
///
/// Holds whatever it is given; `solve` reports short, non-finite or all-zero
/// series as invalid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashflowSeries(Vec<f64>);

impl CashflowSeries {
    pub fn new(cashflows: Vec<f64>) -> Self {
        Self(cashflows)
    }

    /// Net each period's income against its spending
    pub fn from_spending_income(spending: &[f64], income: &[f64]) -> Result<Self> {
        if spending.len() != income.len() {
            return Err(IrrError::LengthMismatch {
                spending: spending.len(),
                income: income.len(),
            });
        }

        Ok(Self(
            spending
                .iter()
                .zip(income)
                .map(|(&out, &inc)| inc - out)
                .collect(),
        ))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for CashflowSeries {
    fn from(cashflows: Vec<f64>) -> Self {
        Self(cashflows)
    }
}

/// Spending and income columns, one entry per period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTable {
    pub spending: Vec<f64>,
    pub income: Vec<f64>,
}

impl PeriodTable {
    /// Table of `periods` zeroed rows (at least two)
    pub fn with_periods(periods: usize) -> Self {
        let mut table = Self::default();
        table.resize(periods);
        table
    }

    pub fn periods(&self) -> usize {
        self.spending.len().min(self.income.len())
    }

    pub fn push(&mut self, spending: f64, income: f64) {
        self.spending.push(spending);
        self.income.push(income);
    }

    /// Grow with zero rows or truncate to `periods`, never below two
    pub fn resize(&mut self, periods: usize) {
        let periods = periods.max(MIN_PERIODS);
        self.spending.resize(periods, 0.0);
        self.income.resize(periods, 0.0);
    }

    pub fn to_series(&self) -> Result<CashflowSeries> {
        CashflowSeries::from_spending_income(&self.spending, &self.income)
    }
}
