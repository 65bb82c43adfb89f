//! Cashflow input: net series, spending/income tables and CSV loading

mod loader;
mod series;

pub use loader::{load_cashflows, load_cashflows_from_reader};
pub use series::{CashflowSeries, PeriodTable, MIN_PERIODS};
