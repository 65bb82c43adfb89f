//! Load spending/income period tables from CSV
//!
//! Expected columns: `period,spending,income`, periods numbered from 0.

use super::PeriodTable;
use crate::error::{IrrError, Result};
use csv::{Reader, Trim};
use std::io::Read;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    period: usize,
    spending: f64,
    income: f64,
}

fn read_table<R: Read>(mut reader: Reader<R>) -> Result<PeriodTable> {
    let mut table = PeriodTable::default();

    for (expected, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        if row.period != expected {
            return Err(IrrError::PeriodOutOfOrder {
                expected,
                found: row.period,
            });
        }
        table.push(row.spending, row.income);
    }

    log::debug!("Loaded {} periods", table.periods());
    Ok(table)
}

/// Load a period table from a CSV file
pub fn load_cashflows<P: AsRef<Path>>(path: P) -> Result<PeriodTable> {
    let reader = csv::ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    read_table(reader)
}

/// Load a period table from any reader (e.g., string buffer, request body)
pub fn load_cashflows_from_reader<R: Read>(reader: R) -> Result<PeriodTable> {
    read_table(csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader))
}
