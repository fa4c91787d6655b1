use std::io::Read;

use serde::Deserialize;
use thiserror::Error;

use super::model::{WageDataset, WageRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("CSV data row {row}: {source}")]
    Row {
        /// 1-based, header excluded.
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("dataset has a header but no rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

pub const COL_CAREER: &str = "Descripción_Campo_amplio";
pub const COL_FIELD_CODE: &str = "Campo_amplio";
pub const COL_STATE: &str = "DESCRIP";
pub const COL_YEAR: &str = "Año";
pub const COL_SALARY: &str = "Sueldo promedio por profesionista";
pub const COL_WORKERS: &str = "fac_tri";

/// Columns that must be present in the header row. Others are ignored.
const REQUIRED_COLUMNS: [&str; 5] = [COL_CAREER, COL_STATE, COL_YEAR, COL_SALARY, COL_WORKERS];

/// One CSV row as published; converted into a [`WageRecord`].
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Campo_amplio", default)]
    field_code: Option<String>,
    #[serde(rename = "Descripción_Campo_amplio")]
    career: String,
    #[serde(rename = "DESCRIP")]
    state: String,
    #[serde(rename = "Año")]
    year: i32,
    #[serde(rename = "Sueldo promedio por profesionista")]
    avg_salary: Option<f64>,
    #[serde(rename = "fac_tri")]
    workers: Option<f64>,
}

impl RawRow {
    /// `None` when the salary or the expansion factor cell is blank.
    fn into_record(self) -> Option<WageRecord> {
        Some(WageRecord {
            field_code: self.field_code.filter(|c| !c.is_empty()),
            career: self.career,
            state: self.state,
            year: self.year,
            avg_salary: self.avg_salary?,
            workers: self.workers?,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Fetch the dataset with a single blocking GET and parse it.
///
/// Any transport failure, non-2xx status or parse failure is returned as an
/// error; callers are expected to treat it as fatal.
pub fn load_url(url: &str) -> Result<WageDataset, LoadError> {
    log::info!("Fetching dataset from {url}");
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let body = response.bytes()?;
    log::debug!("Received {} bytes", body.len());
    parse_csv(&body[..])
}

/// Parse the survey CSV from any reader.
///
/// CSV layout: header row with at least the five required columns, one row
/// per (career field, state, year). Rows with a blank salary or expansion
/// factor are skipped.
pub fn parse_csv<R: Read>(input: R) -> Result<WageDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }
    if !headers.iter().any(|h| h == COL_FIELD_CODE) {
        log::debug!("CSV has no '{COL_FIELD_CODE}' column; field codes left empty");
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (i, result) in reader.deserialize::<RawRow>().enumerate() {
        let row = i + 1;
        let raw = result.map_err(|source| LoadError::Row { row, source })?;
        match raw.into_record() {
            Some(record) => records.push(record),
            None => {
                log::warn!("CSV data row {row}: blank salary or '{COL_WORKERS}', row skipped");
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        log::warn!("Skipped {skipped} row(s) with blank numeric cells");
    }

    let dataset = WageDataset::from_records(records);
    if dataset.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(dataset)
}
