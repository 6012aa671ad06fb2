//! # Data Loading and Cleaning Module
//!
//! This module is the exclusive entry point for user-provided data. It
//! reads the historical team CSV, validates it against a strict,
//! predefined schema, and produces the clean in-memory rows required by
//! the modeling stages.
//!
//! - Strict Schema: Column names are not configurable. The file must
//!   carry `team`, `country`, `year`, `athletes`, `age`, `prev_medals`
//!   and `medals`; extra columns are ignored.
//! - User-Centric Errors: Failures are assumed to be user-input errors.
//!   The `DataError` enum is designed to provide clear, actionable
//!   feedback naming the offending file or column.
//! - Missing values are empty fields. Rows missing any numeric model
//!   column are dropped during loading, never silently patched.

use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Column names the input file must provide, in no particular order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "team",
    "country",
    "year",
    "athletes",
    "age",
    "prev_medals",
    "medals",
];

/// One country-year team row, complete after cleaning.
///
/// Numeric model fields are `f64` so they can feed the design matrix
/// directly; `medals` and `prev_medals` are whole counts in the source
/// data but nothing downstream relies on that.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecord {
    pub team: String,
    pub country: String,
    pub year: i32,
    pub athletes: f64,
    pub age: f64,
    pub prev_medals: f64,
    pub medals: f64,
}

/// Raw CSV row as deserialized, before the missing-value drop.
/// The four cleanable columns are optional; `team`, `country` and
/// `year` are assumed always present in the source data.
#[derive(Debug, Deserialize)]
struct RawTeamRow {
    team: String,
    country: String,
    year: i32,
    athletes: Option<f64>,
    age: Option<f64>,
    prev_medals: Option<f64>,
    medals: Option<f64>,
}

/// A comprehensive error type for all data loading failures.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Input file '{0}' was not found. Please check the path.")]
    NotFound(String),
    #[error("IO error reading input file: {0}")]
    Io(#[from] io::Error),
    #[error(
        "The required column '{0}' was not found in the input file header. Please check spelling and case."
    )]
    MissingColumn(String),
    #[error("Failed to parse input file: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the team CSV at `path` into raw rows, file order preserved.
///
/// The header is validated up front so a misnamed column surfaces as
/// [`DataError::MissingColumn`] rather than a per-row deserialize
/// failure. Unparseable numeric text in a data row is an error; an
/// empty field is a missing value and survives until [`drop_incomplete`].
pub fn load_teams(path: &Path) -> Result<Vec<TeamRecord>, DataError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataError::NotFound(path.display().to_string()),
        _ => DataError::Io(e),
    })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataError::MissingColumn(required.to_string()));
        }
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawTeamRow>() {
        let raw = result?;
        rows.push(raw);
    }
    log::info!("Loaded {} team rows from {}", rows.len(), path.display());
    Ok(drop_incomplete(rows))
}

/// Removes every row with a missing value in any numeric model column.
/// An empty result is valid output, not a failure.
fn drop_incomplete(rows: Vec<RawTeamRow>) -> Vec<TeamRecord> {
    let total = rows.len();
    let complete: Vec<TeamRecord> = rows
        .into_iter()
        .filter_map(|raw| {
            match (raw.athletes, raw.age, raw.prev_medals, raw.medals) {
                (Some(athletes), Some(age), Some(prev_medals), Some(medals)) => {
                    Some(TeamRecord {
                        team: raw.team,
                        country: raw.country,
                        year: raw.year,
                        athletes,
                        age,
                        prev_medals,
                        medals,
                    })
                }
                _ => None,
            }
        })
        .collect();
    let dropped = total - complete.len();
    if dropped > 0 {
        log::info!("Dropped {dropped} rows with missing values ({} remain)", complete.len());
    }
    complete
}
