//! CSV loading and per-column type inference.
//!
//! Each column's kind is decided once, here, and carried in the resulting
//! [`Dataset`]. Inference runs in a fixed order:
//!
//! 1. every non-null cell parses as a finite `f64` → [`ColumnKind::Numeric`]
//! 2. every non-null cell parses with one configured datetime format → [`ColumnKind::Datetime`]
//! 3. otherwise → [`ColumnKind::Categorical`]
//!
//! [`ColumnKind::Numeric`]: super::types::ColumnKind::Numeric
//! [`ColumnKind::Datetime`]: super::types::ColumnKind::Datetime
//! [`ColumnKind::Categorical`]: super::types::ColumnKind::Categorical

use super::naming;
use super::types::{Column, ColumnData, Dataset};
use crate::config::{AnalysisConfig, RFC3339_FORMAT};
use crate::error::{AutovizError, Result, ResultExt as _};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses CSV bytes with the default configuration.
///
/// # Errors
///
/// [`AutovizError::Parse`] for malformed input, [`AutovizError::EmptyInput`]
/// when no data rows remain.
pub fn load(bytes: &[u8]) -> Result<Dataset> {
    load_with_config(bytes, &AnalysisConfig::default())
}

/// # Errors
///
/// See [`load`]; duplicate headers also fail under
/// [`DuplicateHeaders::Reject`](crate::config::DuplicateHeaders::Reject).
pub fn load_with_config(bytes: &[u8], config: &AnalysisConfig) -> Result<Dataset> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let raw_headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
    if raw_headers.is_empty() {
        return Err(AutovizError::EmptyInput);
    }
    let names = naming::resolve_column_names(&raw_headers, config.duplicate_headers)?;

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record?;
        let row: Vec<Option<String>> = record
            .iter()
            .map(|v| (!config.is_null_token(v)).then(|| v.to_owned()))
            .collect();

        if config.drop_empty_rows && row.iter().all(Option::is_none) {
            dropped += 1;
            continue;
        }

        for (column, value) in cells.iter_mut().zip(row) {
            column.push(value);
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} fully empty rows");
    }

    let row_count = cells.first().map_or(0, Vec::len);
    if row_count == 0 {
        return Err(AutovizError::EmptyInput);
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| infer_column(name, values, &config.datetime_formats))
        .collect();

    let dataset = Dataset::new(columns)?;
    log::info!(
        "Data loaded: {} rows, {} columns",
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

/// Reads a CSV file and parses it.
///
/// The file handle lives only for the duration of the read, so it is released
/// before parsing starts regardless of the outcome.
///
/// # Errors
///
/// [`AutovizError::Io`] when the file cannot be read, otherwise as [`load`].
pub fn load_path(path: &Path, config: &AnalysisConfig) -> Result<Dataset> {
    log::info!("Loading file: {}", path.display());
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    load_with_config(&bytes, config)
}

pub fn infer_column(name: String, values: Vec<Option<String>>, formats: &[String]) -> Column {
    if let Some(numbers) = try_numeric(&values) {
        return Column::new(name, ColumnData::Numeric(numbers));
    }

    for fmt in formats {
        if let Some(dates) = try_datetime(&values, fmt) {
            log::debug!("Column '{name}' parsed as datetime using '{fmt}'");
            return Column::new(name, ColumnData::Datetime(dates));
        }
    }

    Column::new(name, ColumnData::Categorical(values))
}

fn try_numeric(values: &[Option<String>]) -> Option<Vec<Option<f64>>> {
    values
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(s) => s.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some),
        })
        .collect()
}

fn try_datetime(values: &[Option<String>], fmt: &str) -> Option<Vec<Option<NaiveDateTime>>> {
    if values.iter().all(Option::is_none) {
        return None;
    }
    values
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(s) => parse_datetime(s, fmt).map(Some),
        })
        .collect()
}

/// Parses one cell with one format. Date-only formats yield midnight.
pub fn parse_datetime(value: &str, fmt: &str) -> Option<NaiveDateTime> {
    if fmt == RFC3339_FORMAT {
        return DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, fmt).ok().or_else(|| {
        NaiveDate::parse_from_str(value, fmt)
            .ok()
            .map(|d| d.and_time(NaiveTime::MIN))
    })
}
