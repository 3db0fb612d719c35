//! CSV ingest and validation.
//!
//! This module turns the raw marketing CSV into typed `CampaignRecord`s.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (records keep file order)
//! - **Separation of concerns**: no metric computation here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{CampaignRecord, Dataset, RowError};
use crate::error::AppError;

/// Columns the input table must provide (case-insensitive).
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "date",
    "campaign",
    "impressions",
    "clicks",
    "cost",
    "conversions",
];

/// Load the marketing CSV into a `Dataset`.
///
/// Fails (exit code 2) if the file is missing/unreadable or a required column
/// is absent; fails (exit code 3) if no usable rows remain after row-level
/// validation. Malformed rows are skipped and reported via `row_errors`.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::data_load(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::data_load(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => records.push(row),
            Err(e) => row_errors.push(RowError { line, message: e }),
        }
    }

    if records.is_empty() {
        return Err(AppError::empty_dataset(
            "No valid rows remain after row-level validation.",
        ));
    }

    Ok(Dataset {
        records,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿date"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::data_load(format!(
                "Missing required column: `{name}`"
            )));
        }
    }
    Ok(())
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<CampaignRecord, String> {
    let date = parse_date(get_required(record, header_map, "date")?)?;
    let campaign = get_required(record, header_map, "campaign")?.to_string();

    let impressions = parse_count(get_required(record, header_map, "impressions")?, "impressions")?;
    let clicks = parse_count(get_required(record, header_map, "clicks")?, "clicks")?;
    let cost = parse_count(get_required(record, header_map, "cost")?, "cost")?;
    let conversions = parse_count(get_required(record, header_map, "conversions")?, "conversions")?;

    Ok(CampaignRecord {
        date,
        campaign,
        impressions,
        clicks,
        cost,
        conversions,
        metrics: None,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // We recommend ISO dates (`YYYY-MM-DD`), but spreadsheet exports often use
    // `DD/MM/YYYY` or `DD-MM-YYYY`. We accept a small set of common formats to
    // reduce friction while keeping parsing deterministic.
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYY/MM/DD."
    ))
}

fn parse_count(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` value '{s}'."))?;
    if !v.is_finite() || v < 0.0 {
        return Err(format!("Invalid `{name}` value '{s}' (must be finite and >= 0)."));
    }
    Ok(v)
}
