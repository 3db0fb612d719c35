//! Spreadsheet export of the augmented metrics table.
//!
//! The export is meant to be easy to consume in Excel or downstream scripts:
//! one row per record, full column set (raw columns plus derived metrics).

use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, XlsxError};

use crate::domain::Dataset;
use crate::error::AppError;

/// Column layout of the exported sheet.
pub const XLSX_COLUMNS: [&str; 9] = [
    "date",
    "campaign",
    "impressions",
    "clicks",
    "cost",
    "conversions",
    "CTR",
    "CPC",
    "ConversionRate",
];

/// Write the augmented table to an XLSX workbook at `path`.
///
/// A rerun silently overwrites prior output. The sheet content depends only
/// on the dataset, so unchanged input reproduces the same table.
pub fn write_metrics_xlsx(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    build_workbook(dataset)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|e| {
            AppError::export(format!(
                "Failed to write spreadsheet '{}': {e}",
                path.display()
            ))
        })
}

fn build_workbook(dataset: &Dataset) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    // A default workbook stamps the current time into its metadata; pin the
    // creation date so unchanged input reproduces identical bytes.
    let created = ExcelDateTime::from_ymd(2024, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    for (col, name) in XLSX_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        worksheet.set_column_width(col as u16, 14)?;
    }

    for (i, record) in dataset.records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, record.date.to_string())?;
        worksheet.write_string(row, 1, &record.campaign)?;
        worksheet.write_number(row, 2, record.impressions)?;
        worksheet.write_number(row, 3, record.clicks)?;
        worksheet.write_number(row, 4, record.cost)?;
        worksheet.write_number(row, 5, record.conversions)?;

        if let Some(m) = record.metrics {
            write_metric(worksheet, row, 6, m.ctr)?;
            write_metric(worksheet, row, 7, m.cpc)?;
            write_metric(worksheet, row, 8, m.conversion_rate)?;
        }
    }

    Ok(workbook)
}

/// XLSX cannot store non-finite numbers, so `inf`/`NaN` metrics (zero
/// impressions or clicks) are written as text.
fn write_metric(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: f64,
) -> Result<(), XlsxError> {
    if value.is_finite() {
        worksheet.write_number(row, col, value)?;
    } else {
        worksheet.write_string(row, col, format!("{value}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CampaignRecord, Metrics};
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        Dataset {
            records: vec![CampaignRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                campaign: "Alpha".to_string(),
                impressions: 1000.0,
                clicks: 0.0,
                cost: 25.0,
                conversions: 0.0,
                metrics: Some(Metrics {
                    ctr: 0.0,
                    cpc: f64::INFINITY,
                    conversion_rate: f64::NAN,
                }),
            }],
            row_errors: Vec::new(),
            rows_read: 1,
        }
    }

    #[test]
    fn writes_workbook_with_non_finite_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.xlsx");
        write_metrics_xlsx(&path, &dataset()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // XLSX is a ZIP container.
        assert!(bytes.starts_with(&[b'P', b'K']));
    }

    #[test]
    fn rewriting_unchanged_data_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.xlsx");
        let second = dir.path().join("second.xlsx");

        write_metrics_xlsx(&first, &dataset()).unwrap();
        // Creation timestamps have second granularity; cross the boundary.
        std::thread::sleep(std::time::Duration::from_millis(1500));
        write_metrics_xlsx(&second, &dataset()).unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }

    #[test]
    fn unwritable_path_fails_with_exit_code_4() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("metrics.xlsx");
        let err = write_metrics_xlsx(&path, &dataset()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
