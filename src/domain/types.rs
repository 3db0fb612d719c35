//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during aggregation and report composition
//! - exported to the spreadsheet
//! - reused by future front-ends (scheduled runs, notebooks, etc.)

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed name of the exported spreadsheet inside the output directory.
pub const XLSX_FILE: &str = "metrics.xlsx";

/// Fixed name of the composed report inside the output directory.
pub const PDF_FILE: &str = "Marketing_Report.pdf";

/// One row of the marketing table, as loaded from CSV.
///
/// `clicks <= impressions` is assumed, not enforced; the metrics pass divides
/// by `impressions`/`clicks` without guarding, so zero values produce
/// non-finite metrics for that row only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub date: NaiveDate,
    pub campaign: String,
    pub impressions: f64,
    pub clicks: f64,
    pub cost: f64,
    pub conversions: f64,
    /// Derived metrics; `None` until the metrics pass has run.
    pub metrics: Option<Metrics>,
}

/// Derived per-row performance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Click-through rate: clicks as a percentage of impressions.
    pub ctr: f64,
    /// Cost per click.
    pub cpc: f64,
    /// Conversions as a percentage of clicks.
    pub conversion_rate: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: parsed records in file order plus row-level diagnostics.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<CampaignRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl Dataset {
    pub fn rows_used(&self) -> usize {
        self.records.len()
    }
}

/// Resolved configuration for one report run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input CSV path.
    pub input: PathBuf,
    /// Output directory for every produced artifact (created if absent).
    pub out_dir: PathBuf,
    /// Report title (title page, first line).
    pub title: String,
    /// Author line on the title page.
    pub author: String,
    /// Whether to open the finished report in the default viewer.
    pub open_viewer: bool,
    /// How many rows of the loaded table to echo before processing.
    pub head: usize,
}

impl RunConfig {
    pub fn xlsx_path(&self) -> PathBuf {
        self.out_dir.join(XLSX_FILE)
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.out_dir.join(PDF_FILE)
    }
}

/// A rendered chart image on disk, plus its presentation in the report.
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub path: PathBuf,
    /// Caption printed under the image ("Figure N: ...").
    pub caption: String,
    /// Top offset (mm) of the image on its report page. The line chart needs
    /// extra room for the x tick labels rendered inside the image.
    pub y_start_mm: f32,
}
