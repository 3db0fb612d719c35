//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the CSV and computes per-row metrics
//! - aggregates and prints the status tables
//! - renders the three summary charts and the spreadsheet
//! - composes the PDF report
//! - best-effort opens the report in the default viewer

use clap::Parser;

use crate::cli::Cli;
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `mkr` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    run_with_config(&cli.to_config())
}

/// Execute one full report run with a resolved configuration.
///
/// The steps are strictly sequential: report composition consumes the chart
/// files written by the render step, so it must not start earlier.
pub fn run_with_config(config: &RunConfig) -> Result<(), AppError> {
    let out = pipeline::run_compute(config)?;

    println!("First lines of data:");
    print!("{}", crate::report::format_dataset_head(&out.dataset, config.head));
    if !out.dataset.row_errors.is_empty() {
        print!("{}", crate::report::format_row_errors(&out.dataset));
    }

    println!();
    println!("Campaign metrics:");
    print!("{}", crate::report::format_metrics_table(&out.dataset));
    println!();

    std::fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::export(format!(
            "Failed to create output directory '{}': {e}",
            config.out_dir.display()
        ))
    })?;

    let xlsx_path = config.xlsx_path();
    crate::data::export::write_metrics_xlsx(&xlsx_path, &out.dataset)?;
    println!("Excel file saved: {}", xlsx_path.display());

    let expenses = crate::chart::render_expenses_bar(&config.out_dir, &out.cost_by_campaign)?;
    println!("Chart saved: {}", expenses.path.display());

    let clicks = crate::chart::render_clicks_line(&config.out_dir, &out.clicks_by_date)?;
    println!("Chart saved: {}", clicks.path.display());

    let traffic = crate::chart::render_traffic_pie(&config.out_dir, &out.clicks_by_campaign)?;
    println!("Chart saved: {}", traffic.path.display());

    let pdf_path = config.pdf_path();
    let bytes = crate::pdf::compose_report(config, &out.dataset, &[expenses, clicks, traffic])?;
    std::fs::write(&pdf_path, bytes).map_err(|e| {
        AppError::document(format!(
            "Failed to write report '{}': {e}",
            pdf_path.display()
        ))
    })?;
    println!("PDF report saved: {}", pdf_path.display());

    if config.open_viewer {
        // Advisory only; a missing helper must not fail the run.
        if let Err(e) = crate::viewer::open_document(&pdf_path) {
            println!("Failed to open PDF automatically: {e}");
        }
    }

    Ok(())
}
