//! Shared compute stages of a report run.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> per-row metrics -> the three aggregations
//!
//! File writes live in `app`, so these stages stay reusable and testable
//! without touching the filesystem beyond reading the input CSV.

use crate::aggregate::{self, AggregatedSeries};
use crate::domain::{Dataset, RunConfig};
use crate::error::AppError;

/// All computed (pre-export) outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub cost_by_campaign: AggregatedSeries,
    pub clicks_by_date: AggregatedSeries,
    pub clicks_by_campaign: AggregatedSeries,
}

/// Load the dataset, append metrics, and build the aggregated series.
pub fn run_compute(config: &RunConfig) -> Result<RunOutput, AppError> {
    let mut dataset = crate::data::load::load_dataset(&config.input)?;
    crate::metrics::compute_metrics(&mut dataset);

    let cost_by_campaign = aggregate::cost_by_campaign(&dataset);
    let clicks_by_date = aggregate::clicks_by_date(&dataset);
    let clicks_by_campaign = aggregate::clicks_by_campaign(&dataset);

    Ok(RunOutput {
        dataset,
        cost_by_campaign,
        clicks_by_date,
        clicks_by_campaign,
    })
}
