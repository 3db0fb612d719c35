//! Per-row performance metrics.
//!
//! Pure and element-wise: each record's metrics depend only on that record,
//! so row order never matters here.
//!
//! Division by zero is deliberately unguarded: a zero-impression or
//! zero-click row yields a non-finite value for that row only, which
//! downstream formatting renders as `inf`/`NaN` rather than failing the run.

use crate::domain::{Dataset, Metrics};

/// Compute `CTR`, `CPC` and `ConversionRate` for one row.
pub fn row_metrics(impressions: f64, clicks: f64, cost: f64, conversions: f64) -> Metrics {
    Metrics {
        ctr: clicks / impressions * 100.0,
        cpc: cost / clicks,
        conversion_rate: conversions / clicks * 100.0,
    }
}

/// Append derived metrics to every record, in input order.
pub fn compute_metrics(dataset: &mut Dataset) {
    for record in &mut dataset.records {
        record.metrics = Some(row_metrics(
            record.impressions,
            record.clicks,
            record.cost,
            record.conversions,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_row_matches_hand_computed_values() {
        let m = row_metrics(1000.0, 50.0, 25.0, 5.0);
        assert!((m.ctr - 5.0).abs() < 1e-12);
        assert!((m.cpc - 0.5).abs() < 1e-12);
        assert!((m.conversion_rate - 10.0).abs() < 1e-12);
    }

    #[test]
    fn zero_clicks_propagates_non_finite_values() {
        let m = row_metrics(1000.0, 0.0, 25.0, 0.0);
        assert!((m.ctr - 0.0).abs() < 1e-12);
        assert!(m.cpc.is_infinite());
        assert!(m.conversion_rate.is_nan());
    }

    #[test]
    fn zero_impressions_only_affects_ctr() {
        let m = row_metrics(0.0, 10.0, 5.0, 1.0);
        assert!(m.ctr.is_infinite());
        assert!((m.cpc - 0.5).abs() < 1e-12);
        assert!((m.conversion_rate - 10.0).abs() < 1e-12);
    }
}
