//! Terminal status formatting.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::Dataset;

/// Format the first `n` rows of the loaded table, pandas-head style.
pub fn format_dataset_head(dataset: &Dataset, n: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:<18} {:>12} {:>8} {:>10} {:>12}\n",
        "date", "campaign", "impressions", "clicks", "cost", "conversions"
    ));
    for record in dataset.records.iter().take(n) {
        out.push_str(&format!(
            "{:<12} {:<18} {:>12} {:>8} {:>10.2} {:>12}\n",
            record.date, record.campaign, record.impressions, record.clicks, record.cost,
            record.conversions
        ));
    }

    out
}

/// Format the per-row metrics table (date, campaign, CTR, CPC, ConversionRate).
pub fn format_metrics_table(dataset: &Dataset) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:<18} {:>8} {:>8} {:>16}\n",
        "date", "campaign", "CTR", "CPC", "ConversionRate"
    ));
    for record in &dataset.records {
        let Some(m) = record.metrics else { continue };
        out.push_str(&format!(
            "{:<12} {:<18} {:>8.2} {:>8.2} {:>16.2}\n",
            record.date, record.campaign, m.ctr, m.cpc, m.conversion_rate
        ));
    }

    out
}

/// Format the row-level ingest diagnostics (skipped rows).
pub fn format_row_errors(dataset: &Dataset) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Skipped {} of {} rows:\n",
        dataset.row_errors.len(),
        dataset.rows_read
    ));
    for err in &dataset.row_errors {
        out.push_str(&format!("  line {}: {}\n", err.line, err.message));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CampaignRecord, Metrics, RowError};
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        Dataset {
            records: vec![
                CampaignRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    campaign: "Alpha".to_string(),
                    impressions: 1000.0,
                    clicks: 50.0,
                    cost: 25.0,
                    conversions: 5.0,
                    metrics: Some(Metrics {
                        ctr: 5.0,
                        cpc: 0.5,
                        conversion_rate: 10.0,
                    }),
                },
                CampaignRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    campaign: "Beta".to_string(),
                    impressions: 2000.0,
                    clicks: 80.0,
                    cost: 40.0,
                    conversions: 8.0,
                    metrics: Some(Metrics {
                        ctr: 4.0,
                        cpc: 0.5,
                        conversion_rate: 10.0,
                    }),
                },
            ],
            row_errors: vec![RowError {
                line: 4,
                message: "Invalid `clicks` value 'x'.".to_string(),
            }],
            rows_read: 3,
        }
    }

    #[test]
    fn head_limits_row_count() {
        let out = format_dataset_head(&dataset(), 1);
        assert!(out.contains("Alpha"));
        assert!(!out.contains("Beta"));
    }

    #[test]
    fn metrics_table_renders_two_decimals() {
        let out = format_metrics_table(&dataset());
        assert!(out.contains("5.00"));
        assert!(out.contains("0.50"));
        assert!(out.contains("10.00"));
    }

    #[test]
    fn row_errors_name_the_line() {
        let out = format_row_errors(&dataset());
        assert!(out.contains("line 4"));
        assert!(out.contains("Skipped 1 of 3 rows"));
    }
}
