//! Generic group-by-sum aggregation.
//!
//! Keys keep **first-seen order**, so a series is deterministic for a given
//! input ordering (the CSV row order). The time series is additionally
//! re-sorted by its ISO date keys so the line chart x-axis is chronological.

use std::collections::HashMap;

use crate::domain::Dataset;

/// Key → summed-value mapping produced by grouping records.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pairs: Vec<(String, f64)>,
}

impl AggregatedSeries {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.pairs.iter().map(|(_, v)| *v)
    }

    pub fn pairs(&self) -> &[(String, f64)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sum of all per-key values.
    pub fn total(&self) -> f64 {
        self.pairs.iter().map(|(_, v)| v).sum()
    }

    /// Re-sort pairs lexicographically by key. ISO date keys sort
    /// chronologically under this ordering.
    pub fn sorted_by_key(mut self) -> Self {
        self.pairs.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }
}

/// Partition `(key, value)` pairs by key and sum values per key.
pub fn group_by_sum<I>(pairs: I) -> AggregatedSeries
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<(String, f64)> = Vec::new();

    for (key, value) in pairs {
        match index.get(&key) {
            Some(&i) => out[i].1 += value,
            None => {
                index.insert(key.clone(), out.len());
                out.push((key, value));
            }
        }
    }

    AggregatedSeries { pairs: out }
}

/// Total cost per campaign.
pub fn cost_by_campaign(dataset: &Dataset) -> AggregatedSeries {
    group_by_sum(
        dataset
            .records
            .iter()
            .map(|r| (r.campaign.clone(), r.cost)),
    )
}

/// Total clicks per date, sorted chronologically for the time-series chart.
pub fn clicks_by_date(dataset: &Dataset) -> AggregatedSeries {
    group_by_sum(
        dataset
            .records
            .iter()
            .map(|r| (r.date.to_string(), r.clicks)),
    )
    .sorted_by_key()
}

/// Total clicks per campaign (traffic share).
pub fn clicks_by_campaign(dataset: &Dataset) -> AggregatedSeries {
    group_by_sum(
        dataset
            .records
            .iter()
            .map(|r| (r.campaign.clone(), r.clicks)),
    )
}
