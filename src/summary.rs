//! Tabular summaries behind the school-gender, top-region, and score charts.
//!
//! These work on raw records rather than the service matrix. They return plain
//! rows; drawing them is left to whatever presentation layer consumes them.

use crate::dataset::Record;
use crate::error::{CoreError, LookupKind};
use crate::registry::RegionId;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Count and fraction of records carrying one label.
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMean {
    pub region: RegionId,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Five-number summary of one score column.
pub struct ScoreSummary {
    pub column: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Distribution of the distinct labels in `column`, most common first.
///
/// Numerically coded cells are labelled with their number.
pub fn school_gender_shares(
    records: &[Record],
    column: &str,
) -> Result<Vec<CategoryShare>, CoreError> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let label = match (record.text(column), record.value(column)) {
            (Some(text), _) => text.to_string(),
            (None, Some(value)) => value.to_string(),
            (None, None) => continue,
        };
        *counts.entry(label).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    if total == 0 {
        return Err(CoreError::not_found(LookupKind::Column, column));
    }

    let mut shares: Vec<CategoryShare> = counts
        .into_iter()
        .map(|(label, count)| CategoryShare {
            label,
            count,
            share: count as f64 / total as f64,
        })
        .collect();
    // BTreeMap order already breaks ties by label; the sort is stable.
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(shares)
}

/// Regions ranked by the mean of a numeric column, best first.
pub fn top_regions_by_mean(
    records: &[Record],
    column: &str,
    limit: usize,
) -> Result<Vec<RegionMean>, CoreError> {
    let mut totals: BTreeMap<&RegionId, (f64, usize)> = BTreeMap::new();
    for record in records {
        if let Some(value) = record.value(column) {
            let entry = totals.entry(record.region()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }
    if totals.is_empty() {
        return Err(CoreError::not_found(LookupKind::Column, column));
    }

    let mut ranked: Vec<RegionMean> = totals
        .into_iter()
        .map(|(region, (sum, count))| RegionMean {
            region: region.clone(),
            mean: sum / count as f64,
            count,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.region.cmp(&b.region))
    });
    ranked.truncate(limit);
    Ok(ranked)
}

/// Five-number summary for each requested score column.
pub fn score_distribution<S: AsRef<str>>(
    records: &[Record],
    columns: &[S],
) -> Result<Vec<ScoreSummary>, CoreError> {
    columns
        .iter()
        .map(|column| summarize_column(records, column.as_ref()))
        .collect()
}

fn summarize_column(records: &[Record], column: &str) -> Result<ScoreSummary, CoreError> {
    let mut values: Vec<f64> = records
        .iter()
        .filter_map(|r| r.value(column))
        .filter(|v| !v.is_nan())
        .collect();
    if values.is_empty() {
        return Err(CoreError::not_found(LookupKind::Column, column));
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Ok(ScoreSummary {
        column: column.to_string(),
        count: values.len(),
        min: values[0],
        q1: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q3: quantile(&values, 0.75),
        max: values[values.len() - 1],
    })
}

// Linear interpolation between closest ranks over sorted, non-empty input.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
