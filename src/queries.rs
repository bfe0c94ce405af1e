//! Read-only queries over a built `ServiceMatrix`.
//!
//! Every query is a pure function of the matrix plus its arguments. Unknown
//! category or region names fail with `CoreError::NotFound`.

use crate::config::{APPLIANCE_PAIR, QUALITY_OF_LIFE_WEIGHTS};
use crate::error::CoreError;
use crate::matrix::ServiceMatrix;
use crate::registry::RegionId;

/// Region whose two named categories have the greatest combined count.
///
/// Comparison is strict, so on ties the earliest region in registry order
/// wins. NaN sums never win; if no sum is comparable the first region is
/// returned.
pub fn region_with_max_combined<'a>(
    matrix: &'a ServiceMatrix,
    category_a: &str,
    category_b: &str,
) -> Result<&'a RegionId, CoreError> {
    let a = matrix.categories().index_of(category_a)?;
    let b = matrix.categories().index_of(category_b)?;

    let mut best: Option<(usize, f64)> = None;
    for (idx, row) in matrix.rows().iter().enumerate() {
        let combined = row[a] + row[b];
        if combined.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, top)| combined > top) {
            best = Some((idx, combined));
        }
    }

    let idx = best.map_or(0, |(idx, _)| idx);
    matrix.regions().name_at(idx).ok_or(CoreError::EmptyDataset)
}

/// Region with the most washing machines plus microwaves.
pub fn most_appliances(matrix: &ServiceMatrix) -> Result<&RegionId, CoreError> {
    region_with_max_combined(matrix, APPLIANCE_PAIR.0, APPLIANCE_PAIR.1)
}

/// Column total for `category` across all regions.
pub fn total_for_category(matrix: &ServiceMatrix, category: &str) -> Result<f64, CoreError> {
    let idx = matrix.categories().index_of(category)?;
    Ok(matrix.rows().iter().map(|row| row[idx]).sum())
}

/// `Σ row[j] * weights[j]` for `region`, rounded to two decimals.
///
/// `weights` must have exactly one entry per category, in category-registry
/// order. Rounding is half away from zero.
pub fn weighted_index(
    matrix: &ServiceMatrix,
    region: &str,
    weights: &[f64],
) -> Result<f64, CoreError> {
    if weights.len() != matrix.column_count() {
        return Err(CoreError::DimensionMismatch {
            expected: matrix.column_count(),
            actual: weights.len(),
        });
    }
    let row = matrix.region_row(region)?;
    let score: f64 = row.iter().zip(weights).map(|(cell, w)| cell * w).sum();
    Ok(round_to_cents(score))
}

/// Quality-of-life index (ICV) with the fixed weight vector.
pub fn quality_of_life_index(matrix: &ServiceMatrix, region: &str) -> Result<f64, CoreError> {
    weighted_index(matrix, region, &QUALITY_OF_LIFE_WEIGHTS)
}

pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
