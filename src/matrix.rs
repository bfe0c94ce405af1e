//! Dense region × category matrix bundled with its registries.
//!
//! `ServiceMatrix` is the only way to hold matrix cells: it owns both
//! registries, so an index can never be interpreted against the wrong axis.
//! Values are immutable once built; a changed dataset means building a new
//! matrix from scratch.

use crate::aggregate::{RegionSums, aggregate};
use crate::config::CATEGORY_NAMES;
use crate::dataset::Record;
use crate::error::CoreError;
use crate::registry::{CategoryRegistry, RegionRegistry};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Rows follow region registry order, columns follow category registry order.
pub struct ServiceMatrix {
    categories: CategoryRegistry,
    regions: RegionRegistry,
    cells: Vec<Vec<f64>>,
}

impl ServiceMatrix {
    /// Build the matrix for the fixed category list and the regions in `records`.
    pub fn from_records(records: &[Record]) -> Result<Self, CoreError> {
        let regions = RegionRegistry::build(records)?;
        let categories = CategoryRegistry::build(CATEGORY_NAMES)?;
        Ok(Self::build(records, categories, regions))
    }

    /// Fill every `(region, category)` cell with the aggregated indicator sum.
    ///
    /// The result is always rectangular: regions absent from `records` get
    /// zero-filled rows rather than being dropped.
    pub fn build(
        records: &[Record],
        categories: CategoryRegistry,
        regions: RegionRegistry,
    ) -> Self {
        let columns: Vec<RegionSums> = categories
            .names()
            .iter()
            .map(|category| aggregate(records, category.as_str()))
            .collect();

        let cells: Vec<Vec<f64>> = regions
            .names()
            .iter()
            .map(|region| {
                columns
                    .iter()
                    .map(|sums| sums.get(region.as_str()))
                    .collect()
            })
            .collect();

        debug!(
            rows = cells.len(),
            columns = categories.len(),
            "built service matrix"
        );
        Self {
            categories,
            regions,
            cells,
        }
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn regions(&self) -> &RegionRegistry {
        &self.regions
    }

    /// All rows in region-index order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    pub fn row(&self, region_index: usize) -> Option<&[f64]> {
        self.cells.get(region_index).map(Vec::as_slice)
    }

    pub fn cell(&self, region_index: usize, category_index: usize) -> Option<f64> {
        self.row(region_index)?.get(category_index).copied()
    }

    /// Row for a region identifier.
    pub fn region_row(&self, region: &str) -> Result<&[f64], CoreError> {
        let idx = self.regions.index_of(region)?;
        Ok(&self.cells[idx])
    }

    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.categories.len()
    }
}
