//! Per-region sums of one category indicator.
//!
//! One call makes one full pass over the records. The matrix builder calls it
//! once per category, which is fine because the category list is small and
//! fixed.

use crate::dataset::Record;
use crate::registry::RegionId;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
/// Region → sum for a single category. Absent regions read as zero.
pub struct RegionSums(BTreeMap<RegionId, f64>);

impl RegionSums {
    /// Sum for `region`; regions with no matching records are `0`, never absent.
    pub fn get(&self, region: &str) -> f64 {
        self.0.get(region).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, f64)> {
        self.0.iter().map(|(region, sum)| (region, *sum))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Group `records` by region and sum the `category` indicator within each group.
pub fn aggregate(records: &[Record], category: &str) -> RegionSums {
    let mut sums: BTreeMap<RegionId, f64> = BTreeMap::new();
    for record in records {
        *sums.entry(record.region().clone()).or_insert(0.0) += record.indicator(category);
    }
    RegionSums(sums)
}
