//! Ordered name→index registries for categories and regions.
//!
//! A registry is a lexicographically sorted, deduplicated list of keys whose
//! positions are their stable indices. Both the matrix rows and columns are
//! addressed through a registry, so every lookup failure surfaces here as a
//! typed `NotFound` instead of an out-of-bounds index later on.

use crate::dataset::Record;
use crate::error::{CoreError, LookupKind};
use crate::registry::identity::{CategoryName, RegionId, RegistryKey};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Sorted keys plus the reverse mapping from key to position.
pub struct Registry<K> {
    kind: LookupKind,
    names: Vec<K>,
    positions: BTreeMap<K, usize>,
}

pub type CategoryRegistry = Registry<CategoryName>;
pub type RegionRegistry = Registry<RegionId>;

impl<K: RegistryKey> Registry<K> {
    fn from_ordered(kind: LookupKind, ordered: BTreeSet<K>) -> Self {
        let names: Vec<K> = ordered.into_iter().collect();
        let positions = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Self {
            kind,
            names,
            positions,
        }
    }

    /// Position of `name`, or `NotFound` naming the registry kind.
    pub fn index_of(&self, name: &str) -> Result<usize, CoreError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::not_found(self.kind, name))
    }

    pub fn name_at(&self, index: usize) -> Option<&K> {
        self.names.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Keys in index order.
    pub fn names(&self) -> &[K] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &K)> {
        self.names.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// Registries serialize as their keys in index order.
impl<K: RegistryKey + Serialize> Serialize for Registry<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.names)
    }
}

impl Registry<CategoryName> {
    /// Build the category registry from the fixed configuration list.
    ///
    /// Rejects empty lists, blank names, and duplicates; the input order is
    /// irrelevant because indices follow sorted order.
    pub fn build<S: AsRef<str>>(names: &[S]) -> Result<Self, CoreError> {
        if names.is_empty() {
            return Err(CoreError::Configuration(
                "category list must not be empty".to_string(),
            ));
        }

        let mut ordered = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(CoreError::Configuration(
                    "category list must not contain blank names".to_string(),
                ));
            }
            if !ordered.insert(CategoryName::from(name)) {
                return Err(CoreError::Configuration(format!(
                    "duplicate category '{name}'"
                )));
            }
        }

        let registry = Self::from_ordered(LookupKind::Category, ordered);
        debug!(categories = registry.len(), "built category registry");
        Ok(registry)
    }
}

impl Registry<RegionId> {
    /// Build the region registry from every distinct region in `records`.
    pub fn build(records: &[Record]) -> Result<Self, CoreError> {
        if records.is_empty() {
            return Err(CoreError::EmptyDataset);
        }

        let ordered: BTreeSet<RegionId> = records.iter().map(|r| r.region().clone()).collect();
        let registry = Self::from_ordered(LookupKind::Region, ordered);
        debug!(
            regions = registry.len(),
            records = records.len(),
            "built region registry"
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CATEGORY_NAMES;

    #[test]
    fn category_registry_sorts_fixed_list() {
        let registry = CategoryRegistry::build(CATEGORY_NAMES).expect("fixed list is valid");
        let names: Vec<&str> = registry.names().iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "car",
                "computer",
                "internet",
                "microwave",
                "motorcycle",
                "tv",
                "video games",
                "washing machine"
            ]
        );
        assert_eq!(registry.index_of("car"), Ok(0));
        assert_eq!(registry.index_of("washing machine"), Ok(7));
    }

    #[test]
    fn category_registry_rejects_empty_and_duplicates() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            CategoryRegistry::build(&empty),
            Err(CoreError::Configuration(_))
        ));

        let err = CategoryRegistry::build(&["tv", "car", "tv"]).expect_err("duplicate");
        assert!(matches!(err, CoreError::Configuration(ref msg) if msg.contains("tv")));

        assert!(matches!(
            CategoryRegistry::build(&["tv", "  "]),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn region_registry_is_a_bijection_over_distinct_regions() {
        let records = vec![
            Record::new("SUCRE"),
            Record::new("ANTIOQUIA"),
            Record::new("SUCRE"),
            Record::new("BOYACA"),
        ];
        let registry = RegionRegistry::build(&records).expect("regions");
        assert_eq!(registry.len(), 3);
        for (idx, name) in registry.iter() {
            assert_eq!(registry.index_of(name.as_str()), Ok(idx));
        }
        assert_eq!(registry.name_at(0).map(RegionId::as_str), Some("ANTIOQUIA"));
        assert!(registry.name_at(3).is_none());
    }

    #[test]
    fn region_registry_requires_records() {
        assert_eq!(RegionRegistry::build(&[]), Err(CoreError::EmptyDataset));
    }

    #[test]
    fn unknown_keys_report_their_kind() {
        let registry = RegionRegistry::build(&[Record::new("CAUCA")]).unwrap();
        assert_eq!(
            registry.index_of("cauca"),
            Err(CoreError::NotFound {
                kind: LookupKind::Region,
                name: "cauca".to_string()
            })
        );
        assert!(!registry.contains("cauca"));
    }
}
