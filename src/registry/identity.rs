use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of an appliance/service indicator column (e.g. `washing machine`).
///
/// Matching is exact and case-sensitive, mirroring the dataset headers.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(pub String);

/// Identifier of a first-level administrative region (a department).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl CategoryName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RegionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryName {
    fn from(value: &str) -> Self {
        CategoryName(value.to_string())
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        RegionId(value.to_string())
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for CategoryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Keys a `Registry` can index: ordered, printable, and looked up by `&str`.
pub trait RegistryKey: Clone + Ord + Borrow<str> + fmt::Display {}

impl RegistryKey for CategoryName {}

impl RegistryKey for RegionId {}
