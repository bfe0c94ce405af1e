//! Category and region registries.
//!
//! Registries give the matrix its axes: categories come from the fixed
//! configuration list, regions from the loaded dataset. Both are sorted so
//! indices are stable for the lifetime of one build.

pub mod identity;
pub mod index;

pub use identity::{CategoryName, RegionId, RegistryKey};
pub use index::{CategoryRegistry, RegionRegistry, Registry};
