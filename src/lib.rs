//! Shared library for the Saber 11 household-service analysis.
//!
//! The crate turns survey records (one row per student, annotated with the
//! appliances and services available at home and the student's department)
//! into a dense department × category matrix, then answers questions over it:
//! which department has the most appliances, how many households own a given
//! device, and a weighted quality-of-life index per department. The binaries
//! in `src/bin` are thin front ends over these functions.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod menu;
pub mod queries;
pub mod registry;
pub mod session;
pub mod summary;

pub use aggregate::{RegionSums, aggregate};
pub use config::{CATEGORY_NAMES, QUALITY_OF_LIFE_WEIGHTS, Settings};
pub use dataset::{Dataset, Record};
pub use error::{CoreError, LookupKind};
pub use matrix::ServiceMatrix;
pub use menu::{Console, MenuOption};
pub use queries::{
    most_appliances, quality_of_life_index, region_with_max_combined, total_for_category,
    weighted_index,
};
pub use registry::{CategoryName, CategoryRegistry, RegionId, RegionRegistry, Registry};
pub use session::Session;
pub use summary::{
    CategoryShare, RegionMean, ScoreSummary, school_gender_shares, score_distribution,
    top_regions_by_mean,
};

use anyhow::{Result, bail};
use std::path::PathBuf;

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pick the dataset path: an explicit flag wins over `SABER11_DATA`.
///
/// Fails when neither names a file that exists, so binaries can report the
/// problem before touching the loader.
pub fn resolve_data_path(cli_override: Option<PathBuf>, settings: &Settings) -> Result<PathBuf> {
    let Some(path) = cli_override.or_else(|| settings.data_path.clone()) else {
        bail!("No dataset given. Pass --data PATH or set SABER11_DATA.");
    };
    if !path.is_file() {
        bail!("Dataset not found: {}", path.display());
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn split_list_accepts_commas_and_whitespace() {
        assert_eq!(
            split_list("ciencias, ingles  sociales,,"),
            vec!["ciencias", "ingles", "sociales"]
        );
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn resolve_data_path_prefers_flag_over_settings() {
        let file = NamedTempFile::new().unwrap();
        let settings = Settings {
            data_path: Some(PathBuf::from("/nonexistent/env.csv")),
            ..Settings::default()
        };
        let resolved = resolve_data_path(Some(file.path().to_path_buf()), &settings).unwrap();
        assert_eq!(resolved, file.path());

        let err = resolve_data_path(None, &settings).unwrap_err();
        assert!(err.to_string().contains("env.csv"));
        assert!(resolve_data_path(None, &Settings::default()).is_err());
    }
}
