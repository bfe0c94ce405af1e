//! Fixed analysis configuration and runtime settings.
//!
//! The category list and the quality-of-life weights are part of the analysis
//! definition, not user input. Runtime settings (which file, which delimiter,
//! which region column) resolve from defaults, then `SABER11_*` environment
//! variables, then CLI flags.

use crate::split_list;
use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

/// Appliance/service indicator columns tracked per household record.
pub const CATEGORY_NAMES: &[&str] = &[
    "internet",
    "tv",
    "computer",
    "microwave",
    "car",
    "washing machine",
    "motorcycle",
    "video games",
];

/// Quality-of-life weights, aligned to the sorted category order.
pub const QUALITY_OF_LIFE_WEIGHTS: [f64; 8] = [0.20, 0.09, 0.09, 0.07, 0.08, 0.16, 0.13, 0.18];

/// Categories combined by the "most appliances" query.
pub const APPLIANCE_PAIR: (&str, &str) = ("washing machine", "microwave");

pub const REGION_COLUMN: &str = "dpto";
pub const SCHOOL_GENDER_COLUMN: &str = "genero_col";

/// Score columns summarized by the evaluation-category distribution.
pub const SCORE_COLUMNS: &[&str] = &[
    "ciencias",
    "matematicas",
    "lectura_critica",
    "sociales",
    "ingles",
];

/// How many regions the top-regions ranking returns.
pub const TOP_REGIONS_LIMIT: usize = 10;

const DATA_ENV: &str = "SABER11_DATA";
const DELIMITER_ENV: &str = "SABER11_DELIMITER";
const REGION_COLUMN_ENV: &str = "SABER11_REGION_COLUMN";
const SCORE_COLUMNS_ENV: &str = "SABER11_SCORE_COLUMNS";

#[derive(Debug, Clone, PartialEq)]
/// Runtime knobs for loading and summarizing a dataset.
pub struct Settings {
    pub data_path: Option<PathBuf>,
    pub delimiter: u8,
    pub region_column: String,
    pub score_columns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: None,
            delimiter: b',',
            region_column: REGION_COLUMN.to_string(),
            score_columns: SCORE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Defaults overlaid with any `SABER11_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with the variable source injected for tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = present(DATA_ENV) {
            settings.data_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = present(DELIMITER_ENV) {
            settings.delimiter = parse_delimiter(&raw)?;
        }
        if let Some(column) = present(REGION_COLUMN_ENV) {
            settings.region_column = column.trim().to_string();
        }
        if let Some(raw) = present(SCORE_COLUMNS_ENV) {
            let columns = split_list(&raw);
            if !columns.is_empty() {
                settings.score_columns = columns;
            }
        }
        Ok(settings)
    }
}

/// Parse a single-byte field delimiter; `\t` and `tab` spell a tab.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    let value = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    let bytes = value.as_bytes();
    if bytes.len() != 1 || !bytes[0].is_ascii() {
        bail!("delimiter must be a single ASCII character, got {raw:?}");
    }
    Ok(bytes[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn weights_cover_every_category_and_sum_to_one() {
        assert_eq!(QUALITY_OF_LIFE_WEIGHTS.len(), CATEGORY_NAMES.len());
        let sum: f64 = QUALITY_OF_LIFE_WEIGHTS.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn env_overrides_defaults() {
        let vars: BTreeMap<&str, &str> = BTreeMap::from([
            ("SABER11_DATA", "/tmp/saber.csv"),
            ("SABER11_DELIMITER", ";"),
            ("SABER11_REGION_COLUMN", "departamento"),
            ("SABER11_SCORE_COLUMNS", "ingles, matematicas"),
        ]);
        let settings =
            Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.data_path, Some(PathBuf::from("/tmp/saber.csv")));
        assert_eq!(settings.delimiter, b';');
        assert_eq!(settings.region_column, "departamento");
        assert_eq!(settings.score_columns, vec!["ingles", "matematicas"]);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let settings = Settings::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn delimiter_must_be_one_ascii_byte() {
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert_eq!(parse_delimiter("|").unwrap(), b'|');
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("ñ").is_err());
    }
}
