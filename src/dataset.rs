//! Loading survey records from delimited text.
//!
//! The loader is the only place that touches the file format. It requires the
//! region column and every configured category column, and keeps all other
//! columns per record so score and school-gender summaries can reuse the same
//! in-memory dataset.

use crate::config::{CATEGORY_NAMES, Settings};
use crate::error::CoreError;
use crate::registry::RegionId;
use anyhow::{Context, Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
/// One survey row: its region plus numeric and textual fields by column name.
pub struct Record {
    region: RegionId,
    values: BTreeMap<String, f64>,
    text: BTreeMap<String, String>,
}

impl Record {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: RegionId(region.into()),
            values: BTreeMap::new(),
            text: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, column: &str, value: f64) -> Self {
        self.values.insert(column.to_string(), value);
        self
    }

    pub fn with_text(mut self, column: &str, value: &str) -> Self {
        self.text.insert(column.to_string(), value.to_string());
        self
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Indicator for `category`; records without the column contribute zero.
    pub fn indicator(&self, category: &str) -> f64 {
        self.value(category).unwrap_or(0.0)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.text.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
/// Non-empty, read-only sequence of records.
pub struct Dataset {
    records: Vec<Record>,
    source: Option<PathBuf>,
    skipped_rows: usize,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Result<Self, CoreError> {
        if records.is_empty() {
            return Err(CoreError::EmptyDataset);
        }
        Ok(Self {
            records,
            source: None,
            skipped_rows: 0,
        })
    }

    /// Read a delimited file using the configured delimiter and region column.
    pub fn load(path: &Path, settings: &Settings) -> Result<Self> {
        if !path.is_file() {
            bail!("dataset file not found: {}", path.display());
        }
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut dataset = Self::from_reader(BufReader::new(file), settings)
            .with_context(|| format!("loading {}", path.display()))?;
        dataset.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            records = dataset.len(),
            skipped = dataset.skipped_rows,
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Parse records from any reader; the first row must be the header.
    pub fn from_reader<R: Read>(input: R, settings: &Settings) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(settings.delimiter)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader.headers().context("reading header row")?.clone();
        if headers.is_empty() {
            return Err(CoreError::EmptyDataset.into());
        }

        let region_idx = required_column(&headers, &settings.region_column)?;
        for category in CATEGORY_NAMES {
            required_column(&headers, category)?;
        }
        let categories: BTreeSet<&str> = CATEGORY_NAMES.iter().copied().collect();

        let mut records = Vec::new();
        let mut skipped_rows = 0;
        for (offset, row) in reader.records().enumerate() {
            // Header is line 1.
            let line = offset + 2;
            let row = row.with_context(|| format!("reading line {line}"))?;
            let region = row.get(region_idx).unwrap_or_default();
            if is_missing(region) {
                warn!(line, column = %settings.region_column, "skipping row without region");
                skipped_rows += 1;
                continue;
            }

            let mut record = Record::new(region);
            for (idx, (header, cell)) in headers.iter().zip(row.iter()).enumerate() {
                if idx == region_idx {
                    continue;
                }
                if categories.contains(header) {
                    record
                        .values
                        .insert(header.to_string(), parse_indicator(cell, header, line)?);
                } else if is_missing(cell) {
                    continue;
                } else if let Some(value) = cell.parse::<f64>().ok().filter(|v| v.is_finite()) {
                    record.values.insert(header.to_string(), value);
                } else {
                    record.text.insert(header.to_string(), cell.to_string());
                }
            }
            records.push(record);
        }

        let mut dataset = Self::from_records(records)?;
        dataset.skipped_rows = skipped_rows;
        Ok(dataset)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Rows dropped because their region cell was blank.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

fn required_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .with_context(|| format!("missing required column '{name}'"))
}

/// Cells read as missing: pandas' default `na_values`.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

// Missing indicator cells count as zero, matching a NaN-skipping sum.
fn parse_indicator(cell: &str, column: &str, line: usize) -> Result<f64> {
    if is_missing(cell) {
        return Ok(0.0);
    }
    let value = cell
        .parse::<f64>()
        .with_context(|| format!("line {line}: column '{column}' is not numeric: {cell:?}"))?;
    if !value.is_finite() {
        bail!("line {line}: column '{column}' is not a finite number: {cell:?}");
    }
    Ok(value)
}
