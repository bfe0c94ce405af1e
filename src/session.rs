//! Interactive session state: the loaded dataset and the matrix built from it.
//!
//! The console owns one `Session` and passes it to each menu action. Loading a
//! new dataset discards the previous matrix; the matrix is never patched in
//! place.

use crate::config::Settings;
use crate::dataset::Dataset;
use crate::matrix::ServiceMatrix;
use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing::info;

#[derive(Debug, Default)]
pub struct Session {
    settings: Settings,
    dataset: Option<Dataset>,
    matrix: Option<ServiceMatrix>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            dataset: None,
            matrix: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the current dataset with the contents of `path`.
    ///
    /// On failure the previous dataset and matrix are left untouched.
    pub fn load(&mut self, path: &Path) -> Result<&Dataset> {
        let dataset = Dataset::load(path, &self.settings)?;
        self.matrix = None;
        Ok(&*self.dataset.insert(dataset))
    }

    /// Install an already-loaded dataset, discarding any previous matrix.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> &Dataset {
        self.matrix = None;
        self.dataset.insert(dataset)
    }

    /// Build (or rebuild) the service matrix from the current dataset.
    pub fn build_matrix(&mut self) -> Result<&ServiceMatrix> {
        let dataset = self.dataset()?;
        let matrix = ServiceMatrix::from_records(dataset.records())
            .context("building service matrix")?;
        info!(
            regions = matrix.row_count(),
            categories = matrix.column_count(),
            "service matrix ready"
        );
        Ok(&*self.matrix.insert(matrix))
    }

    pub fn dataset(&self) -> Result<&Dataset> {
        self.dataset
            .as_ref()
            .ok_or_else(|| anyhow!("no dataset loaded; load the data first (option 1)"))
    }

    pub fn matrix(&self) -> Result<&ServiceMatrix> {
        self.matrix
            .as_ref()
            .ok_or_else(|| anyhow!("no matrix built; construct the matrix first (option 5)"))
    }
}
