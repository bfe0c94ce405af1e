//! Error kinds raised by the matrix core.
//!
//! Every variant represents caller misuse or malformed configuration; none of
//! them are transient. Outer layers wrap these in `anyhow` and can recover the
//! concrete kind with `downcast_ref::<CoreError>()`.

use std::fmt;
use thiserror::Error;

/// What a failed lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Category,
    Region,
    Column,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKind::Category => "category",
            LookupKind::Region => "region",
            LookupKind::Column => "column",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("invalid category configuration: {0}")]
    Configuration(String),

    #[error("unknown {kind} '{name}'")]
    NotFound { kind: LookupKind, name: String },

    #[error("expected {expected} weights (one per category), got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl CoreError {
    pub(crate) fn not_found(kind: LookupKind, name: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            name: name.into(),
        }
    }
}
