use crate::core::models::model::ModelError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AboError {
    #[error("Could not open '{path}': {source}", path = path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unexpected end of input at byte {offset}: {missing} more byte(s) required")]
    Truncated { offset: u64, missing: usize },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(#[from] UnsupportedFormatKind),

    #[error("Corrupt compressed payload: {0}")]
    CorruptPayload(String),

    #[error("Invalid model {model} in frame {frame}: {source}")]
    InvalidModel {
        frame: usize,
        model: usize,
        #[source]
        source: ModelError,
    },

    #[error("Cannot encode {field}: {value} exceeds the format limit of {limit}")]
    Overflow {
        field: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("{feature} cannot be represented in format {version}")]
    Unrepresentable {
        feature: &'static str,
        version: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnsupportedFormatKind {
    #[error("bad magic {0:?}, expected \"ABOF\"")]
    BadMagic([u8; 4]),
    #[error("format version {0} (supported: 1, 2)")]
    Version(u8),
}

impl AboError {
    /// Whether the error was caused by the input ending early.
    pub fn is_truncation(&self) -> bool {
        matches!(self, AboError::Truncated { .. })
    }
}

/// Errors raised while writing auxiliary export formats.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
