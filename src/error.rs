// src/error.rs

use std::path::PathBuf;

use arrow::error::ArrowError;
use thiserror::Error;

/// Errors raised while loading the registry file.
///
/// Nothing in the pipeline recovers from these: a failed load aborts every
/// aggregate and chart that depends on it.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The configured registry path does not exist
    #[error("registry file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The registry file exists but could not be read
    #[error("failed to read registry file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured encoding label is not known to encoding_rs
    #[error("unknown text encoding label `{0}`")]
    UnknownEncoding(String),

    /// Field delimiters must be a single ASCII byte
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),

    /// The file content does not match the registry layout
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum ParseError {
    /// Fewer lines than the preamble plus a header row
    #[error("expected {skip_rows} preamble lines followed by a header row, found {lines} lines")]
    MissingHeader { skip_rows: usize, lines: usize },

    /// Byte sequences that are invalid in the configured encoding
    #[error("registry file is not valid {encoding}")]
    Encoding { encoding: &'static str },

    /// Delimiter or field-count mismatch reported by the CSV reader
    #[error("malformed registry CSV: {0}")]
    Csv(#[from] ArrowError),

    /// A required column is absent from the header row
    #[error("required column `{0}` is missing from the header row")]
    MissingColumn(String),

    /// A commissioning date that does not match the configured format
    #[error("data row {row}: cannot parse commissioning date `{value}`")]
    InvalidDate { row: usize, value: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
