//! Error types for the driver surface.
//!
//! The mining core raises nothing: degenerate parameters and trivially
//! empty inputs produce empty results by contract. Only the I/O boundary
//! (dataset loading and configuration parsing) returns `Result`.

use std::path::PathBuf;

use thiserror::Error;

pub type LoadResult<T> = Result<T, LoadError>;

/// Dataset loading failures, surfaced before the core is invoked.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The underlying CSV reader failed (I/O or malformed CSV framing).
    #[error("csv read failed: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("missing required column: {name}")]
    MissingColumn { name: String },

    /// A field failed to parse as its expected type.
    #[error("row {row}: invalid {column} value {value:?}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration parsing failures. A missing file is not an error (the
/// loader falls back to defaults); an unreadable file or a bad value for a
/// recognized key is.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config key {key}: invalid value {value:?}")]
    InvalidValue { key: String, value: String },
}
