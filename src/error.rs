//! Error types for bounded series and their collaborators.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for series operations.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series capacity must not be negative, got {0}")]
    NegativeCapacity(i64),

    #[error("invalid interval {input:?}: {reason}")]
    InvalidInterval { input: String, reason: String },

    #[error("interval decode error: {0}")]
    IntervalDecode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error accessing {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<SeriesError>,
    },

    #[error("config is neither JSON ({json}) nor TOML ({toml})")]
    Config { json: String, toml: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SeriesError {
    /// Attach a file path to an error raised while reading or writing it.
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        SeriesError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for SeriesError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            return SeriesError::Io(e.into());
        }
        if e.is_data() || e.is_syntax() || e.is_eof() {
            SeriesError::Deserialization(e.to_string())
        } else {
            SeriesError::Serialization(e.to_string())
        }
    }
}

impl From<toml::de::Error> for SeriesError {
    fn from(e: toml::de::Error) -> Self {
        SeriesError::Deserialization(e.to_string())
    }
}

impl From<toml::ser::Error> for SeriesError {
    fn from(e: toml::ser::Error) -> Self {
        SeriesError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::encode::Error> for SeriesError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        SeriesError::Serialization(e.to_string())
    }
}

impl From<rmp_serde::decode::Error> for SeriesError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        SeriesError::Deserialization(e.to_string())
    }
}

/// Result type for series operations.
pub type Result<T> = std::result::Result<T, SeriesError>;
