use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a raw coordinate string into a ring.
#[derive(Debug, Error)]
pub enum CoordinateError {
    /// The string is not wrapped in `(` and `)`.
    #[error("coordinate string is not wrapped in parentheses: {raw:?}")]
    MissingDelimiters { raw: String },

    /// Nothing between the parentheses.
    #[error("coordinate string contains no points")]
    Empty,

    /// A point token without a `lon,lat` pair.
    #[error("point {token:?} is missing its latitude")]
    MissingComponent { token: String },

    /// A longitude or latitude that is not a number.
    #[error("invalid number {value:?} in point {token:?}: {source}")]
    InvalidNumber {
        token: String,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Errors that can occur anywhere in the conversion pipeline.
#[derive(Debug, Error)]
pub enum ZoneError {
    /// Opening, creating or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader could not read a row.
    #[error("CSV error at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A data row has fewer columns than the status flag needs.
    #[error("line {line} has {found} fields, expected at least {min}", min = crate::records::MIN_FIELDS)]
    ShortRow { line: u64, found: usize },

    /// A row's geometry column could not be parsed.
    #[error("bad geometry at line {line} ({name}): {source}")]
    Coordinate {
        line: u64,
        name: String,
        #[source]
        source: CoordinateError,
    },

    /// Serializing the collection failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The collection metadata file is not valid TOML.
    #[error("invalid metadata file {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ZoneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
