//! Defines the error types that this crate uses.

use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io;

/// The result type that uses [DatasetError] as the error type.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// The error type for reading and decoding a dataset or a metric catalog.
///
/// Only malformed payloads fail; missing categories or invalid record values
/// are handled by the chart data pipeline.
#[derive(Debug)]
pub enum DatasetError {
    /// A [std::io::Error] encountered while reading a local file.
    Io(io::Error),

    /// A [serde_json::Error] encountered while parsing the payload.
    Json(serde_json::Error),

    /// The payload is valid JSON but neither an object nor an array.
    UnexpectedShape(&'static str),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let dataset_error = "dataset error:";

        match self {
            DatasetError::Io(error) => write!(f, "{dataset_error} I/O error: {error}"),
            DatasetError::Json(error) => write!(f, "{dataset_error} JSON error: {error}"),
            DatasetError::UnexpectedShape(kind) => write!(
                f,
                "{dataset_error} expected an object or an array of records, found {kind}"
            ),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Io(error) => Some(error),
            DatasetError::Json(error) => Some(error),
            DatasetError::UnexpectedShape(_) => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(error: serde_json::Error) -> Self {
        DatasetError::Json(error)
    }
}

impl From<io::Error> for DatasetError {
    fn from(error: io::Error) -> Self {
        DatasetError::Io(error)
    }
}
