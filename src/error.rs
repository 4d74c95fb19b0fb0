use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Could not read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read catalog source: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog JSON at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Catalog does not match the card schema at line {line}, column {column} (field: {}): {message}", .field.as_deref().unwrap_or("unknown"))]
    Schema {
        field: Option<String>,
        line: usize,
        column: usize,
        message: String,
    },
}

/// Errors reported to every waiter of an image fetch. `Clone` so one failed
/// request can be handed to all callers sharing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageFetchError {
    #[error("Invalid image uri '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Network error fetching {uri}: {reason}")]
    Network { uri: String, reason: String },

    #[error("Fetching {uri} returned status {status}")]
    Status { uri: String, status: u16 },

    #[error("Could not decode image from {uri}: {reason}")]
    Decode { uri: String, reason: String },

    #[error("Fetching {uri} timed out after {after:?}")]
    Timeout { uri: String, after: Duration },

    #[error("Request for {uri} was cancelled")]
    Cancelled { uri: String },

    #[error("Fetch task for {uri} stopped unexpectedly: {reason}")]
    Aborted { uri: String, reason: String },
}
