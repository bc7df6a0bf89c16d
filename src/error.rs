//! Error types for dify-export
//!
//! This module provides error handling for the exporter, including:
//! - Transport, API, and decoding errors raised by the console client
//! - Filesystem and archive errors raised while writing the output zip
//! - Stage-tagged errors returned by the export pipeline

use std::fmt;
use thiserror::Error;

/// Result type alias for dify-export operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dify-export
///
/// Every fallible operation in the crate returns this type. Variants carry enough
/// context (endpoint, HTTP status, entry name) to produce a useful log line.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "DIFY_CONSOLE_API")
        key: Option<String>,
    },

    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The console API answered with a non-success HTTP status
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Api {
        /// Request path that failed (e.g., "/apps")
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the raw body when it has none
        message: String,
    },

    /// The login call completed but did not yield a usable session
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Response body was not the JSON shape we expected
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API base address combined with a path is not a valid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip container error
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An entry with this name was already written to the archive
    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status carried by this error, if it came from an API response
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Pipeline stage in which an export run failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Authenticating against the console API
    Login,
    /// Creating the output archive file
    CreateZip,
    /// Listing, exporting, and archiving applications
    Apps,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Login => "Login",
            Stage::CreateZip => "Create Zip",
            Stage::Apps => "Apps",
        };
        f.write_str(name)
    }
}

/// Error returned by [`run_export`](crate::exporter::run_export), tagged with the failing stage
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct ExportError {
    /// Stage that failed
    pub stage: Stage,
    /// Underlying error
    #[source]
    pub source: Error,
}

impl ExportError {
    /// Wrap an error with the stage it occurred in
    pub fn new(stage: Stage, source: Error) -> Self {
        Self { stage, source }
    }
}
