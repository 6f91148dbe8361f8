//! Error types for ventanilla.
//!
//! This module defines all error types used throughout the ventanilla crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordKind;

/// The main error type for ventanilla operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to read a collection file.
    #[error("failed to read collection at {path}: {source}")]
    CollectionRead {
        /// Path to the collection file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A collection file exists but does not contain a valid JSON array.
    #[error("malformed collection at {path}: {source}")]
    CollectionParse {
        /// Path to the collection file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write a collection file back to disk.
    #[error("failed to write collection at {path}: {source}")]
    CollectionWrite {
        /// Path to the collection file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An update targeted an id that is not present in the collection.
    #[error("{kind} {id} not found")]
    RecordNotFound {
        /// Kind of record (and thus collection) that was searched.
        kind: RecordKind,
        /// The id that was requested.
        id: i64,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Client Errors ===
    /// An HTTP request to the intake API failed to complete.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The intake API answered with an error status.
    #[error("server returned {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message taken from the error body.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for ventanilla operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given collection and id.
    #[must_use]
    pub fn not_found(kind: RecordKind, id: i64) -> Self {
        Self::RecordNotFound { kind, id }
    }

    /// Check if this error is a not-found outcome (404-equivalent).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }
}
