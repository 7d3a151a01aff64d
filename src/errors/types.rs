//! Error type definitions for iptv-sentinel
//!
//! This module defines all error types used throughout the application,
//! providing a hierarchical error system that makes debugging and error
//! handling more straightforward.

use thiserror::Error;

/// Top-level application error type
///
/// This enum represents all possible errors that can occur in the application.
/// It uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Storage layer errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Whole-run failures: the run could not produce any usable output
    #[error("Run failed: {message}")]
    RunFailed { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Source handling specific errors
///
/// One of these aborts a single source, never the batch; the scraper converts
/// an all-sources-failed batch into [`AppError::RunFailed`].
#[derive(Error, Debug)]
pub enum SourceError {
    /// Network connection timeouts
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// HTTP errors from external sources
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Transport-level fetch failures
    #[error("Fetch failed: {url} - {message}")]
    FetchFailed { url: String, message: String },

    /// Content that does not look like an M3U playlist
    #[error("Not an M3U playlist: {url}")]
    NotM3u { url: String },

    /// Source list file problems
    #[error("Source list error: {path} - {message}")]
    SourceList { path: String, message: String },
}

/// Storage layer specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem failures
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Data serialization/deserialization failures
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Atomic rename of the freshly written file failed
    #[error("Persist failed: {path} - {message}")]
    PersistFailed { path: String, message: String },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a run-failed error
    pub fn run_failed<S: Into<String>>(message: S) -> Self {
        Self::RunFailed {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a fetch-failed error
    pub fn fetch_failed<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: message.into(),
        }
    }
}
