//! Centralized error handling for iptv-sentinel
//!
//! This module unifies error types across the scraping and probing layers and
//! encodes the propagation policy: failures local to one source or one channel
//! are absorbed and recorded, only a run that produces no usable output at all
//! surfaces as an error.
//!
//! # Error Categories
//!
//! - **Source Errors**: playlist fetching, non-M3U content, source-list I/O
//! - **Storage Errors**: channel store and report file persistence
//! - **Run Errors**: whole-run failures (no sources usable, no channels)
//!
//! Probe failures are deliberately absent here: every probe terminates in a
//! `ProbeResult` with a `dead`/`unstable` status, never in an `Err`.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for Storage Results
pub type StorageResult<T> = Result<T, StorageError>;
