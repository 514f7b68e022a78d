//! Error types for pdf-capture

use std::time::Duration;
use thiserror::Error;

/// Result type alias for pdf-capture
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pdf-capture
#[derive(Error, Debug)]
pub enum Error {
    /// Source path missing or unreadable; raised before the bytes are loaded
    #[error("Unable to access file {path}: {reason}")]
    Access { path: String, reason: String },

    /// Buffer does not decode as a PDF document
    #[error("Provided bytes are not a valid PDF document")]
    InvalidDocument,

    /// Supplied pattern failed to compile
    #[error("Invalid regular expression {pattern:?}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// A capture accessor was called on a parser constructed without a pattern
    #[error("No regular expression was provided at construction")]
    NoPattern,

    /// Attempted mutation of the capture map
    #[error("Capture results are read-only")]
    ReadOnly,

    /// Fault propagated from a background extraction or match stage
    #[error("Extraction failed: {reason}")]
    Extraction { reason: String },

    /// A bounded wait on a background stage elapsed
    #[error("Timed out after {waited:?} waiting for background work")]
    Timeout { waited: Duration },

    /// The shared worker runtime could not be built
    #[error("Worker pool unavailable: {reason}")]
    Worker { reason: String },
}
