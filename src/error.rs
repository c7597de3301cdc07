//! Unified error types for threadpack.
//!
//! This module provides a single [`ThreadpackError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! Errors come in three scopes:
//!
//! - **Field**: an extractor cannot produce a typed value. These are not errors
//!   at all; the field becomes `None` and processing continues.
//! - **Record**: a timestamp cannot be parsed. Normalization of that thread
//!   stops and the batch reports which thread (and window) failed through
//!   [`ThreadpackError::Thread`].
//! - **Batch / terminal**: an incomplete retrieval or an unwritable
//!   destination aborts the whole operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for threadpack operations.
///
/// # Example
///
/// ```rust
/// use threadpack::error::Result;
/// use threadpack::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ThreadpackError>;

/// The error type for all threadpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThreadpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input archive doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to decode a thread archive.
    #[error("Failed to parse thread archive{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// An archive file could not be read.
    #[error("Cannot read archive {}: {source}", path.display())]
    Read {
        /// Archive path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A message timestamp is present but is not a usable number of seconds.
    ///
    /// Fatal for the record being built.
    #[error("Malformed timestamp in {field}: '{value}'")]
    MalformedTimestamp {
        /// Which field was being produced (e.g. "bot_msg_ts")
        field: &'static str,
        /// The raw value as found in the archive
        value: String,
    },

    /// Normalization of one thread in a batch failed.
    ///
    /// Carries the position of the thread and, when known, the retrieval
    /// window, so the window can be re-run by hand.
    #[error("Failed to normalize thread #{index}{}: {source}", window.as_ref().map(|w| format!(" in window {w}")).unwrap_or_default())]
    Thread {
        /// Zero-based position of the thread in its batch
        index: usize,
        /// Retrieval window label, if the batch came from one
        window: Option<String>,
        /// The record-level error
        #[source]
        source: Box<ThreadpackError>,
    },

    /// Fetching a retrieval window failed before any thread was normalized.
    #[error("Failed to fetch window {window}: {source}")]
    Window {
        /// Retrieval window label
        window: String,
        /// The source error
        #[source]
        source: Box<ThreadpackError>,
    },

    /// Upstream retrieval returned a truncated result set.
    #[error("Incomplete retrieval for window {window}: upstream reported more results")]
    IncompleteRetrieval {
        /// Retrieval window label
        window: String,
    },

    /// The output destination could not be created.
    #[error("Cannot write output to {}: {source}", path.display())]
    Destination {
        /// Destination path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The requested format doesn't match anything supported.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in a window range.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A retrieval window label could not be understood.
    #[error("Invalid retrieval window '{input}': {message}")]
    InvalidWindow {
        /// The label that was provided
        input: String,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ThreadpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ThreadpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ThreadpackError {
    /// Creates a parse error for a thread archive.
    pub fn archive_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ThreadpackError::Parse { source, path }
    }

    /// Creates a read error for an archive file.
    pub fn archive_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ThreadpackError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed timestamp error.
    pub fn malformed_timestamp(field: &'static str, value: impl Into<String>) -> Self {
        ThreadpackError::MalformedTimestamp {
            field,
            value: value.into(),
        }
    }

    /// Wraps a record-level error with its position in the batch.
    pub fn in_thread(self, index: usize, window: Option<&str>) -> Self {
        ThreadpackError::Thread {
            index,
            window: window.map(ToString::to_string),
            source: Box::new(self),
        }
    }

    /// Wraps a fetch error with the window being fetched.
    pub fn in_window(self, window: impl Into<String>) -> Self {
        ThreadpackError::Window {
            window: window.into(),
            source: Box::new(self),
        }
    }

    /// Creates an incomplete retrieval error.
    pub fn incomplete(window: impl Into<String>) -> Self {
        ThreadpackError::IncompleteRetrieval {
            window: window.into(),
        }
    }

    /// Creates a destination error.
    pub fn destination(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ThreadpackError::Destination {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ThreadpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ThreadpackError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid window error.
    pub fn invalid_window(input: impl Into<String>, message: impl Into<String>) -> Self {
        ThreadpackError::InvalidWindow {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is, or wraps, an IO error.
    pub fn is_io(&self) -> bool {
        match self {
            ThreadpackError::Io(_) | ThreadpackError::Read { .. } => true,
            ThreadpackError::Window { source, .. } => source.is_io(),
            _ => false,
        }
    }

    /// Returns `true` if this is, or wraps, an archive parse error.
    pub fn is_parse(&self) -> bool {
        match self {
            ThreadpackError::Parse { .. } => true,
            ThreadpackError::Window { source, .. } => source.is_parse(),
            _ => false,
        }
    }

    /// Returns `true` if upstream retrieval was incomplete.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ThreadpackError::IncompleteRetrieval { .. })
    }

    /// Returns `true` if this is, or wraps, a malformed timestamp.
    pub fn is_malformed_timestamp(&self) -> bool {
        match self {
            ThreadpackError::MalformedTimestamp { .. } => true,
            ThreadpackError::Thread { source, .. } => source.is_malformed_timestamp(),
            _ => false,
        }
    }

    /// Returns the window label carried by the error, if any.
    pub fn window(&self) -> Option<&str> {
        match self {
            ThreadpackError::Window { window, .. }
            | ThreadpackError::IncompleteRetrieval { window } => Some(window),
            ThreadpackError::Thread { window, .. } => window.as_deref(),
            _ => None,
        }
    }

    /// Returns the index of the failing thread for batch errors.
    pub fn thread_index(&self) -> Option<usize> {
        match self {
            ThreadpackError::Thread { index, .. } => Some(*index),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
