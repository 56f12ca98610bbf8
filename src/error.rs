//! Unified error types for chatstats.
//!
//! Errors come in two tiers:
//!
//! - **Per-line skips** are not errors at all from the caller's point of view.
//!   A transcript line that fails to match, carries a bad date, or belongs to a
//!   system speaker is classified as a [`SkipReason`](crate::core::SkipReason)
//!   and the run continues.
//! - **Run-level failures** are [`ChatstatsError`]: the input file cannot be
//!   opened, a roster file is malformed, an output artifact cannot be written.
//!   These surface immediately and stop the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::core::Analysis;
///
/// fn my_function() -> Result<Analysis> {
///     chatstats::analyze_str("", &chatstats::config::AnalyzerConfig::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all run-level chatstats failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error without a known path (e.g. writing to stdout).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be opened, read or created.
    #[error("Cannot access {}: {source}", path.display())]
    FileAccess {
        /// Path that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Roster configuration is unusable.
    ///
    /// This occurs when:
    /// - A `--member` value has an empty name
    /// - A roster file is not a JSON object of name -> alias list
    /// - Closed-set mode is requested with an empty roster
    #[error("Invalid roster: {message}")]
    InvalidRoster {
        /// Description of what's wrong
        message: String,
    },

    /// JSON parsing/serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error (timeline output).
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The timeline chart could not be drawn or encoded.
    #[cfg(feature = "png-output")]
    #[error("Cannot render chart {}: {message}", path.display())]
    Chart {
        /// Target image path
        path: PathBuf,
        /// Drawing backend message
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a file access error for `path`.
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatstatsError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid roster error.
    pub fn invalid_roster(message: impl Into<String>) -> Self {
        ChatstatsError::InvalidRoster {
            message: message.into(),
        }
    }

    /// Creates a chart rendering error for `path`.
    #[cfg(feature = "png-output")]
    pub fn chart(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatstatsError::Chart {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO or file access error.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ChatstatsError::Io(_) | ChatstatsError::FileAccess { .. }
        )
    }

    /// Returns `true` if this is a roster configuration error.
    pub fn is_invalid_roster(&self) -> bool {
        matches!(self, ChatstatsError::InvalidRoster { .. })
    }
}
