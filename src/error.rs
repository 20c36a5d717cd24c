//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers every
//! failure the library reports. Resolution failures come from the
//! [`archive`](crate::archive) module; the parser itself never fails on
//! malformed lines, it only signals [`ChatlensError::EmptyResult`] or
//! [`ChatlensError::Cancelled`] from
//! [`Reconstructor::parse_checked`](crate::parser::Reconstructor::parse_checked).
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Every variant is recoverable**: the caller reports it and lets the
//!   user retry with a different upload

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The declared file name has neither a `.txt` nor a `.zip` suffix.
    #[error("Unsupported file '{name}'. Expected a .txt chat export or a .zip archive containing one")]
    UnsupportedFormat {
        /// The declared name that was rejected
        name: String,
    },

    /// The log text is not valid UTF-8.
    #[error("'{origin}' is not valid UTF-8 text: {source}")]
    Encoding {
        /// Upload name or archive member that failed to decode
        origin: String,
        /// The underlying UTF-8 error
        #[source]
        source: Utf8Error,
    },

    /// The archive holds no usable `.txt` member.
    ///
    /// `member` is set when the caller asked for a specific member that
    /// does not exist among the candidates.
    #[error("No chat log found in '{archive}'{}", member.as_ref().map(|m| format!(" (requested member: {m})")).unwrap_or_default())]
    NoLogFound {
        /// Declared name of the archive
        archive: String,
        /// Member the caller requested, if any
        member: Option<String>,
    },

    /// The archive holds more than one `.txt` member and no selection
    /// policy was given.
    ///
    /// The candidate names are listed in archive order so a caller can
    /// present a choice and retry with
    /// [`ArchiveSelection::Member`](crate::archive::ArchiveSelection::Member).
    #[error("Archive contains {} chat logs, pick one of: {}", candidates.len(), candidates.join(", "))]
    AmbiguousArchive {
        /// Every `.txt` member name found in the archive
        candidates: Vec<String>,
    },

    /// The blob could not be read as a zip archive.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Parsing finished without producing a single message record.
    #[error("No messages could be parsed. The file might not be a supported chat export")]
    EmptyResult,

    /// Parsing stopped because the cancel flag was raised.
    #[error("Parsing was cancelled")]
    Cancelled,

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The requested output format is unknown or not compiled in.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates an unsupported format error.
    pub fn unsupported_format(name: impl Into<String>) -> Self {
        ChatlensError::UnsupportedFormat { name: name.into() }
    }

    /// Creates an encoding error for the given origin.
    pub fn encoding(origin: impl Into<String>, source: Utf8Error) -> Self {
        ChatlensError::Encoding {
            origin: origin.into(),
            source,
        }
    }

    /// Creates a "no log found" error for an archive.
    pub fn no_log_found(archive: impl Into<String>) -> Self {
        ChatlensError::NoLogFound {
            archive: archive.into(),
            member: None,
        }
    }

    /// Creates a "no log found" error for a requested member that is missing.
    pub fn missing_member(archive: impl Into<String>, member: impl Into<String>) -> Self {
        ChatlensError::NoLogFound {
            archive: archive.into(),
            member: Some(member.into()),
        }
    }

    /// Creates an ambiguous archive error listing the candidates.
    pub fn ambiguous(candidates: Vec<String>) -> Self {
        ChatlensError::AmbiguousArchive { candidates }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns the archive candidates if this is an ambiguity error.
    pub fn candidates(&self) -> Option<&[String]> {
        match self {
            ChatlensError::AmbiguousArchive { candidates } => Some(candidates),
            _ => None,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is an unsupported format error.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ChatlensError::UnsupportedFormat { .. })
    }

    /// Returns `true` if this is an encoding error.
    pub fn is_encoding(&self) -> bool {
        matches!(self, ChatlensError::Encoding { .. })
    }

    /// Returns `true` if the archive had no usable log.
    pub fn is_no_log_found(&self) -> bool {
        matches!(self, ChatlensError::NoLogFound { .. })
    }

    /// Returns `true` if the archive had more than one candidate log.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ChatlensError::AmbiguousArchive { .. })
    }

    /// Returns `true` if parsing produced no records.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ChatlensError::EmptyResult)
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
