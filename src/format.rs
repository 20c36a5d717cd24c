//! Output format selection.
//!
//! [`OutputFormat`] names the table formats records can be written in and
//! dispatches to the writers in [`crate::core::output`]. It has no CLI
//! dependency; the binary maps its own argument enum onto it.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatlens::Result<()> {
//! use chatlens::format::{OutputFormat, to_format_string};
//! use chatlens::parser::parse;
//!
//! let records = parse("1/1/24, 10:00 - Alice: Hello!");
//!
//! let format = OutputFormat::from_path("chat.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let text = to_format_string(&records, format)?;
//! assert!(text.starts_with(r#"{"datetime""#));
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MessageRecord;
use crate::error::{ChatlensError, Result};

/// Table format for parsed records.
///
/// # Example
///
/// ```rust
/// use chatlens::format::OutputFormat;
///
/// let format: OutputFormat = "ndjson".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited CSV with a `datetime;sender;content` header.
    #[default]
    Csv,

    /// Pretty-printed JSON array.
    Json,

    /// JSON Lines, one object per record. Also accepted as `ndjson`.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Returns the cargo feature that compiles this format's writer.
    pub fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// Detects the format from a file extension, case-insensitively.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/CHAT.CSV").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("chat.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        ext.parse().map_err(|_| {
            ChatlensError::invalid_format(
                "output",
                format!("unknown file extension '.{ext}', expected one of: csv, json, jsonl"),
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ChatlensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatlensError::invalid_format(
                "output",
                format!("unknown format '{s}', expected one of: csv, json, jsonl, ndjson"),
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> ChatlensError {
    ChatlensError::invalid_format(
        "output",
        format!(
            "{format} output requires the '{}' feature",
            format.required_feature()
        ),
    )
}

/// Writes records to `path` in the given format.
///
/// # Errors
///
/// Returns an error if the format's feature is not compiled in or the file
/// cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[MessageRecord],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Renders records as a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(records: &[MessageRecord], format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}
