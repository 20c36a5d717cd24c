//! # Chatlens
//!
//! A Rust library for turning WhatsApp-style chat exports into an ordered
//! table of messages, with helpers to filter and summarize them.
//!
//! ## Overview
//!
//! An export arrives as a plain `.txt` log or as a `.zip` archive holding
//! one. Each message starts with a line of the form
//!
//! ```text
//! <date>, <time> - <sender>: <content>
//! ```
//!
//! where dates are day-first (`D/M/YY` or `D/M/YYYY`) and times are 24-hour
//! or 12-hour with `am`/`pm`. Lines that do not open a message continue the
//! previous one; platform notices such as the encryption banner are dropped.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//! use chrono::NaiveDate;
//!
//! let records = parse("\
//! 1/1/24, 10:00 - Alice: Hello
//! world
//! 2/1/24, 9:15 pm - Bob: Hi!");
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].content, "Hello\nworld");
//! assert_eq!(distinct_senders(&records), vec!["Alice", "Bob"]);
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! assert_eq!(filter_by_date(&records, day, day)[0].sender, "Bob");
//! ```
//!
//! ## Archives
//!
//! ```rust,no_run
//! use chatlens::archive::{ArchiveSelection, resolve_path};
//! use chatlens::parser::{Parser, Reconstructor};
//!
//! # fn main() -> chatlens::Result<()> {
//! let document = resolve_path("export.zip".as_ref(), &ArchiveSelection::Largest)?;
//! let records = Reconstructor::new().parse_document(&document);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`archive`] - Input resolution: `.txt` decoding and `.zip` member selection
//! - [`parser`] - Message reconstruction ([`parse`], [`Reconstructor`](parser::Reconstructor))
//! - [`parsing`] - Line grammar, timestamp and notice helpers
//! - [`config`] - [`ParseConfig`](config::ParseConfig)
//! - [`core`] - Consumers of parsed records
//!   - [`core::filter`] - [`filter_by_date`](core::filter_by_date), [`distinct_senders`](core::distinct_senders), [`FilterConfig`](core::FilterConfig)
//!   - [`core::stats`] - Activity statistics, [`ChatSummary`](core::ChatSummary)
//!   - [`core::output`] - CSV, JSON and JSONL writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) dispatch
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - [`ChatlensError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::MessageRecord;
pub use parser::parse;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;

    pub use crate::error::{ChatlensError, Result};

    pub use crate::archive::{ArchiveSelection, RawDocument, resolve, resolve_path, resolve_with};
    pub use crate::config::{ContinuationJoin, ParseConfig};
    pub use crate::parser::{CancelFlag, ParseStats, Parser, Reconstructor, parse};

    pub use crate::core::filter::{
        FilterConfig, apply_filters, distinct_senders, filter_by_date, filter_by_senders,
    };
    pub use crate::core::stats::ChatSummary;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, write_to_format};
}
