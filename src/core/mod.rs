//! Consumers of parsed records.
//!
//! This module contains:
//! - [`filter`] - Record filtering by date and sender, distinct senders
//! - [`stats`] - Activity statistics and the [`ChatSummary`] bundle
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{distinct_senders, filter_by_date};
//! use chatlens::parser::parse;
//! use chrono::NaiveDate;
//!
//! let records = parse("\
//! 1/1/24, 10:00 - Alice: Happy new year
//! 2/1/24, 11:00 - Bob: Same to you");
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! assert_eq!(filter_by_date(&records, day, day).len(), 1);
//! assert_eq!(distinct_senders(&records), vec!["Alice", "Bob"]);
//! ```

pub mod filter;
pub mod output;
pub mod stats;

pub use filter::{
    FilterConfig, apply_filters, date_bounds, distinct_senders, filter_by_date, filter_by_senders,
};
pub use stats::ChatSummary;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
