//! Output format writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one record per line - requires `json-output` feature
//!
//! All writers emit the same three columns: `datetime`, `sender`, `content`.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{to_csv, write_json, write_jsonl};
//! use chatlens::parser::parse;
//!
//! let records = parse("1/1/24, 10:00 - Alice: Hello");
//!
//! write_json(&records, "chat.json")?;
//! write_jsonl(&records, "chat.jsonl")?;
//! let csv_string = to_csv(&records)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_DATETIME_FORMAT, CSV_HEADER, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
