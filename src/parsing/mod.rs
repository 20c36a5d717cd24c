//! Line-level parsing utilities.
//!
//! This module contains the building blocks the
//! [`Reconstructor`](crate::parser::Reconstructor) folds over a log:
//!
//! - [`line`] - text normalization and the message-start grammar
//! - [`timestamp`] - day-first date and 12/24-hour time resolution
//! - [`notice`] - recognition of platform-generated notice lines

pub mod line;
pub mod notice;
pub mod timestamp;

// Re-export commonly used items
pub use line::{MessageStart, match_message_start, normalize};
pub use notice::NoticeMatcher;
pub use timestamp::{expand_year, parse_date, parse_time, parse_timestamp};
