//! Message record produced by the log parser.
//!
//! A [`MessageRecord`] is one logical chat message: the moment it was sent,
//! who sent it, and its (possibly multi-line) body. The parser emits records
//! in the order their opening lines appear in the log and never mutates them
//! afterwards; filters and statistics only read them.
//!
//! # Examples
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
//! let record = MessageRecord::new(ts, "Alice", "Hello");
//! assert_eq!(record.sender(), "Alice");
//! assert_eq!(record.date().to_string(), "2024-01-01");
//! ```
//!
//! ## Serialization
//!
//! Records serialize with the table column names `datetime`, `sender` and
//! `content`:
//!
//! ```
//! use chatlens::MessageRecord;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
//! let json = serde_json::to_string(&MessageRecord::new(ts, "Alice", "Hi"))?;
//! assert_eq!(json, r#"{"datetime":"2024-01-01T10:00:00Z","sender":"Alice","content":"Hi"}"#);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single message reconstructed from a chat log.
///
/// | Field | Column | Description |
/// |-------|--------|-------------|
/// | `timestamp` | `datetime` | Local send time of the opening line, stored as UTC |
/// | `sender` | `sender` | Display name exactly as written before the first `": "` |
/// | `content` | `content` | Message body, continuation lines joined in |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// When the message was sent.
    ///
    /// Chat exports carry no time zone, so the local wall-clock time is kept
    /// as-is in UTC.
    #[serde(rename = "datetime")]
    pub timestamp: DateTime<Utc>,

    /// Display name of the author. Not validated against any roster.
    pub sender: String,

    /// Text content of the message.
    ///
    /// May contain newlines when the message spanned several physical lines.
    pub content: String,
}

impl MessageRecord {
    /// Creates a new record.
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Returns the send time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the calendar date of the send time.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Returns `true` if this record's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 21, 30, 0).unwrap()
    }

    #[test]
    fn test_record_accessors() {
        let record = MessageRecord::new(ts(), "Alice", "Hello there");
        assert_eq!(record.timestamp(), ts());
        assert_eq!(record.sender(), "Alice");
        assert_eq!(record.content(), "Hello there");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_word_count() {
        assert_eq!(MessageRecord::new(ts(), "A", "one two\nthree").word_count(), 3);
        assert_eq!(MessageRecord::new(ts(), "A", "").word_count(), 0);
    }

    #[test]
    fn test_is_empty() {
        assert!(MessageRecord::new(ts(), "A", "").is_empty());
        assert!(MessageRecord::new(ts(), "A", " \n ").is_empty());
        assert!(!MessageRecord::new(ts(), "A", "x").is_empty());
    }

    #[test]
    fn test_serde_column_names() {
        let record = MessageRecord::new(ts(), "Bob", "Hi");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""datetime":"2024-06-15T21:30:00Z""#));
        assert!(!json.contains("timestamp"));

        let back: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
