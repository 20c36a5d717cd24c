//! Filter message records by date range and sender.
//!
//! Filters never modify their input: each call returns a new vector holding
//! clones of the matching records, in their original order.
//!
//! | Filter | Function / Method | Description |
//! |--------|-------------------|-------------|
//! | Date range | [`filter_by_date`], [`FilterConfig::with_date_from`], [`FilterConfig::with_date_to`] | Inclusive on the date component |
//! | Senders | [`filter_by_senders`], [`FilterConfig::with_senders`] | Exact name match against a set |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters, distinct_senders};
//! use chatlens::parser::parse;
//!
//! # fn main() -> chatlens::Result<()> {
//! let records = parse("\
//! 31/12/23, 23:59 - Alice: Old
//! 1/1/24, 10:00 - Bob: New
//! 2/1/24, 10:00 - Alice: Newer");
//!
//! assert_eq!(distinct_senders(&records), vec!["Alice", "Bob"]);
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-01-01")?
//!     .with_senders(["Alice"]);
//! let filtered = apply_filters(&records, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "Newer");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds compare calendar dates, so the whole end day is included
//! - Sender matching is exact (display names are free text)
//! - Multiple filters are combined with AND logic

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::MessageRecord;
use crate::error::{ChatlensError, Result};

/// Returns the records whose date lies in `start..=end`.
///
/// An empty range (`start > end`) yields no records.
pub fn filter_by_date(records: &[MessageRecord], start: NaiveDate, end: NaiveDate) -> Vec<MessageRecord> {
    records
        .iter()
        .filter(|r| (start..=end).contains(&r.date()))
        .cloned()
        .collect()
}

/// Returns the records sent by any of `senders`.
pub fn filter_by_senders<S: AsRef<str>>(records: &[MessageRecord], senders: &[S]) -> Vec<MessageRecord> {
    records
        .iter()
        .filter(|r| senders.iter().any(|s| s.as_ref() == r.sender))
        .cloned()
        .collect()
}

/// Returns every sender name once, in lexicographic order.
pub fn distinct_senders(records: &[MessageRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.sender.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Returns the earliest and latest message dates, or `None` for no records.
///
/// These are the natural default bounds for a date-range picker.
pub fn date_bounds(records: &[MessageRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let first = records.iter().map(MessageRecord::date).min()?;
    let last = records.iter().map(MessageRecord::date).max()?;
    Some((first, last))
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date_arg(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Configuration for filtering records by date and sender.
///
/// Filters are combined with AND logic: a record must match all active
/// filters to be included in the result.
///
/// # Examples
///
/// ```
/// use chatlens::core::filter::FilterConfig;
///
/// # fn main() -> chatlens::Result<()> {
/// let by_date = FilterConfig::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?;
///
/// let by_sender = FilterConfig::new().with_sender("Alice").with_sender("Bob");
/// assert!(by_sender.has_sender_filter());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only records on or after this date.
    pub from: Option<NaiveDate>,

    /// Include only records on or before this date.
    pub to: Option<NaiveDate>,

    /// Include only records from these senders.
    pub senders: Option<BTreeSet<String>>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all records pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive), format `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.from = Some(parse_date_arg(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive), format `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.to = Some(parse_date_arg(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_from(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_to(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    /// Adds one sender to the allowed set.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.senders
            .get_or_insert_with(BTreeSet::new)
            .insert(sender.into());
        self
    }

    /// Adds several senders to the allowed set.
    #[must_use]
    pub fn with_senders<I, S>(mut self, senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.senders
            .get_or_insert_with(BTreeSet::new)
            .extend(senders.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_sender_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Returns `true` if the sender filter is active.
    pub fn has_sender_filter(&self) -> bool {
        self.senders.is_some()
    }

    /// Returns `true` if `record` passes every active filter.
    pub fn matches(&self, record: &MessageRecord) -> bool {
        let date = record.date();
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        if let Some(ref senders) = self.senders {
            if !senders.contains(&record.sender) {
                return false;
            }
        }
        true
    }
}

/// Filters records with the provided configuration.
///
/// Returns a new vector containing only records that match all active
/// filters, in their original order.
pub fn apply_filters(records: &[MessageRecord], config: &FilterConfig) -> Vec<MessageRecord> {
    records.iter().filter(|r| config.matches(r)).cloned().collect()
}
