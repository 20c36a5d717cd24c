//! Configuration types for the log parser.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{ContinuationJoin, ParseConfig};
//! use chatlens::parser::Reconstructor;
//!
//! let config = ParseConfig::new()
//!     .with_join(ContinuationJoin::Space)
//!     .with_year_pivot(50);
//!
//! let parser = Reconstructor::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Banner phrases the exporting platform writes on its own behalf.
///
/// Matched case-insensitively. On a message-start line the sender or the
/// content must begin with the phrase; elsewhere it may appear anywhere.
pub const DEFAULT_SYSTEM_NOTICES: &[&str] = &[
    "Messages and calls are end-to-end encrypted",
    "Messages to this group are now secured with end-to-end encryption",
    "Сообщения и звонки защищены сквозным шифрованием",
];

/// Group event phrases, written by the platform without a sender.
///
/// Only lines that are not message starts are checked against these, so
/// user messages quoting them are kept.
pub const DEFAULT_GROUP_EVENTS: &[&str] = &[
    "Your security code with",
    "security code changed",
    "created group",
    "changed the subject from",
    "changed this group's icon",
    "changed the group description",
    "deleted this group's icon",
    "joined using this group's invite link",
    "changed their phone number",
    "turned on disappearing messages",
    "turned off disappearing messages",
];

/// How continuation lines are joined onto the message they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContinuationJoin {
    /// Join with `\n`, keeping the original line structure (default)
    #[default]
    Newline,
    /// Join with a single space
    Space,
}

impl ContinuationJoin {
    /// Returns the separator inserted between fragments.
    pub fn separator(self) -> char {
        match self {
            ContinuationJoin::Newline => '\n',
            ContinuationJoin::Space => ' ',
        }
    }
}

impl std::str::FromStr for ContinuationJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newline" | "nl" => Ok(ContinuationJoin::Newline),
            "space" => Ok(ContinuationJoin::Space),
            _ => Err(format!(
                "Unknown join style: '{}'. Expected one of: newline, space",
                s
            )),
        }
    }
}

/// Configuration for chat log parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParseConfig;
///
/// let config = ParseConfig::new()
///     .with_system_notice("pinned a message")
///     .with_month_first_fallback(false);
/// assert!(config.system_notices.iter().any(|n| n == "pinned a message"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Separator for continuation lines (default: newline)
    pub join: ContinuationJoin,

    /// Banner phrases that mark a line as a platform notice (default: [`DEFAULT_SYSTEM_NOTICES`])
    pub system_notices: Vec<String>,

    /// Group event phrases, checked only on lines that do not open a message
    /// (default: [`DEFAULT_GROUP_EVENTS`])
    pub group_events: Vec<String>,

    /// Highest two-digit year mapped into the 2000s; larger ones go to the 1900s (default: 68)
    pub year_pivot: u32,

    /// Read `D/M` as `M/D` when only that reading is a valid date (default: true)
    ///
    /// With the fallback on, `5/13/24` resolves to 13 May 2024 instead of
    /// degrading to a continuation line. Exports from month-first locales
    /// parse this way, at the cost of accepting a month above 12 in the
    /// second position. Turn it off for strict day-first reading.
    pub month_first_fallback: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            join: ContinuationJoin::Newline,
            system_notices: DEFAULT_SYSTEM_NOTICES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            group_events: DEFAULT_GROUP_EVENTS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            year_pivot: 68,
            month_first_fallback: true,
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the continuation join style.
    #[must_use]
    pub fn with_join(mut self, join: ContinuationJoin) -> Self {
        self.join = join;
        self
    }

    /// Adds one more banner phrase.
    #[must_use]
    pub fn with_system_notice(mut self, notice: impl Into<String>) -> Self {
        self.system_notices.push(notice.into());
        self
    }

    /// Replaces the whole banner list.
    #[must_use]
    pub fn with_system_notices<I, S>(mut self, notices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.system_notices = notices.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one more group event phrase.
    #[must_use]
    pub fn with_group_event(mut self, event: impl Into<String>) -> Self {
        self.group_events.push(event.into());
        self
    }

    /// Replaces the whole group event list.
    #[must_use]
    pub fn with_group_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the two-digit year pivot. Values above 99 are clamped.
    #[must_use]
    pub fn with_year_pivot(mut self, pivot: u32) -> Self {
        self.year_pivot = pivot.min(99);
        self
    }

    /// Enables or disables the month-first fallback for impossible day-first dates.
    #[must_use]
    pub fn with_month_first_fallback(mut self, enabled: bool) -> Self {
        self.month_first_fallback = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_default() {
        let config = ParseConfig::default();
        assert_eq!(config.join, ContinuationJoin::Newline);
        assert_eq!(config.year_pivot, 68);
        assert!(config.month_first_fallback);
        assert!(
            config
                .system_notices
                .iter()
                .any(|n| n == "Messages and calls are end-to-end encrypted")
        );
    }

    #[test]
    fn test_parse_config_builder() {
        let config = ParseConfig::new()
            .with_join(ContinuationJoin::Space)
            .with_year_pivot(150)
            .with_system_notices(["only this"]);

        assert_eq!(config.join, ContinuationJoin::Space);
        assert_eq!(config.year_pivot, 99);
        assert_eq!(config.system_notices, vec!["only this".to_string()]);
    }

    #[test]
    fn test_group_events_separate_from_banners() {
        let config = ParseConfig::default();
        assert!(config.group_events.iter().any(|e| e == "created group"));
        assert!(!config.system_notices.iter().any(|n| n == "created group"));

        let config = ParseConfig::new()
            .with_group_events(Vec::<String>::new())
            .with_group_event("pinned a message");
        assert_eq!(config.group_events, vec!["pinned a message".to_string()]);
    }

    #[test]
    fn test_month_first_fallback_toggle() {
        assert!(ParseConfig::default().month_first_fallback);
        assert!(!ParseConfig::new().with_month_first_fallback(false).month_first_fallback);
    }

    #[test]
    fn test_parse_config_partial_serde() {
        let config: ParseConfig = serde_json::from_str(r#"{"year_pivot":30}"#).unwrap();
        assert_eq!(config.year_pivot, 30);
        assert_eq!(config.group_events, ParseConfig::default().group_events);
    }

    #[test]
    fn test_join_separator() {
        assert_eq!(ContinuationJoin::Newline.separator(), '\n');
        assert_eq!(ContinuationJoin::Space.separator(), ' ');
    }

    #[test]
    fn test_join_from_str() {
        assert_eq!("newline".parse(), Ok(ContinuationJoin::Newline));
        assert_eq!("SPACE".parse(), Ok(ContinuationJoin::Space));
        assert!("tab".parse::<ContinuationJoin>().is_err());
    }

    #[test]
    fn test_parse_config_serde() {
        let config = ParseConfig::new().with_join(ContinuationJoin::Space);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""join":"space""#));

        let back: ParseConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
