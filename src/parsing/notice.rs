//! Recognition of platform-generated notice lines.
//!
//! Exports contain lines the platform writes itself. Two phrase lists are
//! used, both matched case-insensitively:
//!
//! - **banners**, such as the end-to-end encryption notice. On a
//!   message-start line they must open the sender or the content; on any
//!   other line they may appear anywhere.
//! - **group events**, such as `created group` or `changed this group's
//!   icon`. The platform writes these without a `Sender: ` prefix, so they
//!   are only looked for on lines that are not message starts. A user who
//!   writes "I created group chat" keeps their message.

use super::line::MessageStart;

/// Case-insensitive matcher over banner and group-event phrases.
///
/// # Example
///
/// ```
/// use chatlens::parsing::{NoticeMatcher, match_message_start};
///
/// let matcher = NoticeMatcher::new(
///     ["Messages and calls are end-to-end encrypted"],
///     ["created group"],
/// );
/// assert!(matcher.is_notice_line("1/1/24, 10:00 - MESSAGES AND CALLS ARE END-TO-END ENCRYPTED."));
/// assert!(matcher.is_notice_line("1/1/24, 10:00 - Alice created group \"Trip\""));
///
/// let start = match_message_start("1/1/24, 10:00 - Alice: I created group chat").unwrap();
/// assert!(!matcher.is_notice_start(&start));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoticeMatcher {
    banners: Vec<String>,
    events: Vec<String>,
}

fn lowered<I, S>(phrases: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

impl NoticeMatcher {
    /// Builds a matcher from banner and group-event phrases. Empty phrases
    /// are ignored.
    pub fn new<B, S, E, T>(banners: B, events: E) -> Self
    where
        B: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            banners: lowered(banners),
            events: lowered(events),
        }
    }

    /// Returns `true` if a line without the message-start shape contains
    /// any banner or group-event phrase.
    pub fn is_notice_line(&self, line: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        let lower = line.to_lowercase();
        self.banners
            .iter()
            .chain(&self.events)
            .any(|p| lower.contains(p.as_str()))
    }

    /// Returns `true` if a message-start line is a platform banner written
    /// in the `Sender: content` shape.
    pub fn is_notice_start(&self, start: &MessageStart<'_>) -> bool {
        if self.banners.is_empty() {
            return false;
        }
        let sender = start.sender.trim().to_lowercase();
        let content = start.content.trim().to_lowercase();
        self.banners
            .iter()
            .any(|p| sender.starts_with(p.as_str()) || content.starts_with(p.as_str()))
    }

    /// Returns the number of phrases in both lists.
    pub fn len(&self) -> usize {
        self.banners.len() + self.events.len()
    }

    /// Returns `true` if no phrases are configured.
    pub fn is_empty(&self) -> bool {
        self.banners.is_empty() && self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_GROUP_EVENTS, DEFAULT_SYSTEM_NOTICES};
    use crate::parsing::match_message_start;

    fn defaults() -> NoticeMatcher {
        NoticeMatcher::new(DEFAULT_SYSTEM_NOTICES, DEFAULT_GROUP_EVENTS)
    }

    fn start(line: &str) -> MessageStart<'_> {
        match_message_start(line).unwrap()
    }

    #[test]
    fn test_default_notice_lines() {
        let matcher = defaults();
        assert!(matcher.is_notice_line(
            "Messages and calls are end-to-end encrypted. No one outside of this chat can read them."
        ));
        assert!(matcher.is_notice_line("12/3/24, 9:00 - Alice created group \"Trip\""));
        assert!(matcher.is_notice_line("12/3/24, 9:00 - Your security code with Bob changed."));
        assert!(matcher.is_notice_line("Сообщения и звонки защищены сквозным шифрованием."));
        assert!(!matcher.is_notice_line("I left my keys at home"));
        assert!(!matcher.is_notice_line("<Media omitted>"));
    }

    #[test]
    fn test_banner_in_sender_shape() {
        let matcher = defaults();
        assert!(matcher.is_notice_start(&start(
            "1/1/24, 10:00 - WhatsApp: Messages and calls are end-to-end encrypted."
        )));
        assert!(matcher.is_notice_start(&start(
            "1/1/24, 10:00 - Messages and calls are end-to-end encrypted. Tap: learn more"
        )));
    }

    #[test]
    fn test_user_messages_quoting_phrases_are_not_notices() {
        let matcher = defaults();
        for line in [
            "1/1/24, 10:00 - Alice: I created group chat for the trip",
            "1/1/24, 10:00 - Alice: created group, check it",
            "1/1/24, 10:00 - Bob: he changed the subject from cats to dogs",
            "1/1/24, 10:00 - Bob: did you know messages and calls are end-to-end encrypted?",
        ] {
            assert!(!matcher.is_notice_start(&start(line)), "{line}");
        }
    }

    #[test]
    fn test_empty_phrases_ignored() {
        let matcher = NoticeMatcher::new(["", "   "], Vec::<String>::new());
        assert!(matcher.is_empty());
        assert!(!matcher.is_notice_line("anything"));
        assert!(!matcher.is_notice_start(&start("1/1/24, 10:00 - A: anything")));
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = NoticeMatcher::new(["Pinned A Message"], ["Left"]);
        assert_eq!(matcher.len(), 2);
        assert!(matcher.is_notice_line("bob pinned a message"));
        assert!(matcher.is_notice_line("Bob LEFT"));
    }
}
