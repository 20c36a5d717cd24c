//! Message-start grammar and text normalization.
//!
//! A message-start line has the shape
//!
//! ```text
//! <date>, <time> - <sender>: <content>
//! ```
//!
//! where `<date>` is `D/M/YY` or `D/M/YYYY` (one or two digit day and
//! month), `<time>` is `H:MM` with an optional am/pm marker, and `<sender>`
//! runs up to the first `": "`. Lines that don't have this shape are
//! continuation lines.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// `NARROW NO-BREAK SPACE`, written before am/pm markers by some locales.
const NARROW_NBSP: char = '\u{202F}';
/// `LEFT-TO-RIGHT MARK`, sprinkled around names and timestamps.
const LRM: char = '\u{200E}';
const BOM: char = '\u{FEFF}';

static MESSAGE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{1,2}/[0-9]{1,2}/(?:[0-9]{4}|[0-9]{2})), ([0-9]{1,2}:[0-9]{2}(?: ?[aApP][mM])?) - (.+?):(?: (.*))?$",
    )
    .expect("message-start pattern is valid")
});

/// Captured groups of a message-start line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStart<'a> {
    /// Raw date, e.g. `15/01/24`
    pub date: &'a str,
    /// Raw time, e.g. `10:30 pm`
    pub time: &'a str,
    /// Sender display name
    pub sender: &'a str,
    /// Remainder of the line (may be empty)
    pub content: &'a str,
}

/// Matches `line` against the message-start grammar.
///
/// The line should already be trimmed; a trailing `"Sender:"` with nothing
/// after it is accepted as a start with empty content.
///
/// # Example
///
/// ```
/// use chatlens::parsing::match_message_start;
///
/// let start = match_message_start("1/2/24, 9:05 pm - Alice: Hi: there").unwrap();
/// assert_eq!(start.date, "1/2/24");
/// assert_eq!(start.time, "9:05 pm");
/// assert_eq!(start.sender, "Alice");
/// assert_eq!(start.content, "Hi: there");
///
/// assert!(match_message_start("just some text").is_none());
/// ```
pub fn match_message_start(line: &str) -> Option<MessageStart<'_>> {
    let caps = MESSAGE_START.captures(line)?;
    Some(MessageStart {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str(),
        sender: caps.get(3)?.as_str(),
        content: caps.get(4).map_or("", |m| m.as_str()),
    })
}

/// Removes locale rendering artifacts that break the literal separators.
///
/// Narrow no-break spaces become ordinary spaces, left-to-right marks are
/// dropped, and a leading byte-order mark is stripped. Text without any of
/// them is returned borrowed.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    if !text.contains([NARROW_NBSP, LRM]) {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.chars()
            .filter_map(|c| match c {
                NARROW_NBSP => Some(' '),
                LRM => None,
                other => Some(other),
            })
            .collect(),
    )
}
