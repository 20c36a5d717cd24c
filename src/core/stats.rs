//! Activity statistics over parsed records.
//!
//! Every function here is a pure read over a record slice. Orderings are
//! fully deterministic: counts descend and ties fall back to the natural
//! order of the key.
//!
//! # Example
//!
//! ```
//! use chatlens::core::stats::{ChatSummary, sender_ranking};
//! use chatlens::parser::parse;
//!
//! let records = parse("\
//! 1/1/24, 10:00 - Alice: Good morning 😀
//! 1/1/24, 10:05 - Bob: morning
//! 1/1/24, 10:06 - Alice: coffee? 😀☕");
//!
//! assert_eq!(sender_ranking(&records), vec![("Alice".to_string(), 2), ("Bob".to_string(), 1)]);
//!
//! let summary = ChatSummary::from_records(&records, 5);
//! assert_eq!(summary.total_messages, 3);
//! assert_eq!(summary.top_emojis[0], ('😀', 2));
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use chrono::{DateTime, Timelike, Utc};
use regex::Regex;
use serde::Serialize;

use crate::MessageRecord;

/// Placeholder phrases the exporter writes for attachments.
pub const MEDIA_PLACEHOLDERS: &[&str] = &["media omitted", "omitted media"];

/// Common English words excluded from [`top_words`].
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "ever", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "like", "me", "more", "most", "my", "myself", "no",
    "nor", "not", "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our",
    "ours", "ourselves", "out", "over", "own", "same", "shall", "she", "should", "since", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Message counts per `YYYY-MM` month, split by sender.
pub fn monthly_activity(records: &[MessageRecord]) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut months: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for record in records {
        let month = record.timestamp.format("%Y-%m").to_string();
        *months
            .entry(month)
            .or_default()
            .entry(record.sender.clone())
            .or_default() += 1;
    }
    months
}

/// Message counts per hour of day (`0..=23`), split by sender.
///
/// Only hours with at least one message appear.
pub fn hourly_activity(records: &[MessageRecord]) -> BTreeMap<u32, BTreeMap<String, usize>> {
    let mut hours: BTreeMap<u32, BTreeMap<String, usize>> = BTreeMap::new();
    for record in records {
        *hours
            .entry(record.timestamp.hour())
            .or_default()
            .entry(record.sender.clone())
            .or_default() += 1;
    }
    hours
}

/// Senders ordered by message count, most active first.
pub fn sender_ranking(records: &[MessageRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.sender.as_str()).or_default() += 1;
    }
    rank(counts.into_iter().map(|(s, c)| (s.to_string(), c)).collect())
}

/// The `n` most frequent emoji across all message bodies.
pub fn top_emojis(records: &[MessageRecord], n: usize) -> Vec<(char, usize)> {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in records.iter().flat_map(|r| r.content.chars()).filter(|&c| is_emoji(c)) {
        *counts.entry(c).or_default() += 1;
    }
    let mut ranked = rank(counts.into_iter().collect());
    ranked.truncate(n);
    ranked
}

/// Mean words per message for each sender, highest first.
pub fn average_words(records: &[MessageRecord]) -> Vec<(String, f64)> {
    let mut totals: HashMap<&str, (usize, usize)> = HashMap::new();
    for record in records {
        let entry = totals.entry(record.sender.as_str()).or_default();
        entry.0 += record.word_count();
        entry.1 += 1;
    }

    let mut averages: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(sender, (words, messages))| (sender.to_string(), words as f64 / messages as f64))
        .collect();
    averages.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    averages
}

/// The `n` most frequent words, lowercased, without stopwords or media
/// placeholders.
pub fn top_words(records: &[MessageRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let mut text = record.content.to_lowercase();
        for phrase in MEDIA_PLACEHOLDERS {
            text = text.replace(phrase, "");
        }
        for word in WORD_RE.find_iter(&text).map(|m| m.as_str()) {
            if !STOPWORDS.contains(&word) {
                *counts.entry(word.to_string()).or_default() += 1;
            }
        }
    }
    let mut ranked = rank(counts.into_iter().collect());
    ranked.truncate(n);
    ranked
}

/// Emoji modifiers (Fitzpatrick skin tones), only meaningful after a base emoji.
const SKIN_TONES: std::ops::RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// Returns `true` if `c` is an emoji in the Unicode emoji data set.
///
/// Code points whose emoji form needs a trailing variation selector, such
/// as `©` or `🅰`, count too. Skin-tone modifiers, variation selectors,
/// zero-width joiners and plain symbols like `✓` do not.
pub fn is_emoji(c: char) -> bool {
    if c.is_ascii() || SKIN_TONES.contains(&c) {
        return false;
    }
    let single = c.to_string();
    emojis::get(&single).is_some() || emojis::get(&format!("{c}\u{FE0F}")).is_some()
}

fn rank<K: Ord>(mut counts: Vec<(K, usize)>) -> Vec<(K, usize)> {
    counts.sort_by(|a, b| Reverse(a.1).cmp(&Reverse(b.1)).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// All statistics for one record slice, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatSummary {
    /// Number of records.
    pub total_messages: usize,
    /// Timestamp of the earliest record.
    pub first_message: Option<DateTime<Utc>>,
    /// Timestamp of the latest record.
    pub last_message: Option<DateTime<Utc>>,
    /// Distinct senders in lexicographic order.
    pub senders: Vec<String>,
    pub sender_ranking: Vec<(String, usize)>,
    pub monthly_activity: BTreeMap<String, BTreeMap<String, usize>>,
    pub hourly_activity: BTreeMap<u32, BTreeMap<String, usize>>,
    pub average_words: Vec<(String, f64)>,
    pub top_emojis: Vec<(char, usize)>,
    pub top_words: Vec<(String, usize)>,
}

impl ChatSummary {
    /// Computes every statistic, keeping the `top_n` entries of the
    /// emoji and word rankings.
    pub fn from_records(records: &[MessageRecord], top_n: usize) -> Self {
        Self {
            total_messages: records.len(),
            first_message: records.iter().map(|r| r.timestamp).min(),
            last_message: records.iter().map(|r| r.timestamp).max(),
            senders: super::filter::distinct_senders(records),
            sender_ranking: sender_ranking(records),
            monthly_activity: monthly_activity(records),
            hourly_activity: hourly_activity(records),
            average_words: average_words(records),
            top_emojis: top_emojis(records, top_n),
            top_words: top_words(records, top_n),
        }
    }

    /// Serializes the summary as pretty-printed JSON.
    #[cfg(feature = "json-output")]
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(sender: &str, content: &str, month: u32, hour: u32) -> MessageRecord {
        let ts = Utc.with_ymd_and_hms(2024, month, 1, hour, 0, 0).unwrap();
        MessageRecord::new(ts, sender, content)
    }

    fn sample() -> Vec<MessageRecord> {
        vec![
            record("Alice", "Hello there friend 😂", 1, 9),
            record("Bob", "<Media omitted>", 1, 9),
            record("Alice", "pizza tonight? 😂😂 🍕", 2, 21),
            record("Carol", "Pizza pizza", 2, 21),
            record("Bob", "ok", 3, 0),
        ]
    }

    #[test]
    fn test_monthly_activity() {
        let months = monthly_activity(&sample());
        assert_eq!(months.keys().collect::<Vec<_>>(), vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(months["2024-01"]["Alice"], 1);
        assert_eq!(months["2024-02"].len(), 2);
        assert_eq!(months["2024-03"]["Bob"], 1);
    }

    #[test]
    fn test_hourly_activity() {
        let hours = hourly_activity(&sample());
        assert_eq!(hours.keys().copied().collect::<Vec<_>>(), vec![0, 9, 21]);
        assert_eq!(hours[&21]["Carol"], 1);
    }

    #[test]
    fn test_sender_ranking_ties_by_name() {
        let ranking = sender_ranking(&sample());
        assert_eq!(
            ranking,
            vec![
                ("Alice".to_string(), 2),
                ("Bob".to_string(), 2),
                ("Carol".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_top_emojis() {
        let emojis = top_emojis(&sample(), 10);
        assert_eq!(emojis, vec![('😂', 3), ('🍕', 1)]);
        assert_eq!(top_emojis(&sample(), 1).len(), 1);
    }

    #[test]
    fn test_average_words() {
        let averages = average_words(&sample());
        assert_eq!(averages[0].0, "Alice");
        assert!((averages[0].1 - 4.0).abs() < f64::EPSILON);
        assert_eq!(averages[1].0, "Carol");
        assert!((averages[2].1 - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_words_skips_stopwords_and_media() {
        let words = top_words(&sample(), 3);
        assert_eq!(words[0], ("pizza".to_string(), 3));
        assert!(words.iter().all(|(w, _)| w != "media" && w != "omitted" && w != "there"));
    }

    #[test]
    fn test_is_emoji() {
        assert!(is_emoji('😀'));
        assert!(is_emoji('☕'));
        assert!(!is_emoji('a'));
        assert!(!is_emoji('1'));
        assert!(!is_emoji('\u{FE0F}'));
        assert!(!is_emoji('\u{200D}'));
        assert!(!is_emoji('\u{1F3FB}'));
    }

    #[test]
    fn test_is_emoji_outside_pictograph_blocks() {
        for c in ['🀄', '🅰', '🈁', '©', '®', '‼', '⌚'] {
            assert!(is_emoji(c), "{c:?} should be an emoji");
        }
    }

    #[test]
    fn test_dingbats_that_are_not_emoji() {
        for c in ['✓', '☐', '➔', '♩'] {
            assert!(!is_emoji(c), "{c:?} should not be an emoji");
        }
    }

    #[test]
    fn test_top_emojis_skips_plain_symbols() {
        let records = vec![record("A", "✓ ✓ ✓ ☐ 🀄", 1, 10)];
        assert_eq!(top_emojis(&records, 5), vec![('🀄', 1)]);
    }

    #[test]
    fn test_summary_empty() {
        let summary = ChatSummary::from_records(&[], 10);
        assert_eq!(summary.total_messages, 0);
        assert!(summary.first_message.is_none());
        assert!(summary.sender_ranking.is_empty());
    }

    #[test]
    fn test_summary_bounds() {
        let summary = ChatSummary::from_records(&sample(), 10);
        assert_eq!(summary.total_messages, 5);
        assert_eq!(summary.first_message, Some(sample()[0].timestamp));
        assert_eq!(summary.last_message, Some(sample()[4].timestamp));
        assert_eq!(summary.senders, vec!["Alice", "Bob", "Carol"]);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_summary_json() {
        let json = ChatSummary::from_records(&sample(), 2).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_messages"], 5);
        assert_eq!(value["top_emojis"][0][0], "😂");
        assert_eq!(value["monthly_activity"]["2024-02"]["Carol"], 1);
    }
}
