//! Message reconstruction from raw log text.
//!
//! The [`Reconstructor`] turns the text of a chat export into an ordered
//! list of [`MessageRecord`]s in a single forward pass:
//!
//! 1. Normalize locale artifacts (narrow no-break spaces, LTR marks).
//! 2. Split into physical lines.
//! 3. Fold over the lines with one pending record. A line that matches the
//!    message-start grammar *and* has a valid timestamp closes the pending
//!    record and opens a new one; any other line is appended to the pending
//!    record's content.
//! 4. Close the pending record at the end.
//!
//! Malformed input never fails the parse. A start line with an impossible
//! date or time degrades to a continuation line, lines before the first
//! record are dropped, and platform notices are removed.
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::parse;
//!
//! let log = "\
//! 1/1/24, 10:00 - Alice: Hello
//! world
//! 1/1/24, 10:01 - Bob: Hi!";
//!
//! let records = parse(log);
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].content, "Hello\nworld");
//! assert_eq!(records[1].sender, "Bob");
//! ```

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{debug, trace};

use crate::MessageRecord;
use crate::archive::{ArchiveSelection, RawDocument, resolve_path};
use crate::config::ParseConfig;
use crate::error::{ChatlensError, Result};
use crate::parsing::{NoticeMatcher, match_message_start, normalize, parse_timestamp};

/// Parses log text with the default configuration.
///
/// Returns an empty vector if nothing in the text looks like a message.
pub fn parse(text: &str) -> Vec<MessageRecord> {
    Reconstructor::new().parse_str(text)
}

/// Cooperative cancellation flag, checked once per line by
/// [`Reconstructor::parse_checked`].
///
/// Clones share the same flag, so one can be handed to another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag that is not raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once the flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Line counters collected during a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Physical lines read
    pub lines: usize,
    /// Records produced
    pub records: usize,
    /// Lines appended to a preceding record
    pub continuations: usize,
    /// Start-shaped lines whose timestamp was invalid (counted in `continuations` too)
    pub degraded_starts: usize,
    /// Lines with no record to attach to
    pub dropped: usize,
    /// Notice lines removed, including continuation lines of notice records
    pub notices: usize,
}

/// Unified trait for chat log parsers.
///
/// Implementors provide [`parse_str`](Parser::parse_str); documents and
/// files are handled by the default methods.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Parses log text into records.
    fn parse_str(&self, text: &str) -> Vec<MessageRecord>;

    /// Parses a resolved document.
    fn parse_document(&self, doc: &RawDocument) -> Vec<MessageRecord> {
        let records = self.parse_str(doc.text());
        debug!(origin = doc.origin(), records = records.len(), "parsed document");
        records
    }

    /// Reads, resolves and parses a `.txt` or `.zip` file.
    fn parse_path(&self, path: &Path, selection: &ArchiveSelection) -> Result<Vec<MessageRecord>> {
        let doc = resolve_path(path, selection)?;
        Ok(self.parse_document(&doc))
    }
}

/// What the fold is currently building.
#[derive(Debug, Default)]
enum Pending {
    /// Nothing yet; orphan lines are dropped
    #[default]
    Empty,
    /// A record that continuation lines are appended to
    Open(MessageRecord),
    /// A notice record; its continuation lines are dropped with it
    Suppressed,
}

/// State threaded through the line fold.
#[derive(Debug, Default)]
struct FoldState {
    records: Vec<MessageRecord>,
    pending: Pending,
    stats: ParseStats,
}

impl FoldState {
    fn flush(&mut self) {
        if let Pending::Open(record) = std::mem::take(&mut self.pending) {
            self.records.push(record);
        }
    }

    fn finish(mut self) -> (Vec<MessageRecord>, ParseStats) {
        self.flush();
        self.stats.records = self.records.len();
        (self.records, self.stats)
    }
}

/// Reconstructs message records from chat log text.
///
/// # Example
///
/// ```rust
/// use chatlens::config::{ContinuationJoin, ParseConfig};
/// use chatlens::parser::{Parser, Reconstructor};
///
/// let parser = Reconstructor::with_config(
///     ParseConfig::new().with_join(ContinuationJoin::Space),
/// );
/// let records = parser.parse_str("1/1/24, 10:00 - Alice: Hello\n  world  ");
/// assert_eq!(records[0].content, "Hello world");
/// ```
#[derive(Debug, Clone)]
pub struct Reconstructor {
    config: ParseConfig,
    notices: NoticeMatcher,
    cancel: Option<CancelFlag>,
}

impl Default for Reconstructor {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconstructor {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParseConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        let notices = NoticeMatcher::new(&config.system_notices, &config.group_events);
        Self {
            config,
            notices,
            cancel: None,
        }
    }

    /// Attaches a cancel flag consulted by [`parse_checked`](Self::parse_checked).
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses text and also returns line counters.
    pub fn parse_with_stats(&self, text: &str) -> (Vec<MessageRecord>, ParseStats) {
        let text = normalize(text);
        let state = text
            .lines()
            .fold(FoldState::default(), |state, line| self.step(state, line));
        let (records, stats) = state.finish();
        debug!(?stats, "reconstructed messages");
        (records, stats)
    }

    /// Parses text, treating an empty result as an error.
    ///
    /// Returns [`ChatlensError::Cancelled`] as soon as the cancel flag is
    /// seen raised (checked before every line), and
    /// [`ChatlensError::EmptyResult`] when no record was produced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::parser::Reconstructor;
    ///
    /// let err = Reconstructor::new().parse_checked("no messages here").unwrap_err();
    /// assert!(err.is_empty_result());
    /// ```
    pub fn parse_checked(&self, text: &str) -> Result<Vec<MessageRecord>> {
        let text = normalize(text);
        let state = text.lines().try_fold(FoldState::default(), |state, line| {
            if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
                debug!(lines = state.stats.lines, "parse cancelled");
                return Err(ChatlensError::Cancelled);
            }
            Ok(self.step(state, line))
        })?;

        let (records, stats) = state.finish();
        debug!(?stats, "reconstructed messages");
        if records.is_empty() {
            return Err(ChatlensError::EmptyResult);
        }
        Ok(records)
    }

    /// Advances the fold by one physical line.
    fn step(&self, mut state: FoldState, raw_line: &str) -> FoldState {
        state.stats.lines += 1;
        let line = raw_line.trim();

        let start = match_message_start(line);
        let opened = start.and_then(|s| {
            let ts = parse_timestamp(s.date, s.time, &self.config);
            if ts.is_none() {
                trace!(line, "invalid timestamp, treating as continuation");
                state.stats.degraded_starts += 1;
            }
            ts.map(|ts| (s, ts))
        });

        let notice = match &start {
            Some(start) => self.notices.is_notice_start(start),
            None => self.notices.is_notice_line(line),
        };
        if notice {
            state.stats.notices += 1;
            if opened.is_some() {
                state.flush();
                state.pending = Pending::Suppressed;
            }
            return state;
        }

        match opened {
            Some((start, timestamp)) => {
                state.flush();
                state.pending = Pending::Open(MessageRecord::new(
                    timestamp,
                    start.sender,
                    start.content.trim(),
                ));
            }
            None => match &mut state.pending {
                Pending::Open(record) => {
                    record.content.push(self.config.join.separator());
                    record.content.push_str(line);
                    state.stats.continuations += 1;
                }
                Pending::Suppressed => state.stats.notices += 1,
                Pending::Empty => {
                    trace!(line, "dropping line with no preceding message");
                    state.stats.dropped += 1;
                }
            },
        }

        state
    }
}

impl Parser for Reconstructor {
    fn name(&self) -> &'static str {
        "Reconstructor"
    }

    fn parse_str(&self, text: &str) -> Vec<MessageRecord> {
        self.parse_with_stats(text).0
    }
}
