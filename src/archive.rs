//! Archive resolver: turn an uploaded blob into the log text to parse.
//!
//! Chat exports arrive either as a plain `.txt` file or as a `.zip` archive
//! holding the log (often next to media files). The declared file name
//! decides which one it is; the bytes are never sniffed.
//!
//! When an archive holds several `.txt` members the choice is not made
//! here. The default [`ArchiveSelection::Strict`] policy fails with
//! [`ChatlensError::AmbiguousArchive`] listing every candidate, and the
//! caller decides: ask the user, pass [`ArchiveSelection::Member`], or use a
//! deterministic policy such as [`ArchiveSelection::Largest`].
//!
//! # Example
//!
//! ```rust
//! use chatlens::archive::resolve;
//!
//! let text = resolve(b"1/1/24, 10:00 - Alice: Hi", "chat.txt")?;
//! assert_eq!(text, "1/1/24, 10:00 - Alice: Hi");
//!
//! assert!(resolve(b"...", "chat.pdf").unwrap_err().is_unsupported_format());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::error::{ChatlensError, Result};

/// Suffix of plain-text chat logs.
pub const TEXT_SUFFIX: &str = ".txt";

/// Suffix of zip containers.
pub const ZIP_SUFFIX: &str = ".zip";

/// Resource-fork directory added by macOS when zipping.
const MACOS_METADATA_DIR: &str = "__MACOSX/";

/// Container kind derived from a declared file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// A bare `.txt` log
    PlainText,
    /// A `.zip` archive holding the log
    Zip,
}

impl ContainerKind {
    /// Detects the kind from the name's suffix (ASCII case-insensitive).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::archive::ContainerKind;
    ///
    /// assert_eq!(ContainerKind::from_name("Chat.TXT"), Some(ContainerKind::PlainText));
    /// assert_eq!(ContainerKind::from_name("export.zip"), Some(ContainerKind::Zip));
    /// assert_eq!(ContainerKind::from_name("export.tar.gz"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        if has_suffix(name, TEXT_SUFFIX) {
            Some(ContainerKind::PlainText)
        } else if has_suffix(name, ZIP_SUFFIX) {
            Some(ContainerKind::Zip)
        } else {
            None
        }
    }

    /// Returns the file extension for this kind (without dot).
    pub fn extension(self) -> &'static str {
        match self {
            ContainerKind::PlainText => "txt",
            ContainerKind::Zip => "zip",
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerKind::PlainText => write!(f, "plain text"),
            ContainerKind::Zip => write!(f, "zip archive"),
        }
    }
}

/// How to pick a log when an archive holds several `.txt` members.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveSelection {
    /// Fail with [`ChatlensError::AmbiguousArchive`] (default)
    #[default]
    Strict,
    /// Take the member with exactly this name
    Member(String),
    /// Take the member with the largest uncompressed size; first one on ties
    Largest,
    /// Take the first member in archive order
    First,
}

/// Decoded log text tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Upload name or archive member name
    pub origin: String,
    /// Decoded UTF-8 text
    pub text: String,
}

impl RawDocument {
    /// Creates a new document.
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }

    /// Returns the origin name.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates over the physical lines.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }

    /// Consumes the document, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// A `.txt` member found in an archive.
#[derive(Debug, Clone)]
struct Candidate {
    index: usize,
    name: String,
    size: u64,
}

/// Resolves a blob to the text of the one chat log it holds.
///
/// Ambiguous archives fail with [`ChatlensError::AmbiguousArchive`].
pub fn resolve(blob: &[u8], declared_name: &str) -> Result<String> {
    resolve_document(blob, declared_name).map(RawDocument::into_text)
}

/// Like [`resolve`] but keeps the origin name.
pub fn resolve_document(blob: &[u8], declared_name: &str) -> Result<RawDocument> {
    resolve_with(blob, declared_name, &ArchiveSelection::Strict)
}

/// Resolves a blob, using `selection` when an archive holds several logs.
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::archive::{ArchiveSelection, resolve_with};
///
/// let blob = std::fs::read("export.zip")?;
/// let doc = resolve_with(&blob, "export.zip", &ArchiveSelection::Largest)?;
/// println!("parsing {}", doc.origin());
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub fn resolve_with(
    blob: &[u8],
    declared_name: &str,
    selection: &ArchiveSelection,
) -> Result<RawDocument> {
    match ContainerKind::from_name(declared_name) {
        Some(ContainerKind::PlainText) => {
            debug!(origin = declared_name, bytes = blob.len(), "decoding plain text log");
            let text = decode(blob, declared_name)?;
            Ok(RawDocument::new(declared_name, text))
        }
        Some(ContainerKind::Zip) => resolve_zip(blob, declared_name, selection),
        None => Err(ChatlensError::unsupported_format(declared_name)),
    }
}

/// Reads a file from disk and resolves it by its file name.
pub fn resolve_path(path: &Path, selection: &ArchiveSelection) -> Result<RawDocument> {
    let blob = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    resolve_with(&blob, &name, selection)
}

/// Lists the `.txt` members of a zip blob in archive order.
///
/// Directories and macOS resource-fork entries are skipped.
pub fn archive_candidates(blob: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(blob))?;
    Ok(collect_candidates(&mut archive)?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

fn resolve_zip(blob: &[u8], archive_name: &str, selection: &ArchiveSelection) -> Result<RawDocument> {
    let mut archive = ZipArchive::new(Cursor::new(blob))?;
    let candidates = collect_candidates(&mut archive)?;
    debug!(
        archive = archive_name,
        entries = archive.len(),
        candidates = candidates.len(),
        "scanned archive"
    );

    let chosen = select(candidates, archive_name, selection)?;

    let mut entry = archive.by_index(chosen.index)?;
    let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
    entry.read_to_end(&mut bytes)?;

    let text = decode(&bytes, &chosen.name)?;
    debug!(member = %chosen.name, bytes = bytes.len(), "resolved archive member");
    Ok(RawDocument::new(chosen.name, text))
}

fn collect_candidates<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name();
        if name.starts_with(MACOS_METADATA_DIR) || !has_suffix(name, TEXT_SUFFIX) {
            continue;
        }
        candidates.push(Candidate {
            index,
            name: name.to_string(),
            size: entry.size(),
        });
    }
    Ok(candidates)
}

fn select(
    candidates: Vec<Candidate>,
    archive_name: &str,
    selection: &ArchiveSelection,
) -> Result<Candidate> {
    if candidates.is_empty() {
        return Err(ChatlensError::no_log_found(archive_name));
    }

    match selection {
        ArchiveSelection::Strict if candidates.len() == 1 => candidates
            .into_iter()
            .next()
            .ok_or_else(|| ChatlensError::no_log_found(archive_name)),
        ArchiveSelection::Strict => {
            let names: Vec<String> = candidates.into_iter().map(|c| c.name).collect();
            warn!(archive = archive_name, candidates = ?names, "archive holds several chat logs");
            Err(ChatlensError::ambiguous(names))
        }
        ArchiveSelection::Member(member) => candidates
            .into_iter()
            .find(|c| &c.name == member)
            .ok_or_else(|| ChatlensError::missing_member(archive_name, member.clone())),
        ArchiveSelection::Largest => candidates
            .into_iter()
            .reduce(|best, c| if c.size > best.size { c } else { best })
            .ok_or_else(|| ChatlensError::no_log_found(archive_name)),
        ArchiveSelection::First => candidates
            .into_iter()
            .next()
            .ok_or_else(|| ChatlensError::no_log_found(archive_name)),
    }
}

fn decode(bytes: &[u8], origin: &str) -> Result<String> {
    let text = std::str::from_utf8(bytes).map_err(|e| ChatlensError::encoding(origin, e))?;
    Ok(text.strip_prefix('\u{FEFF}').unwrap_or(text).to_string())
}

fn has_suffix(name: &str, suffix: &str) -> bool {
    let (name, suffix) = (name.as_bytes(), suffix.as_bytes());
    name.len() >= suffix.len() && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
