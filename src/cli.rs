//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`JoinMode`] - How continuation lines are joined
//!
//! `Args` converts into the library's own configuration types, so the
//! binary stays a thin shell around [`crate::archive`], [`crate::parser`]
//! and [`crate::core`]:
//!
//! ```rust
//! use chatlens::archive::ArchiveSelection;
//! use chatlens::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatlens", "chat.zip", "--member", "Chat with Bob.txt"]);
//! assert_eq!(
//!     args.selection(),
//!     ArchiveSelection::Member("Chat with Bob.txt".to_string())
//! );
//! ```

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::archive::ArchiveSelection;
use crate::config::{ContinuationJoin, ParseConfig};
use crate::core::FilterConfig;
use crate::error::Result;

/// Default output file stem when `--output` is not given.
pub const DEFAULT_OUTPUT_STEM: &str = "chat";

/// Turn WhatsApp-style chat exports (.txt or .zip) into a clean message
/// table, or summarize who talked when.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("pick").args(["member", "largest", "first"])))]
#[command(group(ArgGroup::new("mode").args(["list_users", "summary"])))]
#[command(after_help = "EXAMPLES:
    chatlens \"WhatsApp Chat with Bob.txt\"
    chatlens export.zip -o bob.jsonl
    chatlens export.zip --member \"WhatsApp Chat with Bob.txt\"
    chatlens chat.txt --from 2024-01-01 --to 2024-06-30 --user Alice
    chatlens chat.txt --summary --top 5
    chatlens chat.txt --list-users")]
pub struct Args {
    /// Path to the chat export (.txt or .zip)
    pub input: PathBuf,

    /// Path to output file [default: chat.<format>]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format [default: from --output extension, else csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Read this member of a zip archive
    #[arg(long, value_name = "NAME")]
    pub member: Option<String>,

    /// Read the largest .txt member of a zip archive
    #[arg(long)]
    pub largest: bool,

    /// Read the first .txt member of a zip archive
    #[arg(long)]
    pub first: bool,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Keep messages from this sender (repeatable)
    #[arg(short, long = "user", value_name = "NAME")]
    pub users: Vec<String>,

    /// Separator for continuation lines
    #[arg(long, value_enum, default_value = "newline")]
    pub join: JoinMode,

    /// Never reinterpret dates as month-first
    #[arg(long)]
    pub day_first_only: bool,

    /// Print distinct senders, one per line, instead of writing a table
    #[arg(long)]
    pub list_users: bool,

    /// Print activity statistics as JSON instead of writing a table
    #[arg(long)]
    pub summary: bool,

    /// Number of entries in the emoji and word rankings
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Returns the archive member selection policy.
    pub fn selection(&self) -> ArchiveSelection {
        if let Some(ref member) = self.member {
            ArchiveSelection::Member(member.clone())
        } else if self.largest {
            ArchiveSelection::Largest
        } else if self.first {
            ArchiveSelection::First
        } else {
            ArchiveSelection::Strict
        }
    }

    /// Returns the parser configuration.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new()
            .with_join(self.join.into())
            .with_month_first_fallback(!self.day_first_only)
    }

    /// Returns the filter configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`](crate::ChatlensError::InvalidDate)
    /// if `--from` or `--to` is not `YYYY-MM-DD`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut config = FilterConfig::new();
        if let Some(ref from) = self.from {
            config = config.with_date_from(from)?;
        }
        if let Some(ref to) = self.to {
            config = config.with_date_to(to)?;
        }
        if !self.users.is_empty() {
            config = config.with_senders(self.users.iter().cloned());
        }
        Ok(config)
    }

    /// Resolves the output format: `--format`, then the `--output`
    /// extension, then CSV.
    pub fn output_format(&self) -> crate::format::OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|p| crate::format::OutputFormat::from_path(p).ok())
            .unwrap_or_default()
    }

    /// Resolves the output path, defaulting to `chat.<ext>`.
    pub fn output_path(&self) -> PathBuf {
        match self.output {
            Some(ref path) => path.clone(),
            None => Path::new(DEFAULT_OUTPUT_STEM).with_extension(self.output_format().extension()),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines, one record per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

/// Continuation join options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum JoinMode {
    /// Keep line breaks (default)
    #[default]
    #[value(alias = "nl")]
    Newline,

    /// Join with a single space
    Space,
}

impl From<JoinMode> for ContinuationJoin {
    fn from(mode: JoinMode) -> ContinuationJoin {
        match mode {
            JoinMode::Newline => ContinuationJoin::Newline,
            JoinMode::Space => ContinuationJoin::Space,
        }
    }
}
