//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chatlens::archive::resolve_path;
use chatlens::cli::Args;
use chatlens::core::stats::ChatSummary;
use chatlens::core::{apply_filters, distinct_senders};
use chatlens::format::write_to_format;
use chatlens::parser::Reconstructor;
use chatlens::{ChatlensError, MessageRecord};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "chatlens=warn";

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        if let Some(candidates) = e.candidates() {
            for name in candidates {
                eprintln!("   - {}", name);
            }
            eprintln!("   Re-run with --member <NAME>, --largest or --first.");
        }
        process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Progress output goes to stderr so stdout carries only data.
macro_rules! report {
    ($args:expr, $($fmt:tt)*) => {
        if !$args.quiet {
            eprintln!($($fmt)*);
        }
    };
}

fn run() -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let filter_config = args.filter_config()?;

    report!(args, "🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    report!(args, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    report!(args, "📂 Input:   {}", args.input.display());
    if let Some(ref from) = args.from {
        report!(args, "📅 From:    {}", from);
    }
    if let Some(ref to) = args.to {
        report!(args, "📅 To:      {}", to);
    }
    for user in &args.users {
        report!(args, "👤 User:    {}", user);
    }

    let document = resolve_path(&args.input, &args.selection())?;
    if document.origin() != args.input.file_name().unwrap_or_default().to_string_lossy() {
        report!(args, "🗜️  Member:  {}", document.origin());
    }

    let parse_start = Instant::now();
    let parser = Reconstructor::with_config(args.parse_config());
    let (records, stats) = parser.parse_with_stats(document.text());
    report!(
        args,
        "   Parsed {} messages from {} lines ({:.2}s)",
        stats.records,
        stats.lines,
        parse_start.elapsed().as_secs_f64()
    );
    if stats.notices > 0 || stats.dropped > 0 || stats.degraded_starts > 0 {
        report!(
            args,
            "   Skipped {} notice lines, {} stray lines; {} malformed timestamps merged",
            stats.notices,
            stats.dropped,
            stats.degraded_starts
        );
    }
    if records.is_empty() {
        return Err(ChatlensError::EmptyResult);
    }

    let records: Vec<MessageRecord> = if filter_config.is_active() {
        let filtered = apply_filters(&records, &filter_config);
        report!(args, "   {} messages after filtering", filtered.len());
        filtered
    } else {
        records
    };

    if args.list_users {
        for sender in distinct_senders(&records) {
            println!("{}", sender);
        }
        return Ok(());
    }

    if args.summary {
        println!("{}", ChatSummary::from_records(&records, args.top).to_json_pretty()?);
        return Ok(());
    }

    let format = args.output_format();
    let output_path = args.output_path();
    report!(args, "💾 Writing {} to {}...", format, output_path.display());
    write_to_format(&records, &output_path, format)?;

    report!(
        args,
        "✅ Done! {} messages in {:.2}s",
        records.len(),
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}
