//! Integration tests: upload blob → log text → records → consumers.

use std::fs;
use std::io::{Cursor, Write};

use chatlens::archive::{ArchiveSelection, archive_candidates, resolve, resolve_path, resolve_with};
use chatlens::core::filter::{FilterConfig, apply_filters, date_bounds};
use chatlens::core::stats::ChatSummary;
use chatlens::prelude::*;
use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

const FAMILY_LOG: &str = "\
12/03/2024, 08:00 - Messages and calls are end-to-end encrypted. No one outside of this chat, not even WhatsApp, can read or listen to them. Tap to learn more.
12/03/2024, 08:01 - Mum created group \"Family\"
12/03/2024, 08:02 - Mum: Good morning everyone ☀️
12/03/2024, 08:15 - Dad: Morning!
Who is cooking tonight?
13/03/2024, 19:40 - Sam: <Media omitted>
13/03/2024, 19:41 - Sam: me 🍝
14/03/2024, 07:05 - Mum: Thanks for dinner 😍😍
14/03/2024, 07:06 - Dad changed this group's icon
";

fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =========================================================================
// Archive resolution
// =========================================================================

#[test]
fn test_txt_upload_end_to_end() {
    let text = resolve(FAMILY_LOG.as_bytes(), "WhatsApp Chat with Family.txt").unwrap();
    let records = parse(&text);

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].sender, "Mum");
    assert_eq!(records[0].content, "Good morning everyone ☀️");
    assert_eq!(records[1].content, "Morning!\nWho is cooking tonight?");
    assert_eq!(
        records[1].timestamp,
        Utc.with_ymd_and_hms(2024, 3, 12, 8, 15, 0).unwrap()
    );
    assert!(records.iter().all(|r| !r.content.contains("changed this group's icon")));
}

#[test]
fn test_single_member_zip_decodes() {
    let blob = build_zip(&[
        ("WhatsApp Chat with Family.txt", FAMILY_LOG),
        ("IMG-20240313-WA0001.jpg", "not really a jpeg"),
    ]);
    let doc = resolve_with(&blob, "export.zip", &ArchiveSelection::Strict).unwrap();
    assert_eq!(doc.origin(), "WhatsApp Chat with Family.txt");
    assert_eq!(doc.text(), FAMILY_LOG);
}

#[test]
fn test_ambiguous_zip_lists_both_names() {
    let blob = build_zip(&[("a.txt", "1/1/24, 10:00 - A: x"), ("b.txt", "1/1/24, 10:00 - B: y")]);
    let err = resolve(&blob, "export.zip").unwrap_err();

    assert!(err.is_ambiguous());
    assert_eq!(err.candidates().unwrap(), ["a.txt", "b.txt"]);
    assert!(err.to_string().contains("a.txt"));
    assert!(err.to_string().contains("b.txt"));
}

#[test]
fn test_ambiguous_zip_retry_with_member() {
    let blob = build_zip(&[("a.txt", "1/1/24, 10:00 - A: x"), ("b.txt", "1/1/24, 10:00 - B: y")]);
    let err = resolve(&blob, "export.zip").unwrap_err();
    let pick = err.candidates().unwrap()[1].clone();

    let doc = resolve_with(&blob, "export.zip", &ArchiveSelection::Member(pick)).unwrap();
    let records = parse(doc.text());
    assert_eq!(records[0].sender, "B");
}

#[test]
fn test_selection_policies() {
    let blob = build_zip(&[
        ("short.txt", "1/1/24, 10:00 - A: x"),
        ("long.txt", "1/1/24, 10:00 - B: a much longer body"),
    ]);

    let largest = resolve_with(&blob, "e.zip", &ArchiveSelection::Largest).unwrap();
    assert_eq!(largest.origin(), "long.txt");

    let first = resolve_with(&blob, "e.zip", &ArchiveSelection::First).unwrap();
    assert_eq!(first.origin(), "short.txt");

    let missing = resolve_with(&blob, "e.zip", &ArchiveSelection::Member("other.txt".into()))
        .unwrap_err();
    assert!(missing.is_no_log_found());
}

#[test]
fn test_zip_without_txt() {
    let blob = build_zip(&[("photo.jpg", "..."), ("notes.md", "...")]);
    let err = resolve(&blob, "export.zip").unwrap_err();
    assert!(err.is_no_log_found());
    assert!(archive_candidates(&blob).unwrap().is_empty());
}

#[test]
fn test_macos_metadata_ignored() {
    let blob = build_zip(&[
        ("chat.txt", FAMILY_LOG),
        ("__MACOSX/._chat.txt", "resource fork"),
    ]);
    assert_eq!(archive_candidates(&blob).unwrap(), vec!["chat.txt"]);
    assert!(resolve(&blob, "export.ZIP").is_ok());
}

#[test]
fn test_unsupported_and_corrupt_inputs() {
    assert!(resolve(b"%PDF", "chat.pdf").unwrap_err().is_unsupported_format());
    assert!(resolve(b"no extension", "chat").unwrap_err().is_unsupported_format());
    assert!(matches!(
        resolve(b"definitely not a zip", "export.zip").unwrap_err(),
        ChatlensError::Archive(_)
    ));
}

#[test]
fn test_invalid_utf8_is_encoding_error() {
    let err = resolve(&[0x31, 0xFF, 0xFE, 0x00], "chat.txt").unwrap_err();
    assert!(err.is_encoding());

    let blob = {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("chat.txt", SimpleFileOptions::default()).unwrap();
        writer.write_all(&[0xC3, 0x28]).unwrap();
        writer.finish().unwrap().into_inner()
    };
    assert!(resolve(&blob, "export.zip").unwrap_err().is_encoding());
}

#[test]
fn test_resolve_path_from_disk() {
    let dir = tempdir().unwrap();
    let txt = dir.path().join("WhatsApp Chat.txt");
    fs::write(&txt, FAMILY_LOG).unwrap();
    let zip_path = dir.path().join("export.zip");
    fs::write(&zip_path, build_zip(&[("inner.txt", FAMILY_LOG)])).unwrap();

    let doc = resolve_path(&txt, &ArchiveSelection::Strict).unwrap();
    assert_eq!(doc.origin(), "WhatsApp Chat.txt");

    let doc = resolve_path(&zip_path, &ArchiveSelection::Strict).unwrap();
    assert_eq!(doc.origin(), "inner.txt");

    let err = resolve_path(&dir.path().join("missing.txt"), &ArchiveSelection::Strict).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_parser_trait_parse_path() {
    let dir = tempdir().unwrap();
    let zip_path = dir.path().join("export.zip");
    fs::write(&zip_path, build_zip(&[("chat.txt", FAMILY_LOG)])).unwrap();

    let parser: Box<dyn Parser> = Box::new(Reconstructor::new());
    let records = parser.parse_path(&zip_path, &ArchiveSelection::Strict).unwrap();
    assert_eq!(records.len(), 5);
}

// =========================================================================
// Consumers
// =========================================================================

#[test]
fn test_filter_and_senders() {
    let records = parse(FAMILY_LOG);

    assert_eq!(distinct_senders(&records), vec!["Dad", "Mum", "Sam"]);
    assert_eq!(date_bounds(&records), Some((date(2024, 3, 12), date(2024, 3, 14))));

    let day = filter_by_date(&records, date(2024, 3, 13), date(2024, 3, 13));
    assert_eq!(day.len(), 2);
    assert!(day.iter().all(|r| r.sender == "Sam"));

    let config = FilterConfig::new()
        .with_date_from("2024-03-12")
        .unwrap()
        .with_date_to("2024-03-13")
        .unwrap()
        .with_sender("Mum");
    let filtered = apply_filters(&records, &config);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].content, "Good morning everyone ☀️");
}

#[test]
fn test_filter_by_date_idempotent_on_parsed_log() {
    let records = parse(FAMILY_LOG);
    let (a, b) = (date(2024, 3, 13), date(2024, 3, 14));
    let once = filter_by_date(&records, a, b);
    assert_eq!(filter_by_date(&once, a, b), once);
}

#[test]
fn test_summary_of_parsed_log() {
    let records = parse(FAMILY_LOG);
    let summary = ChatSummary::from_records(&records, 3);

    assert_eq!(summary.total_messages, 5);
    assert_eq!(summary.sender_ranking[0], ("Mum".to_string(), 2));
    assert_eq!(summary.top_emojis[0], ('😍', 2));
    assert_eq!(summary.monthly_activity["2024-03"]["Sam"], 2);
    assert_eq!(summary.hourly_activity[&19]["Sam"], 2);
    assert!(summary.top_words.iter().all(|(w, _)| w != "media" && w != "omitted"));
    assert_eq!(
        summary.last_message,
        Some(Utc.with_ymd_and_hms(2024, 3, 14, 7, 5, 0).unwrap())
    );
}

#[test]
fn test_write_all_formats() {
    let dir = tempdir().unwrap();
    let records = parse(FAMILY_LOG);

    for format in OutputFormat::all() {
        let path = dir.path().join(format!("out.{}", format.extension()));
        write_to_format(&records, &path, *format).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Morning!"), "{format} output missing content");
    }

    let jsonl = fs::read_to_string(dir.path().join("out.jsonl")).unwrap();
    let back: Vec<MessageRecord> = jsonl
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(back, records);
}

#[test]
fn test_parse_checked_reports_empty() {
    let text = resolve(b"just some notes\nwithout timestamps", "notes.txt").unwrap();
    let err = Reconstructor::new().parse_checked(&text).unwrap_err();
    assert!(err.is_empty_result());
}
