//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::MessageRecord;
use crate::error::{ChatlensError, Result};

/// Column names, in output order.
pub const CSV_HEADER: [&str; 3] = ["datetime", "sender", "content"];

/// Timestamp layout used in the `datetime` column.
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes records to a CSV file with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `datetime`, `sender`, `content`
/// - Datetime: `YYYY-MM-DD HH:MM:SS`
/// - Multi-line content is quoted, newlines preserved
/// - Encoding: UTF-8
pub fn write_csv(records: &[MessageRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(records, file)
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], but returns a `String`.
pub fn to_csv(records: &[MessageRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ChatlensError::invalid_format("CSV", e.to_string()))
}

fn write_records<W: Write>(records: &[MessageRecord], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let datetime = record.timestamp.format(CSV_DATETIME_FORMAT).to_string();
        writer.write_record([datetime.as_str(), record.sender.as_str(), record.content.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}
