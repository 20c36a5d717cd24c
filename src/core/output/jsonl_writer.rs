//! JSON Lines output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::MessageRecord;
use crate::error::Result;

/// Writes records as JSON Lines, one compact object per line.
///
/// # Format
/// ```text
/// {"datetime":"2024-01-01T10:00:00Z","sender":"Alice","content":"Hello"}
/// {"datetime":"2024-01-01T10:01:00Z","sender":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(records: &[MessageRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Converts records to a JSON Lines string.
pub fn to_jsonl(records: &[MessageRecord]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}
