//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::MessageRecord;
use crate::error::Result;

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"datetime": "2024-01-01T10:00:00Z", "sender": "Alice", "content": "Hello"},
///   {"datetime": "2024-01-01T10:01:00Z", "sender": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(records: &[MessageRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a JSON array string.
pub fn to_json(records: &[MessageRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
