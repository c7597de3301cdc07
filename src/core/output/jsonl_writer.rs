//! JSON Lines (JSONL) output writer.
//!
//! One record per line, so several runs can be concatenated and a consumer can
//! stream them without loading the whole file.

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::record::Record;
use crate::error::Result;

use super::create_destination;

/// Writes records to a JSONL file.
///
/// ```jsonl
/// {"shift_id":42,"email":"jane@example.com","reaction_emote":null,...}
/// {"shift_id":null,"email":null,"reaction_emote":"eyes",...}
/// ```
pub fn write_jsonl(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let file = create_destination(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[Record]) -> Result<String> {
    let mut output = String::new();
    for record in records {
        output.push_str(&serde_json::to_string(record)?);
        output.push('\n');
    }
    Ok(output)
}
