//! CSV output writer.

use std::io::Write;
use std::path::Path;

use crate::core::record::Record;
use crate::error::Result;

use super::create_destination;

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Header: `shift_id,email,reaction_emote,reaction_user,bot_msg_ts,reply_text,reply_user,reply_ts`
/// - Null fields: empty cells
/// - Quoting: only where a value needs it (commas, quotes, newlines)
/// - Encoding: UTF-8
///
/// An empty batch still produces the header row.
pub fn write_csv(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let file = create_destination(path.as_ref())?;
    write_csv_to(records, file)
}

/// Writes records as CSV to any writer.
pub fn write_csv_to<W: Write>(records: &[Record], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(writer);

    writer.write_record(Record::headers())?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts records to a CSV string.
///
/// Same format as [`write_csv`], returned in memory.
pub fn to_csv(records: &[Record]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_to(records, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
