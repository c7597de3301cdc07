//! JSON output writer.

use std::io::Write;
use std::path::Path;

use crate::core::record::Record;
use crate::error::Result;

use super::create_destination;

/// Writes records to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {
///     "shift_id": 42,
///     "email": "jane@example.com",
///     "reaction_emote": null,
///     ...
///   }
/// ]
/// ```
pub fn write_json(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(records)?;
    let mut file = create_destination(path.as_ref())?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts records to a JSON array string.
pub fn to_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
