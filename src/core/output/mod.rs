//! Output format writers.
//!
//! Every writer emits the same eight fields in the same order
//! (see [`HEADERS`](crate::core::record::HEADERS)):
//! - [`write_csv`] / [`to_csv`] - comma-delimited table with a header row, nulls as empty cells - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty JSON array, nulls as `null` - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON object per line - requires `json-output` feature
//!
//! | Format | Use Case |
//! |--------|----------|
//! | CSV | Spreadsheets, the downstream analysis table |
//! | JSON | Structured data, APIs |
//! | JSONL | Streaming, appending runs together |
//!
//! The `write_*` functions create (or truncate) the destination file. A
//! destination that cannot be created is reported as
//! [`ThreadpackError::Destination`](crate::ThreadpackError::Destination).
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> threadpack::Result<()> {
//! use threadpack::core::output::{to_csv, write_csv, write_jsonl};
//! use threadpack::Record;
//!
//! let records = vec![Record::new().with_shift_id(42).with_email("jane@example.com")];
//!
//! write_csv(&records, "threads.csv")?;
//! write_jsonl(&records, "threads.jsonl")?;
//!
//! let csv_string = to_csv(&records)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv, write_csv_to};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(any(feature = "csv-output", feature = "json-output"))]
fn create_destination(path: &std::path::Path) -> crate::Result<std::fs::File> {
    std::fs::File::create(path).map_err(|e| crate::ThreadpackError::destination(path, e))
}
