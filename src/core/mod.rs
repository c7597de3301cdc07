//! Core processing logic for threadpack.
//!
//! This module contains:
//! - [`record`] - The 8-field output row
//! - [`normalizer`] - One thread to one record
//! - [`pipeline`] - Ordered batch normalization over pages and windows
//! - [`stats`] - Fill-rate statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> threadpack::Result<()> {
//! use threadpack::config::ExtractConfig;
//! use threadpack::core::{run, to_csv};
//! use threadpack::source::parse_archive_str;
//!
//! let page = parse_archive_str(r#"[[{"text": "<https://x/shift/7>"}]]"#)?;
//! let records = run(&page.threads, &ExtractConfig::new())?;
//! assert!(to_csv(&records)?.contains("\n7,"));
//! # Ok(())
//! # }
//! ```

pub mod normalizer;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod stats;

// Re-export main types for convenience
pub use normalizer::{normalize, normalize_with};
pub use pipeline::{run, run_page, run_window, run_windows};
pub use record::{HEADERS, Record};
pub use stats::ProcessingStats;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv, write_csv_to};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
