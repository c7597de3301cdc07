//! # Threadpack
//!
//! A Rust library for flattening chat-platform thread archives into one
//! analysis row per thread.
//!
//! ## Overview
//!
//! A bot posts a message per event into a channel; people react to it and
//! reply in a thread. Threadpack reads those threads (a head message followed
//! by its replies) and produces a fixed 8-field [`Record`] for each:
//!
//! | Field | Taken from |
//! |-------|------------|
//! | `shift_id` | trailing id of the first url in the head message |
//! | `email` | first `:user@domain\|` token in the head message |
//! | `reaction_emote`, `reaction_user` | head's first reaction group |
//! | `bot_msg_ts` | head timestamp, normalized |
//! | `reply_text`, `reply_user`, `reply_ts` | the first reply |
//!
//! Missing data becomes a null field. A timestamp that is present but not a
//! number fails its record, and the batch reports which thread failed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threadpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let page = load_archive("days_data/first-jobs_1651363200_1651449600.json")?;
//!     let records = run_page(&page, "first-jobs_1651363200_1651449600", &ExtractConfig::new())?;
//!
//!     write_csv(&records, "first-jobs.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Day windows
//!
//! ```rust,no_run
//! use threadpack::prelude::*;
//! use threadpack::window::{DAY, parse_day};
//!
//! fn main() -> Result<()> {
//!     let windows = RetrievalWindow::plan(
//!         "first-jobs",
//!         parse_day("2022-05-01", TimeZoneMode::Utc)?,
//!         parse_day("2022-05-08", TimeZoneMode::Utc)?,
//!         DAY,
//!     );
//!     let source = ArchiveDirSource::new("days_data");
//!     let records = run_windows(&source, &windows, &ExtractConfig::new().utc())?;
//!     println!("{} threads", records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`message`] - Raw platform messages ([`RawMessage`], [`Reaction`], [`Thread`])
//! - [`parsing`] - Field extractors and timestamp normalization
//! - [`core`] - Records, normalization, the batch pipeline, stats and writers
//!   - [`core::record`] - [`Record`]
//!   - [`core::normalizer`] - [`normalize`](core::normalize), [`normalize_with`](core::normalize_with)
//!   - [`core::pipeline`] - [`run`](core::run), [`run_page`](core::run_page), [`run_windows`](core::run_windows)
//!   - [`core::output`] - CSV, JSON and JSONL writers
//! - [`source`] - [`ThreadSource`](source::ThreadSource) and archive loading
//! - [`window`] - [`RetrievalWindow`](window::RetrievalWindow) planning and labels
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`config`] - [`ExtractConfig`](config::ExtractConfig)
//! - [`error`] - [`ThreadpackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parsing;
pub mod source;
pub mod window;

// Re-export the main types at the crate root for convenience
pub use crate::core::record::Record;
pub use error::{Result, ThreadpackError};
pub use message::{RawMessage, Reaction, Thread};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use threadpack::prelude::*;
/// ```
pub mod prelude {
    // Data types
    pub use crate::{RawMessage, Reaction, Record, Thread};

    // Error types
    pub use crate::error::{Result, ThreadpackError};

    // Configuration
    pub use crate::config::ExtractConfig;
    pub use crate::parsing::TimeZoneMode;

    // Normalization and batches
    pub use crate::core::{ProcessingStats, normalize, normalize_with, run, run_page, run_windows};

    // Sources and windows
    pub use crate::source::{ArchiveDirSource, RetrievalPage, ThreadSource, load_archive};
    pub use crate::window::RetrievalWindow;

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, write_to_format};
}
