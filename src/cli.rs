//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - Output format options, convertible to
//!   [`format::OutputFormat`](crate::format::OutputFormat)
//!
//! Arguments map onto [`ExtractConfig`] through [`Args::extract_config`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ExtractConfig;
use crate::parsing::TimeZoneMode;

/// Flatten chat thread archives into one row per thread.
#[derive(Parser, Debug, Clone)]
#[command(name = "threadpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    threadpack days_data/first-jobs_1651363200_1651449600.json
    threadpack days_data/ -o tables --format jsonl
    threadpack days_data/ --channel first-jobs --after 2022-05-01 --before 2022-05-08
    threadpack archive.json --utc --parallel")]
pub struct Args {
    /// Archive files, or directories of *.json archives
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Directory for output tables
    #[arg(short, long, value_name = "DIR", default_value = "out")]
    pub output_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Channel to read day windows for (window mode)
    #[arg(long, value_name = "NAME", requires_all = ["after", "before"])]
    pub channel: Option<String>,

    /// First day of the window range, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "channel")]
    pub after: Option<String>,

    /// Day after the window range, exclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "channel")]
    pub before: Option<String>,

    /// Render timestamps in UTC instead of the local time zone
    #[arg(long)]
    pub utc: bool,

    /// Fill bot_msg_ts even when the bot message has no reaction
    #[arg(long)]
    pub bot_ts_always: bool,

    /// Normalize threads in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl Args {
    /// Builds the extraction settings selected by the flags.
    pub fn extract_config(&self) -> ExtractConfig {
        let zone = if self.utc {
            TimeZoneMode::Utc
        } else {
            TimeZoneMode::Local
        };
        ExtractConfig::new()
            .with_time_zone(zone)
            .with_bot_ts_without_reaction(self.bot_ts_always)
            .with_parallel(self.parallel)
    }

    /// Returns `true` when a channel window range was requested.
    pub fn is_window_mode(&self) -> bool {
        self.channel.is_some()
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-delimited table (default)
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one record per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
