//! Configuration for thread extraction.
//!
//! [`ExtractConfig`] is a plain serde-friendly struct with builder methods, so
//! it can be filled from CLI flags, deserialized from a settings file by the
//! caller, or built in code.
//!
//! # Example
//!
//! ```rust
//! use threadpack::config::ExtractConfig;
//! use threadpack::parsing::TimeZoneMode;
//!
//! let config = ExtractConfig::new()
//!     .with_time_zone(TimeZoneMode::Utc)
//!     .with_parallel(true);
//!
//! assert!(!config.bot_ts_without_reaction);
//! ```

use serde::{Deserialize, Serialize};

use crate::parsing::TimeZoneMode;

/// Settings for the thread normalizer and the batch pipeline.
///
/// # Example
///
/// ```rust
/// use threadpack::config::ExtractConfig;
///
/// let config: ExtractConfig = serde_json::from_str(r#"{"time_zone": "utc"}"#)?;
/// assert!(!config.parallel);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Time zone for normalized timestamps (default: local)
    pub time_zone: TimeZoneMode,

    /// Fill `bot_msg_ts` even when the originating message has no reaction
    /// (default: false, the timestamp is tied to the first reaction)
    pub bot_ts_without_reaction: bool,

    /// Normalize threads on a rayon pool; needs the `parallel` feature
    /// (default: false)
    pub parallel: bool,
}

impl ExtractConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time zone for normalized timestamps.
    #[must_use]
    pub fn with_time_zone(mut self, zone: TimeZoneMode) -> Self {
        self.time_zone = zone;
        self
    }

    /// Shorthand for rendering timestamps in UTC.
    #[must_use]
    pub fn utc(self) -> Self {
        self.with_time_zone(TimeZoneMode::Utc)
    }

    /// Decouples `bot_msg_ts` from reaction presence.
    #[must_use]
    pub fn with_bot_ts_without_reaction(mut self, enabled: bool) -> Self {
        self.bot_ts_without_reaction = enabled;
        self
    }

    /// Enables or disables parallel normalization.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}
