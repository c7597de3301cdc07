//! Platform timestamp normalization.
//!
//! Message timestamps are decimal strings of seconds since the Unix epoch with
//! a microsecond suffix (`"1651400000.000200"`). Records carry them as
//! `YYYY-MM-DD HH:MM:SS` in a configured time zone.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThreadpackError};

/// Output format for normalized timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone used when rendering timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The machine's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl std::fmt::Display for TimeZoneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeZoneMode::Local => write!(f, "local"),
            TimeZoneMode::Utc => write!(f, "UTC"),
        }
    }
}

/// Normalizes a platform timestamp in the local time zone.
///
/// See [`normalize_ts_in`].
pub fn normalize_ts(ts: &str) -> Result<String> {
    normalize_ts_in(ts, TimeZoneMode::Local)
}

/// Normalizes a platform timestamp.
///
/// Fractional seconds are truncated toward zero before conversion.
///
/// # Errors
///
/// Returns [`ThreadpackError::MalformedTimestamp`] when `ts` is not a finite
/// number or lies outside the representable date range.
///
/// # Example
///
/// ```
/// use threadpack::parsing::{TimeZoneMode, normalize_ts_in};
///
/// let ts = normalize_ts_in("1000.9", TimeZoneMode::Utc)?;
/// assert_eq!(ts, "1970-01-01 00:16:40");
///
/// assert!(normalize_ts_in("soon", TimeZoneMode::Utc).is_err());
/// # Ok::<(), threadpack::ThreadpackError>(())
/// ```
pub fn normalize_ts_in(ts: &str, zone: TimeZoneMode) -> Result<String> {
    format_ts(ts, zone).ok_or_else(|| ThreadpackError::malformed_timestamp("ts", ts))
}

/// Normalizes an optional timestamp for a named record field.
///
/// A missing timestamp stays `None`; a present but malformed one is an error
/// naming `field`.
pub(crate) fn normalize_field(
    ts: Option<&str>,
    field: &'static str,
    zone: TimeZoneMode,
) -> Result<Option<String>> {
    ts.map(|raw| {
        format_ts(raw, zone).ok_or_else(|| ThreadpackError::malformed_timestamp(field, raw))
    })
    .transpose()
}

/// Parses platform seconds into a UTC datetime, truncating fractions.
pub fn parse_platform_ts(ts: &str) -> Option<DateTime<Utc>> {
    let seconds: f64 = ts.trim().parse().ok()?;
    if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = seconds.trunc() as i64;
    DateTime::from_timestamp(whole, 0)
}

fn format_ts(ts: &str, zone: TimeZoneMode) -> Option<String> {
    let utc = parse_platform_ts(ts)?;
    let formatted = match zone {
        TimeZoneMode::Local => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        TimeZoneMode::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
    };
    Some(formatted)
}
