//! Retrieval windows.
//!
//! History is pulled one channel and one time range at a time, and each pull is
//! archived as `{channel}_{start}_{end}.json` with whole epoch seconds. A
//! [`RetrievalWindow`] is that unit; its [`Display`](std::fmt::Display) form is
//! the archive file stem and doubles as the label in error messages.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use threadpack::window::{DAY, RetrievalWindow};
//!
//! let start = Utc.with_ymd_and_hms(2022, 5, 1, 0, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2022, 5, 4, 0, 0, 0).unwrap();
//!
//! let windows = RetrievalWindow::plan("first-jobs", start, end, DAY);
//! assert_eq!(windows.len(), 3);
//! assert_eq!(windows[0].to_string(), "first-jobs_1651363200_1651449600");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};

use crate::error::ThreadpackError;
use crate::parsing::TimeZoneMode;

/// One day, the default window length.
pub const DAY: Duration = Duration::days(1);

/// A channel and a half-open time range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RetrievalWindow {
    /// Channel name, e.g. `"first-jobs"`.
    pub channel: String,
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Exclusive end.
    pub end: DateTime<Utc>,
}

impl RetrievalWindow {
    /// Creates a window.
    pub fn new(channel: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            channel: channel.into(),
            start,
            end,
        }
    }

    /// Splits `[start, end)` into consecutive windows of `step`.
    ///
    /// The last window is clipped to `end`. Returns nothing when the range is
    /// empty or `step` is not positive.
    pub fn plan(
        channel: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: Duration,
    ) -> Vec<RetrievalWindow> {
        let mut windows = Vec::new();
        if step <= Duration::zero() {
            return windows;
        }

        let mut cursor = start;
        while cursor < end {
            let next = cursor.checked_add_signed(step).map_or(end, |next| next.min(end));
            windows.push(RetrievalWindow::new(channel, cursor, next));
            cursor = next;
        }
        windows
    }

    /// Returns the archive file stem, `{channel}_{start}_{end}`.
    pub fn file_stem(&self) -> String {
        self.to_string()
    }

    /// Returns the length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns `true` if `at` falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

impl fmt::Display for RetrievalWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.channel,
            self.start.timestamp(),
            self.end.timestamp()
        )
    }
}

impl FromStr for RetrievalWindow {
    type Err = ThreadpackError;

    /// Parses an archive stem. The channel may itself contain `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.rsplitn(3, '_');
        let (Some(end), Some(start), Some(channel)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ThreadpackError::invalid_window(
                s,
                "expected {channel}_{start}_{end}",
            ));
        };

        if channel.is_empty() {
            return Err(ThreadpackError::invalid_window(s, "empty channel name"));
        }

        let start = parse_epoch(s, start)?;
        let end = parse_epoch(s, end)?;
        if end <= start {
            return Err(ThreadpackError::invalid_window(s, "end is not after start"));
        }

        Ok(RetrievalWindow::new(channel, start, end))
    }
}

fn parse_epoch(input: &str, part: &str) -> Result<DateTime<Utc>, ThreadpackError> {
    part.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| {
            ThreadpackError::invalid_window(input, format!("'{part}' is not an epoch second"))
        })
}

/// Parses a `YYYY-MM-DD` date as midnight in `zone`.
///
/// Archives are named after the retriever's own midnight, so the default
/// [`TimeZoneMode::Local`] resolves against the host zone. A midnight that
/// falls in a DST gap is an error.
///
/// # Example
///
/// ```
/// use threadpack::parsing::TimeZoneMode;
/// use threadpack::window::parse_day;
///
/// assert_eq!(parse_day("2022-05-01", TimeZoneMode::Utc)?.timestamp(), 1651363200);
/// assert!(parse_day("05/01/2022", TimeZoneMode::Utc).is_err());
/// # Ok::<(), threadpack::ThreadpackError>(())
/// ```
pub fn parse_day(input: &str, zone: TimeZoneMode) -> Result<DateTime<Utc>, ThreadpackError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| match zone {
            TimeZoneMode::Utc => Some(naive.and_utc()),
            TimeZoneMode::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc)),
        })
        .ok_or_else(|| ThreadpackError::invalid_date(input))
}
