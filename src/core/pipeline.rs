//! Batch normalization.
//!
//! Turns thread collections into records, one record per thread, in input
//! order. There is no per-record error isolation: the first thread that fails
//! aborts the batch, and the error says which thread and which window it was.
//!
//! | Entry point | Input |
//! |-------------|-------|
//! | [`run`] | threads already in memory |
//! | [`run_page`] | one retrieval page, checked for completeness |
//! | [`run_window`] | a window fetched from a [`ThreadSource`] |
//! | [`run_windows`] | several windows, concatenated in order |

use crate::config::ExtractConfig;
use crate::core::normalizer::normalize_with;
use crate::core::record::Record;
use crate::error::{Result, ThreadpackError};
use crate::message::Thread;
use crate::source::{RetrievalPage, ThreadSource};
use crate::window::RetrievalWindow;

/// Normalizes every thread, preserving order.
///
/// # Example
///
/// ```
/// use threadpack::config::ExtractConfig;
/// use threadpack::core::pipeline::run;
/// use threadpack::RawMessage;
///
/// # fn main() -> threadpack::Result<()> {
/// let threads = vec![
///     vec![RawMessage::new("<https://x/shift/1>")],
///     vec![],
///     vec![RawMessage::new("<https://x/shift/3>")],
/// ];
///
/// let records = run(&threads, &ExtractConfig::new())?;
/// let ids: Vec<_> = records.iter().map(|r| r.shift_id()).collect();
/// assert_eq!(ids, [Some(1), None, Some(3)]);
/// # Ok(())
/// # }
/// ```
pub fn run(threads: &[Thread], config: &ExtractConfig) -> Result<Vec<Record>> {
    normalize_all(threads, None, config)
}

/// Normalizes a retrieval page after checking it is complete.
///
/// # Errors
///
/// [`ThreadpackError::IncompleteRetrieval`] when upstream reported more
/// results; [`ThreadpackError::Thread`] when a thread fails to normalize.
pub fn run_page(page: &RetrievalPage, window: &str, config: &ExtractConfig) -> Result<Vec<Record>> {
    if !page.is_complete() {
        return Err(ThreadpackError::incomplete(window));
    }
    normalize_all(&page.threads, Some(window), config)
}

/// Fetches a window from `source` and normalizes it.
///
/// Fetch errors come back as [`ThreadpackError::Window`] with the window label.
pub fn run_window(
    source: &dyn ThreadSource,
    window: &RetrievalWindow,
    config: &ExtractConfig,
) -> Result<Vec<Record>> {
    let label = window.to_string();
    tracing::debug!(source = source.name(), window = %label, "fetching window");
    let page = source.fetch(window).map_err(|e| e.in_window(&label))?;
    run_page(&page, &label, config)
}

/// Normalizes several windows in order and concatenates their records.
///
/// Stops at the first window that fails.
pub fn run_windows(
    source: &dyn ThreadSource,
    windows: &[RetrievalWindow],
    config: &ExtractConfig,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for window in windows {
        records.extend(run_window(source, window, config)?);
    }
    Ok(records)
}

fn normalize_all(
    threads: &[Thread],
    window: Option<&str>,
    config: &ExtractConfig,
) -> Result<Vec<Record>> {
    let normalize_at = |(index, thread): (usize, &Thread)| {
        normalize_with(thread, config).map_err(|e| e.in_thread(index, window))
    };

    #[cfg(feature = "parallel")]
    let records: Result<Vec<Record>> = if config.parallel {
        use rayon::prelude::*;
        threads.par_iter().enumerate().map(normalize_at).collect()
    } else {
        threads.iter().enumerate().map(normalize_at).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let records: Result<Vec<Record>> = threads.iter().enumerate().map(normalize_at).collect();

    let records = records?;
    tracing::debug!(
        window = window.unwrap_or("-"),
        threads = threads.len(),
        records = records.len(),
        "normalized batch"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{RawMessage, Reaction};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemorySource {
        pages: HashMap<String, RetrievalPage>,
        unreadable: Vec<String>,
    }

    impl ThreadSource for MemorySource {
        fn name(&self) -> &'static str {
            "memory"
        }

        fn fetch(&self, window: &RetrievalWindow) -> Result<RetrievalPage> {
            let label = window.to_string();
            if self.unreadable.contains(&label) {
                return Err(ThreadpackError::archive_read(
                    format!("{label}.json"),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                ));
            }
            Ok(self.pages.get(&label).cloned().unwrap_or_default())
        }
    }

    fn thread_with_shift(id: i64) -> Thread {
        vec![RawMessage::new(format!("<https://x/shift/{id}>"))]
    }

    fn window(start: i64) -> RetrievalWindow {
        RetrievalWindow::new(
            "c",
            Utc.timestamp_opt(start, 0).unwrap(),
            Utc.timestamp_opt(start + 10, 0).unwrap(),
        )
    }

    fn ids(records: &[Record]) -> Vec<Option<i64>> {
        records.iter().map(Record::shift_id).collect()
    }

    #[test]
    fn test_run_preserves_order() {
        let threads: Vec<Thread> = (0..50).map(thread_with_shift).collect();
        let records = run(&threads, &ExtractConfig::new()).unwrap();
        assert_eq!(ids(&records), (0..50).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_parallel_preserves_order() {
        let threads: Vec<Thread> = (0..500).map(thread_with_shift).collect();
        let config = ExtractConfig::new().with_parallel(true);
        let records = run(&threads, &config).unwrap();
        assert_eq!(ids(&records), (0..500).map(Some).collect::<Vec<_>>());
    }

    #[test]
    fn test_run_empty() {
        assert!(run(&[], &ExtractConfig::new()).unwrap().is_empty());
    }

    #[test]
    fn test_run_reports_failing_thread() {
        let bad = vec![
            RawMessage::new("x")
                .with_ts("oops")
                .with_reaction(Reaction::new("check", ["u"])),
        ];
        let threads = vec![thread_with_shift(1), thread_with_shift(2), bad];
        let err = run(&threads, &ExtractConfig::new()).unwrap_err();
        assert_eq!(err.thread_index(), Some(2));
        assert!(err.is_malformed_timestamp());
    }

    #[test]
    fn test_run_page_refuses_incomplete() {
        let page = RetrievalPage::truncated(vec![thread_with_shift(1)]);
        let err = run_page(&page, "c_0_10", &ExtractConfig::new()).unwrap_err();
        assert!(err.is_incomplete());
        assert!(err.to_string().contains("c_0_10"));
    }

    #[test]
    fn test_run_page_error_names_window() {
        let bad = vec![RawMessage::default(), RawMessage::new("r").with_ts("bad")];
        let page = RetrievalPage::complete(vec![bad]);
        let err = run_page(&page, "c_0_10", &ExtractConfig::new()).unwrap_err();
        assert!(err.to_string().contains("c_0_10"));
        assert_eq!(err.thread_index(), Some(0));
    }

    #[test]
    fn test_run_windows_concatenates_in_order() {
        let mut pages = HashMap::new();
        pages.insert(
            window(0).to_string(),
            RetrievalPage::complete(vec![thread_with_shift(1), thread_with_shift(2)]),
        );
        pages.insert(
            window(10).to_string(),
            RetrievalPage::complete(vec![thread_with_shift(3)]),
        );
        let source = MemorySource {
            pages,
            ..MemorySource::default()
        };

        let records =
            run_windows(&source, &[window(0), window(10), window(20)], &ExtractConfig::new())
                .unwrap();
        assert_eq!(ids(&records), [Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_run_windows_stops_on_incomplete() {
        let mut pages = HashMap::new();
        pages.insert(
            window(10).to_string(),
            RetrievalPage::truncated(vec![thread_with_shift(3)]),
        );
        let source = MemorySource {
            pages,
            ..MemorySource::default()
        };

        let err = run_windows(&source, &[window(0), window(10)], &ExtractConfig::new())
            .unwrap_err();
        assert!(err.is_incomplete());
        assert!(err.to_string().contains(&window(10).to_string()));
    }

    #[test]
    fn test_run_windows_fetch_error_names_window() {
        let mut pages = HashMap::new();
        pages.insert(
            window(0).to_string(),
            RetrievalPage::complete(vec![thread_with_shift(1)]),
        );
        let source = MemorySource {
            pages,
            unreadable: vec![window(10).to_string()],
        };

        let err = run_windows(&source, &[window(0), window(10)], &ExtractConfig::new())
            .unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.window(), Some(window(10).to_string().as_str()));
        assert!(err.to_string().contains("c_10_20"));
        assert!(err.to_string().contains("c_10_20.json"));
    }
}
