//! Thread sources and archive loading.
//!
//! Retrieval itself (API calls, pagination, rate limits) lives outside this
//! crate. What the pipeline needs from it is captured by [`ThreadSource`]: give
//! me the threads of a window, and tell me whether that set is complete.
//!
//! Two archive shapes are understood:
//!
//! ```json
//! [[{"text": "...", "ts": "1651400000.000200"}, {"text": "ok"}], []]
//! ```
//!
//! a bare array of threads, complete by definition, and
//!
//! ```json
//! {"has_more": true, "threads": [[...], [...]]}
//! ```
//!
//! written by a retriever that stopped before the end of its window.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ThreadpackError};
use crate::message::Thread;
use crate::window::RetrievalWindow;

/// The threads of one retrieval window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalPage {
    /// Threads in retrieval order.
    pub threads: Vec<Thread>,
    /// Upstream had more results than it returned.
    pub has_more: bool,
}

impl RetrievalPage {
    /// Creates a complete page.
    pub fn complete(threads: Vec<Thread>) -> Self {
        Self {
            threads,
            has_more: false,
        }
    }

    /// Creates a page that upstream marked as truncated.
    pub fn truncated(threads: Vec<Thread>) -> Self {
        Self {
            threads,
            has_more: true,
        }
    }

    /// Returns `true` if upstream returned everything.
    pub fn is_complete(&self) -> bool {
        !self.has_more
    }

    /// Number of threads.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Returns `true` if the page holds no threads.
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[derive(Deserialize)]
struct Envelope {
    threads: Vec<Thread>,
    #[serde(default)]
    has_more: bool,
}

/// Parses archive content from a string.
///
/// # Example
///
/// ```
/// use threadpack::source::parse_archive_str;
///
/// let page = parse_archive_str(r#"[[{"text": "hi"}], []]"#)?;
/// assert_eq!(page.len(), 2);
/// assert!(page.is_complete());
///
/// let page = parse_archive_str(r#"{"has_more": true, "threads": []}"#)?;
/// assert!(!page.is_complete());
/// # Ok::<(), threadpack::ThreadpackError>(())
/// ```
pub fn parse_archive_str(content: &str) -> Result<RetrievalPage> {
    parse_archive(content, None)
}

/// Loads an archive file.
pub fn load_archive(path: impl AsRef<Path>) -> Result<RetrievalPage> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).map_err(|e| ThreadpackError::archive_read(path, e))?;
    parse_archive(&content, Some(path.to_path_buf()))
}

fn parse_archive(content: &str, path: Option<PathBuf>) -> Result<RetrievalPage> {
    let page = if content.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<Thread>>(content).map(RetrievalPage::complete)
    } else {
        serde_json::from_str::<Envelope>(content)
            .map(|Envelope { threads, has_more }| RetrievalPage { threads, has_more })
    };
    page.map_err(|e| ThreadpackError::archive_parse(e, path))
}

/// Capability that yields the threads of a retrieval window.
///
/// Implementations must return every thread of the window, or report
/// `has_more` so the pipeline can refuse the partial set.
pub trait ThreadSource: Send + Sync {
    /// Returns a short name for logs.
    fn name(&self) -> &'static str;

    /// Returns the threads of `window`.
    fn fetch(&self, window: &RetrievalWindow) -> Result<RetrievalPage>;
}

/// Serves windows from a directory of `{channel}_{start}_{end}.json` archives.
///
/// # Example
///
/// ```rust,no_run
/// use threadpack::source::{ArchiveDirSource, ThreadSource};
///
/// # fn main() -> threadpack::Result<()> {
/// let source = ArchiveDirSource::new("days_data");
/// let window = "first-jobs_1651363200_1651449600".parse()?;
/// let page = source.fetch(&window)?;
/// println!("{} threads", page.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveDirSource {
    dir: PathBuf,
}

impl ArchiveDirSource {
    /// Creates a source over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the archive path for `window`.
    pub fn path_for(&self, window: &RetrievalWindow) -> PathBuf {
        self.dir.join(format!("{}.json", window.file_stem()))
    }
}

impl ThreadSource for ArchiveDirSource {
    fn name(&self) -> &'static str {
        "archive directory"
    }

    fn fetch(&self, window: &RetrievalWindow) -> Result<RetrievalPage> {
        let path = self.path_for(window);
        tracing::debug!(path = %path.display(), "loading archive");
        load_archive(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    #[test]
    fn test_parse_bare_array() {
        let page = parse_archive_str(r#"[[{"text": "a"}, {"text": "b"}], [], [{}]]"#).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page.threads[0].len(), 2);
        assert!(page.threads[1].is_empty());
        assert!(page.is_complete());
    }

    #[test]
    fn test_parse_empty_array() {
        let page = parse_archive_str("[]").unwrap();
        assert!(page.is_empty());
        assert!(page.is_complete());
    }

    #[test]
    fn test_parse_envelope() {
        let page =
            parse_archive_str(r#"{"has_more": true, "threads": [[{"text": "a"}]]}"#).unwrap();
        assert_eq!(page.len(), 1);
        assert!(!page.is_complete());

        let page = parse_archive_str(r#"{"threads": []}"#).unwrap();
        assert!(page.is_complete());
    }

    #[test]
    fn test_parse_invalid() {
        let err = parse_archive_str("{not json").unwrap_err();
        assert!(err.is_parse());

        let err = parse_archive_str(r#"{"messages": []}"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_error_points_at_bad_message() {
        let content = "[\n  [{\"text\": \"ok\"}],\n  [{\"text\": 5}]\n]";
        let err = parse_archive_str(content).unwrap_err();
        assert!(err.is_parse());
        let display = err.to_string();
        assert!(display.contains("line 3"), "{display}");
        assert!(!display.contains("did not match any variant"));

        let err = parse_archive_str(r#"{"threads": [[{"user": []}]]}"#).unwrap_err();
        assert!(err.to_string().contains("column"));
    }

    #[test]
    fn test_load_archive_error_has_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[[").unwrap();
        let err = load_archive(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_load_archive_missing_file() {
        let err = load_archive("/definitely/not/here.json").unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_archive_dir_source() {
        let dir = tempdir().unwrap();
        let window = RetrievalWindow::new(
            "first-jobs",
            Utc.timestamp_opt(100, 0).unwrap(),
            Utc.timestamp_opt(200, 0).unwrap(),
        );
        fs::write(
            dir.path().join("first-jobs_100_200.json"),
            r#"[[{"text": "hello"}]]"#,
        )
        .unwrap();

        let source = ArchiveDirSource::new(dir.path());
        assert_eq!(source.path_for(&window), dir.path().join("first-jobs_100_200.json"));
        let page = source.fetch(&window).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.threads[0][0].text(), Some("hello"));
    }

    #[test]
    fn test_page_constructors() {
        assert!(RetrievalPage::complete(vec![]).is_complete());
        assert!(!RetrievalPage::truncated(vec![]).is_complete());
    }
}
