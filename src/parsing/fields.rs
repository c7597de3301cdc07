//! Pattern-based field extraction from message text.
//!
//! Bot messages in the archive carry identity and shift information inside
//! free-form text, encoded with the platform's link syntax:
//!
//! ```text
//! New shift for <mailto:jane@example.com|jane@example.com>: <https://app.example.com/shifts/4711>
//! ```
//!
//! Every function here is total: text that does not match yields `None`.

use std::sync::LazyLock;

use regex::Regex;

/// `:` followed by a non-whitespace run containing `@`, ending right before `|`.
///
/// The trailing `|` is consumed instead of looked ahead at; the capture group
/// is the same because both halves are greedy.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\S+@+\S+)\|").expect("email pattern is valid"));

/// Shortest `<...>` token on a single line.
static BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(.*?)>").expect("bracket pattern is valid"));

/// Extracts the email address from the first `:user@domain|label` token.
///
/// # Example
///
/// ```
/// use threadpack::parsing::extract_email;
///
/// let text = "Shift picked up by <mailto:jane@example.com|jane@example.com>";
/// assert_eq!(extract_email(Some(text)).as_deref(), Some("jane@example.com"));
/// assert_eq!(extract_email(Some("no mention here")), None);
/// assert_eq!(extract_email(None), None);
/// ```
pub fn extract_email(text: Option<&str>) -> Option<String> {
    EMAIL_RE
        .captures(text?)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Prefixes of bracketed tokens that encode mentions rather than links.
const MENTION_PREFIXES: [&str; 4] = ["mailto:", "@", "#", "!"];

/// Extracts the numeric id at the end of the first `<url>` token.
///
/// Mention tokens (`<mailto:..>`, `<@U..>`, `<#C..>`, `<!here>`) are skipped;
/// of the remaining bracketed tokens only the first is inspected. Returns
/// `None` when it has no `/` or when its last path segment is not an integer.
///
/// # Example
///
/// ```
/// use threadpack::parsing::extract_shift_id;
///
/// assert_eq!(extract_shift_id(Some("<https://x/shift/42>")), Some(42));
/// assert_eq!(extract_shift_id(Some("<mailto:a@b.com|a> <https://x/shift/42>")), Some(42));
/// assert_eq!(extract_shift_id(Some("<https://x/shift/abc>")), None);
/// assert_eq!(extract_shift_id(Some("<no-slash>")), None);
/// ```
pub fn extract_shift_id(text: Option<&str>) -> Option<i64> {
    let token = BRACKET_RE
        .captures_iter(text?)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|token| !is_mention(token))?;
    let (_, last) = token.rsplit_once('/')?;
    last.parse().ok()
}

fn is_mention(token: &str) -> bool {
    MENTION_PREFIXES
        .iter()
        .any(|prefix| token.starts_with(prefix))
}

/// Collapses the users of a reaction group into one cell.
///
/// No users gives `None`, one user is kept as is, several are joined with `;`.
///
/// # Example
///
/// ```
/// use threadpack::parsing::join_reaction_users;
///
/// assert_eq!(join_reaction_users(&[]), None);
/// assert_eq!(join_reaction_users(&["U1".to_string()]).as_deref(), Some("U1"));
/// assert_eq!(
///     join_reaction_users(&["U1".to_string(), "U2".to_string()]).as_deref(),
///     Some("U1;U2")
/// );
/// ```
pub fn join_reaction_users(users: &[String]) -> Option<String> {
    match users {
        [] => None,
        [single] => Some(single.clone()),
        many => Some(many.join(";")),
    }
}
