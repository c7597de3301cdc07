//! The flat output row produced for each thread.
//!
//! A [`Record`] has exactly eight nullable fields in a fixed order. The order
//! is shared by [`Record::headers`], [`Record::to_row`], the serde
//! representation and every writer.
//!
//! # Examples
//!
//! ```
//! use threadpack::Record;
//!
//! let record = Record::new()
//!     .with_shift_id(42)
//!     .with_email("a@b.com");
//!
//! assert_eq!(record.shift_id(), Some(42));
//! assert_eq!(record.to_row()[0], "42");
//! assert_eq!(record.to_row()[2], "");
//! ```

use serde::{Deserialize, Serialize};

/// Column names, in output order.
pub const HEADERS: [&str; 8] = [
    "shift_id",
    "email",
    "reaction_emote",
    "reaction_user",
    "bot_msg_ts",
    "reply_text",
    "reply_user",
    "reply_ts",
];

/// One normalized thread.
///
/// | Field | Source |
/// |-------|--------|
/// | `shift_id` | id at the end of the first url in the head message |
/// | `email` | first `:user@domain\|` token in the head message |
/// | `reaction_emote` | name of the head's first reaction group |
/// | `reaction_user` | users of that group, `;`-joined |
/// | `bot_msg_ts` | head timestamp, normalized |
/// | `reply_text` | text of the first reply |
/// | `reply_user` | author of the first reply |
/// | `reply_ts` | first reply timestamp, normalized |
///
/// There are no setters: a record is produced whole by the normalizer (or by
/// chaining the consuming `with_*` methods) and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub(crate) shift_id: Option<i64>,
    pub(crate) email: Option<String>,
    pub(crate) reaction_emote: Option<String>,
    pub(crate) reaction_user: Option<String>,
    pub(crate) bot_msg_ts: Option<String>,
    pub(crate) reply_text: Option<String>,
    pub(crate) reply_user: Option<String>,
    pub(crate) reply_ts: Option<String>,
}

impl Record {
    /// Creates a record with every field null.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the column names in output order.
    pub fn headers() -> &'static [&'static str; 8] {
        &HEADERS
    }

    /// Renders the fields as cells in header order; null becomes `""`.
    pub fn to_row(&self) -> [String; 8] {
        [
            self.shift_id.map(|id| id.to_string()).unwrap_or_default(),
            cell(self.email.as_ref()),
            cell(self.reaction_emote.as_ref()),
            cell(self.reaction_user.as_ref()),
            cell(self.bot_msg_ts.as_ref()),
            cell(self.reply_text.as_ref()),
            cell(self.reply_user.as_ref()),
            cell(self.reply_ts.as_ref()),
        ]
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the shift id.
    #[must_use]
    pub fn with_shift_id(mut self, shift_id: i64) -> Self {
        self.shift_id = Some(shift_id);
        self
    }

    /// Builder method to set the email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder method to set the reaction emote and its already-joined users.
    #[must_use]
    pub fn with_reaction(
        mut self,
        emote: impl Into<String>,
        users: Option<impl Into<String>>,
    ) -> Self {
        self.reaction_emote = Some(emote.into());
        self.reaction_user = users.map(Into::into);
        self
    }

    /// Builder method to set the normalized bot message timestamp.
    #[must_use]
    pub fn with_bot_msg_ts(mut self, ts: impl Into<String>) -> Self {
        self.bot_msg_ts = Some(ts.into());
        self
    }

    /// Builder method to set the first reply's text, author and normalized timestamp.
    #[must_use]
    pub fn with_reply(
        mut self,
        text: impl Into<String>,
        user: impl Into<String>,
        ts: impl Into<String>,
    ) -> Self {
        self.reply_text = Some(text.into());
        self.reply_user = Some(user.into());
        self.reply_ts = Some(ts.into());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the shift id, if found.
    pub fn shift_id(&self) -> Option<i64> {
        self.shift_id
    }

    /// Returns the email, if found.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the first reaction's emote name.
    pub fn reaction_emote(&self) -> Option<&str> {
        self.reaction_emote.as_deref()
    }

    /// Returns the first reaction's users, `;`-joined.
    pub fn reaction_user(&self) -> Option<&str> {
        self.reaction_user.as_deref()
    }

    /// Returns the normalized bot message timestamp.
    pub fn bot_msg_ts(&self) -> Option<&str> {
        self.bot_msg_ts.as_deref()
    }

    /// Returns the first reply's text.
    pub fn reply_text(&self) -> Option<&str> {
        self.reply_text.as_deref()
    }

    /// Returns the first reply's author.
    pub fn reply_user(&self) -> Option<&str> {
        self.reply_user.as_deref()
    }

    /// Returns the first reply's normalized timestamp.
    pub fn reply_ts(&self) -> Option<&str> {
        self.reply_ts.as_deref()
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if every field is null.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if the thread had a reply.
    pub fn has_reply(&self) -> bool {
        self.reply_text.is_some() || self.reply_user.is_some() || self.reply_ts.is_some()
    }
}

fn cell(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_null() {
        let record = Record::new();
        assert!(record.is_empty());
        assert_eq!(record.to_row(), <[String; 8]>::default());
    }

    #[test]
    fn test_headers_order() {
        assert_eq!(
            Record::headers().join(","),
            "shift_id,email,reaction_emote,reaction_user,bot_msg_ts,reply_text,reply_user,reply_ts"
        );
    }

    #[test]
    fn test_to_row_order() {
        let record = Record::new()
            .with_shift_id(42)
            .with_email("a@b.com")
            .with_reaction("check", Some("u1;u2"))
            .with_bot_msg_ts("1970-01-01 00:16:40")
            .with_reply("ok", "u3", "1970-01-01 00:16:41");

        assert_eq!(
            record.to_row(),
            [
                "42",
                "a@b.com",
                "check",
                "u1;u2",
                "1970-01-01 00:16:40",
                "ok",
                "u3",
                "1970-01-01 00:16:41",
            ]
        );
        assert!(!record.is_empty());
        assert!(record.has_reply());
    }

    #[test]
    fn test_reaction_without_users() {
        let record = Record::new().with_reaction("eyes", None::<String>);
        assert_eq!(record.reaction_emote(), Some("eyes"));
        assert_eq!(record.reaction_user(), None);
        assert_eq!(record.to_row()[3], "");
    }

    #[test]
    fn test_serialization_keeps_nulls_in_order() {
        let json = serde_json::to_string(&Record::new().with_shift_id(7)).unwrap();
        assert_eq!(
            json,
            r#"{"shift_id":7,"email":null,"reaction_emote":null,"reaction_user":null,"bot_msg_ts":null,"reply_text":null,"reply_user":null,"reply_ts":null}"#
        );
    }

    #[test]
    fn test_accessors() {
        let record = Record::new()
            .with_email("x@y.z")
            .with_reply("thanks", "U9", "2024-01-01 00:00:00");
        assert_eq!(record.email(), Some("x@y.z"));
        assert_eq!(record.reply_text(), Some("thanks"));
        assert_eq!(record.reply_user(), Some("U9"));
        assert_eq!(record.reply_ts(), Some("2024-01-01 00:00:00"));
        assert_eq!(record.shift_id(), None);
        assert_eq!(record.bot_msg_ts(), None);
    }
}
