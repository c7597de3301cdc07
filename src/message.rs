//! Raw message types as found in thread archives.
//!
//! Archives come from the platform's `conversations.replies` endpoint, one
//! thread per inner array. Nothing in a message is guaranteed: every field is
//! optional, `null` and absent are treated the same, and unknown keys are
//! ignored.
//!
//! # Example
//!
//! ```
//! use threadpack::RawMessage;
//!
//! let msg: RawMessage = serde_json::from_str(
//!     r#"{"type": "message", "text": "ok", "user": "U1", "ts": "1651400000.000200", "team": "T1"}"#,
//! )?;
//!
//! assert_eq!(msg.text(), Some("ok"));
//! assert_eq!(msg.user(), Some("U1"));
//! assert!(msg.first_reaction().is_none());
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// One conversation thread: index 0 is the originating message, index 1 (if
/// present) the first reply.
pub type Thread = Vec<RawMessage>;

/// A message as stored in a thread archive.
///
/// | Field | Archive key | Notes |
/// |-------|-------------|-------|
/// | `msg_type` | `type` | usually `"message"` |
/// | `subtype` | `subtype` | e.g. `"bot_message"` |
/// | `text` | `text` | may embed `<mailto:..\|..>` and `<url>` tokens |
/// | `reactions` | `reactions` | ordered reaction groups |
/// | `user` | `user` | author identifier |
/// | `ts` | `ts` | seconds since epoch as a decimal string |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Message type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub msg_type: Option<String>,

    /// Message subtype.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    /// Message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Reaction groups, in the order the platform reports them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,

    /// Author identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Platform timestamp, e.g. `"1651400000.000200"`.
    ///
    /// A bare JSON number is accepted and kept as its decimal text.
    #[serde(
        default,
        deserialize_with = "deserialize_ts",
        skip_serializing_if = "Option::is_none"
    )]
    pub ts: Option<String>,
}

/// One reaction group on a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    /// Emoji name without colons, e.g. `"white_check_mark"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Identifiers of the users who reacted, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

impl RawMessage {
    /// Creates a message with only text set.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Builder method to set the author.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Builder method to set the platform timestamp.
    #[must_use]
    pub fn with_ts(mut self, ts: impl Into<String>) -> Self {
        self.ts = Some(ts.into());
        self
    }

    /// Builder method to append a reaction group.
    #[must_use]
    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.get_or_insert_with(Vec::new).push(reaction);
        self
    }

    /// Returns the text, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the author, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the raw timestamp, if any.
    pub fn ts(&self) -> Option<&str> {
        self.ts.as_deref()
    }

    /// Returns the first reaction group, if the message has any.
    pub fn first_reaction(&self) -> Option<&Reaction> {
        self.reactions.as_deref().and_then(<[Reaction]>::first)
    }
}

impl Reaction {
    /// Creates a reaction group.
    pub fn new<I, S>(name: impl Into<String>, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.into()),
            users: Some(users.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns the emoji name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the reacting users; empty when the archive has none.
    pub fn users(&self) -> &[String] {
        self.users.as_deref().unwrap_or_default()
    }
}

fn deserialize_ts<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTs {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawTs>::deserialize(deserializer)?.map(|raw| match raw {
        RawTs::Text(s) => s,
        RawTs::Number(n) => n.to_string(),
    }))
}
