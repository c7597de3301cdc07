//! Thread to record normalization.
//!
//! A thread's head message (index 0) is the bot post: it carries the email,
//! the shift link and the reactions. Index 1 is the first reply. Everything
//! past the first reply, and every reaction group past the first, is ignored.
//!
//! # Example
//!
//! ```
//! use threadpack::core::normalizer::normalize_with;
//! use threadpack::config::ExtractConfig;
//! use threadpack::{RawMessage, Reaction};
//!
//! # fn main() -> threadpack::Result<()> {
//! let thread = vec![
//!     RawMessage::new("<mailto:a@b.com|a@b.com> <https://x/shift/42>")
//!         .with_ts("1000.0")
//!         .with_reaction(Reaction::new("check", ["u1", "u2"])),
//!     RawMessage::new("ok").with_user("u3").with_ts("1001.0"),
//! ];
//!
//! let record = normalize_with(&thread, &ExtractConfig::new().utc())?;
//! assert_eq!(record.shift_id(), Some(42));
//! assert_eq!(record.reaction_user(), Some("u1;u2"));
//! assert_eq!(record.bot_msg_ts(), Some("1970-01-01 00:16:40"));
//! assert_eq!(record.reply_ts(), Some("1970-01-01 00:16:41"));
//! # Ok(())
//! # }
//! ```

use crate::config::ExtractConfig;
use crate::core::record::Record;
use crate::error::Result;
use crate::message::RawMessage;
use crate::parsing::fields::{extract_email, extract_shift_id, join_reaction_users};
use crate::parsing::timestamp::normalize_field;

/// Normalizes a thread with the default configuration (local time zone).
pub fn normalize(thread: &[RawMessage]) -> Result<Record> {
    normalize_with(thread, &ExtractConfig::default())
}

/// Normalizes a thread into exactly one [`Record`].
///
/// An empty thread gives an all-null record. Missing fields stay null.
///
/// # Errors
///
/// Returns [`MalformedTimestamp`](crate::ThreadpackError::MalformedTimestamp)
/// when a timestamp that is needed for the record is present but unparseable.
pub fn normalize_with(thread: &[RawMessage], config: &ExtractConfig) -> Result<Record> {
    let Some(head) = thread.first() else {
        return Ok(Record::new());
    };

    let shift_id = extract_shift_id(head.text());
    let email = extract_email(head.text());

    let (reaction_emote, reaction_user, bot_msg_ts) = match head.first_reaction() {
        Some(reaction) => (
            reaction.name().map(ToString::to_string),
            join_reaction_users(reaction.users()),
            normalize_field(head.ts(), "bot_msg_ts", config.time_zone)?,
        ),
        None if config.bot_ts_without_reaction => (
            None,
            None,
            normalize_field(head.ts(), "bot_msg_ts", config.time_zone)?,
        ),
        None => (None, None, None),
    };

    let (reply_text, reply_user, reply_ts) = match thread.get(1) {
        Some(reply) => (
            reply.text.clone(),
            reply.user.clone(),
            normalize_field(reply.ts(), "reply_ts", config.time_zone)?,
        ),
        None => (None, None, None),
    };

    Ok(Record {
        shift_id,
        email,
        reaction_emote,
        reaction_user,
        bot_msg_ts,
        reply_text,
        reply_user,
        reply_ts,
    })
}
