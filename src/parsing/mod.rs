//! Field-level parsing shared by the normalizer and library users.
//!
//! - [`fields`] - pattern-based extraction from message text
//! - [`timestamp`] - platform timestamp normalization

pub mod fields;
pub mod timestamp;

// Re-export commonly used items
pub use fields::{extract_email, extract_shift_id, join_reaction_users};
pub use timestamp::{
    TIMESTAMP_FORMAT, TimeZoneMode, normalize_ts, normalize_ts_in, parse_platform_ts,
};
