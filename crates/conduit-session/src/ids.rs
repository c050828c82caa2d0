//! Session and message identifiers.

use chrono::{DateTime, Utc};

use crate::error::SessionError;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `session-{unix_ms}-{9 random base36 chars}`.
///
/// # Errors
///
/// Returns `SessionError::Random` if the OS random source fails.
pub fn session_id(now: DateTime<Utc>) -> Result<String, SessionError> {
    let mut bytes = [0u8; SUFFIX_LEN];
    getrandom::fill(&mut bytes).map_err(|e| SessionError::Random(e.to_string()))?;
    let suffix: String = bytes
        .iter()
        .map(|b| char::from(BASE36[usize::from(*b) % BASE36.len()]))
        .collect();
    Ok(format!("session-{}-{suffix}", now.timestamp_millis()))
}

/// `msg-{unix_ms + offset}`. Consecutive messages in one exchange use
/// increasing offsets so their ids stay distinct.
#[must_use]
pub fn message_id(now: DateTime<Utc>, offset: i64) -> String {
    format!("msg-{}", now.timestamp_millis() + offset)
}
