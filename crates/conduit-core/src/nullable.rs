//! Serde helpers for collections the upstream may send as `null`.

use serde::{Deserialize, Deserializer};

/// Deserialize a sequence that may be `null`, yielding an empty `Vec` for null.
///
/// Pair with `#[serde(default)]` so an absent key also yields an empty `Vec`,
/// and with `#[schemars(with = "Option<Vec<T>>")]` so the schema admits null.
///
/// # Errors
///
/// Propagates the inner deserializer's error for non-sequence values.
pub fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
