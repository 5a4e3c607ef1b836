//! Serde helpers shared by the patch types.

use serde::{Deserialize, Deserializer};

/// Deserialise a present key as `Some(value)`, including an explicit `null`
/// as `Some(None)`.
///
/// Paired with `#[serde(default)]`, an absent key stays `None`, so patches can
/// tell "leave unchanged" apart from "clear this field".
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}
