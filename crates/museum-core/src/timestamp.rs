//! Fixed-width RFC 3339 encoding for `DateTime<Utc>` fields.
//!
//! Timestamps are always written with microsecond precision and a `Z`
//! suffix, so their text form sorts in chronological order. Stores rely on
//! this when ordering movement history.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

pub fn format(dt: &DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
  DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Truncate to the precision that survives a round trip through [`format`].
pub fn truncate(dt: DateTime<Utc>) -> DateTime<Utc> {
  parse(&format(&dt)).unwrap_or(dt)
}

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(&format(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
  let raw = String::deserialize(d)?;
  parse(&raw).map_err(de::Error::custom)
}

/// The same encoding for optional timestamps (patch fields).
pub mod option {
  use chrono::{DateTime, Utc};
  use serde::{Deserialize, Deserializer, Serializer, de};

  pub fn serialize<S: Serializer>(
    dt: &Option<DateTime<Utc>>,
    s: S,
  ) -> Result<S::Ok, S::Error> {
    match dt {
      Some(dt) => s.serialize_some(&super::format(dt)),
      None => s.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
  ) -> Result<Option<DateTime<Utc>>, D::Error> {
    Option::<String>::deserialize(d)?
      .map(|raw| super::parse(&raw).map_err(de::Error::custom))
      .transpose()
  }
}
