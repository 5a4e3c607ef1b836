//! Conversion between record types and SQLite rows.
//!
//! Records cross the boundary as JSON objects keyed by column name: payloads
//! are serialised with `serde_json` and split into `(column, value)` pairs;
//! rows are read back into an object and deserialised into the record type.
//! Dates and timestamps therefore keep their serde text forms in the
//! database.

use museum_core::{Id, Record, RecordKind};
use rusqlite::types::{Type, Value, ValueRef};
use serde::Serialize;
use serde_json::{Map, Number, Value as Json};

use crate::{
  Error, Result,
  schema::columns,
};

// ─── Writes ──────────────────────────────────────────────────────────────────

/// Split a create payload or patch into column assignments.
///
/// Only keys the payload serialises are returned, so a patch yields exactly
/// the fields the caller supplied. Every key must be a known column of
/// `kind`; the returned names are the static column names, never caller text.
pub fn assignments<T: Serialize>(
  kind: RecordKind,
  payload: &T,
) -> Result<Vec<(&'static str, Value)>> {
  let Json::Object(fields) = serde_json::to_value(payload)? else {
    return Err(Error::NestedValue { column: kind.to_string() });
  };

  fields
    .into_iter()
    .map(|(key, value)| {
      let column = columns(kind)
        .iter()
        .copied()
        .find(|c| *c == key)
        .ok_or_else(|| Error::UnknownColumn { kind, column: key.clone() })?;
      Ok((column, to_sql(&key, value)?))
    })
    .collect()
}

fn to_sql(column: &str, value: Json) -> Result<Value> {
  Ok(match value {
    Json::Null => Value::Null,
    Json::Bool(b) => Value::Integer(i64::from(b)),
    Json::Number(n) => match n.as_i64() {
      Some(i) => Value::Integer(i),
      None => n.as_f64().map_or(Value::Null, Value::Real),
    },
    Json::String(s) => Value::Text(s),
    Json::Array(_) | Json::Object(_) => {
      return Err(Error::NestedValue { column: column.to_owned() });
    }
  })
}

// ─── Reads ───────────────────────────────────────────────────────────────────

/// One row of a record table, as a JSON object keyed by column name.
pub struct RawRow(Map<String, Json>);

impl RawRow {
  /// Read a row selected with [`select_list`](crate::schema::select_list).
  pub fn from_row(row: &rusqlite::Row<'_>, kind: RecordKind) -> rusqlite::Result<Self> {
    let mut fields = Map::new();
    let names = std::iter::once("id").chain(columns(kind).iter().copied());
    for (idx, name) in names.enumerate() {
      fields.insert(name.to_owned(), from_sql(row.get_ref(idx)?, idx)?);
    }
    Ok(Self(fields))
  }

  /// The id held in a reference column, if set.
  pub fn reference(&self, column: &str) -> Option<Id> {
    self.0.get(column).and_then(Json::as_i64)
  }

  pub fn into_record<R: Record>(self) -> Result<R> {
    Ok(serde_json::from_value(Json::Object(self.0))?)
  }
}

fn from_sql(value: ValueRef<'_>, idx: usize) -> rusqlite::Result<Json> {
  Ok(match value {
    ValueRef::Null => Json::Null,
    ValueRef::Integer(i) => Json::from(i),
    ValueRef::Real(f) => Number::from_f64(f).map_or(Json::Null, Json::Number),
    ValueRef::Text(bytes) => Json::String(
      std::str::from_utf8(bytes)
        .map_err(rusqlite::Error::Utf8Error)?
        .to_owned(),
    ),
    ValueRef::Blob(_) => {
      return Err(rusqlite::Error::InvalidColumnType(
        idx,
        format!("column {idx}"),
        Type::Blob,
      ));
    }
  })
}
