//! Error type for `museum-store-sqlite`.

use museum_core::{ErrorKind, RecordKind, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] museum_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A payload serialised a key that is not a column of its table.
  #[error("{kind} table has no column {column:?}")]
  UnknownColumn { kind: RecordKind, column: String },

  /// A payload field serialised to a nested array or object.
  #[error("column {column:?} cannot hold a nested value")]
  NestedValue { column: String },
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Core(e) => e.kind(),
      _ => ErrorKind::StorageUnavailable,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
