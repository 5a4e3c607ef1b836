//! Error types for `museum-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A field on a create or patch payload violates its declared constraint.
  #[error("invalid {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// How a store failure should be surfaced to callers.
///
/// A missing record is not an error: lookups return `None`, deletes return
/// `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The caller sent a field value outside its declared range.
  ValidationFailed,
  /// The backing store could not complete the operation. Not retried.
  StorageUnavailable,
}

/// Implemented by every store backend's error type so that outer layers can
/// tell bad input apart from storage failure without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Validation { .. } => ErrorKind::ValidationFailed,
    }
  }
}
