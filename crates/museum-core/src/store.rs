//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `museum-store-sqlite`).
//! Higher layers (`museum-api`, `museum-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  StoreError,
  query::{ExhibitInfo, HallStatistics, VisitorWithTicket},
  record::{Employee, Exhibit, Id, Movement, Record, Restoration},
};

/// Abstraction over a museum catalog backend.
///
/// Each method is one operation against the backing store and observes a
/// consistent state: a create sees its own write, a read never sees half of
/// another caller's write. A missing record is reported as `None` (or `false`
/// for deletes), never as an error.
///
/// References between records are not checked on write, and deletes never
/// cascade; dependents keep the now-dangling id.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: StoreError;

  // ── Generic CRUD ──────────────────────────────────────────────────────

  /// All records of kind `R`, in storage order.
  fn list<R: Record>(&self) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// The record of kind `R` with this id, or `None`.
  fn get<R: Record>(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Validate and persist a new record; returns it with its assigned id.
  fn create<R: Record>(
    &self,
    new: R::New,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Apply only the fields present in `patch`. Returns `None` if no record
  /// has this id; nothing is validated or written in that case.
  fn update<R: Record>(
    &self,
    id: Id,
    patch: R::Patch,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Remove the record; `false` if it did not exist.
  fn delete<R: Record>(&self, id: Id) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Kind-specific lookups ─────────────────────────────────────────────

  /// Employees whose position equals `position` exactly (case-sensitive).
  fn employees_by_position<'a>(
    &'a self,
    position: &'a str,
  ) -> impl Future<Output = Result<Vec<Employee>, Self::Error>> + Send + 'a;

  fn exhibit_by_inventory_number<'a>(
    &'a self,
    inventory_number: &'a str,
  ) -> impl Future<Output = Result<Option<Exhibit>, Self::Error>> + Send + 'a;

  // ── Composite queries ─────────────────────────────────────────────────

  /// Exhibits in the hall whose display `number` matches. Empty if no such
  /// hall exists. When several halls share the number, the first one in
  /// storage order is used.
  fn exhibits_in_hall(
    &self,
    hall_number: i64,
  ) -> impl Future<Output = Result<Vec<Exhibit>, Self::Error>> + Send + '_;

  fn exhibits_from_supply(
    &self,
    supply_id: Id,
  ) -> impl Future<Output = Result<Vec<Exhibit>, Self::Error>> + Send + '_;

  /// Movements of one exhibit, ascending by `moved_at`.
  fn movement_history(
    &self,
    exhibit_id: Id,
  ) -> impl Future<Output = Result<Vec<Movement>, Self::Error>> + Send + '_;

  /// Movements with `start <= moved_at <= end`, ascending by `moved_at`.
  fn movements_by_period(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Movement>, Self::Error>> + Send + '_;

  /// Restorations whose status is exactly
  /// [`RESTORATION_IN_PROGRESS`](crate::record::RESTORATION_IN_PROGRESS).
  fn current_restorations(
    &self,
  ) -> impl Future<Output = Result<Vec<Restoration>, Self::Error>> + Send + '_;

  /// The exhibit joined with its hall, supply, movement history and
  /// restorations. `None` if the exhibit does not exist.
  fn full_exhibit_info(
    &self,
    exhibit_id: Id,
  ) -> impl Future<Output = Result<Option<ExhibitInfo>, Self::Error>> + Send + '_;

  /// One entry per hall, in listing order, with its exhibit count.
  fn halls_statistics(
    &self,
  ) -> impl Future<Output = Result<Vec<HallStatistics>, Self::Error>> + Send + '_;

  /// Every visitor, paired with its ticket when the reference resolves.
  fn visitors_with_tickets(
    &self,
  ) -> impl Future<Output = Result<Vec<VisitorWithTicket>, Self::Error>> + Send + '_;
}
