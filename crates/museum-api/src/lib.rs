//! JSON REST API for the museum catalog.
//!
//! Exposes an axum [`Router`] backed by any [`museum_core::store::CatalogStore`].
//! One endpoint per store operation; transport and auth concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(museum_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod queries;
pub mod records;

use std::sync::Arc;

use axum::{Router, routing::get};
use museum_core::{
  Record,
  record::{Employee, Exhibit, Hall, Movement, Restoration, Supply, Ticket, Visitor},
  store::CatalogStore,
};

pub use error::ApiError;

/// Mount the five CRUD routes for record kind `R` under `path`.
fn crud<S, R>(router: Router<Arc<S>>, path: &str) -> Router<Arc<S>>
where
  S: CatalogStore + 'static,
  R: Record,
{
  router
    .route(path, get(records::list::<S, R>).post(records::create::<S, R>))
    .route(
      &format!("{path}/{{id}}"),
      get(records::get_one::<S, R>)
        .put(records::update::<S, R>)
        .delete(records::delete::<S, R>),
    )
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  let router = Router::new();
  let router = crud::<S, Employee>(router, "/employees");
  let router = crud::<S, Hall>(router, "/halls");
  let router = crud::<S, Supply>(router, "/supplies");
  let router = crud::<S, Ticket>(router, "/tickets");
  let router = crud::<S, Visitor>(router, "/visitors");
  let router = crud::<S, Exhibit>(router, "/exhibits");
  let router = crud::<S, Movement>(router, "/movements");
  let router = crud::<S, Restoration>(router, "/restorations");

  router
    // Lookups
    .route("/employees/position/{position}", get(queries::employees_by_position::<S>))
    .route("/exhibits/inventory/{number}", get(queries::exhibit_by_inventory_number::<S>))
    // Composite queries
    .route("/exhibits/hall/{hall_number}", get(queries::exhibits_in_hall::<S>))
    .route("/exhibits/supply/{supply_id}", get(queries::exhibits_from_supply::<S>))
    .route("/exhibits/{id}/full-info", get(queries::full_exhibit_info::<S>))
    .route("/movements/exhibit/{exhibit_id}", get(queries::movement_history::<S>))
    .route("/movements/period", get(queries::movements_by_period::<S>))
    .route("/restorations/current", get(queries::current_restorations::<S>))
    .route("/tickets/{id}/receipt", get(queries::ticket_receipt::<S>))
    .route("/visitors/with-tickets", get(queries::visitors_with_tickets::<S>))
    .route("/statistics/halls", get(queries::halls_statistics::<S>))
    .with_state(store)
}
