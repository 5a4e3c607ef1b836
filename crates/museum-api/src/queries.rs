//! Handlers for lookups and composite queries.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/employees/position/:position` | 404 when nobody holds the position |
//! | `GET`  | `/exhibits/inventory/:number` | 404 if not found |
//! | `GET`  | `/exhibits/hall/:hall_number` | By hall display number, not id |
//! | `GET`  | `/exhibits/supply/:supply_id` | |
//! | `GET`  | `/exhibits/:id/full-info` | 404 if not found |
//! | `GET`  | `/movements/exhibit/:exhibit_id` | Chronological |
//! | `GET`  | `/movements/period` | `?start=<rfc3339>&end=<rfc3339>`, inclusive |
//! | `GET`  | `/restorations/current` | Status `"in progress"` |
//! | `GET`  | `/tickets/:id/receipt` | 404 if not found |
//! | `GET`  | `/visitors/with-tickets` | |
//! | `GET`  | `/statistics/halls` | |

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use museum_core::{
  Id,
  query::{ExhibitInfo, HallStatistics, Receipt, VisitorWithTicket},
  record::{Employee, Exhibit, Movement, Restoration, Ticket},
  store::CatalogStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{Path, Query},
};

// ─── Employees ────────────────────────────────────────────────────────────────

/// `GET /employees/position/:position`
pub async fn employees_by_position<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(position): Path<String>,
) -> Result<Json<Vec<Employee>>, ApiError> {
  let employees = store
    .employees_by_position(&position)
    .await
    .map_err(ApiError::from_store)?;
  if employees.is_empty() {
    return Err(ApiError::NotFound(format!(
      "no employees with position {position:?}"
    )));
  }
  Ok(Json(employees))
}

// ─── Exhibits ─────────────────────────────────────────────────────────────────

/// `GET /exhibits/inventory/:number`
pub async fn exhibit_by_inventory_number<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(inventory_number): Path<String>,
) -> Result<Json<Exhibit>, ApiError> {
  let exhibit = store
    .exhibit_by_inventory_number(&inventory_number)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!(
        "exhibit with inventory number {inventory_number:?} not found"
      ))
    })?;
  Ok(Json(exhibit))
}

/// `GET /exhibits/hall/:hall_number`
pub async fn exhibits_in_hall<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(hall_number): Path<i64>,
) -> Result<Json<Vec<Exhibit>>, ApiError> {
  let exhibits = store
    .exhibits_in_hall(hall_number)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(exhibits))
}

/// `GET /exhibits/supply/:supply_id`
pub async fn exhibits_from_supply<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(supply_id): Path<Id>,
) -> Result<Json<Vec<Exhibit>>, ApiError> {
  let exhibits = store
    .exhibits_from_supply(supply_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(exhibits))
}

/// `GET /exhibits/:id/full-info`
pub async fn full_exhibit_info<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<Json<ExhibitInfo>, ApiError> {
  let info = store
    .full_exhibit_info(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("exhibit {id} not found")))?;
  Ok(Json(info))
}

// ─── Movements ────────────────────────────────────────────────────────────────

/// `GET /movements/exhibit/:exhibit_id`
pub async fn movement_history<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(exhibit_id): Path<Id>,
) -> Result<Json<Vec<Movement>>, ApiError> {
  let movements = store
    .movement_history(exhibit_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(movements))
}

#[derive(Debug, Deserialize)]
pub struct PeriodParams {
  pub start: DateTime<Utc>,
  pub end:   DateTime<Utc>,
}

/// `GET /movements/period?start=...&end=...`
pub async fn movements_by_period<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<PeriodParams>,
) -> Result<Json<Vec<Movement>>, ApiError> {
  if params.start > params.end {
    return Err(ApiError::BadRequest("start must not be after end".into()));
  }
  let movements = store
    .movements_by_period(params.start, params.end)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(movements))
}

// ─── Restorations ─────────────────────────────────────────────────────────────

/// `GET /restorations/current`
pub async fn current_restorations<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Restoration>>, ApiError> {
  let restorations = store
    .current_restorations()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(restorations))
}

// ─── Tickets & visitors ───────────────────────────────────────────────────────

/// `GET /tickets/:id/receipt`
pub async fn ticket_receipt<S: CatalogStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<Json<Receipt>, ApiError> {
  let ticket = store
    .get::<Ticket>(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("ticket {id} not found")))?;
  Ok(Json(Receipt::from(&ticket)))
}

/// `GET /visitors/with-tickets`
pub async fn visitors_with_tickets<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<VisitorWithTicket>>, ApiError> {
  let visitors = store
    .visitors_with_tickets()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(visitors))
}

// ─── Statistics ───────────────────────────────────────────────────────────────

/// `GET /statistics/halls`
pub async fn halls_statistics<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<HallStatistics>>, ApiError> {
  let stats = store.halls_statistics().await.map_err(ApiError::from_store)?;
  Ok(Json(stats))
}
