//! Generic CRUD handlers, mounted once per record kind.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/<kind>s` | All records, storage order |
//! | `POST`   | `/<kind>s` | Body: create payload; returns 201 + stored record |
//! | `GET`    | `/<kind>s/:id` | 404 if not found |
//! | `PUT`    | `/<kind>s/:id` | Body: patch; only supplied keys change |
//! | `DELETE` | `/<kind>s/:id` | 204, or 404 if not found |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use museum_core::{Id, Record, store::CatalogStore};

use crate::{
  error::ApiError,
  extract::{JsonBody, Path},
};

fn missing<R: Record>(id: Id) -> ApiError {
  ApiError::NotFound(format!("{} {id} not found", R::KIND))
}

/// `GET /<kind>s`
pub async fn list<S, R>(State(store): State<Arc<S>>) -> Result<Json<Vec<R>>, ApiError>
where
  S: CatalogStore,
  R: Record,
{
  let records = store.list::<R>().await.map_err(ApiError::from_store)?;
  Ok(Json(records))
}

/// `GET /<kind>s/:id`
pub async fn get_one<S, R>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<Json<R>, ApiError>
where
  S: CatalogStore,
  R: Record,
{
  let record = store
    .get::<R>(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| missing::<R>(id))?;
  Ok(Json(record))
}

/// `POST /<kind>s` — returns 201 + the stored record.
pub async fn create<S, R>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<R::New>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  R: Record,
{
  let record = store.create::<R>(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /<kind>s/:id` — body is a sparse patch.
pub async fn update<S, R>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
  JsonBody(patch): JsonBody<R::Patch>,
) -> Result<Json<R>, ApiError>
where
  S: CatalogStore,
  R: Record,
{
  let record = store
    .update::<R>(id, patch)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| missing::<R>(id))?;
  Ok(Json(record))
}

/// `DELETE /<kind>s/:id`
pub async fn delete<S, R>(
  State(store): State<Arc<S>>,
  Path(id): Path<Id>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
  R: Record,
{
  if store.delete::<R>(id).await.map_err(ApiError::from_store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(missing::<R>(id))
  }
}
