//! Museum catalog HTTP server: configuration, sample data, and the
//! application router.

pub mod config;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use museum_core::store::CatalogStore;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;

/// The full application: the JSON API with request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: CatalogStore + 'static,
{
  museum_api::api_router(store).layer(TraceLayer::new_for_http())
}
