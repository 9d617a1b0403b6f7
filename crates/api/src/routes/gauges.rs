//! Route definitions for the gauge panel.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::gauges;
use crate::state::AppState;

/// Gauge routes, mounted at `/gauges`.
///
/// ```text
/// GET    /                 -> list_gauges
/// GET    /{id}             -> get_gauge
/// PUT    /{id}/reading     -> update_reading
/// DELETE /{id}/reading     -> clear_reading
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gauges::list_gauges))
        .route("/{id}", get(gauges::get_gauge))
        .route(
            "/{id}/reading",
            put(gauges::update_reading).delete(gauges::clear_reading),
        )
}
