pub mod gauges;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::{assessment, selection};
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                           WebSocket event stream
///
/// /gauges                       list gauges
/// /gauges/{id}                  gauge detail
/// /gauges/{id}/reading          replace (PUT), clear (DELETE)
///
/// /assessment                   snapshot with counts and overall status
/// /selection                    get, set (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/gauges", gauges::router())
        .route("/assessment", get(assessment::get_assessment))
        .route(
            "/selection",
            get(selection::get_selection).put(selection::set_selection),
        )
}
