//! Handlers for the selected-gauge pointer.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use tracker_events::TrackerEvent;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Selection body, used both ways. `null` clears the selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct Selection {
    pub gauge_id: Option<String>,
}

/// GET /selection
pub async fn get_selection(State(state): State<AppState>) -> impl IntoResponse {
    let gauge_id = state
        .session
        .read()
        .await
        .selected_gauge_id()
        .map(str::to_string);
    Json(DataResponse {
        data: Selection { gauge_id },
    })
}

/// PUT /selection
///
/// Set or clear the selection. An unknown id is rejected and the current
/// selection is kept.
pub async fn set_selection(
    State(state): State<AppState>,
    Json(body): Json<Selection>,
) -> AppResult<impl IntoResponse> {
    let changed = {
        let mut session = state.session.write().await;
        let before = session.selected_gauge_id().map(str::to_string);
        session.select(body.gauge_id.as_deref())?;
        before != body.gauge_id
    };

    if changed {
        tracing::debug!(gauge_id = ?body.gauge_id, "Selection changed");
        state
            .event_bus
            .publish(TrackerEvent::selection_changed(body.gauge_id.as_deref()));
    }

    Ok(Json(DataResponse { data: body }))
}
