//! Handler for the panel-wide assessment.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use tracker_core::SessionSnapshot;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Session snapshot plus the verdict's guidance text.
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    pub headline: &'static str,
    pub recommended_action: &'static str,
    /// Gauges whose reading is past the configured age, in registry order.
    pub stale_gauges: Vec<String>,
    pub automated_gauges: usize,
    pub manual_gauges: usize,
}

/// GET /assessment
///
/// Readings, selection, per-gauge levels, counts, stale gauges and the
/// overall status, computed fresh on every request.
pub async fn get_assessment(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (snapshot, stale_gauges) = {
        let session = state.session.read().await;
        let stale = session.stale_gauges(chrono::Utc::now(), state.config.reading_max_age());
        (session.snapshot()?, stale)
    };
    let overall = snapshot.assessment.overall;

    Ok(Json(DataResponse {
        data: AssessmentResponse {
            snapshot,
            headline: overall.headline(),
            recommended_action: overall.recommended_action(),
            stale_gauges,
            automated_gauges: state.registry.automated_count(),
            manual_gauges: state.registry.manual_count(),
        },
    }))
}
