//! Handlers for the gauge panel and per-gauge readings.
//!
//! Every mutation takes the session write lock for the whole operation
//! (validate, replace, re-aggregate) and publishes the resulting events
//! after the lock is released.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use tracker_core::types::Timestamp;
use tracker_core::{OverallStatus, Reading, RiskLevel, Trend};
use tracker_events::TrackerEvent;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body for `PUT /gauges/{id}/reading`.
#[derive(Debug, Deserialize)]
pub struct UpdateReadingBody {
    pub value: f64,
    pub trend: Trend,
    /// Observation time; defaults to the time the update is received.
    pub last_update: Option<Timestamp>,
}

/// Result of a reading replacement.
#[derive(Debug, Serialize)]
pub struct ReadingUpdated {
    pub gauge_id: String,
    pub level: RiskLevel,
    pub overall: OverallStatus,
    pub previous: Option<Reading>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /gauges
///
/// The registry in order.
pub async fn list_gauges(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.registry.gauges().to_vec(),
    })
}

/// GET /gauges/{id}
///
/// Definition, current reading, level, formatted values and staleness.
pub async fn get_gauge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let session = state.session.read().await;
    let detail = session.detail(&id, chrono::Utc::now(), state.config.reading_max_age())?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /gauges/{id}/reading
///
/// Replace the gauge's reading wholesale. A rejected update leaves the
/// previous reading in place.
pub async fn update_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateReadingBody>,
) -> AppResult<impl IntoResponse> {
    let reading = Reading::new(
        body.value,
        body.trend,
        body.last_update.unwrap_or_else(chrono::Utc::now),
    );

    let (before, after, level, previous) = {
        let mut session = state.session.write().await;
        let before = session.assessment()?.overall;

        let previous = match session.update_reading(&id, reading) {
            Ok(previous) => previous,
            Err(e) => {
                tracing::warn!(gauge_id = %id, error = %e, "Reading rejected");
                state
                    .event_bus
                    .publish(TrackerEvent::reading_rejected(&id, &e.to_string()));
                return Err(e.into());
            }
        };

        let level = session.level(&id)?.ok_or_else(|| {
            AppError::InternalError(format!("no reading stored for '{id}' after update"))
        })?;
        (before, session.assessment()?.overall, level, previous)
    };

    tracing::info!(
        gauge_id = %id,
        value = body.value,
        level = level.as_str(),
        overall = after.as_str(),
        "Reading updated"
    );

    state
        .event_bus
        .publish(TrackerEvent::reading_updated(&id, body.value, level));
    if before != after {
        state
            .event_bus
            .publish(TrackerEvent::status_changed(before, after));
    }

    Ok(Json(DataResponse {
        data: ReadingUpdated {
            gauge_id: id,
            level,
            overall: after,
            previous,
        },
    }))
}

/// DELETE /gauges/{id}/reading
///
/// Remove the gauge's reading; it becomes unclassified.
pub async fn clear_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (before, after, removed) = {
        let mut session = state.session.write().await;
        let before = session.assessment()?.overall;
        let removed = session.clear_reading(&id)?;
        (before, session.assessment()?.overall, removed.is_some())
    };

    tracing::info!(gauge_id = %id, removed, "Reading cleared");

    if removed {
        state.event_bus.publish(TrackerEvent::reading_cleared(&id));
    }
    if before != after {
        state
            .event_bus
            .publish(TrackerEvent::status_changed(before, after));
    }

    Ok(StatusCode::NO_CONTENT)
}
