//! Dashboard WebSocket endpoint.
//!
//! The stream is push-only. A newly attached client first receives a
//! `session.snapshot` frame with the full session state, then every tracker
//! event as it is published. Inbound frames other than Close are ignored.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracker_events::TrackerEvent;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /ws
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| serve_client(socket, state))
}

/// Register a client and queue the current session snapshot as its first frame.
///
/// The session read lock is held until the snapshot is queued. Updates need
/// the write lock, so anything applied afterwards reaches the client as an
/// event behind the snapshot.
pub async fn attach_client(
    state: &AppState,
) -> AppResult<(String, mpsc::UnboundedReceiver<Message>)> {
    let session = state.session.read().await;
    let snapshot = serde_json::to_value(session.snapshot()?)
        .map_err(|e| AppError::InternalError(format!("snapshot serialization failed: {e}")))?;
    let frame = serde_json::to_string(&TrackerEvent::session_snapshot(snapshot))
        .map_err(|e| AppError::InternalError(format!("snapshot frame serialization failed: {e}")))?;

    let conn_id = uuid::Uuid::new_v4().to_string();
    let outbound = state.ws_manager.add(conn_id.clone()).await;
    state
        .ws_manager
        .send_to(&conn_id, Message::Text(frame.into()))
        .await;
    drop(session);

    Ok((conn_id, outbound))
}

async fn serve_client(socket: WebSocket, state: AppState) {
    let (conn_id, mut outbound) = match attach_client(&state).await {
        Ok(attached) => attached,
        Err(e) => {
            tracing::error!(error = %e, "Failed to attach dashboard client");
            return;
        }
    };
    tracing::info!(conn_id = %conn_id, "Dashboard client attached");

    let (mut sink, mut inbound) = socket.split();
    loop {
        tokio::select! {
            queued = outbound.recv() => {
                // `None` once the manager has dropped this connection.
                let Some(message) = queued else { break };
                let closing = matches!(message, Message::Close(_));
                if let Err(e) = sink.send(message).await {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Dashboard send failed");
                    break;
                }
                if closing {
                    break;
                }
            }
            received = inbound.next() => match received {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Dashboard receive error");
                    break;
                }
            },
        }
    }

    state.ws_manager.remove(&conn_id).await;
    tracing::info!(conn_id = %conn_id, "Dashboard client detached");
}
