//! Event-to-WebSocket forwarding.
//!
//! [`EventForwarder`] subscribes to the tracker event bus and pushes every
//! event, serialized as JSON, to all connected WebSocket clients. Overall
//! status transitions are also logged.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;
use tracker_events::bus::EVENT_STATUS_CHANGED;
use tracker_events::TrackerEvent;

use crate::ws::WsManager;

/// Forwards tracker events to WebSocket clients.
pub struct EventForwarder {
    ws_manager: Arc<WsManager>,
}

impl EventForwarder {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](tracker_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<TrackerEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.forward(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to forward event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event forwarder lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, event forwarder shutting down");
                    break;
                }
            }
        }
    }

    async fn forward(&self, event: &TrackerEvent) -> Result<(), serde_json::Error> {
        if event.event_type == EVENT_STATUS_CHANGED {
            tracing::warn!(
                from = %event.payload["from"],
                to = %event.payload["to"],
                "Overall status changed"
            );
        }

        let text = serde_json::to_string(event)?;
        self.ws_manager.broadcast(Message::Text(text.into())).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tracker_core::OverallStatus;
    use tracker_events::EventBus;

    use super::*;

    #[tokio::test]
    async fn events_reach_websocket_clients_as_json() {
        let bus = EventBus::default();
        let ws_manager = Arc::new(WsManager::new());
        let mut client = ws_manager.add("client".to_string()).await;

        let handle = tokio::spawn(EventForwarder::new(Arc::clone(&ws_manager)).run(bus.subscribe()));

        bus.publish(TrackerEvent::status_changed(
            OverallStatus::Caution,
            OverallStatus::Overheating,
        ));

        let Some(Message::Text(text)) = client.recv().await else {
            panic!("expected a text frame");
        };
        let json: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(json["event_type"], EVENT_STATUS_CHANGED);
        assert_eq!(json["payload"]["to"], "OVERHEATING");

        drop(bus);
        handle.await.unwrap();
    }
}
