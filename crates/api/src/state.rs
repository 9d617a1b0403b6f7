use std::sync::Arc;

use tokio::sync::RwLock;
use tracker_core::{Registry, Session};
use tracker_events::EventBus;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The gauge panel. Immutable, so readable without the session lock.
    pub registry: Arc<Registry>,
    /// The single tracker session. Writers hold the lock for the whole
    /// replace so readers never see a half-applied update.
    pub session: Arc<RwLock<Session>>,
    /// WebSocket connection manager (presentation clients).
    pub ws_manager: Arc<WsManager>,
    /// Event bus for session changes.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Assemble state around an existing session.
    pub fn new(config: ServerConfig, session: Session) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::clone(session.registry()),
            session: Arc::new(RwLock::new(session)),
            ws_manager: Arc::new(WsManager::new()),
            event_bus: Arc::new(EventBus::default()),
        }
    }
}
