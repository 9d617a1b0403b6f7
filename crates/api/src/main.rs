use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracker_api::config::ServerConfig;
use tracker_api::notifications::EventForwarder;
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_api::ws;
use tracker_core::reading::sample_readings;
use tracker_core::{Registry, Session};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Gauge registry ---
    // A self-contradictory threshold policy is fatal: refuse to start.
    let registry = match &config.registry_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
                panic!("Failed to read gauge registry {}: {e}", path.display())
            });
            Registry::from_json(&json).expect("Gauge registry failed validation")
        }
        None => Registry::default_panel().expect("Built-in gauge panel failed validation"),
    };
    let registry = Arc::new(registry);
    tracing::info!(
        gauges = registry.len(),
        automated = registry.automated_count(),
        manual = registry.manual_count(),
        "Gauge registry loaded"
    );

    // --- Session ---
    let session = if config.seed_sample_readings {
        let seed = sample_readings().expect("Sample readings are malformed");
        Session::with_readings(Arc::clone(&registry), seed)
            .expect("Sample readings do not match the gauge registry")
    } else {
        Session::new(Arc::clone(&registry))
    };
    let overall = session
        .assessment()
        .expect("Seeded session failed to aggregate")
        .overall;
    tracing::info!(
        readings = session.readings().len(),
        overall = overall.as_str(),
        "Session initialised"
    );

    // --- App state ---
    let state = AppState::new(config.clone(), session);

    // --- Heartbeat ---
    let heartbeat_handle =
        ws::start_heartbeat(Arc::clone(&state.ws_manager), config.ws_heartbeat_interval());

    // --- Event forwarding ---
    let forwarder = EventForwarder::new(Arc::clone(&state.ws_manager));
    let forwarder_handle = tokio::spawn(forwarder.run(state.event_bus.subscribe()));
    tracing::info!("Event forwarder started");

    let ws_manager = Arc::clone(&state.ws_manager);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router (and its state clone of the event bus) is gone once
    // `serve` returns, which closes the channel and ends the forwarder.
    let _ = tokio::time::timeout(Duration::from_secs(5), forwarder_handle).await;
    tracing::info!("Event forwarder stopped");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
