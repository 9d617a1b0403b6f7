use std::path::PathBuf;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JSON gauge panel to load instead of the built-in one.
    pub registry_path: Option<PathBuf>,
    /// Seed the session with the reference readings (default: `true`).
    pub seed_sample_readings: bool,
    /// Readings older than this are flagged stale (default: 14 days).
    pub reading_max_age: chrono::Duration,
    /// Interval between WebSocket ping frames (default: `30`).
    pub ws_heartbeat_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `REGISTRY_PATH`        | unset (built-in panel)     |
    /// | `SEED_SAMPLE_READINGS` | `true`                     |
    /// | `READING_MAX_AGE_DAYS` | `14`                       |
    /// | `WS_HEARTBEAT_SECS`    | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let registry_path = std::env::var("REGISTRY_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let seed_sample_readings: bool = std::env::var("SEED_SAMPLE_READINGS")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("SEED_SAMPLE_READINGS must be true or false");

        let reading_max_age_days: i64 = std::env::var("READING_MAX_AGE_DAYS")
            .unwrap_or_else(|_| "14".into())
            .parse()
            .expect("READING_MAX_AGE_DAYS must be a valid i64");
        let reading_max_age = max_age_from_days(reading_max_age_days).unwrap_or_else(|| {
            panic!(
                "READING_MAX_AGE_DAYS must be between 0 and {MAX_READING_AGE_DAYS}, \
                 got {reading_max_age_days}"
            )
        });

        let ws_heartbeat_secs: u64 = std::env::var("WS_HEARTBEAT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("WS_HEARTBEAT_SECS must be a valid u64");
        assert!(ws_heartbeat_secs > 0, "WS_HEARTBEAT_SECS must be positive");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            registry_path,
            seed_sample_readings,
            reading_max_age,
            ws_heartbeat_secs,
        }
    }

    /// Age past which a reading is reported as stale.
    pub fn reading_max_age(&self) -> chrono::Duration {
        self.reading_max_age
    }

    pub fn ws_heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.ws_heartbeat_secs)
    }
}

/// Upper bound for `READING_MAX_AGE_DAYS` (about a century).
pub const MAX_READING_AGE_DAYS: i64 = 36_500;

/// Convert a day count into the staleness window.
///
/// Returns `None` for negative counts and for counts above
/// [`MAX_READING_AGE_DAYS`], so staleness checks can never overflow when
/// subtracted from a timestamp.
pub fn max_age_from_days(days: i64) -> Option<chrono::Duration> {
    if !(0..=MAX_READING_AGE_DAYS).contains(&days) {
        return None;
    }
    chrono::Duration::try_days(days)
}
