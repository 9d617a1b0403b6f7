/// Errors raised by the risk engine.
///
/// All of these are synchronous and local to the call that produced them;
/// nothing in the engine retries.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid threshold config for gauge '{gauge_id}': {reason}")]
    InvalidThresholdConfig { gauge_id: String, reason: String },

    #[error("Invalid reading for gauge '{gauge_id}': {value} is not a finite number")]
    InvalidReadingValue { gauge_id: String, value: f64 },

    #[error("Unknown gauge: {0}")]
    UnknownGauge(String),

    #[error("Duplicate gauge id: {0}")]
    DuplicateGauge(String),

    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),
}
