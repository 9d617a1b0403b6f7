/// Gauge identifiers are stable string keys (e.g. `"valuation-metrics"`).
pub type GaugeId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
