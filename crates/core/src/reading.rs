//! Current observations for gauges.
//!
//! A [`Reading`] is always replaced wholesale; nothing in the engine patches
//! individual fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{GaugeId, Timestamp};

/// Reference reading set for the default panel.
const SAMPLE_READINGS_JSON: &str = include_str!("../data/sample_readings.json");

/// Descriptive direction tag supplied with a reading.
///
/// Never used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    Improving,
    Worsening,
}

/// Visual direction of a [`Trend`] for display consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn direction(&self) -> TrendDirection {
        match self {
            Self::Rising | Self::Improving => TrendDirection::Up,
            Self::Falling | Self::Worsening => TrendDirection::Down,
            Self::Stable => TrendDirection::Flat,
        }
    }
}

/// The latest observation for one gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub trend: Trend,
    pub last_update: Timestamp,
}

impl Reading {
    pub fn new(value: f64, trend: Trend, last_update: Timestamp) -> Self {
        Self {
            value,
            trend,
            last_update,
        }
    }

    /// Whether the observation is older than `max_age` at `now`.
    ///
    /// Staleness is a display concern and never changes classification.
    pub fn is_stale(&self, now: Timestamp, max_age: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_update) > max_age
    }
}

/// Parse a JSON object of `gauge id -> reading`.
pub fn readings_from_json(json: &str) -> Result<HashMap<GaugeId, Reading>, CoreError> {
    serde_json::from_str(json)
        .map_err(|e| CoreError::InvalidRegistry(format!("malformed readings JSON: {e}")))
}

/// The reference readings for the default panel.
pub fn sample_readings() -> Result<HashMap<GaugeId, Reading>, CoreError> {
    readings_from_json(SAMPLE_READINGS_JSON)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn trend_directions() {
        assert_eq!(Trend::Rising.direction(), TrendDirection::Up);
        assert_eq!(Trend::Improving.direction(), TrendDirection::Up);
        assert_eq!(Trend::Falling.direction(), TrendDirection::Down);
        assert_eq!(Trend::Worsening.direction(), TrendDirection::Down);
        assert_eq!(Trend::Stable.direction(), TrendDirection::Flat);
    }

    #[test]
    fn staleness_is_strictly_older_than_max_age() {
        let at = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let reading = Reading::new(1.0, Trend::Stable, at);

        assert!(!reading.is_stale(at + Duration::days(7), Duration::days(7)));
        assert!(reading.is_stale(at + Duration::days(8), Duration::days(7)));
    }

    #[test]
    fn sample_readings_cover_default_panel() {
        let readings = sample_readings().unwrap();
        assert_eq!(readings.len(), 10);
        let valuation = &readings["valuation-metrics"];
        assert_eq!(valuation.value, 34.2);
        assert_eq!(valuation.trend, Trend::Rising);
    }

    #[test]
    fn trend_serializes_lowercase() {
        let json = serde_json::to_string(&Trend::Worsening).unwrap();
        assert_eq!(json, "\"worsening\"");
    }
}
