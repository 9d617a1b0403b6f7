//! Gauge definitions and the immutable gauge registry.
//!
//! The registry is process-wide configuration: built once at startup,
//! validated once, and shared read-only (typically behind an `Arc`).
//! Threshold policy is checked here so the classifier never has to.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold_validation::validate_thresholds;
use crate::types::GaugeId;

/// The ten-gauge deployment panel shipped with the engine.
const DEFAULT_PANEL_JSON: &str = include_str!("../data/default_panel.json");

// ---------------------------------------------------------------------------
// Value semantics
// ---------------------------------------------------------------------------

/// Semantic unit tag for a gauge's readings. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeUnit {
    Ratio,
    Percent,
    Index,
    Score,
    Multiple,
}

/// Display rule for a gauge's values: fixed precision plus an optional suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueFormat {
    /// Number of fractional digits to render.
    pub decimals: u8,
    /// Appended verbatim after the number (e.g. `"%"`).
    #[serde(default)]
    pub suffix: String,
}

impl ValueFormat {
    pub fn new(decimals: u8, suffix: impl Into<String>) -> Self {
        Self {
            decimals,
            suffix: suffix.into(),
        }
    }

    /// Render `value` with exactly `decimals` fractional digits.
    pub fn format(&self, value: f64) -> String {
        format!(
            "{value:.prec$}{suffix}",
            prec = usize::from(self.decimals),
            suffix = self.suffix
        )
    }
}

// ---------------------------------------------------------------------------
// Gauge definition
// ---------------------------------------------------------------------------

/// The two breakpoints of a gauge's three-zone scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub safe: f64,
    pub warning: f64,
}

/// One tracked risk indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeDefinition {
    pub id: GaugeId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub unit: GaugeUnit,
    /// Fed by an automated source rather than manual assessment.
    pub automated: bool,
    pub thresholds: Thresholds,
    /// When `true`, higher readings are safer.
    #[serde(default)]
    pub inverted: bool,
    pub format: ValueFormat,
}

impl GaugeDefinition {
    /// Render a value using this gauge's display rule.
    pub fn format_value(&self, value: f64) -> String {
        self.format.format(value)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Immutable, ordered catalog of gauge definitions.
#[derive(Debug, Clone)]
pub struct Registry {
    gauges: Vec<GaugeDefinition>,
}

impl Registry {
    /// Build a registry, validating ids and threshold policy.
    ///
    /// Rejects an empty list, duplicate ids, and any gauge whose thresholds
    /// contradict its `inverted` flag or are non-finite.
    pub fn new(gauges: Vec<GaugeDefinition>) -> Result<Self, CoreError> {
        if gauges.is_empty() {
            return Err(CoreError::InvalidRegistry(
                "registry must contain at least one gauge".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(gauges.len());
        for gauge in &gauges {
            if !seen.insert(gauge.id.as_str()) {
                return Err(CoreError::DuplicateGauge(gauge.id.clone()));
            }
            validate_thresholds(&gauge.id, &gauge.thresholds, gauge.inverted)?;
        }

        tracing::debug!(gauges = gauges.len(), "Gauge registry validated");
        Ok(Self { gauges })
    }

    /// Parse a JSON array of gauge definitions and validate it.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let gauges: Vec<GaugeDefinition> = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidRegistry(format!("malformed gauge JSON: {e}")))?;
        Self::new(gauges)
    }

    /// The built-in ten-gauge panel.
    pub fn default_panel() -> Result<Self, CoreError> {
        Self::from_json(DEFAULT_PANEL_JSON)
    }

    /// Look up a gauge by id.
    pub fn get(&self, id: &str) -> Option<&GaugeDefinition> {
        self.gauges.iter().find(|g| g.id == id)
    }

    /// Look up a gauge by id, failing with `UnknownGauge` if absent.
    pub fn require(&self, id: &str) -> Result<&GaugeDefinition, CoreError> {
        self.get(id)
            .ok_or_else(|| CoreError::UnknownGauge(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All gauges in registry order.
    pub fn gauges(&self) -> &[GaugeDefinition] {
        &self.gauges
    }

    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    pub fn automated_count(&self) -> usize {
        self.gauges.iter().filter(|g| g.automated).count()
    }

    pub fn manual_count(&self) -> usize {
        self.len() - self.automated_count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
