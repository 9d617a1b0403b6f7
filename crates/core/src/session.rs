//! Session state: the owned reading set and the selected-gauge pointer.
//!
//! All risk computation is delegated to [`crate::aggregator`] and
//! [`crate::classifier`]. The session holds no cached aggregate; every
//! [`Session::snapshot`] is computed fresh.
//!
//! The session has no internal locking. Hosts that accept concurrent
//! updates wrap it in a lock and hold the write side for the whole
//! replace, so a reading is never observed half-written.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::aggregator::{aggregate, Assessment};
use crate::classifier::classify;
use crate::error::CoreError;
use crate::reading::Reading;
use crate::registry::{GaugeDefinition, Registry};
use crate::risk::RiskLevel;
use crate::threshold_validation::ensure_finite_reading;
use crate::types::{GaugeId, Timestamp};

/// Point-in-time view of a session plus its freshly computed assessment.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub readings: HashMap<GaugeId, Reading>,
    pub selected_gauge_id: Option<GaugeId>,
    pub assessment: Assessment,
}

/// Everything a detail panel needs for one gauge.
#[derive(Debug, Clone, Serialize)]
pub struct GaugeDetail {
    pub gauge: GaugeDefinition,
    pub reading: Option<Reading>,
    pub level: Option<RiskLevel>,
    pub formatted_value: Option<String>,
    pub formatted_safe: String,
    pub formatted_warning: String,
    /// `true` when the reading is older than the allowed age.
    pub stale: bool,
    pub selected: bool,
}

/// In-memory state for one tracker session.
#[derive(Debug, Clone)]
pub struct Session {
    registry: Arc<Registry>,
    readings: HashMap<GaugeId, Reading>,
    selected: Option<GaugeId>,
}

impl Session {
    /// Create an empty session: no readings, nothing selected.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            readings: HashMap::new(),
            selected: None,
        }
    }

    /// Create a session seeded with `readings`.
    ///
    /// The seed is validated as a whole; one unknown id or non-finite value
    /// rejects it.
    pub fn with_readings(
        registry: Arc<Registry>,
        readings: HashMap<GaugeId, Reading>,
    ) -> Result<Self, CoreError> {
        for (id, reading) in &readings {
            registry.require(id)?;
            ensure_finite_reading(id, reading.value)?;
        }
        Ok(Self {
            registry,
            readings,
            selected: None,
        })
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn reading(&self, id: &str) -> Option<&Reading> {
        self.readings.get(id)
    }

    pub fn readings(&self) -> &HashMap<GaugeId, Reading> {
        &self.readings
    }

    pub fn selected_gauge_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The definition behind the selection pointer, if any.
    pub fn selected_gauge(&self) -> Option<&GaugeDefinition> {
        self.selected.as_deref().and_then(|id| self.registry.get(id))
    }

    /// Replace the reading for `id` wholesale.
    ///
    /// Returns the previous reading. On error nothing is stored and the
    /// previous reading is kept.
    pub fn update_reading(
        &mut self,
        id: &str,
        reading: Reading,
    ) -> Result<Option<Reading>, CoreError> {
        let gauge = self.registry.require(id)?;
        ensure_finite_reading(&gauge.id, reading.value)?;

        tracing::debug!(gauge_id = %id, value = reading.value, "Reading replaced");
        Ok(self.readings.insert(gauge.id.clone(), reading))
    }

    /// Drop the reading for `id`, returning the gauge to the unclassified state.
    pub fn clear_reading(&mut self, id: &str) -> Result<Option<Reading>, CoreError> {
        self.registry.require(id)?;
        Ok(self.readings.remove(id))
    }

    /// Set (`Some`) or clear (`None`) the selection pointer.
    ///
    /// An unknown id leaves the current selection untouched.
    pub fn select(&mut self, id: Option<&str>) -> Result<(), CoreError> {
        match id {
            Some(id) => {
                let gauge = self.registry.require(id)?;
                self.selected = Some(gauge.id.clone());
            }
            None => self.selected = None,
        }
        Ok(())
    }

    /// Classify a single gauge against its current reading.
    pub fn level(&self, id: &str) -> Result<Option<RiskLevel>, CoreError> {
        let gauge = self.registry.require(id)?;
        self.readings
            .get(id)
            .map(|reading| classify(gauge, reading))
            .transpose()
    }

    /// Aggregate the current readings across the registry.
    pub fn assessment(&self) -> Result<Assessment, CoreError> {
        aggregate(self.registry.gauges(), &self.readings)
    }

    /// Readings, selection, and a freshly computed assessment.
    pub fn snapshot(&self) -> Result<SessionSnapshot, CoreError> {
        Ok(SessionSnapshot {
            readings: self.readings.clone(),
            selected_gauge_id: self.selected.clone(),
            assessment: self.assessment()?,
        })
    }

    /// Ids of gauges whose reading is older than `max_age`, in registry order.
    ///
    /// Staleness is informational; stale readings still classify.
    pub fn stale_gauges(&self, now: Timestamp, max_age: chrono::Duration) -> Vec<GaugeId> {
        self.registry
            .gauges()
            .iter()
            .filter(|g| {
                self.readings
                    .get(&g.id)
                    .is_some_and(|r| r.is_stale(now, max_age))
            })
            .map(|g| g.id.clone())
            .collect()
    }

    /// Build the detail view for one gauge.
    pub fn detail(
        &self,
        id: &str,
        now: Timestamp,
        max_age: chrono::Duration,
    ) -> Result<GaugeDetail, CoreError> {
        let gauge = self.registry.require(id)?;
        let reading = self.readings.get(id).cloned();
        let level = self.level(id)?;

        Ok(GaugeDetail {
            formatted_value: reading.as_ref().map(|r| gauge.format_value(r.value)),
            formatted_safe: gauge.format_value(gauge.thresholds.safe),
            formatted_warning: gauge.format_value(gauge.thresholds.warning),
            stale: reading.as_ref().is_some_and(|r| r.is_stale(now, max_age)),
            selected: self.selected.as_deref() == Some(id),
            gauge: gauge.clone(),
            reading,
            level,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
