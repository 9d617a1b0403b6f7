//! Panel-wide risk aggregation (counts per level and the overall verdict).
//!
//! Recomputed from scratch on every call. Callers that cache the result must
//! invalidate it whenever any reading changes.

use std::collections::HashMap;

use serde::Serialize;

use crate::classifier::classify;
use crate::error::CoreError;
use crate::reading::Reading;
use crate::registry::GaugeDefinition;
use crate::risk::{OverallStatus, RiskLevel};
use crate::types::GaugeId;

// ---------------------------------------------------------------------------
// Policy constants
// ---------------------------------------------------------------------------

/// Danger gauges at or above which the panel is in bubble territory.
pub const BUBBLE_DANGER_MIN: usize = 4;
/// Danger gauges at or above which the panel is overheating.
pub const OVERHEATING_DANGER_MIN: usize = 2;
/// Danger gauges at or above which the panel warrants caution.
pub const CAUTION_DANGER_MIN: usize = 1;
/// Warning gauges at or above which the panel warrants caution.
pub const CAUTION_WARNING_MIN: usize = 5;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Number of gauges in each risk level, plus gauges with no reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub safe: usize,
    pub warning: usize,
    pub danger: usize,
    /// Gauges without a reading. Not counted as any level.
    pub unclassified: usize,
}

impl RiskCounts {
    /// Tally one gauge's outcome (`None` = no reading).
    pub fn record(&mut self, level: Option<RiskLevel>) {
        match level {
            Some(RiskLevel::Safe) => self.safe += 1,
            Some(RiskLevel::Warning) => self.warning += 1,
            Some(RiskLevel::Danger) => self.danger += 1,
            None => self.unclassified += 1,
        }
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Safe => self.safe,
            RiskLevel::Warning => self.warning,
            RiskLevel::Danger => self.danger,
        }
    }

    /// Gauges that received a level.
    pub fn classified(&self) -> usize {
        self.safe + self.warning + self.danger
    }

    /// Every gauge considered, classified or not.
    pub fn total(&self) -> usize {
        self.classified() + self.unclassified
    }

    /// Fraction of all gauges at `level`, in `[0.0, 1.0]`.
    pub fn share(&self, level: RiskLevel) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(level) as f64 / total as f64,
        }
    }
}

/// Level assigned to one gauge, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GaugeRisk {
    pub gauge_id: GaugeId,
    /// `None` when the gauge currently has no reading.
    pub level: Option<RiskLevel>,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub counts: RiskCounts,
    pub overall: OverallStatus,
    pub gauges: Vec<GaugeRisk>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Derive the overall status from level counts.
///
/// Rules are evaluated top to bottom, first match wins:
/// 1. `danger >= BUBBLE_DANGER_MIN` -> `Bubble`
/// 2. `danger >= OVERHEATING_DANGER_MIN` -> `Overheating`
/// 3. `danger >= CAUTION_DANGER_MIN` or `warning >= CAUTION_WARNING_MIN` -> `Caution`
/// 4. otherwise `Normal`
pub fn overall_status(counts: &RiskCounts) -> OverallStatus {
    if counts.danger >= BUBBLE_DANGER_MIN {
        OverallStatus::Bubble
    } else if counts.danger >= OVERHEATING_DANGER_MIN {
        OverallStatus::Overheating
    } else if counts.danger >= CAUTION_DANGER_MIN || counts.warning >= CAUTION_WARNING_MIN {
        OverallStatus::Caution
    } else {
        OverallStatus::Normal
    }
}

/// Classify every gauge that has a reading and derive the overall status.
///
/// Readings for ids not present in `gauges` are ignored. A non-finite
/// reading aborts the whole aggregation with `InvalidReadingValue`.
pub fn aggregate(
    gauges: &[GaugeDefinition],
    readings: &HashMap<GaugeId, Reading>,
) -> Result<Assessment, CoreError> {
    let mut counts = RiskCounts::default();
    let mut per_gauge = Vec::with_capacity(gauges.len());

    for gauge in gauges {
        let level = readings
            .get(&gauge.id)
            .map(|reading| classify(gauge, reading))
            .transpose()?;

        counts.record(level);
        per_gauge.push(GaugeRisk {
            gauge_id: gauge.id.clone(),
            level,
        });
    }

    let overall = overall_status(&counts);
    tracing::trace!(
        safe = counts.safe,
        warning = counts.warning,
        danger = counts.danger,
        unclassified = counts.unclassified,
        overall = overall.as_str(),
        "Panel aggregated"
    );

    Ok(Assessment {
        counts,
        overall,
        gauges: per_gauge,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
