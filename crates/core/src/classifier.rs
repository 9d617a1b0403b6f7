//! Per-gauge risk classification.
//!
//! Pure functions only: no state, no I/O. The threshold pair is assumed
//! valid (checked at registry load), so only the reading is validated here.

use crate::error::CoreError;
use crate::reading::Reading;
use crate::registry::{GaugeDefinition, Thresholds};
use crate::risk::RiskLevel;
use crate::threshold_validation::ensure_finite_reading;

/// Classify a reading for a gauge.
///
/// Fails with `InvalidReadingValue` for NaN or infinite values; the value is
/// never clamped.
pub fn classify(gauge: &GaugeDefinition, reading: &Reading) -> Result<RiskLevel, CoreError> {
    ensure_finite_reading(&gauge.id, reading.value)?;
    Ok(classify_value(&gauge.thresholds, gauge.inverted, reading.value))
}

/// Place a finite value into one of the three zones.
///
/// Normal polarity (lower is safer):
/// - `Safe` if `value <= safe`
/// - `Warning` if `value <= warning`
/// - `Danger` otherwise
///
/// Inverted polarity mirrors every comparison. Each boundary belongs to the
/// safer zone.
pub fn classify_value(thresholds: &Thresholds, inverted: bool, value: f64) -> RiskLevel {
    if inverted {
        if value >= thresholds.safe {
            RiskLevel::Safe
        } else if value >= thresholds.warning {
            RiskLevel::Warning
        } else {
            RiskLevel::Danger
        }
    } else if value <= thresholds.safe {
        RiskLevel::Safe
    } else if value <= thresholds.warning {
        RiskLevel::Warning
    } else {
        RiskLevel::Danger
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;
    use crate::reading::Trend;
    use crate::registry::tests::gauge;
    use crate::registry::Registry;

    fn reading(value: f64) -> Reading {
        Reading::new(value, Trend::Stable, Utc::now())
    }

    // -- normal polarity ------------------------------------------------------

    #[test]
    fn normal_at_safe_boundary_is_safe() {
        let g = gauge("v", 22.0, 30.0, false);
        assert_eq!(classify(&g, &reading(22.0)).unwrap(), RiskLevel::Safe);
    }

    #[test]
    fn normal_at_warning_boundary_is_warning() {
        let g = gauge("v", 22.0, 30.0, false);
        assert_eq!(classify(&g, &reading(30.0)).unwrap(), RiskLevel::Warning);
    }

    #[test]
    fn normal_just_above_warning_is_danger() {
        let g = gauge("v", 22.0, 30.0, false);
        let above = f64::from_bits(30.0_f64.to_bits() + 1);
        assert_eq!(classify(&g, &reading(above)).unwrap(), RiskLevel::Danger);
    }

    #[test]
    fn normal_just_above_safe_is_warning() {
        let g = gauge("v", 22.0, 30.0, false);
        assert_eq!(classify(&g, &reading(22.01)).unwrap(), RiskLevel::Warning);
    }

    #[test]
    fn normal_negative_value_is_safe() {
        let g = gauge("v", 0.3, 0.5, false);
        assert_eq!(classify(&g, &reading(-1.0)).unwrap(), RiskLevel::Safe);
    }

    // -- inverted polarity ----------------------------------------------------

    #[test]
    fn inverted_at_safe_boundary_is_safe() {
        let g = gauge("m", 60.0, 35.0, true);
        assert_eq!(classify(&g, &reading(60.0)).unwrap(), RiskLevel::Safe);
    }

    #[test]
    fn inverted_at_warning_boundary_is_warning() {
        let g = gauge("m", 60.0, 35.0, true);
        assert_eq!(classify(&g, &reading(35.0)).unwrap(), RiskLevel::Warning);
    }

    #[test]
    fn inverted_just_below_warning_is_danger() {
        let g = gauge("m", 60.0, 35.0, true);
        let below = f64::from_bits(35.0_f64.to_bits() - 1);
        assert_eq!(classify(&g, &reading(below)).unwrap(), RiskLevel::Danger);
    }

    #[test]
    fn inverted_high_value_is_safe() {
        let g = gauge("m", 60.0, 35.0, true);
        assert_eq!(classify(&g, &reading(95.0)).unwrap(), RiskLevel::Safe);
    }

    // -- collapsed warning zone -----------------------------------------------

    #[test]
    fn equal_thresholds_leave_single_point_warning_zone_empty() {
        // value == safe == warning is caught by the safe comparison first.
        let g = gauge("p", 1.0, 1.0, false);
        assert_eq!(classify(&g, &reading(1.0)).unwrap(), RiskLevel::Safe);
        assert_eq!(classify(&g, &reading(1.5)).unwrap(), RiskLevel::Danger);
    }

    // -- input contract -------------------------------------------------------

    #[test]
    fn non_finite_values_rejected() {
        let g = gauge("v", 22.0, 30.0, false);
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_matches!(
                classify(&g, &reading(v)),
                Err(CoreError::InvalidReadingValue { ref gauge_id, .. }) if gauge_id == "v"
            );
        }
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let g = gauge("v", 22.0, 30.0, false);
        let r = reading(27.5);
        let first = classify(&g, &r).unwrap();
        for _ in 0..10 {
            assert_eq!(classify(&g, &r).unwrap(), first);
        }
    }

    // -- default panel boundaries ---------------------------------------------

    #[test]
    fn every_default_gauge_honours_its_boundaries() {
        let registry = Registry::default_panel().unwrap();
        for g in registry.gauges() {
            let t = g.thresholds;
            assert_eq!(classify(g, &reading(t.safe)).unwrap(), RiskLevel::Safe, "{}", g.id);
            let level_at_warning = classify(g, &reading(t.warning)).unwrap();
            assert_eq!(level_at_warning, RiskLevel::Warning, "{}", g.id);

            let past_warning = if g.inverted {
                t.warning - 0.001
            } else {
                t.warning + 0.001
            };
            assert_eq!(
                classify(g, &reading(past_warning)).unwrap(),
                RiskLevel::Danger,
                "{}",
                g.id
            );
        }
    }
}
