//! Shared numeric validation helpers.
//!
//! Used at registry load (threshold policy) and before a reading is
//! classified or stored (finite values only).

use crate::error::CoreError;
use crate::registry::Thresholds;

/// Reject NaN and +/- infinity for a reading destined for `gauge_id`.
pub fn ensure_finite_reading(gauge_id: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidReadingValue {
            gauge_id: gauge_id.to_string(),
            value,
        });
    }
    Ok(())
}

/// Validate a gauge's threshold pair against its polarity.
///
/// Both bounds must be finite. For a normal gauge `safe <= warning`; for an
/// inverted gauge (higher is safer) `safe >= warning`. Equal bounds collapse
/// the warning zone to a single point and are allowed.
pub fn validate_thresholds(
    gauge_id: &str,
    thresholds: &Thresholds,
    inverted: bool,
) -> Result<(), CoreError> {
    let invalid = |reason: String| CoreError::InvalidThresholdConfig {
        gauge_id: gauge_id.to_string(),
        reason,
    };

    if !thresholds.safe.is_finite() {
        return Err(invalid(format!(
            "safe threshold must be finite, got {}",
            thresholds.safe
        )));
    }
    if !thresholds.warning.is_finite() {
        return Err(invalid(format!(
            "warning threshold must be finite, got {}",
            thresholds.warning
        )));
    }

    if inverted && thresholds.safe < thresholds.warning {
        return Err(invalid(format!(
            "inverted gauge requires safe ({}) >= warning ({})",
            thresholds.safe, thresholds.warning
        )));
    }
    if !inverted && thresholds.safe > thresholds.warning {
        return Err(invalid(format!(
            "safe ({}) must be <= warning ({})",
            thresholds.safe, thresholds.warning
        )));
    }
    Ok(())
}
