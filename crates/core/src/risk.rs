//! Risk level and overall status enumerations.

use serde::{Deserialize, Serialize};

/// Per-gauge classification. Ordered `Safe < Warning < Danger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::Safe, Self::Warning, Self::Danger];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// System-wide verdict derived from the distribution of risk levels.
///
/// Ordered by severity, `Normal < Caution < Overheating < Bubble`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Normal,
    Caution,
    Overheating,
    Bubble,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Caution => "CAUTION",
            Self::Overheating => "OVERHEATING",
            Self::Bubble => "BUBBLE",
        }
    }

    /// Short banner label.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Normal => "Normal Market",
            Self::Caution => "Caution",
            Self::Overheating => "Overheating",
            Self::Bubble => "Bubble Territory",
        }
    }

    /// Guidance that accompanies the verdict.
    pub fn recommended_action(&self) -> &'static str {
        match self {
            Self::Normal => "Continue standard monitoring",
            Self::Caution => "Increase vigilance, review positions",
            Self::Overheating => "Reduce exposure, tighten risk management",
            Self::Bubble => "Defensive positioning recommended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Safe < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::Danger);
    }

    #[test]
    fn statuses_are_ordered_by_severity() {
        assert!(OverallStatus::Normal < OverallStatus::Caution);
        assert!(OverallStatus::Caution < OverallStatus::Overheating);
        assert!(OverallStatus::Overheating < OverallStatus::Bubble);
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::Danger).unwrap(), "\"danger\"");
        assert_eq!(
            serde_json::to_string(&OverallStatus::Overheating).unwrap(),
            "\"OVERHEATING\""
        );
        assert_eq!(OverallStatus::Bubble.as_str(), "BUBBLE");
    }
}
