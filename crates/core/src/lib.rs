//! Risk classification and aggregation engine for the bubble tracker.
//!
//! - [`registry`]: immutable gauge catalog, validated at load.
//! - [`classifier`]: one gauge + one reading -> [`RiskLevel`].
//! - [`aggregator`]: all gauges + readings -> counts and [`OverallStatus`].
//! - [`session`]: owned readings and selection; delegates computation.
//!
//! This crate has no I/O and no async runtime; hosts wire it to data feeds
//! and presentation.

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod reading;
pub mod registry;
pub mod risk;
pub mod session;
pub mod threshold_validation;
pub mod types;

pub use aggregator::{aggregate, overall_status, Assessment, GaugeRisk, RiskCounts};
pub use classifier::classify;
pub use error::CoreError;
pub use reading::{Reading, Trend};
pub use registry::{GaugeDefinition, GaugeUnit, Registry, Thresholds, ValueFormat};
pub use risk::{OverallStatus, RiskLevel};
pub use session::{GaugeDetail, Session, SessionSnapshot};
