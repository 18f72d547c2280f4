//! Defines the data structure for a single vessel's current biofouling state,
//! as reported by the monitoring service. These records are the sole input of
//! the compliance pipeline; nothing in this crate mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One vessel's measured hull condition at the time of the latest snapshot.
///
/// Thickness and roughness must be non-negative; the classifier rejects
/// negative values instead of clamping them. Absent numeric fields are
/// treated as zero, absent dates are reported as unknown ("N/A").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselMeasurement {
    /// Opaque identifier, unique per vessel (call sign or short IMO suffix).
    pub vessel_id: String,
    /// Display label shown in reports.
    pub name: String,
    /// Vessel class (e.g. "Suezmax"); also the key for threshold overrides.
    pub vessel_class: Option<String>,
    /// Measured accumulation depth of marine growth, in millimeters.
    #[serde(default)]
    pub fouling_thickness_mm: f64,
    /// Measured hull surface roughness, in micrometers.
    #[serde(default)]
    pub roughness_um: f64,
    /// Additional hydrodynamic resistance, in percent. Derived upstream by
    /// the performance model; absent values are treated as 0.
    #[serde(default)]
    pub performance_loss_percent: Option<f64>,
    pub last_cleaning_date: Option<NaiveDate>,
    pub last_painting_date: Option<NaiveDate>,
    pub sensor_calibration_date: Option<NaiveDate>,
}

impl VesselMeasurement {
    /// The class used for grouping and threshold lookup; missing classes
    /// fall under the fixed "N/A" category.
    pub fn class_or_na(&self) -> &str {
        self.vessel_class.as_deref().unwrap_or("N/A")
    }
}
