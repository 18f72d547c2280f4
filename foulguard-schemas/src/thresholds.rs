//! Regulatory compliance limits. Defaults follow the NORMAM 401 general
//! limits (5.0 mm fouling thickness, 500 µm roughness) with the customary
//! per-vessel-class adjustments; all values are configuration, never
//! hardcoded at a call site.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The recognized compliance options for one vessel class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceThresholds {
    /// Maximum allowed fouling thickness in millimeters.
    pub max_thickness_mm: f64,
    /// Maximum allowed hull roughness in micrometers.
    pub max_roughness_um: f64,
    /// Fraction of a limit at which the "at risk" zone begins.
    pub alert_fraction: f64,
    /// Highest FR level still counted as compliant. The fleet screens
    /// disagree on whether micro-fouling (FR 1) is compliant; the majority
    /// convention (FR <= 1) is the default.
    pub compliant_fr_max: u8,
}

impl Default for ComplianceThresholds {
    fn default() -> Self {
        Self {
            max_thickness_mm: 5.0,
            max_roughness_um: 500.0,
            alert_fraction: 0.8,
            compliant_fr_max: 1,
        }
    }
}

/// Thresholds keyed by vessel class, with a fallback for classes without a
/// dedicated entry. Lookup is case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub default: ComplianceThresholds,
    #[serde(default)]
    pub per_class: HashMap<String, ComplianceThresholds>,
}

impl ThresholdTable {
    /// Case-insensitive on both sides, so user-supplied override keys match
    /// regardless of how the fleet data capitalizes the class.
    pub fn for_class(&self, vessel_class: Option<&str>) -> &ComplianceThresholds {
        vessel_class
            .and_then(|class| {
                self.per_class
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(class))
                    .map(|(_, limits)| limits)
            })
            .unwrap_or(&self.default)
    }
}

impl Default for ThresholdTable {
    /// The NORMAM 401 limit table: container hulls are held to tighter
    /// limits, barges and tugs on internal routes to looser ones.
    fn default() -> Self {
        let strict = ComplianceThresholds {
            max_thickness_mm: 4.5,
            max_roughness_um: 450.0,
            ..ComplianceThresholds::default()
        };
        let relaxed = ComplianceThresholds {
            max_thickness_mm: 6.0,
            max_roughness_um: 600.0,
            ..ComplianceThresholds::default()
        };
        let mut per_class = HashMap::new();
        per_class.insert("tanker".to_string(), ComplianceThresholds::default());
        per_class.insert("cargo".to_string(), ComplianceThresholds::default());
        per_class.insert("container".to_string(), strict);
        per_class.insert("barge".to_string(), relaxed.clone());
        per_class.insert("tug".to_string(), relaxed);

        Self {
            default: ComplianceThresholds::default(),
            per_class,
        }
    }
}
