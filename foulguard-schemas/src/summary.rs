use serde::{Deserialize, Serialize};

/// Aggregate statistics over a set of classified vessels. Used both for the
/// fleet as a whole and for each vessel class independently.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: usize,
    pub compliant: usize,
    pub at_risk: usize,
    pub non_compliant: usize,
    pub critical: usize,
    /// Vessel count per FR level 0-4.
    pub fr_counts: [usize; 5],
    /// Percent of vessels counted compliant; 0.0 for an empty set.
    pub compliance_rate: f64,
    pub avg_thickness_mm: f64,
    pub avg_roughness_um: f64,
    pub avg_performance_loss_percent: f64,
    pub avg_compliance_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassBreakdown {
    pub vessel_class: String,
    pub stats: SummaryStats,
}

/// Fleet-wide statistics plus the per-class breakdown. The breakdown keeps
/// the insertion order of first occurrence, so report rows are stable for a
/// given input ordering.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub fleet: SummaryStats,
    pub by_class: Vec<ClassBreakdown>,
}
