use serde::{Deserialize, Serialize};

/// Compliance status of a single vessel, ordered by severity so the worse
/// of two independent evaluations can be taken with `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    AtRisk,
    NonCompliant,
    Critical,
}

impl ComplianceStatus {
    /// Report label, in the fixed vocabulary of the fleet screens.
    pub fn label(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Conforme",
            ComplianceStatus::AtRisk => "Em Risco",
            ComplianceStatus::NonCompliant => "Não Conforme",
            ComplianceStatus::Critical => "Crítico",
        }
    }

    /// Fixed reporting order: compliant -> at_risk -> non_compliant -> critical.
    pub const ALL: [ComplianceStatus; 4] = [
        ComplianceStatus::Compliant,
        ComplianceStatus::AtRisk,
        ComplianceStatus::NonCompliant,
        ComplianceStatus::Critical,
    ];
}

/// Human-readable label for a Fouling-Risk level (0-4).
pub fn fr_label(fr_level: u8) -> &'static str {
    match fr_level {
        0 => "Sem Incrustação",
        1 => "Micro Incrustação",
        2 => "Macro Leve",
        3 => "Macro Moderada",
        _ => "Macro Pesada",
    }
}

/// Output of the classifier for one vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Fouling-Risk level, ordinal 0-4.
    pub fr_level: u8,
    pub status: ComplianceStatus,
    /// Combined distance-to-limit score, 1.0 = fully clean hull.
    pub compliance_score: f64,
    /// Reason string, present exactly when status != compliant.
    pub alert_message: Option<String>,
}
