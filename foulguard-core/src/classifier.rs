//! Maps one vessel's measured fouling state into a Fouling-Risk level and a
//! compliance status. Thickness and roughness are evaluated independently
//! and the more severe of the two outcomes wins, so a vessel under the
//! thickness limit can still fail on roughness alone.

use crate::error::FoulguardError;
use chrono::NaiveDate;
use foulguard_schemas::{
    classification::{Classification, ComplianceStatus},
    thresholds::{ComplianceThresholds, ThresholdTable},
    vessel::VesselMeasurement,
};
use serde::{Deserialize, Serialize};

/// Thickness band edges of the FR scale, in millimeters. Band membership is
/// closed at the lower bound: a value exactly on an edge belongs to the
/// more severe band.
const MICRO_ONSET_MM: f64 = 1.0;
const MACRO_LIGHT_ONSET_MM: f64 = 3.0;
const MACRO_MODERATE_ONSET_MM: f64 = 4.0;

/// Minimum inspection interval required by NORMAM 401 (quarterly).
pub const INSPECTION_INTERVAL_DAYS: i64 = 90;

/// A vessel excluded from a batch because its measurement violated the
/// input contract. The rest of the batch is still processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedVessel {
    pub vessel_id: String,
    pub reason: String,
}

/// Result of classifying a whole fleet snapshot: the valid subset paired
/// with its classifications, plus every rejected vessel with its reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetClassification {
    pub classified: Vec<(VesselMeasurement, Classification)>,
    pub rejected: Vec<RejectedVessel>,
}

/// Classifies a single measurement against the given thresholds.
///
/// Negative thickness, roughness or performance loss is a contract
/// violation and fails with `InvalidMeasurement` rather than clamping.
pub fn classify(
    measurement: &VesselMeasurement,
    thresholds: &ComplianceThresholds,
) -> Result<Classification, FoulguardError> {
    validate(measurement)?;

    let fr_level = fr_level_for_thickness(measurement.fouling_thickness_mm, thresholds);
    let thickness_status = status_for_fr(fr_level, thresholds);
    let roughness_status = status_for_roughness(measurement.roughness_um, thresholds);
    let status = thickness_status.max(roughness_status);

    let alert_message = if status == ComplianceStatus::Compliant {
        None
    } else {
        Some(alert_reasons(measurement, thresholds, fr_level))
    };

    Ok(Classification {
        fr_level,
        status,
        compliance_score: compliance_score(measurement, thresholds),
        alert_message,
    })
}

/// Classifies every vessel in a snapshot, resolving thresholds per vessel
/// class. One bad record never halts the batch; it is reported in
/// `rejected` and the remaining vessels are classified normally.
pub fn classify_fleet(
    measurements: &[VesselMeasurement],
    thresholds: &ThresholdTable,
) -> FleetClassification {
    let mut result = FleetClassification::default();
    for measurement in measurements {
        let limits = thresholds.for_class(measurement.vessel_class.as_deref());
        match classify(measurement, limits) {
            Ok(classification) => result.classified.push((measurement.clone(), classification)),
            Err(e) => result.rejected.push(RejectedVessel {
                vessel_id: measurement.vessel_id.clone(),
                reason: e.to_string(),
            }),
        }
    }
    result
}

/// Empirical estimate of the additional hydrodynamic resistance caused by
/// fouling: up to 15% for 5 mm of growth plus up to 10% for 500 µm of
/// roughness, capped at 50%. Used when the upstream performance model did
/// not supply a value.
pub fn estimate_performance_loss(thickness_mm: f64, roughness_um: f64) -> f64 {
    let thickness_impact = (thickness_mm / 5.0) * 15.0;
    let roughness_impact = ((roughness_um - 100.0) / 400.0) * 10.0;
    (thickness_impact + roughness_impact).clamp(0.0, 50.0)
}

/// Advisory only: days elapsed since the last recorded hull cleaning, if
/// known. Never part of the status decision.
pub fn days_since_cleaning(measurement: &VesselMeasurement, today: NaiveDate) -> Option<i64> {
    measurement
        .last_cleaning_date
        .map(|d| (today - d).num_days())
}

fn validate(measurement: &VesselMeasurement) -> Result<(), FoulguardError> {
    let checks = [
        ("fouling_thickness_mm", Some(measurement.fouling_thickness_mm)),
        ("roughness_um", Some(measurement.roughness_um)),
        ("performance_loss_percent", measurement.performance_loss_percent),
    ];
    for (field, value) in checks {
        if let Some(value) = value {
            if value < 0.0 {
                return Err(FoulguardError::InvalidMeasurement {
                    vessel_id: measurement.vessel_id.clone(),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}

fn fr_level_for_thickness(thickness_mm: f64, thresholds: &ComplianceThresholds) -> u8 {
    // The configured limit always means FR 4, even when tightened below the
    // default band edges.
    if thickness_mm >= thresholds.max_thickness_mm {
        4
    } else if thickness_mm < MICRO_ONSET_MM {
        0
    } else if thickness_mm < MACRO_LIGHT_ONSET_MM {
        1
    } else if thickness_mm < MACRO_MODERATE_ONSET_MM {
        2
    } else {
        3
    }
}

fn status_for_fr(fr_level: u8, thresholds: &ComplianceThresholds) -> ComplianceStatus {
    if fr_level <= thresholds.compliant_fr_max {
        ComplianceStatus::Compliant
    } else {
        match fr_level {
            0..=2 => ComplianceStatus::AtRisk,
            3 => ComplianceStatus::NonCompliant,
            _ => ComplianceStatus::Critical,
        }
    }
}

fn status_for_roughness(roughness_um: f64, thresholds: &ComplianceThresholds) -> ComplianceStatus {
    if roughness_um >= thresholds.max_roughness_um {
        ComplianceStatus::NonCompliant
    } else if roughness_um >= thresholds.alert_fraction * thresholds.max_roughness_um {
        ComplianceStatus::AtRisk
    } else {
        ComplianceStatus::Compliant
    }
}

/// Weighted distance-to-limit score (0-1, 1 = fully clean hull): thickness
/// weighs 0.6, roughness 0.4.
fn compliance_score(measurement: &VesselMeasurement, thresholds: &ComplianceThresholds) -> f64 {
    let thickness_score =
        1.0 - (measurement.fouling_thickness_mm / thresholds.max_thickness_mm).min(1.0);
    let roughness_score = 1.0 - (measurement.roughness_um / thresholds.max_roughness_um).min(1.0);
    (thickness_score * 0.6 + roughness_score * 0.4).clamp(0.0, 1.0)
}

/// Builds the deterministic alert text, one clause per measurement that
/// escalated the status, joined with "; ".
fn alert_reasons(
    measurement: &VesselMeasurement,
    thresholds: &ComplianceThresholds,
    fr_level: u8,
) -> String {
    let mut reasons = Vec::new();

    match fr_level {
        4 => reasons.push(format!(
            "Espessura de bioincrustação ({:.2} mm) excede limite máximo permitido ({:.2} mm)",
            measurement.fouling_thickness_mm, thresholds.max_thickness_mm
        )),
        3 => reasons.push(format!(
            "Espessura de bioincrustação ({:.2} mm) próxima do limite máximo ({:.2} mm)",
            measurement.fouling_thickness_mm, thresholds.max_thickness_mm
        )),
        2 => reasons.push(format!(
            "Espessura de bioincrustação ({:.2} mm) acima do limiar de macroincrustação ({:.2} mm)",
            measurement.fouling_thickness_mm, MACRO_LIGHT_ONSET_MM
        )),
        _ => {}
    }

    if measurement.roughness_um >= thresholds.max_roughness_um {
        reasons.push(format!(
            "Rugosidade ({:.1} μm) excede limite máximo permitido ({:.1} μm)",
            measurement.roughness_um, thresholds.max_roughness_um
        ));
    } else if measurement.roughness_um >= thresholds.alert_fraction * thresholds.max_roughness_um {
        reasons.push(format!(
            "Rugosidade ({:.1} μm) próxima do limite máximo ({:.1} μm)",
            measurement.roughness_um, thresholds.max_roughness_um
        ));
    }

    if reasons.is_empty() {
        // Reachable only with a tightened compliant_fr_max, where FR 1 can
        // already be non-compliant without entering any alert band.
        reasons.push(format!(
            "FR {} acima do nível máximo conforme (FR {})",
            fr_level, thresholds.compliant_fr_max
        ));
    }

    reasons.join("; ")
}
