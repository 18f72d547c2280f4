//! Reduces a classified fleet into compliance statistics: counts per status
//! and FR level, averages, the fleet compliance rate and an independent
//! breakdown per vessel class. A pure, order-independent tally except that
//! class groups keep the insertion order of first occurrence, so report
//! rows stay stable for a given input ordering.

use foulguard_schemas::{
    classification::{Classification, ComplianceStatus},
    summary::{ClassBreakdown, FleetSummary, SummaryStats},
    vessel::VesselMeasurement,
};

/// Computes fleet-wide statistics over the classified subset of a snapshot.
///
/// An empty input is not an error: every count and average is 0 and the
/// compliance rate is 0% (the caller distinguishes "no data" from "clean
/// fleet" by checking `total`). Duplicate vessel_ids are tallied as-is;
/// deduplication is the caller's responsibility.
pub fn aggregate(classifications: &[(VesselMeasurement, Classification)]) -> FleetSummary {
    let mut by_class: Vec<(String, Vec<&(VesselMeasurement, Classification)>)> = Vec::new();
    for pair in classifications {
        let class = pair.0.class_or_na();
        match by_class.iter_mut().find(|(name, _)| name == class) {
            Some((_, group)) => group.push(pair),
            None => by_class.push((class.to_string(), vec![pair])),
        }
    }

    FleetSummary {
        fleet: stats_over(classifications.iter()),
        by_class: by_class
            .into_iter()
            .map(|(vessel_class, group)| ClassBreakdown {
                vessel_class,
                stats: stats_over(group.into_iter()),
            })
            .collect(),
    }
}

fn stats_over<'a, I>(pairs: I) -> SummaryStats
where
    I: Iterator<Item = &'a (VesselMeasurement, Classification)>,
{
    let mut stats = SummaryStats::default();
    let mut thickness_sum = 0.0;
    let mut roughness_sum = 0.0;
    let mut loss_sum = 0.0;
    let mut score_sum = 0.0;

    for (measurement, classification) in pairs {
        stats.total += 1;
        stats.fr_counts[classification.fr_level.min(4) as usize] += 1;
        match classification.status {
            ComplianceStatus::Compliant => stats.compliant += 1,
            ComplianceStatus::AtRisk => stats.at_risk += 1,
            ComplianceStatus::NonCompliant => stats.non_compliant += 1,
            ComplianceStatus::Critical => stats.critical += 1,
        }
        thickness_sum += measurement.fouling_thickness_mm;
        roughness_sum += measurement.roughness_um;
        loss_sum += measurement.performance_loss_percent.unwrap_or(0.0);
        score_sum += classification.compliance_score;
    }

    if stats.total > 0 {
        let n = stats.total as f64;
        stats.compliance_rate = stats.compliant as f64 / n * 100.0;
        stats.avg_thickness_mm = thickness_sum / n;
        stats.avg_roughness_um = roughness_sum / n;
        stats.avg_performance_loss_percent = loss_sum / n;
        stats.avg_compliance_score = score_sum / n;
    }

    stats
}
