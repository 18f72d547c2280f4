//! End-to-end pipeline: raw measurements through classifier, aggregator and
//! every export encoding, including a bad record that must be excluded
//! without halting the batch.

use chrono::{TimeZone, Utc};
use foulguard_core::{
    aggregate::aggregate,
    classifier::classify_fleet,
    report::{build_report, ReportFormat},
};
use foulguard_schemas::{thresholds::ThresholdTable, vessel::VesselMeasurement};

fn vessel(id: &str, name: &str, class: &str, thickness_mm: f64, roughness_um: f64) -> VesselMeasurement {
    VesselMeasurement {
        vessel_id: id.to_string(),
        name: name.to_string(),
        vessel_class: Some(class.to_string()),
        fouling_thickness_mm: thickness_mm,
        roughness_um,
        performance_loss_percent: Some(8.0),
        last_cleaning_date: None,
        last_painting_date: None,
        sensor_calibration_date: None,
    }
}

#[test]
fn snapshot_flows_through_all_three_stages_and_formats() {
    let vessels = vec![
        vessel("SM01", "Suez Master", "tanker", 0.6, 140.0),
        vessel("GS01", "Guanabara Star", "tanker", 3.4, 410.0),
        vessel("CB02", "Costa Brava", "container", 4.7, 300.0),
        vessel("BD03", "Baía Dourada", "tanker", -1.0, 200.0),
    ];
    let thresholds = ThresholdTable::default();
    let generated_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let result = classify_fleet(&vessels, &thresholds);
    assert_eq!(result.classified.len(), 3);
    assert_eq!(result.rejected.len(), 1);
    assert_eq!(result.rejected[0].vessel_id, "BD03");

    // The container vessel is held to the tighter 4.5 mm limit.
    let costa_brava = &result.classified[2].1;
    assert_eq!(costa_brava.fr_level, 4);

    let summary = aggregate(&result.classified);
    assert_eq!(summary.fleet.total, 3);
    assert_eq!(summary.fleet.compliant, 1);
    assert_eq!(summary.fleet.critical, 1);

    let csv_bytes =
        build_report(&summary, &result.classified, ReportFormat::Csv, generated_at).unwrap();
    let mut reader = csv::Reader::from_reader(&csv_bytes[3..]);
    let data_rows = reader.records().count();
    assert_eq!(data_rows, summary.fleet.total);

    let sheet_bytes =
        build_report(&summary, &result.classified, ReportFormat::Spreadsheet, generated_at)
            .unwrap();
    let sheet = String::from_utf8(sheet_bytes).unwrap();
    assert!(sheet.contains(&format!(
        "Taxa de Conformidade: {:.1}%",
        summary.fleet.compliance_rate
    )));

    let printable_bytes =
        build_report(&summary, &result.classified, ReportFormat::Printable, generated_at)
            .unwrap();
    let printable = String::from_utf8(printable_bytes).unwrap();
    assert!(printable.contains("Total de embarcações:  3"));
    assert!(printable.contains("EMBARCAÇÕES CRÍTICAS"));
    assert!(printable.contains("Costa Brava"));
    // The rejected vessel never reaches a report.
    assert!(!printable.contains("Baía Dourada"));
}
