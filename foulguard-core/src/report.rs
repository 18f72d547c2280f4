//! Renders a classified, aggregated fleet snapshot into one of the three
//! export encodings. A pure formatting layer: it never re-classifies,
//! re-aggregates or rounds beyond the per-field display precision
//! (thickness 2 decimals, roughness and percentages 1 decimal).

use crate::error::FoulguardError;
use chrono::{DateTime, NaiveDate, Utc};
use foulguard_schemas::{
    classification::{fr_label, Classification, ComplianceStatus},
    summary::{FleetSummary, SummaryStats},
    vessel::VesselMeasurement,
};
use std::str::FromStr;

/// UTF-8 byte-order marker, written first so spreadsheet tools display
/// non-ASCII labels correctly.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

const COLUMNS: [&str; 13] = [
    "Embarcação",
    "ID",
    "Classe",
    "FR Level",
    "FR Label",
    "Espessura (mm)",
    "Rugosidade (μm)",
    "Perda Performance (%)",
    "Status",
    "Última Limpeza",
    "Última Pintura",
    "Calibração Sensor",
    "Alerta",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Spreadsheet,
    Printable,
}

impl FromStr for ReportFormat {
    type Err = FoulguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "spreadsheet" => Ok(ReportFormat::Spreadsheet),
            "printable" => Ok(ReportFormat::Printable),
            other => Err(FoulguardError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serializes the summary and the per-vessel classification list into the
/// requested encoding. `generated_at` is stamped on the printable report
/// only; the delimited forms are pure functions of the fleet data.
pub fn build_report(
    summary: &FleetSummary,
    classifications: &[(VesselMeasurement, Classification)],
    format: ReportFormat,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, FoulguardError> {
    match format {
        ReportFormat::Csv => build_csv(classifications),
        ReportFormat::Spreadsheet => Ok(build_spreadsheet(summary, classifications)),
        ReportFormat::Printable => Ok(build_printable(summary, classifications, generated_at)),
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn vessel_row(measurement: &VesselMeasurement, classification: &Classification) -> [String; 13] {
    [
        measurement.name.clone(),
        measurement.vessel_id.clone(),
        measurement.vessel_class.clone().unwrap_or_default(),
        classification.fr_level.to_string(),
        fr_label(classification.fr_level).to_string(),
        format!("{:.2}", measurement.fouling_thickness_mm),
        format!("{:.1}", measurement.roughness_um),
        format!("{:.1}", measurement.performance_loss_percent.unwrap_or(0.0)),
        classification.status.label().to_string(),
        format_date(measurement.last_cleaning_date),
        format_date(measurement.last_painting_date),
        format_date(measurement.sensor_calibration_date),
        classification.alert_message.clone().unwrap_or_default(),
    ]
}

/// RFC4180 CSV: header row then one row per vessel. The csv crate quotes
/// exactly the fields containing a delimiter or quote, doubling internal
/// quotes.
fn build_csv(
    classifications: &[(VesselMeasurement, Classification)],
) -> Result<Vec<u8>, FoulguardError> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(COLUMNS)?;
        for (measurement, classification) in classifications {
            writer.write_record(vessel_row(measurement, classification))?;
        }
        // The writer flushes on drop; writes into a Vec cannot fail.
    }
    Ok(buf)
}

/// Flattens embedded tabs and line breaks in a free-text cell, which would
/// otherwise corrupt the tab-delimited row layout.
fn flatten_cell(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}

/// Tab-delimited variant for spreadsheet import: the same per-vessel rows,
/// then a blank line and a RESUMO row carrying the fleet averages and the
/// overall compliance rate. Not a delimiter swap of the CSV, since it
/// appends aggregate data the per-vessel CSV does not.
fn build_spreadsheet(
    summary: &FleetSummary,
    classifications: &[(VesselMeasurement, Classification)],
) -> Vec<u8> {
    let mut out = String::from('\u{feff}');
    out.push_str(&COLUMNS.join("\t"));
    out.push('\n');
    for (measurement, classification) in classifications {
        let row = vessel_row(measurement, classification).map(|cell| flatten_cell(&cell));
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out.push('\n');

    let fleet = &summary.fleet;
    let summary_row = [
        "RESUMO".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.2}", fleet.avg_thickness_mm),
        format!("{:.1}", fleet.avg_roughness_um),
        format!("{:.1}", fleet.avg_performance_loss_percent),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("Taxa de Conformidade: {:.1}%", fleet.compliance_rate),
    ];
    out.push_str(&summary_row.join("\t"));
    out.push('\n');
    out.into_bytes()
}

fn status_count(stats: &SummaryStats, status: ComplianceStatus) -> usize {
    match status {
        ComplianceStatus::Compliant => stats.compliant,
        ComplianceStatus::AtRisk => stats.at_risk,
        ComplianceStatus::NonCompliant => stats.non_compliant,
        ComplianceStatus::Critical => stats.critical,
    }
}

/// Plain-text report suitable for printing or PDF conversion: summary
/// block, status distribution, per-class table, the full per-vessel table
/// and, when any vessel is non-compliant, a dedicated critical section.
fn build_printable(
    summary: &FleetSummary,
    classifications: &[(VesselMeasurement, Classification)],
    generated_at: DateTime<Utc>,
) -> Vec<u8> {
    let fleet = &summary.fleet;
    let mut out = String::new();
    let rule = "=".repeat(78);

    out.push_str(&rule);
    out.push_str("\n RELATÓRIO DE CONFORMIDADE DE BIOINCRUSTAÇÃO\n");
    out.push_str(&rule);
    out.push_str(&format!(
        "\nGerado em: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out.push_str("RESUMO EXECUTIVO\n");
    out.push_str(&format!("  Total de embarcações:  {}\n", fleet.total));
    out.push_str(&format!(
        "  Taxa de conformidade:  {:.1}% ({} conforme(s) de {})\n",
        fleet.compliance_rate, fleet.compliant, fleet.total
    ));
    out.push_str(&format!("  Espessura média:       {:.2} mm\n", fleet.avg_thickness_mm));
    out.push_str(&format!("  Rugosidade média:      {:.1} μm\n", fleet.avg_roughness_um));
    out.push_str(&format!(
        "  Perda de performance:  {:.1}%\n\n",
        fleet.avg_performance_loss_percent
    ));

    out.push_str("DISTRIBUIÇÃO DE STATUS\n");
    for status in ComplianceStatus::ALL {
        let count = status_count(fleet, status);
        let percent = if fleet.total > 0 {
            count as f64 / fleet.total as f64 * 100.0
        } else {
            0.0
        };
        out.push_str(&format!("  {:<14} {:>4}  {:>5.1}%\n", status.label(), count, percent));
    }
    out.push('\n');

    if !summary.by_class.is_empty() {
        out.push_str("ANÁLISE POR CLASSE\n");
        out.push_str(&format!(
            "  {:<16} {:>5} {:>10} {:>9} {:>14} {:>7}\n",
            "Classe", "Total", "Conformes", "Em Risco", "Não Conformes", "Taxa"
        ));
        for breakdown in &summary.by_class {
            let stats = &breakdown.stats;
            out.push_str(&format!(
                "  {:<16} {:>5} {:>10} {:>9} {:>14} {:>6.1}%\n",
                breakdown.vessel_class,
                stats.total,
                stats.compliant,
                stats.at_risk,
                stats.non_compliant + stats.critical,
                stats.compliance_rate
            ));
        }
        out.push('\n');
    }

    out.push_str("STATUS DETALHADO POR EMBARCAÇÃO\n");
    out.push_str(&format!(
        "  {:<24} {:<10} {:>3} {:>10} {:>11} {:>9} {:>13}  {}\n",
        "Embarcação", "Classe", "FR", "Esp. (mm)", "Rug. (μm)", "Perda (%)", "Últ. Limpeza", "Status"
    ));
    for (measurement, classification) in classifications {
        out.push_str(&format!(
            "  {:<24} {:<10} {:>3} {:>10.2} {:>11.1} {:>9.1} {:>13}  {}\n",
            measurement.name,
            measurement.class_or_na(),
            classification.fr_level,
            measurement.fouling_thickness_mm,
            measurement.roughness_um,
            measurement.performance_loss_percent.unwrap_or(0.0),
            format_date(measurement.last_cleaning_date),
            classification.status.label()
        ));
    }
    out.push('\n');

    let failing = fleet.non_compliant + fleet.critical;
    if failing > 0 {
        out.push_str("EMBARCAÇÕES CRÍTICAS\n");
        out.push_str(&format!(
            "  {} embarcação(ões) requerem ação imediata:\n",
            failing
        ));
        for (measurement, classification) in classifications {
            if classification.status >= ComplianceStatus::NonCompliant {
                out.push_str(&format!(
                    "  - {} ({}) - FR {} - {}\n",
                    measurement.name,
                    measurement.class_or_na(),
                    classification.fr_level,
                    classification.alert_message.as_deref().unwrap_or("")
                ));
            }
        }
        out.push('\n');
    }

    out.push_str("RECOMENDAÇÕES\n");
    for recommendation in recommendations(fleet) {
        out.push_str(&format!("  - {recommendation}\n"));
    }

    out.into_bytes()
}

/// Deterministic fleet-level recommendations derived from the summary
/// alone, in the same order the compliance screens present them.
fn recommendations(fleet: &SummaryStats) -> Vec<String> {
    let failing = fleet.non_compliant + fleet.critical;
    let mut out = Vec::new();
    if failing > 0 {
        out.push(format!(
            "Ação Imediata: {} embarcação(ões) não conforme(s) requerem limpeza imediata \
             para restaurar a conformidade.",
            failing
        ));
    }
    if fleet.at_risk > 0 {
        out.push(format!(
            "Monitoramento Intensificado: {} embarcação(ões) em risco devem ter limpeza \
             preventiva agendada.",
            fleet.at_risk
        ));
    }
    if fleet.total > 0 && fleet.compliance_rate < 80.0 {
        out.push(
            "Melhoria Necessária: taxa de conformidade abaixo de 80%. Revisar protocolos \
             de manutenção e limpeza."
                .to_string(),
        );
    }
    if fleet.avg_thickness_mm > 3.0 {
        out.push(format!(
            "Espessura Média Elevada: {:.2} mm indica necessidade de limpeza preventiva \
             mais frequente.",
            fleet.avg_thickness_mm
        ));
    }
    if fleet.total > 0 && fleet.compliance_rate >= 80.0 && failing == 0 {
        out.push(
            "Status Excelente: frota em conformidade. Manter protocolos de monitoramento \
             e manutenção preventiva."
                .to_string(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate::aggregate, classifier::classify_fleet};
    use chrono::TimeZone;
    use foulguard_schemas::thresholds::ThresholdTable;

    fn vessel(id: &str, name: &str, thickness_mm: f64, roughness_um: f64) -> VesselMeasurement {
        VesselMeasurement {
            vessel_id: id.to_string(),
            name: name.to_string(),
            vessel_class: Some("tanker".to_string()),
            fouling_thickness_mm: thickness_mm,
            roughness_um,
            performance_loss_percent: Some(7.5),
            last_cleaning_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            last_painting_date: None,
            sensor_calibration_date: None,
        }
    }

    fn sample_fleet() -> Vec<(VesselMeasurement, Classification)> {
        let vessels = vec![
            vessel("RT01", "Rio, Tanker", 0.5, 120.0),
            vessel("SM02", "Suez \"Master\"", 3.5, 300.0),
            vessel("GS03", "Guanabara Star", 5.2, 520.0),
        ];
        let result = classify_fleet(&vessels, &ThresholdTable::default());
        assert!(result.rejected.is_empty());
        result.classified
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn format_tags_parse_and_unknown_tags_fail() {
        assert_eq!("csv".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!(
            "Spreadsheet".parse::<ReportFormat>().unwrap(),
            ReportFormat::Spreadsheet
        );
        let err = "xml".parse::<ReportFormat>().unwrap_err();
        assert!(matches!(err, FoulguardError::UnsupportedFormat(ref tag) if tag == "xml"));
    }

    #[test]
    fn csv_starts_with_utf8_bom_and_header() {
        let pairs = sample_fleet();
        let summary = aggregate(&pairs);
        let bytes = build_report(&summary, &pairs, ReportFormat::Csv, stamp()).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert!(text.starts_with("Embarcação,ID,Classe,FR Level"));
    }

    #[test]
    fn csv_round_trips_names_values_and_status_labels() {
        let pairs = sample_fleet();
        let summary = aggregate(&pairs);
        let bytes = build_report(&summary, &pairs, ReportFormat::Csv, stamp()).unwrap();

        let raw = std::str::from_utf8(&bytes[3..]).unwrap();
        // A name containing a comma must appear quoted, per RFC4180.
        assert!(raw.contains("\"Rio, Tanker\""));
        assert!(raw.contains("\"Suez \"\"Master\"\"\""));

        let mut reader = csv::Reader::from_reader(&bytes[3..]);
        let records: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), pairs.len());
        for (record, (measurement, classification)) in records.iter().zip(&pairs) {
            assert_eq!(&record[0], measurement.name.as_str());
            assert_eq!(&record[1], measurement.vessel_id.as_str());
            assert_eq!(&record[5], format!("{:.2}", measurement.fouling_thickness_mm).as_str());
            assert_eq!(&record[6], format!("{:.1}", measurement.roughness_um).as_str());
            assert_eq!(&record[8], classification.status.label());
        }
    }

    #[test]
    fn spreadsheet_appends_blank_line_and_resumo_row() {
        let pairs = sample_fleet();
        let summary = aggregate(&pairs);
        let bytes = build_report(&summary, &pairs, ReportFormat::Spreadsheet, stamp()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with('\u{feff}'));

        let lines: Vec<&str> = text.trim_end_matches('\n').lines().collect();
        // header + 3 vessels + blank + summary
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "");
        let summary_fields: Vec<&str> = lines[5].split('\t').collect();
        assert_eq!(summary_fields[0], "RESUMO");
        assert_eq!(summary_fields[5], format!("{:.2}", summary.fleet.avg_thickness_mm));
        assert_eq!(
            summary_fields[12],
            format!("Taxa de Conformidade: {:.1}%", summary.fleet.compliance_rate)
        );
    }

    #[test]
    fn spreadsheet_flattens_tabs_and_newlines_in_free_text() {
        let vessels = vec![vessel("TB01", "Tab\tBreak\nTanker", 5.2, 520.0)];
        let result = classify_fleet(&vessels, &ThresholdTable::default());
        let summary = aggregate(&result.classified);
        let bytes =
            build_report(&summary, &result.classified, ReportFormat::Spreadsheet, stamp())
                .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let lines: Vec<&str> = text.trim_end_matches('\n').lines().collect();
        // header + 1 vessel + blank + summary: no extra line from the name
        assert_eq!(lines.len(), 4);
        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields.len(), COLUMNS.len());
        assert_eq!(fields[0], "Tab Break Tanker");
    }

    #[test]
    fn printable_contains_every_section_in_order() {
        let pairs = sample_fleet();
        let summary = aggregate(&pairs);
        let bytes = build_report(&summary, &pairs, ReportFormat::Printable, stamp()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Gerado em: 2025-06-01 12:00:00 UTC"));
        let sections = [
            "RESUMO EXECUTIVO",
            "DISTRIBUIÇÃO DE STATUS",
            "ANÁLISE POR CLASSE",
            "STATUS DETALHADO POR EMBARCAÇÃO",
            "EMBARCAÇÕES CRÍTICAS",
            "RECOMENDAÇÕES",
        ];
        let mut cursor = 0;
        for section in sections {
            let position = text[cursor..]
                .find(section)
                .unwrap_or_else(|| panic!("missing section {section}"));
            cursor += position;
        }
        assert!(text.contains("Guanabara Star"));
        assert!(text.contains("Conforme"));
    }

    #[test]
    fn critical_section_is_omitted_for_a_clean_fleet() {
        let vessels = vec![vessel("RT01", "Rio Tanker", 0.5, 120.0)];
        let result = classify_fleet(&vessels, &ThresholdTable::default());
        let summary = aggregate(&result.classified);
        let bytes =
            build_report(&summary, &result.classified, ReportFormat::Printable, stamp()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("EMBARCAÇÕES CRÍTICAS"));
        assert!(text.contains("Status Excelente"));
    }

    #[test]
    fn empty_fleet_report_is_well_defined() {
        let summary = aggregate(&[]);
        let bytes = build_report(&summary, &[], ReportFormat::Printable, stamp()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Total de embarcações:  0"));
        assert!(text.contains("Taxa de conformidade:  0.0%"));
    }
}
