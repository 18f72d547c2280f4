use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use foulguard_core::{
    aggregate::aggregate,
    classifier::{self, classify_fleet},
    report::{build_report, ReportFormat},
};
use foulguard_schemas::vessel::VesselMeasurement;
use std::{fs, path::PathBuf};

mod config;

/// Fleet compliance reporting for hull biofouling.
#[derive(Debug, Parser)]
#[command(name = "foulguard", version, about)]
struct Cli {
    /// Fleet snapshot YAML file.
    #[arg(long)]
    fleet: PathBuf,

    /// Threshold table YAML file; defaults to the built-in NORMAM 401 limits.
    #[arg(long)]
    thresholds: Option<PathBuf>,

    /// Export encoding: csv, spreadsheet or printable.
    #[arg(long, default_value = "printable")]
    format: String,

    /// Directory the report is written into.
    #[arg(long, default_value = "./reports")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    println!("--- Foulguard Fleet Compliance ---");

    let format: ReportFormat = cli.format.parse()?;
    let thresholds = config::load_thresholds(cli.thresholds.as_deref())?;
    let mut vessels = config::load_fleet(&cli.fleet)?;

    // Fill in performance loss for vessels the upstream model skipped.
    for vessel in &mut vessels {
        if vessel.performance_loss_percent.is_none() {
            vessel.performance_loss_percent = Some(classifier::estimate_performance_loss(
                vessel.fouling_thickness_mm,
                vessel.roughness_um,
            ));
        }
    }

    let classified = classify_fleet(&vessels, &thresholds);
    for rejected in &classified.rejected {
        eprintln!(
            "Skipping vessel '{}': {}",
            rejected.vessel_id, rejected.reason
        );
    }

    let summary = aggregate(&classified.classified);
    println!(
        "Classified {} vessel(s): {} conforme(s), {} em risco, {} não conforme(s), {} crítica(s)",
        summary.fleet.total,
        summary.fleet.compliant,
        summary.fleet.at_risk,
        summary.fleet.non_compliant,
        summary.fleet.critical
    );
    println!("Taxa de conformidade: {:.1}%", summary.fleet.compliance_rate);

    print_cleaning_hints(&vessels);

    let generated_at = Utc::now();
    let report = build_report(&summary, &classified.classified, format, generated_at)?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("Failed to create output directory '{}'", cli.output.display()))?;
    let extension = match format {
        ReportFormat::Csv => "csv",
        ReportFormat::Spreadsheet => "xls",
        ReportFormat::Printable => "txt",
    };
    let file_name = format!("conformidade_{}.{}", generated_at.format("%Y-%m-%d"), extension);
    let path = cli.output.join(file_name);
    fs::write(&path, report)
        .with_context(|| format!("Failed to write report to '{}'", path.display()))?;

    println!("Report written to '{}'", path.display());
    Ok(())
}

/// Advisory only: points out vessels whose last recorded cleaning is older
/// than the quarterly inspection interval.
fn print_cleaning_hints(vessels: &[VesselMeasurement]) {
    let today = Utc::now().date_naive();
    for vessel in vessels {
        match classifier::days_since_cleaning(vessel, today) {
            Some(days) if days > classifier::INSPECTION_INTERVAL_DAYS => {
                println!(
                    "Aviso: '{}' sem limpeza há {} dias (intervalo mínimo: {} dias)",
                    vessel.name,
                    days,
                    classifier::INSPECTION_INTERVAL_DAYS
                );
            }
            _ => {}
        }
    }
}
