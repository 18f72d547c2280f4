use anyhow::{Context, Result};
use foulguard_schemas::{
    file_formats::{FleetFile, ThresholdsFile},
    thresholds::ThresholdTable,
    vessel::VesselMeasurement,
};
use std::{fs, path::Path};

/// Loads a fleet snapshot from a YAML file.
pub fn load_fleet(path: &Path) -> Result<Vec<VesselMeasurement>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fleet file '{}'", path.display()))?;
    let file: FleetFile = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse fleet file '{}'", path.display()))?;
    println!(
        "Loaded {} vessel(s) from '{}' (schema {})",
        file.vessels.len(),
        path.display(),
        file.schema_version
    );
    Ok(file.vessels)
}

/// Loads threshold overrides from a YAML file, or falls back to the
/// built-in NORMAM 401 table when no file is given.
pub fn load_thresholds(path: Option<&Path>) -> Result<ThresholdTable> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read thresholds file '{}'", path.display()))?;
            let file: ThresholdsFile = serde_yaml::from_str(&raw)
                .with_context(|| format!("Failed to parse thresholds file '{}'", path.display()))?;
            Ok(file.thresholds)
        }
        None => Ok(ThresholdTable::default()),
    }
}
