use crate::{thresholds::ThresholdTable, vessel::VesselMeasurement};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FleetFile {
    pub schema_version: String,
    pub vessels: Vec<VesselMeasurement>,
}

#[derive(Debug, Deserialize)]
pub struct ThresholdsFile {
    pub schema_version: String,
    pub thresholds: ThresholdTable,
}
