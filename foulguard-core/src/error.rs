use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoulguardError {
    #[error("Invalid measurement for vessel '{vessel_id}': {field} is {value}, must be non-negative")]
    InvalidMeasurement {
        vessel_id: String,
        field: &'static str,
        value: f64,
    },

    #[error("Unsupported report format '{0}' (expected csv, spreadsheet or printable)")]
    UnsupportedFormat(String),

    #[error("Failed to encode CSV report: {0}")]
    CsvError(#[from] csv::Error),
}
