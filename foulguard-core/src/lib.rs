//! Fouling-Risk compliance core: classifies per-vessel biofouling
//! measurements into ordinal risk bands, reduces a classified fleet into
//! compliance statistics, and renders the result as CSV, spreadsheet or
//! printable report. All three stages are pure functions over in-memory
//! data; the surrounding application owns fetching, persistence and display.

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod report;
