pub mod classification;
pub mod file_formats;
pub mod summary;
pub mod thresholds;
pub mod vessel;
