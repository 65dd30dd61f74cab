//! Loading and cleaning of daily ad-performance exports.
//!
//! Exports arrive as CSV or JSON with a fixed column set (either the
//! canonical snake_case names or the ad platform's original headers).
//! Cleaning derives the activity flag and per-row completion rates; no row
//! is dropped here.

pub mod clean;
pub mod error;
pub mod load;
pub mod record;

pub use clean::{clean_record, clean_records, dataset_overview, DatasetOverview};
pub use error::IngestError;
pub use load::{load_performance, read_csv, read_json, InputFormat};
pub use record::RawPerformanceRecord;
