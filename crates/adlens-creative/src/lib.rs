//! Creative analysis documents → canonical [`adlens_core::CreativeAttributes`].
//!
//! Analyses arrive either as standalone JSON files or as free-form
//! documents (typically Markdown) with structured objects embedded between
//! prose. [`extract`] finds those objects, [`normalize`] resolves each one
//! with its timeline into a fully defaulted record.

pub mod error;
pub mod extract;
pub mod load;
pub mod normalize;
pub mod time;

pub use error::CreativeError;
pub use extract::{extract_blocks, ExtractedBlock};
pub use load::{load_analysis_file, load_analysis_files, parse_analysis_document, parse_analysis_json};
pub use normalize::{normalize_creative, normalize_payload, timeline_segments, video_id_of};
pub use time::{parse_time, parse_time_range};
