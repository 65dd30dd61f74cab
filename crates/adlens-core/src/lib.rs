//! Shared domain types and configuration for the adlens workspace.
//!
//! Every record here is a plain value: the pipeline crates build them,
//! never mutate them after construction, and hand them on by value or
//! shared reference.

pub mod app_config;
pub mod config;
pub mod creative;
pub mod mapping;
pub mod performance;
pub mod ratio;
pub mod summary;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use creative::{
    CreativeAttributes, DurationCategory, SegmentBucket, TimelineSegment,
    LONG_FORM_THRESHOLD_SECS,
};
pub use mapping::{load_mapping, parse_mapping, CreativeMapping, MappingFile};
pub use performance::{CompletionCounts, PerformanceRow, VideoMilestone};
pub use ratio::Ratio;
pub use summary::{CreativeSummary, RetentionLadder};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read mapping file {path}: {source}")]
    MappingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mapping file: {0}")]
    MappingFileParse(#[source] serde_yaml::Error),

    #[error("mapping validation failed: {0}")]
    Validation(String),
}
