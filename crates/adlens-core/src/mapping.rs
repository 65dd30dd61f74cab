//! Association between performance-export ad names and analysed creatives.
//!
//! The association is decided outside the pipeline (by whoever reconciles
//! the export with the analysis documents) and supplied as a YAML file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreativeMapping {
    /// Ad name exactly as it appears in the performance export.
    pub ad_name: String,
    /// `video_id` of the analysed creative.
    pub video_id: String,
    /// Optional short label for tables and charts.
    #[serde(default)]
    pub short_name: Option<String>,
}

impl CreativeMapping {
    /// The short name when set and non-blank, else the ad name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.ad_name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingFile {
    #[serde(default)]
    pub creatives: Vec<CreativeMapping>,
}

impl MappingFile {
    #[must_use]
    pub fn find(&self, ad_name: &str) -> Option<&CreativeMapping> {
        self.creatives.iter().find(|m| m.ad_name == ad_name)
    }
}

/// Load and validate a mapping file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_mapping(path: &Path) -> Result<MappingFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MappingFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_mapping(&content)
}

/// Parse and validate mapping YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_mapping(content: &str) -> Result<MappingFile, ConfigError> {
    let mapping: MappingFile =
        serde_yaml::from_str(content).map_err(ConfigError::MappingFileParse)?;
    validate_mapping(&mapping)?;
    Ok(mapping)
}

fn validate_mapping(mapping: &MappingFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in &mapping.creatives {
        if entry.ad_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "ad_name must be non-empty".to_string(),
            ));
        }
        if entry.video_id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "mapping for '{}' has an empty video_id",
                entry.ad_name
            )));
        }
        if !seen.insert(entry.ad_name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate ad_name: '{}'",
                entry.ad_name
            )));
        }
    }

    Ok(())
}
