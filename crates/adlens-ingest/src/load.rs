use std::path::Path;

use adlens_core::PerformanceRow;

use crate::clean::clean_records;
use crate::error::IngestError;
use crate::record::RawPerformanceRecord;

/// Supported performance export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Picks the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(InputFormat::Csv),
            Some("json") => Ok(InputFormat::Json),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read a performance export from disk and clean it.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read, has an unsupported
/// extension, or contains a record that cannot be decoded.
pub fn load_performance(path: &Path) -> Result<Vec<PerformanceRow>, IngestError> {
    let format = InputFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let records = match format {
        InputFormat::Csv => read_csv(&content)?,
        InputFormat::Json => read_json(&content)?,
    };

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "loaded performance export"
    );

    Ok(clean_records(records))
}

/// Decode CSV text with a header row. A leading UTF-8 byte order mark is
/// ignored and header cells are trimmed.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] on malformed CSV or an undecodable cell.
pub fn read_csv(content: &str) -> Result<Vec<RawPerformanceRecord>, IngestError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    reader
        .deserialize::<RawPerformanceRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(IngestError::from)
}

/// Decode a JSON array of records.
///
/// # Errors
///
/// Returns [`IngestError::Json`] if the document is not an array of
/// decodable records.
pub fn read_json(content: &str) -> Result<Vec<RawPerformanceRecord>, IngestError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    serde_json::from_str(content).map_err(|source| IngestError::Json {
        context: "performance records".to_string(),
        source,
    })
}
