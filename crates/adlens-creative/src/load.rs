use std::path::{Path, PathBuf};

use serde_json::Value;

use adlens_core::CreativeAttributes;

use crate::error::CreativeError;
use crate::extract::extract_blocks;
use crate::normalize::normalize_payload;

/// Parse a free-form analysis document into creative records, in document
/// order. Documents without any identifiable object yield an empty list.
#[must_use]
pub fn parse_analysis_document(text: &str, source_file: &str) -> Vec<CreativeAttributes> {
    extract_blocks(text)
        .into_iter()
        .map(|block| normalize_payload(block.payload, block.qualitative_text, source_file))
        .collect()
}

/// Parse a standalone JSON analysis. The whole document is the analysis
/// object and there is no surrounding prose.
///
/// # Errors
///
/// Returns [`CreativeError::Json`] if the text is not valid JSON, or
/// [`CreativeError::NotAnObject`] if the top-level value is not an object.
pub fn parse_analysis_json(
    text: &str,
    source_file: &str,
) -> Result<CreativeAttributes, CreativeError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let payload: Value = serde_json::from_str(text).map_err(|source| CreativeError::Json {
        path: source_file.to_string(),
        source,
    })?;
    if !payload.is_object() {
        return Err(CreativeError::NotAnObject {
            path: source_file.to_string(),
        });
    }
    Ok(normalize_payload(payload, String::new(), source_file))
}

/// Read one analysis file. `.json` files are standalone analyses; anything
/// else is scanned as a free-form document.
///
/// # Errors
///
/// Returns [`CreativeError::Io`] if the file cannot be read, or a JSON error
/// for a malformed standalone analysis.
pub fn load_analysis_file(path: &Path) -> Result<Vec<CreativeAttributes>, CreativeError> {
    let content = std::fs::read_to_string(path).map_err(|source| CreativeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let source_file = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let creatives = if is_json {
        vec![parse_analysis_json(&content, &source_file)?]
    } else {
        parse_analysis_document(&content, &source_file)
    };

    tracing::info!(
        path = %path.display(),
        creatives = creatives.len(),
        "loaded creative analysis"
    );
    Ok(creatives)
}

/// Read several analysis files, concatenating their records in input order.
///
/// # Errors
///
/// Stops at the first file that fails to load.
pub fn load_analysis_files(paths: &[PathBuf]) -> Result<Vec<CreativeAttributes>, CreativeError> {
    let mut creatives = Vec::new();
    for path in paths {
        creatives.extend(load_analysis_file(path)?);
    }
    Ok(creatives)
}
