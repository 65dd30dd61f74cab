use thiserror::Error;

/// Errors raised while reading a performance export.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or a cell that could not be coerced; the message
    /// carries the record position.
    #[error("CSV decoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON decoding error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported performance file format: {0}")]
    UnsupportedFormat(String),
}
