use thiserror::Error;

/// Errors raised while reading analysis files from disk.
///
/// Problems inside a free-form document never surface here: unparseable
/// embedded blocks are skipped during extraction.
#[derive(Debug, Error)]
pub enum CreativeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization error for {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("analysis file {path} is not a JSON object")]
    NotAnObject { path: String },
}
