use thiserror::Error;

/// Errors raised while reading catalog sources.
///
/// Only provider-level failures surface here; malformed fields and rows are
/// handled inside normalization and never abort a load.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The data directory itself could not be listed.
    #[error("failed to read data directory {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A single source file could not be opened. Callers skip the file.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A source file's header row could not be decoded. Callers skip the file.
    #[error("CSV header decode error in {path}: {source}")]
    Header {
        path: String,
        #[source]
        source: csv::Error,
    },
}
