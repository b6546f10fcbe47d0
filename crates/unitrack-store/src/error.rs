use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or writing a snapshot file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not a valid snapshot document.
    #[error("malformed snapshot {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
