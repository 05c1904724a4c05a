use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when rewriting the queue file
///
/// The queue file is the only durable record of pending downloads, so a
/// failed rewrite is surfaced to the caller instead of being logged away.
/// The replace strategy guarantees the previous file is still intact when
/// any of these are returned.
#[derive(Error, Debug)]
pub enum QueueFileError {
    #[error("Failed to create temporary file in {dir}: {source}")]
    TempFileCreateFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write queue entries for {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to replace queue file {path}: {source}")]
    ReplaceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON in {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
