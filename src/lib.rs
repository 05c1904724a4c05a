pub mod config;
pub mod download;
pub mod error;
pub mod filename;
pub mod observer;
pub mod queue;

// Re-export main types for convenience
pub use config::Config;
pub use download::{Download, DownloadStatus};
pub use error::{ConfigError, QueueFileError};
pub use filename::derive_local_path;
pub use observer::{NoopObserver, QueueEvent, QueueObserver, SharedQueueObserver};
pub use queue::{QueueLoader, QueueRecord, ReloadOutcome};
