use std::fmt;
use std::path::{Path, PathBuf};

/// Lifecycle states of a download.
///
/// Transitions are driven by the transfer engine; the queue engine only
/// ever reads the status. At most a bounded, engine-controlled number of
/// downloads is `Downloading` at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Queued,
    Downloading,
    Paused,
    Finished,
    Failed,
    AlreadyDownloaded,
    Deleted,
    Cancelled,
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Queued => "queued",
            Self::Downloading => "downloading",
            Self::Paused => "paused",
            Self::Finished => "finished",
            Self::Failed => "failed",
            Self::AlreadyDownloaded => "downloaded",
            Self::Deleted => "deleted",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{label}")
    }
}

/// A single download task: a URL, its local target path, and live state.
///
/// The URL is the identifying key; two downloads with the same URL are the
/// same queue entry. The local path defaults to the derived name for the
/// URL but may be overridden by the caller.
#[derive(Debug, Clone)]
pub struct Download {
    url: String,
    filename: PathBuf,
    status: DownloadStatus,
    bytes_downloaded: u64,
    total_bytes: Option<u64>,
}

impl Download {
    /// Create a freshly queued download
    pub fn new(url: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            status: DownloadStatus::Queued,
            bytes_downloaded: 0,
            total_bytes: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn status(&self) -> DownloadStatus {
        self.status
    }

    /// Update the lifecycle state. Called by the transfer engine.
    pub fn set_status(&mut self, status: DownloadStatus) {
        self.status = status;
    }

    /// Update transfer progress. Called by the transfer engine.
    pub fn set_progress(&mut self, bytes_downloaded: u64, total_bytes: Option<u64>) {
        self.bytes_downloaded = bytes_downloaded;
        self.total_bytes = total_bytes;
    }

    pub fn bytes_downloaded(&self) -> u64 {
        self.bytes_downloaded
    }

    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Completed fraction of the transfer in percent, 0.0 when the total
    /// size is unknown
    pub fn percent_finished(&self) -> f64 {
        match self.total_bytes {
            Some(total) if total > 0 => (self.bytes_downloaded as f64 / total as f64) * 100.0,
            _ => 0.0,
        }
    }
}
