use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Options consumed by the queue engine and the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remove the local files of finished downloads when they are pruned
    /// from the queue
    #[serde(default)]
    pub delete_played_files: bool,

    /// Base directory for derived download paths
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delete_played_files: false,
            download_dir: default_download_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// A missing file is not an error: a fresh installation starts with
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::ReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
