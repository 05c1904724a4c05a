use std::path::{Path, PathBuf};

use url::Url;

/// Name used when a URL offers nothing usable to derive one from
const FALLBACK_NAME: &str = "download";

/// Derive the local target path for a download URL.
///
/// Deterministic: the same URL and download directory always map to the
/// same path, so the path can be recomputed at any time instead of being
/// stored.
pub fn derive_local_path(url: &str, download_dir: &Path) -> PathBuf {
    download_dir.join(derive_file_name(url))
}

/// Derive a bare file name from the last path segment of a URL
fn derive_file_name(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return FALLBACK_NAME.to_string(),
    };

    // Trailing slashes produce an empty last segment; skip those
    let from_segment = parsed
        .path_segments()
        .and_then(|segments| segments.rev().find(|segment| !segment.is_empty()))
        .map(sanitize_filename::sanitize)
        .filter(|name| !name.is_empty());

    if let Some(name) = from_segment {
        return name;
    }

    parsed
        .host_str()
        .map(sanitize_filename::sanitize)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}
