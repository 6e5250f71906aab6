//! Local image probing.
//!
//! The terminal cannot decode images, so "loading" a local image means
//! confirming the file behind its URL is present, non-empty and looks like an
//! image. The outcome feeds the session's image-failure tracking.

use crate::infrastructure::resolve_asset;
use serde::{Deserialize, Serialize};
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "webp", "avif", "bmp", "svg"];

/// Result of probing a batch of image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub loaded: Vec<String>,
    pub failed: Vec<String>,
}

/// Checks whether a local image reference resolves to a usable file.
#[must_use]
pub fn probe_local(assets_dir: &Path, url: &str) -> bool {
    let Some(path) = resolve_asset(assets_dir, url) else {
        return false;
    };

    let has_image_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if !has_image_extension {
        tracing::debug!(url = %url, "image reference has no image extension");
        return false;
    }

    match std::fs::metadata(&path) {
        Ok(meta) => meta.is_file() && meta.len() > 0,
        Err(e) => {
            tracing::debug!(url = %url, path = ?path, error = %e, "image file unavailable");
            false
        }
    }
}

/// Probes every URL and splits them into loaded and failed.
#[must_use]
pub fn probe_all(assets_dir: &Path, urls: &[String]) -> ProbeReport {
    let _span = tracing::debug_span!("probe_images", count = urls.len()).entered();

    let (loaded, failed): (Vec<String>, Vec<String>) = urls
        .iter()
        .cloned()
        .partition(|url| probe_local(assets_dir, url));

    tracing::debug!(loaded = loaded.len(), failed = failed.len(), "images probed");
    ProbeReport { loaded, failed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_present_and_missing_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/ok.png"), b"\x89PNG").unwrap();
        std::fs::write(dir.path().join("images/empty.png"), b"").unwrap();
        std::fs::write(dir.path().join("images/notes.txt"), b"hello").unwrap();

        let urls: Vec<String> = [
            "/images/ok.png",
            "/images/empty.png",
            "/images/notes.txt",
            "/images/missing.jpg",
            "/images",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let report = probe_all(dir.path(), &urls);
        assert_eq!(report.loaded, ["/images/ok.png"]);
        assert_eq!(
            report.failed,
            ["/images/empty.png", "/images/notes.txt", "/images/missing.jpg", "/images"]
        );
    }
}
