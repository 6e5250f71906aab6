//! Path manipulation utilities for the Zellij sandbox environment.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`.
//! These helpers expand user paths into sandbox paths, locate the plugin data
//! directory and resolve site-relative image paths against an assets root.

use std::path::{Component, Path, PathBuf};

/// File name of the catalog inside the data directory when none is configured.
pub const DEFAULT_CATALOG_FILE: &str = "titles.json";

/// Returns the data directory for titlewiki files.
///
/// Resolves to `/host/.local/share/zellij/titlewiki`, which maps to
/// `~/.local/share/zellij/titlewiki` when Zellij was started from the home
/// directory.
///
/// ```
/// use titlewiki::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/titlewiki"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("titlewiki")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// ```
/// use titlewiki::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/wiki/titles.json"), "/host/wiki/titles.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix from sandbox paths for display purposes.
///
/// ```
/// use titlewiki::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/wiki/titles.json"), "/wiki/titles.json");
/// assert_eq!(strip_host_prefix("/data/titles.json"), "/data/titles.json");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}

/// Whether an image reference must be fetched over the network.
#[must_use]
pub fn is_remote(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves a local image reference against the assets root.
///
/// Site-relative references (`/images/a.jpg`) and bare relative ones
/// (`images/a.jpg`) both land under `assets_dir`. Parent-directory components
/// are rejected so that a catalog cannot point outside its assets. Returns
/// `None` for remote URLs.
///
/// ```
/// use std::path::Path;
/// use titlewiki::infrastructure::resolve_asset;
///
/// let root = Path::new("/host/wiki/public");
/// assert_eq!(
///     resolve_asset(root, "/images/a.jpg"),
///     Some(root.join("images/a.jpg"))
/// );
/// assert_eq!(resolve_asset(root, "../secret.png"), None);
/// assert_eq!(resolve_asset(root, "https://example.com/a.png"), None);
/// ```
#[must_use]
pub fn resolve_asset(assets_dir: &Path, url: &str) -> Option<PathBuf> {
    if is_remote(url) {
        return None;
    }

    let raw = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |d| d.into_owned());
    let relative = Path::new(decoded.trim_start_matches('/'));

    // Checked after decoding: `%2E%2E` is a parent directory too.
    let stays_inside = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if relative.as_os_str().is_empty() || !stays_inside {
        return None;
    }

    Some(assets_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_query_strings_and_escapes() {
        let root = Path::new("/assets");
        assert_eq!(
            resolve_asset(root, "/images/%E8%B7%AF.png?v=2"),
            Some(PathBuf::from("/assets/images/路.png"))
        );
        assert_eq!(resolve_asset(root, "/"), None);
        assert_eq!(resolve_asset(root, "HTTPS://cdn.example/x.png"), None);
    }

    #[test]
    fn escaped_parent_directories_stay_rejected() {
        let root = Path::new("/assets");
        assert_eq!(resolve_asset(root, "/%2E%2E/secret.png"), None);
        assert_eq!(resolve_asset(root, "/images/%2e%2e/%2E%2E/secret.png"), None);
        assert_eq!(resolve_asset(root, "/images/..%2Fsecret.png"), None);
        assert_eq!(resolve_asset(root, "/images/a%2Eb.png"), Some(PathBuf::from("/assets/images/a.b.png")));
    }
}
