//! Session-scoped image load tracking.
//!
//! Every image URL is attempted at most once per session. A failure is
//! sticky: the URL is never requested again and every view that would show it
//! substitutes a placeholder instead.

use crate::infrastructure::is_remote;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Load state of one image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// Never requested.
    Unknown,
    Pending,
    Loaded,
    Failed,
}

/// What a card or detail page shows in its image slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// The title has no image.
    None,
    /// Requested, outcome unknown.
    Pending(String),
    /// Loaded successfully.
    Ready(String),
    /// Failed to load; shown as a placeholder.
    Placeholder,
}

/// Image URLs split by how they are loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRequests {
    /// Local paths, probed by the worker.
    pub local: Vec<String>,
    /// `http(s)` URLs, fetched by the plugin.
    pub remote: Vec<String>,
}

impl ImageRequests {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageTracker {
    pending: HashSet<String>,
    loaded: HashSet<String>,
    failed: HashSet<String>,
}

impl ImageTracker {
    #[must_use]
    pub fn status(&self, url: &str) -> ImageStatus {
        if self.failed.contains(url) {
            ImageStatus::Failed
        } else if self.loaded.contains(url) {
            ImageStatus::Loaded
        } else if self.pending.contains(url) {
            ImageStatus::Pending
        } else {
            ImageStatus::Unknown
        }
    }

    /// Marks every unknown URL as pending and returns them, split by loader.
    ///
    /// URLs that are pending, loaded or failed are skipped, so calling this on
    /// every re-render issues each request only once.
    pub fn request<'a, I>(&mut self, urls: I) -> ImageRequests
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut requests = ImageRequests::default();
        for url in urls {
            if self.status(url) != ImageStatus::Unknown {
                continue;
            }
            self.pending.insert(url.to_string());
            if is_remote(url) {
                requests.remote.push(url.to_string());
            } else {
                requests.local.push(url.to_string());
            }
        }
        requests
    }

    /// Records a successful load. Ignored for URLs that already failed.
    pub fn mark_loaded(&mut self, url: &str) {
        self.pending.remove(url);
        if !self.failed.contains(url) {
            self.loaded.insert(url.to_string());
        }
    }

    /// Records a failure; the URL will never be requested again.
    pub fn mark_failed(&mut self, url: &str) {
        self.pending.remove(url);
        self.loaded.remove(url);
        if self.failed.insert(url.to_string()) {
            tracing::debug!(url = %url, "image failed, remembering for session");
        }
    }

    /// Slot to render for an optional image URL.
    #[must_use]
    pub fn slot(&self, image: Option<&str>) -> ImageSlot {
        let Some(url) = image else {
            return ImageSlot::None;
        };
        match self.status(url) {
            ImageStatus::Failed => ImageSlot::Placeholder,
            ImageStatus::Loaded => ImageSlot::Ready(url.to_string()),
            ImageStatus::Pending | ImageStatus::Unknown => ImageSlot::Pending(url.to_string()),
        }
    }
}

/// Decides whether a web response delivered an image.
///
/// Requires a 2xx status and, when the server sends one, an `image/*`
/// content type.
#[must_use]
pub fn remote_image_ok(status: u16, headers: &BTreeMap<String, String>) -> bool {
    if !(200..300).contains(&status) {
        return false;
    }
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map_or(true, |(_, value)| value.trim().to_ascii_lowercase().starts_with("image/"))
}
