//! Worker thread implementation for catalog loading and image probing.
//!
//! Runs on the thread Zellij spawns for `register_worker!`, so file reads never
//! block rendering. Every request produces exactly one response.

use crate::domain::error::{Result, TitleWikiError};
use crate::infrastructure::expand_tilde;
use crate::storage::{probe_all, CatalogSource, JsonCatalog};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// The catalog source is replaced by every `LoadCatalog` request; a source
/// injected with [`TitleWikiWorker::with_source`] serves requests whose path
/// is empty.
#[derive(Serialize, Deserialize, Default)]
pub struct TitleWikiWorker {
    #[serde(skip)]
    source: Option<Box<dyn CatalogSource>>,
}

impl TitleWikiWorker {
    #[must_use]
    pub fn with_source(source: Box<dyn CatalogSource>) -> Self {
        Self { source: Some(source) }
    }

    fn source_for(&mut self, path: &str) -> Result<&dyn CatalogSource> {
        if !path.trim().is_empty() {
            self.source = Some(Box::new(JsonCatalog::new(PathBuf::from(expand_tilde(path)))));
        }
        self.source
            .as_deref()
            .ok_or_else(|| TitleWikiError::Worker("no catalog source configured".to_string()))
    }

    fn handle_load_catalog(&mut self, path: &str) -> WorkerResponse {
        let result = self
            .source_for(path)
            .and_then(|source| source.get_all().map(|catalog| (catalog, source.describe())));

        match result {
            Ok((catalog, source)) => {
                tracing::info!(title_count = catalog.len(), source = %source, "catalog loaded");
                WorkerResponse::CatalogLoaded { catalog, source }
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "catalog load failed");
                WorkerResponse::Error { message: format!("load catalog: {e}") }
            }
        }
    }

    fn handle_probe_images(assets_dir: &str, urls: &[String]) -> WorkerResponse {
        let assets_dir = expand_tilde(assets_dir);
        let report = probe_all(Path::new(&assets_dir), urls);
        if !report.failed.is_empty() {
            tracing::debug!(failed = ?report.failed, "some images are unavailable");
        }
        WorkerResponse::ImagesProbed { report }
    }

    /// Reattaches the plugin's trace context so worker spans share its trace.
    ///
    /// The returned guard must outlive the handling of the message.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context =
            SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes one request and returns its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _guard = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadCatalog { path, .. } => self.handle_load_catalog(&path),
            WorkerMessage::ProbeImages { assets_dir, urls, .. } => {
                Self::handle_probe_images(&assets_dir, &urls)
            }
        }
    }
}

impl ZellijWorker<'_> for TitleWikiWorker {
    fn on_message(&mut self, message: String, payload: String) {
        crate::observability::init_tracing(&crate::Config::default());

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(request) => self.handle_message(request),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error { message: format!("bad worker request: {e}") }
            }
        };

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TitleEntry, TitleRecord};
    use crate::storage::MemoryCatalog;

    #[test]
    fn loads_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.json");
        std::fs::write(&path, r#"{"路痴哥": {"date": "2024-01-01", "description": "总是迷路"}}"#).unwrap();

        let mut worker = TitleWikiWorker::default();
        let response = worker.handle_message(WorkerMessage::load_catalog(path.to_string_lossy().into_owned()));
        match response {
            WorkerResponse::CatalogLoaded { catalog, .. } => assert!(catalog.get("路痴哥").is_some()),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let mut worker = TitleWikiWorker::default();
        let response = worker.handle_message(WorkerMessage::load_catalog(path.to_string_lossy().into_owned()));
        assert!(matches!(response, WorkerResponse::Error { message } if message.starts_with("load catalog")));
    }

    #[test]
    fn empty_path_uses_injected_source() {
        let source = MemoryCatalog::new(vec![TitleEntry::new("报备哥", TitleRecord::new("2024-03-01", "出门必报备"))]);
        let mut worker = TitleWikiWorker::with_source(Box::new(source));
        let response = worker.handle_message(WorkerMessage::load_catalog(String::new()));
        assert!(matches!(response, WorkerResponse::CatalogLoaded { catalog, .. } if catalog.len() == 1));

        let mut bare = TitleWikiWorker::default();
        assert!(matches!(
            bare.handle_message(WorkerMessage::load_catalog(String::new())),
            WorkerResponse::Error { .. }
        ));
    }

    #[test]
    fn probes_images_under_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"png").unwrap();
        let mut worker = TitleWikiWorker::default();
        let response = worker.handle_message(WorkerMessage::probe_images(
            dir.path().to_string_lossy().into_owned(),
            vec!["/a.png".into(), "/b.png".into()],
        ));
        match response {
            WorkerResponse::ImagesProbed { report } => {
                assert_eq!(report.loaded, ["/a.png"]);
                assert_eq!(report.failed, ["/b.png"]);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
