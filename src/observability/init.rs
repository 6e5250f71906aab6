//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::sync::Once;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span log inside the data directory.
pub const TRACE_FILE_NAME: &str = "titlewiki-trace.jsonl";

const SERVICE_NAME: &str = "titlewiki";

const DEFAULT_LEVEL: &str = "info";

static INIT: Once = Once::new();

/// Installs the global subscriber: an `EnvFilter` from `config.trace_level`
/// and an OpenTelemetry layer exporting to
/// `<data dir>/titlewiki-trace.jsonl`.
///
/// Only the first call in a process does anything. If the data directory
/// cannot be created, tracing stays disabled.
pub fn init_tracing(config: &Config) {
    INIT.call_once(|| install(config));
}

fn install(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
