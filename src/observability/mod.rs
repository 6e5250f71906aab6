//! OpenTelemetry-based observability with file-based span export.
//!
//! Spans recorded through `tracing` are bridged into OpenTelemetry and written
//! as one compact JSON object per line to a rotating file in the plugin data
//! directory:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → titlewiki-trace.jsonl
//! ```
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option and accepts any
//! `EnvFilter` directive (`debug`, `titlewiki=trace,info`, ...). Default:
//! `"info"`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use titlewiki::observability::init_tracing;
//! use titlewiki::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: `SpanExporter` writing span records to disk
//! - [`record`]: Compact JSON shape of an exported span
//! - [`rotation`]: Size-based file rotation with numbered backups

mod exporter;
mod init;
mod record;
mod rotation;

pub use init::{init_tracing, TRACE_FILE_NAME};
pub use record::SpanRecord;
pub use rotation::RotatingFile;
