//! Background worker thread for catalog and image I/O.
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: [`TitleWikiWorker`] and message processing

pub mod handler;
pub mod messages;

pub use handler::TitleWikiWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
