//! Storage layer: where the catalog and its images come from.
//!
//! # Modules
//!
//! - `backend`: read-only [`CatalogSource`] trait and an in-memory source
//! - `json`: JSON file catalog
//! - `assets`: local image probing for the image-failure tracker

pub mod assets;
pub mod backend;
pub mod json;

pub use assets::{probe_all, probe_local, ProbeReport};
pub use backend::{CatalogSource, MemoryCatalog};
pub use json::JsonCatalog;
