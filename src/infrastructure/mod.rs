//! Infrastructure layer for filesystem and location handling.
//!
//! - [`paths`]: sandbox path expansion, data directory and asset resolution
//! - [`routes`]: list/detail route parsing and percent-encoded title paths

pub mod paths;
pub mod routes;

pub use paths::{expand_tilde, get_data_dir, is_remote, resolve_asset, strip_host_prefix};
pub use routes::{detail_path, Route};
