//! Titlewiki: a Zellij plugin for browsing the 司马光Wiki title catalog.
//!
//! The catalog is a JSON object mapping each title (a nickname such as
//! "路痴哥") to its date, description and optional image. The plugin provides:
//! - Case-insensitive search over titles and descriptions, with debounced
//!   title suggestions
//! - Sorting by date, name or a stable shuffle
//! - Masonry, grid and list layouts sized to the pane
//! - Detail pages addressed by `/title/<percent-encoded title>` paths
//! - A zoomable, draggable image preview overlay
//! - Catalog loading and local image probing on a background worker
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, routing, suggestions             │
//! │  - Image tracking, preview, scrolling               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (query/)      │   │ (worker/)     │
//! │ - Layouts     │   │ - Search      │   │ - Catalog load│
//! │ - Components  │   │ - Sort        │   │ - Image probe │
//! │ - Theming     │   │               │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//!                                         ┌───────────────┐
//!                                         │ Storage Layer │
//!                                         │ (storage/)    │
//!                                         │ - JSON source │
//!                                         │ - Assets      │
//!                                         └───────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths, routes (infrastructure/)          │
//! │  - Catalog, titles, errors (domain/)                │
//! └─────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating JSONL file   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/titlewiki.wasm" {
//!         catalog "~/wiki/titles.json"
//!         assets_dir "~/wiki/public"
//!         layout "grid"
//!         sort "name"
//!         initial_path "/title/%E8%B7%AF%E7%97%B4%E5%93%A5"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse [`Config`], initialize tracing,
//!    build the [`AppState`], request permissions, subscribe to events
//! 2. **Permissions Granted**: post `LoadCatalog` to the worker
//! 3. **Worker**: read and validate the catalog, reply `CatalogLoaded`
//! 4. **Catalog Loaded**: compute results, probe local images on the worker,
//!    fetch remote ones through the host
//! 5. **Rendering**: compute the view model and draw components
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use titlewiki::{handle_event, initialize, Config, Event};
//!
//! let mut map = BTreeMap::new();
//! map.insert("layout".to_string(), "list".to_string());
//! let mut state = initialize(&Config::from_zellij(&map));
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), titlewiki::TitleWikiError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod query;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, LayoutMode, SearchFocus};
pub use domain::{Catalog, Result, TitleEntry, TitleRecord, TitleWikiError};
pub use query::SortMode;
pub use ui::Theme;

use app::navigator::Navigator;
use app::state::CatalogLocation;
use infrastructure::paths::DEFAULT_CATALOG_FILE;
use infrastructure::{expand_tilde, get_data_dir};
use std::collections::BTreeMap;
use std::path::Path;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/titlewiki.wasm" {
///     catalog "~/wiki/titles.json"
///     theme_file "~/.config/titlewiki/theme.toml"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sandbox path of the catalog JSON file.
    ///
    /// Default: `titles.json` in the plugin data directory.
    pub catalog_path: String,

    /// Sandbox directory that site-relative image paths resolve against.
    ///
    /// Default: the directory containing the catalog.
    pub assets_dir: String,

    /// Initial result layout. Default: masonry.
    pub layout: LayoutMode,

    /// Initial sort order. Default: date, newest first.
    pub sort: SortMode,

    /// Route shown on load, e.g. `/` or `/title/<encoded title>`.
    pub initial_path: String,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let catalog_path = get_data_dir().join(DEFAULT_CATALOG_FILE);
        Self {
            catalog_path: catalog_path.to_string_lossy().into_owned(),
            assets_dir: get_data_dir().to_string_lossy().into_owned(),
            layout: LayoutMode::default(),
            sort: SortMode::default(),
            initial_path: "/".to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `catalog`, `assets_dir`, `theme_file`: `~` expands into the sandbox
    /// - `layout`: `masonry`, `grid` or `list`
    /// - `sort`: `date`, `name` or `random`
    /// - Missing, blank or unparsable values fall back to the defaults
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use titlewiki::{Config, LayoutMode, SortMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("catalog".to_string(), "~/wiki/titles.json".to_string());
    /// map.insert("layout".to_string(), "grid".to_string());
    /// map.insert("sort".to_string(), "sideways".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.catalog_path, "/host/wiki/titles.json");
    /// assert_eq!(config.assets_dir, "/host/wiki");
    /// assert_eq!(config.layout, LayoutMode::Grid);
    /// assert_eq!(config.sort, SortMode::Date);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let catalog_path = get("catalog").map_or(defaults.catalog_path, expand_tilde);
        let assets_dir = get("assets_dir").map_or_else(
            || {
                Path::new(&catalog_path)
                    .parent()
                    .map_or_else(|| defaults.assets_dir.clone(), |p| p.to_string_lossy().into_owned())
            },
            expand_tilde,
        );

        let layout = get("layout").map_or(defaults.layout, |raw| {
            raw.parse().unwrap_or_else(|e| {
                tracing::debug!(value = %raw, error = %e, "ignoring layout option");
                defaults.layout
            })
        });
        let sort = get("sort").map_or(defaults.sort, |raw| {
            raw.parse().unwrap_or_else(|e| {
                tracing::debug!(value = %raw, error = %e, "ignoring sort option");
                defaults.sort
            })
        });

        Self {
            catalog_path,
            assets_dir,
            layout,
            sort,
            initial_path: get("initial_path").map_or(defaults.initial_path, String::from),
            theme_name: get("theme").map(String::from),
            theme_file: get("theme_file").map(expand_tilde),
            trace_level: get("trace_level").map(String::from),
        }
    }

    /// Theme from `theme_file`, else `theme_name`, else the default.
    ///
    /// Unknown names and unreadable files fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }
        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// The catalog itself is loaded later by the worker, once permissions are
/// granted.
///
/// ```rust
/// use titlewiki::{initialize, Config};
/// use titlewiki::infrastructure::Route;
///
/// let config = Config { initial_path: "/title/%E8%B7%AF%E7%97%B4%E5%93%A5".to_string(), ..Config::default() };
/// let state = initialize(&config);
/// assert!(state.is_loading());
/// assert_eq!(state.navigator.current(), &Route::detail("路痴哥"));
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(catalog = %config.catalog_path, layout = %config.layout, "initializing titlewiki plugin");

    let mut state = AppState::new(config.theme());
    state.layout_mode = config.layout;
    state.sort_mode = config.sort;
    state.navigator = Navigator::starting_at(&config.initial_path);
    state.location = CatalogLocation {
        catalog_path: config.catalog_path.clone(),
        assets_dir: config.assets_dir.clone(),
    };
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults_point_into_data_dir() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.catalog_path, "/host/.local/share/zellij/titlewiki/titles.json");
        assert_eq!(config.assets_dir, "/host/.local/share/zellij/titlewiki");
        assert_eq!(config.initial_path, "/");
    }

    #[test]
    fn explicit_assets_dir_wins() {
        let config = Config::from_zellij(&map(&[
            ("catalog", "/data/titles.json"),
            ("assets_dir", "~/site/public"),
            ("sort", "RANDOM"),
            ("trace_level", " debug "),
        ]));
        assert_eq!(config.assets_dir, "/host/site/public");
        assert_eq!(config.sort, SortMode::Random);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = Config::from_zellij(&map(&[("catalog", "  "), ("layout", "")]));
        assert_eq!(config.catalog_path, Config::default().catalog_path);
        assert_eq!(config.layout, LayoutMode::Masonry);
    }

    #[test]
    fn theme_resolution_order() {
        let latte = Config { theme_name: Some("catppuccin-latte".into()), ..Config::default() };
        assert_eq!(latte.theme().name, "catppuccin-latte");

        let unknown = Config { theme_name: Some("nope".into()), ..Config::default() };
        assert_eq!(unknown.theme(), Theme::default());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.toml");
        let mut custom = Theme::default();
        custom.name = "custom".to_string();
        fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();
        let from_file = Config {
            theme_name: Some("catppuccin-latte".into()),
            theme_file: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };
        assert_eq!(from_file.theme().name, "custom");
    }

    #[test]
    fn initialize_applies_modes_and_location() {
        let config = Config::from_zellij(&map(&[("catalog", "/data/t.json"), ("layout", "list"), ("sort", "name")]));
        let state = initialize(&config);
        assert_eq!(state.layout_mode, LayoutMode::List);
        assert_eq!(state.sort_mode, SortMode::Name);
        assert_eq!(state.location.catalog_path, "/data/t.json");
        assert_eq!(state.location.assets_dir, "/data");
        assert!(state.is_loading());
    }
}
