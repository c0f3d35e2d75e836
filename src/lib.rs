//! Contactbook: the core of a contact list with search, sorting and pagination.
//!
//! Contactbook provides:
//! - A contact collection with validated add, update and delete
//! - Case-insensitive search over name and city
//! - Locale-aware sorting by name or city, toggling direction per column
//! - Fixed-size pagination with a display-ready view model
//! - Shareable view state as a URL query string
//! - Persistent storage backed by a JSON file with atomic writes

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← Host integration
//! │  - Executes actions against storage and host        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Query string mapping                             │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!              │                          │
//! ┌──────────────────────────┐   ┌──────────────────────┐
//! │ Domain (domain/)         │   │ Storage (storage/)   │
//! │ - Contacts, collection   │   │ - Backend trait      │
//! │ - Sort rules             │   │ - JSON file          │
//! │ - Projection             │   │                      │
//! └──────────────────────────┘   └──────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure (infrastructure/) & Observability   │
//! │  - Data directory, tilde expansion                  │
//! │  - OpenTelemetry tracing to a rotating file         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (contacts, sorting, projection, errors)
//! - [`infrastructure`]: Platform paths
//! - [`storage`]: Persistence backends
//! - [`runtime`]: The [`ContactBook`](runtime::ContactBook) driver
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```toml
//! page_size = 9
//! storage_path = "~/.local/share/contactbook/contacts.json"
//! share_base_url = "http://localhost:3000/"
//! seed_demo_data = true
//! trace_level = "info"
//! ```
//!
//! All keys are optional.
//!
//! # Example
//!
//! ```rust
//! use contactbook::{handle_event, AppState, Contact, Event, SortField};
//! use std::num::NonZeroUsize;
//!
//! let contacts = vec![
//!     Contact::with_id("1", "Alice", "Mexico"),
//!     Contact::with_id("2", "Bob", "Glasgow"),
//! ];
//! let mut state = AppState::new(contacts, NonZeroUsize::new(9).unwrap());
//!
//! handle_event(&mut state, &Event::SetSortField(SortField::City));
//! let names: Vec<_> = state.compute_viewmodel().cards.into_iter().map(|c| c.name).collect();
//! assert_eq!(names, ["Bob", "Alice"]);
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{
    demo_contacts, project, Contact, ContactCollection, ContactId, ContactbookError, Projection,
    Result, SortDirection, SortField, SortSpec,
};

use runtime::{ContactBook, Host};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use storage::{ContactStorage, JsonStorage, MemoryStorage};
use url::Url;

const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(9) {
    Some(size) => size,
    None => unreachable!(),
};

const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:3000/";

/// Contact book configuration, usually read from a TOML file.
///
/// # Example
///
/// ```rust
/// use contactbook::Config;
///
/// let config = Config::from_toml_str("page_size = 12\nseed_demo_data = false")?;
/// assert_eq!(config.page_size.get(), 12);
/// assert!(!config.seed_demo_data);
/// assert_eq!(config.share_base_url, "http://localhost:3000/");
/// # Ok::<(), contactbook::ContactbookError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Contacts per page. Must be positive. Default: 9
    pub page_size: NonZeroUsize,

    /// Path of the JSON contacts file. `~/` is expanded.
    ///
    /// Default: `$XDG_DATA_HOME/contactbook/contacts.json`, falling back to
    /// `~/.local/share/contactbook/contacts.json`.
    pub storage_path: Option<String>,

    /// Base URL that share links are built on. Default: `http://localhost:3000/`
    pub share_base_url: String,

    /// Whether an empty store is filled with demo contacts on open. Default: `true`
    pub seed_demo_data: bool,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            storage_path: None,
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            seed_demo_data: true,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ContactbookError::Config`] for malformed TOML, unknown keys, a
    /// zero page size or an unusable share base URL.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ContactbookError::Config(e.to_string()))?;
        config.share_url()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ContactbookError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading configuration");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Parsed share base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ContactbookError::Config`] if the URL does not parse or cannot
    /// carry a path and query (e.g. `mailto:`).
    pub fn share_url(&self) -> Result<Url> {
        let url = Url::parse(&self.share_base_url).map_err(|e| {
            ContactbookError::Config(format!("invalid share_base_url {:?}: {e}", self.share_base_url))
        })?;
        if url.cannot_be_a_base() {
            return Err(ContactbookError::Config(format!(
                "share_base_url {:?} cannot carry a query",
                self.share_base_url
            )));
        }
        Ok(url)
    }

    /// Resolved contacts file path, if one can be determined.
    #[must_use]
    pub fn storage_file(&self) -> Option<PathBuf> {
        self.storage_path.as_deref().map_or_else(
            infrastructure::default_storage_path,
            |path| Some(infrastructure::expand_tilde(path)),
        )
    }
}

/// Initializes tracing and opens a contact book with file storage.
///
/// Falls back to in-memory storage when no data directory can be determined.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the contacts file cannot
/// be read.
///
/// # Example
///
/// ```no_run
/// use contactbook::runtime::RecordingHost;
/// use contactbook::{initialize, Config, Event};
///
/// let mut book = initialize(&Config::default(), RecordingHost::default())?;
/// book.dispatch(Event::NextPage)?;
/// # Ok::<(), contactbook::ContactbookError>(())
/// ```
pub fn initialize<H: Host>(
    config: &Config,
    host: H,
) -> Result<ContactBook<Box<dyn ContactStorage>, H>> {
    if let Some(trace_file) = observability::init_tracing(config) {
        tracing::debug!(trace_file = ?trace_file, "tracing initialized");
    }

    let storage = open_storage(config)?;
    ContactBook::open(config, storage, host)
}

/// Opens the storage backend selected by `config`.
///
/// A JSON file at [`Config::storage_file`], or memory-only storage when no data
/// directory can be determined.
///
/// # Errors
///
/// Returns an error if the contacts file exists but cannot be read or parsed.
pub fn open_storage(config: &Config) -> Result<Box<dyn ContactStorage>> {
    match config.storage_file() {
        Some(path) => Ok(Box::new(JsonStorage::new(path)?)),
        None => {
            tracing::debug!("no data directory, keeping contacts in memory");
            Ok(Box::new(MemoryStorage::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use runtime::RecordingHost;
    use tempfile::tempdir;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = Config::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, ContactbookError::Config(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("scan_depth = 4").is_err());
    }

    #[test]
    fn share_base_url_is_validated() {
        assert!(Config::from_toml_str("share_base_url = \"not a url\"").is_err());
        assert!(Config::from_toml_str("share_base_url = \"mailto:a@b.c\"").is_err());
        assert!(Config::from_toml_str("share_base_url = \"https://example.org/app\"").is_ok());
    }

    #[test]
    fn explicit_storage_path_wins() {
        let config = Config {
            storage_path: Some("/srv/contacts.json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.storage_file(), Some(PathBuf::from("/srv/contacts.json")));
    }

    #[test]
    fn config_file_is_read_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contactbook.toml");
        std::fs::write(&path, "page_size = 3\ntrace_level = \"debug\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.page_size.get(), 3);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));

        assert!(matches!(
            Config::from_file(dir.path().join("missing.toml")),
            Err(ContactbookError::Io(_))
        ));
    }

    #[test]
    fn open_storage_uses_json_file_at_configured_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("contacts.json");
        let config = Config {
            storage_path: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };

        let storage = open_storage(&config).unwrap();
        let book = ContactBook::open(&config, storage, RecordingHost::default()).unwrap();

        assert_eq!(book.state().contacts.len(), demo_contacts().len());
        assert!(path.exists());
    }

    #[test]
    fn open_storage_reports_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(&path, "[").unwrap();
        let config = Config {
            storage_path: Some(path.to_string_lossy().into_owned()),
            ..Config::default()
        };

        assert!(matches!(open_storage(&config), Err(ContactbookError::Storage(_))));
    }
}
