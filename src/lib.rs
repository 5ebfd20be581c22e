//! hostdock: a UI-toolkit-independent host registry for paired devices.
//!
//! hostdock models the device list of a pairing application:
//! - Network-discovered hosts joined with a persisted saved-host list
//! - A selection cursor and pure view-model computation for any frontend
//! - Per-host cached artifacts (pairing credential, disk image) behind a
//!   storage trait with a JSON file backend
//! - Shareable `hostdock://` shortcut URLs with an encode/decode codec
//! - A composite clear-pairing operation driving an external lockdown
//!   controller
//! - A background worker protocol so persistence and protocol calls stay off
//!   the interactive path

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture with a unidirectional state-update
//! loop at its core:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Embedding runtime (GUI, TUI, tests)                │  ← Executes actions
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action emission                                  │
//! │  - Scan lifecycle                                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Host rows   │   │ - JSON I/O    │   │ - Persistence │
//! │ - View model  │   │ - Artifacts   │   │ - Lockdown    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Platform, Infrastructure & Domain Layers           │
//! │  - Capability traits (platform/)                    │
//! │  - Paths, shortcut URLs (infrastructure/)           │
//! │  - Host model, errors (domain/)                     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: application state machine with event/action model
//! - [`domain`]: core domain types (hosts, errors)
//! - [`platform`]: capability traits selected by the embedding runtime
//! - [`infrastructure`]: data-directory resolution, shortcut URL codec
//! - [`storage`]: JSON persistence for saved hosts and cached artifacts
//! - [`worker`]: background worker for storage and lockdown operations
//! - [`ui`]: pure view-model computation
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Initialization Flow
//!
//! 1. The embedding runtime builds a [`Config`] (defaults, a string map, or a
//!    TOML file) and a [`Capabilities`] snapshot for the platform.
//! 2. [`initialize`] applies the data-directory override, installs tracing,
//!    and returns a fresh [`AppState`].
//! 3. The runtime constructs a [`worker::RegistryWorker`] (usually on its own
//!    thread) and wires a lockdown controller when the platform has one.
//! 4. Events flow through [`handle_event`]; returned [`Action`]s are executed
//!    by the runtime, worker responses come back as
//!    [`Event::WorkerResponse`].
//!
//! # Examples
//!
//! ```rust
//! use hostdock::platform::Capabilities;
//! use hostdock::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default(), Capabilities::none());
//!
//! let (should_render, actions) = handle_event(&mut state, &Event::StartScanning)?;
//! assert!(should_render);
//! assert!(actions.contains(&Action::StartDiscovery));
//! # Ok::<(), hostdock::HostDockError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod platform;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, ScanState};
pub use domain::{DeviceType, HostDockError, HostId, HostRecord, Result};
pub use platform::Capabilities;
pub use ui::DeviceListViewModel;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Registry configuration.
///
/// All fields are optional; defaults resolve to the platform data directory
/// and the `info` trace level.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the data directory holding the store and trace files.
    ///
    /// Threaded through as a value: tracing resolves its trace-file location
    /// from it, and the embedding runtime passes it to
    /// [`worker::RegistryWorker::open_at`]. Without an override, resolution
    /// falls back to the `HOSTDOCK_DATA_DIR` environment variable, then the
    /// platform data directory. See [`infrastructure::resolve_data_dir`].
    pub data_dir: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Embedding runtimes that hand settings through as key-value strings
    /// (plugin hosts, environment blocks) use this entry point. Unknown keys
    /// are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hostdock::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        Self {
            data_dir: config.get("data_dir").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid TOML.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| HostDockError::Config(format!("failed to parse config: {e}")))
    }
}

/// Initializes the registry.
///
/// Installs the tracing subscriber and returns an empty [`AppState`]
/// carrying the platform capabilities. The process environment is never
/// mutated: a configured `data_dir` is consumed by value here (for the trace
/// file) and by [`worker::RegistryWorker::open_at`] (for the store). The
/// saved-host list stays empty until the first [`Event::StartScanning`]
/// triggers a load through the worker.
///
/// # Example
///
/// ```rust
/// use hostdock::platform::Capabilities;
/// use hostdock::{initialize, Config};
///
/// let state = initialize(&Config::default(), Capabilities::all());
/// assert!(state.saved_hosts.is_empty());
/// assert!(state.capabilities.clipboard);
/// ```
#[must_use]
pub fn initialize(config: &Config, capabilities: Capabilities) -> AppState {
    observability::init_tracing(config);
    tracing::debug!(capabilities = ?capabilities, "initializing host registry");

    AppState::new(capabilities)
}
