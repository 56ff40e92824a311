//! Server configuration.
//!
//! Values come from, in priority order: explicit overrides (command-line
//! flags), environment variables, then built-in defaults.

use std::path::PathBuf;

/// Env var naming the sightings source file.
pub const DATA_PATH_ENV: &str = "TICK_DATA_PATH";
/// Env var naming the bind address.
pub const BIND_ADDR_ENV: &str = "BIND_ADDR";
/// Env var naming the listen port.
pub const PORT_ENV: &str = "PORT";

/// Default sightings source file.
pub const DEFAULT_DATA_PATH: &str = "data/tick_sightings.csv";
/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings for [`crate::run_server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Source file the dataset is loaded from.
    pub data_path: PathBuf,
    /// Address to bind.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset, empty
    /// or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = get(PORT_ENV).and_then(|p| match p.trim().parse::<u16>() {
            Ok(port) => Some(port),
            Err(e) => {
                log::warn!("Ignoring invalid {PORT_ENV} value '{p}': {e}");
                None
            }
        });

        Self {
            data_path: get(DATA_PATH_ENV).map_or(defaults.data_path, PathBuf::from),
            bind_addr: get(BIND_ADDR_ENV).unwrap_or(defaults.bind_addr),
            port: port.unwrap_or(defaults.port),
        }
    }

    /// Replaces any setting for which an override is given.
    #[must_use]
    pub fn with_overrides(
        mut self,
        data_path: Option<PathBuf>,
        bind_addr: Option<String>,
        port: Option<u16>,
    ) -> Self {
        if let Some(data_path) = data_path {
            self.data_path = data_path;
        }
        if let Some(bind_addr) = bind_addr {
            self.bind_addr = bind_addr;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}
