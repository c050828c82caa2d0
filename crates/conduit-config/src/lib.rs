//! # conduit-config
//!
//! Layered configuration loading for Conduit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CONDUIT_*` prefix, `__` as separator)
//! 2. Project-level `.conduit/config.toml`
//! 3. User-level `~/.config/conduit/config.toml`
//! 4. Built-in defaults (the fallback upstream URLs)
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CONDUIT_HRIS__BASE_URL` -> `hris.base_url`,
//! `CONDUIT_SESSIONS__BACKEND` -> `sessions.backend`, etc.
//!
//! The `tax` section is reserved: it is validated and logged, and the tax
//! PDF pass-through is governed by `documents.allowed_prefix` instead.
//!
//! # Usage
//!
//! ```no_run
//! use conduit_config::ConduitConfig;
//!
//! let config = ConduitConfig::load_with_dotenv().expect("config");
//! println!("HR backend: {}", config.hris.base());
//! ```

mod documents;
mod error;
mod server;
mod sessions;
mod upstream;

pub use documents::{DEFAULT_ALLOWED_PREFIX, DocumentsConfig};
pub use error::ConfigError;
pub use server::ServerConfig;
pub use sessions::{SessionBackend, SessionConfig};
pub use upstream::{
    HRIS_FALLBACK_URL, INVESTIGATION_FALLBACK_URL, TAX_FALLBACK_URL, UpstreamConfig,
};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

fn default_hris() -> UpstreamConfig {
    UpstreamConfig::hris()
}

fn default_investigation() -> UpstreamConfig {
    UpstreamConfig::investigation()
}

fn default_tax() -> UpstreamConfig {
    UpstreamConfig::tax()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConduitConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_hris")]
    pub hris: UpstreamConfig,
    #[serde(default = "default_investigation")]
    pub investigation: UpstreamConfig,
    /// Reserved for tax backend routes. Validated and logged at startup, but
    /// no proxy route forwards to it: the PDF pass-through fetches absolute
    /// document URLs, gated by [`DocumentsConfig::allowed_prefix`].
    #[serde(default = "default_tax")]
    pub tax: UpstreamConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

impl Default for ConduitConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            hris: default_hris(),
            investigation: default_investigation(),
            tax: default_tax(),
            documents: DocumentsConfig::default(),
            sessions: SessionConfig::default(),
        }
    }
}

impl ConduitConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed, or
    /// `ConfigError::InvalidValue` when a loaded value is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".conduit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CONDUIT_").split("__"))
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        for (field, upstream) in [
            ("hris.base_url", &self.hris),
            ("investigation.base_url", &self.investigation),
            ("tax.base_url", &self.tax),
        ] {
            let base = upstream.base();
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("'{}' is not an http(s) URL", upstream.base_url),
                });
            }
        }
        Ok(())
    }

    /// The parsed listen address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for `server.bind`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                field: "server.bind".to_string(),
                reason: format!("{e}"),
            })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("conduit").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for a `.env` file,
    /// then falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
