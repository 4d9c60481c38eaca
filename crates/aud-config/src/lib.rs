//! # aud-config
//!
//! Layered configuration loading for Auditor using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AUDITOR_*` prefix, `__` as separator)
//! 2. Project-level `.auditor/config.toml`
//! 3. User-level `~/.config/auditor/config.toml`
//! 4. Built-in defaults
//!
//! `AUDITOR_API__BASE_URL` maps to `api.base_url`, `AUDITOR_AUTH__FALLBACK_TOKEN`
//! to `auth.fallback_token`, and so on.
//!
//! ```no_run
//! use aud_config::AuditorConfig;
//!
//! let config = AuditorConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.base_url);
//! ```

mod api;
mod auth;
mod error;
mod general;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditorConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AuditorConfig {
    /// Load configuration from TOML files and environment variables, then validate.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory (or the workspace root in tests), then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".auditor/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("AUDITOR_").split("__"))
    }

    /// Cross-section validation run after extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.auth.allowed_origins.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "auth.allowed_origins".into(),
                reason: "at least one origin is required".into(),
            });
        }
        if self.general.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_page_size".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Default location of the persisted session credentials.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.auth
            .session_path
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("auditor").join("session.json")))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("auditor").join("config.toml"))
    }

    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AuditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:8001");
        assert_eq!(config.general.default_page_size, 20);
    }

    #[test]
    fn empty_origin_list_is_rejected() {
        let mut config = AuditorConfig::default();
        config.auth.allowed_origins.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("auth.allowed_origins"));
    }

    #[test]
    fn explicit_session_path_wins() {
        let mut config = AuditorConfig::default();
        config.auth.session_path = Some(PathBuf::from("/tmp/auditor-session.json"));
        assert_eq!(
            config.session_path(),
            Some(PathBuf::from("/tmp/auditor-session.json"))
        );
    }
}
