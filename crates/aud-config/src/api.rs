//! Extraction backend connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Uploads and extractions get five minutes before the client gives up.
const fn default_upload_timeout_secs() -> u64 {
    300
}

fn default_user_agent() -> String {
    concat!("auditor/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://api.example.com`. Resource paths are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for plain JSON requests.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Timeout for upload and extraction requests.
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check the base URL scheme and that timeouts are non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{}' must start with http:// or https://", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.upload_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.upload_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
