//! Credential relay and fallback identity settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Origins allowed to hand credentials to this application.
fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:5173",
        "http://localhost:3000",
        "http://127.0.0.1:8080",
        "http://localhost:8080",
        "https://louis-legal.com",
        "https://www.louis-legal.com",
        "http://localhost:5174",
        "https://louisfrontendtest.vercel.app",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Static bearer token used when no session credential exists.
    #[serde(default)]
    pub fallback_token: String,

    /// Static user id sent alongside the fallback token.
    #[serde(default)]
    pub fallback_user_id: String,

    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Override for the session credentials file.
    #[serde(default)]
    pub session_path: Option<PathBuf>,

    /// Directory holding third-party `*auth-token*` files. Unset disables that source.
    #[serde(default)]
    pub local_token_dir: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            fallback_token: String::new(),
            fallback_user_id: String::new(),
            allowed_origins: default_allowed_origins(),
            session_path: None,
            local_token_dir: None,
        }
    }
}

impl AuthConfig {
    /// Whether a static fallback identity is configured.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        !self.fallback_token.is_empty() || !self.fallback_user_id.is_empty()
    }
}
