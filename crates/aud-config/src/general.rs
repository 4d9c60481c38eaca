//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size.
const fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default page size for list commands.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}
