//! Upload progress ticks.

use serde::{Deserialize, Serialize};

/// One progress tick of a single upload.
///
/// `percentage` is always derived from `loaded` and `total`, rounded half up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub loaded: u64,
    pub total: u64,
    pub percentage: u8,
}

impl UploadProgress {
    /// Build a tick, clamping `loaded` to `total`.
    #[must_use]
    pub fn new(loaded: u64, total: u64) -> Self {
        let loaded = loaded.min(total);
        Self {
            loaded,
            total,
            percentage: percentage(loaded, total),
        }
    }

    /// Whether every byte has been handed to the transport.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.loaded >= self.total
    }
}

/// `round(loaded / total * 100)` in integer arithmetic. An empty upload is 100%.
#[must_use]
pub fn percentage(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let loaded = u128::from(loaded.min(total));
    let total = u128::from(total);
    let rounded = (loaded * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}
