//! Backends for the persisted session credential.
//!
//! Storage deals in raw strings. Deciding whether the content is a valid
//! credential belongs to [`crate::store::CredentialStore`], which discards
//! malformed values.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

/// One session-scoped slot holding the serialized credentials.
pub trait SessionStorage: Send + Sync {
    /// Read the persisted value, `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStorage` when the backend cannot be read.
    fn read(&self) -> Result<Option<String>, AuthError>;

    /// Replace the persisted value.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionStorage` when the backend cannot be written.
    fn write(&self, value: &str) -> Result<(), AuthError>;

    fn remove(&self) -> Result<(), AuthError>;
}

/// Session file on disk, owner-only on Unix.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn read(&self) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::SessionStorage(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn write(&self, value: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::SessionStorage(format!("mkdir {}: {e}", parent.display()))
            })?;
            // Only a directory created here is locked down; existing ones keep their mode.
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(|e| {
            AuthError::SessionStorage(format!("open {}: {e}", self.path.display()))
        })?;

        // A file that already existed keeps its old mode through `open`.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| {
                    AuthError::SessionStorage(format!("chmod {}: {e}", self.path.display()))
                })?;
        }

        file.write_all(value.as_bytes()).map_err(|e| {
            AuthError::SessionStorage(format!("write {}: {e}", self.path.display()))
        })?;

        Ok(())
    }

    fn remove(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::SessionStorage(format!(
                "delete {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-process slot, used by tests and by hosts that must not touch disk.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded slot, handy for simulating a previous run.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(value.into())),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn read(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, value: &str) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
