//! Process-wide holder of the current session credentials.
//!
//! The store is the only owner of [`Credentials`]; everything else reads a
//! clone per call. Mutations persist best-effort and then notify observers
//! in mutation order. Storage and observer failures are logged and absorbed,
//! so `set`, `get`, `clear` and `restore` never fail from the caller's side.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use aud_core::Credentials;

use crate::error::AuthError;
use crate::session::SessionStorage;

/// Error an observer may return; it is logged and otherwise ignored.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

type Observer = Arc<dyn Fn(Option<&Credentials>) -> Result<(), ObserverError> + Send + Sync>;

/// Handle returned by [`CredentialStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The current session credentials, persisted through a [`SessionStorage`] and observable.
pub struct CredentialStore {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<Credentials>>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_id: AtomicU64,
    // Serializes set/clear/restore so notifications follow mutation order.
    updates: Mutex<()>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("current", &self.get())
            .field("observers", &lock(&self.observers).len())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CredentialStore {
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
            observers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            updates: Mutex::new(()),
        }
    }

    /// Current credentials, if any.
    #[must_use]
    pub fn get(&self) -> Option<Credentials> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|c| !c.token().is_empty())
    }

    /// Current credentials or [`AuthError::NotAuthenticated`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when the store is empty.
    pub fn require(&self) -> Result<Credentials, AuthError> {
        self.get().ok_or(AuthError::NotAuthenticated)
    }

    /// Replace the current credentials, persist them, and notify observers.
    pub fn set(&self, credentials: Credentials) {
        let _update = lock(&self.updates);
        self.replace(Some(credentials.clone()));

        match serde_json::to_string(&credentials) {
            Ok(serialized) => {
                if let Err(error) = self.storage.write(&serialized) {
                    tracing::warn!(%error, "failed to persist session credentials");
                }
            }
            Err(error) => tracing::warn!(%error, "failed to serialize session credentials"),
        }

        self.notify(Some(&credentials));
    }

    /// Drop the current credentials and the persisted copy, then notify observers.
    pub fn clear(&self) {
        let _update = lock(&self.updates);
        self.replace(None);
        if let Err(error) = self.storage.remove() {
            tracing::warn!(%error, "failed to remove persisted session credentials");
        }
        self.notify(None);
    }

    /// Load credentials persisted by a previous run.
    ///
    /// A well-formed value becomes current and observers are notified. A
    /// malformed value is deleted and the store stays as it was.
    pub fn restore(&self) {
        let _update = lock(&self.updates);
        let raw = match self.storage.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(%error, "failed to read persisted session credentials");
                return;
            }
        };

        match serde_json::from_str::<Credentials>(&raw) {
            Ok(credentials) => {
                tracing::debug!(user_id = %credentials.user_id(), "restored session credentials");
                self.replace(Some(credentials.clone()));
                self.notify(Some(&credentials));
            }
            Err(error) => {
                tracing::debug!(%error, "discarding malformed persisted session");
                if let Err(error) = self.storage.remove() {
                    tracing::warn!(%error, "failed to remove malformed session credentials");
                }
            }
        }
    }

    /// Register an observer called after every mutation with the new value.
    ///
    /// Observers run on the mutating thread and must not mutate the store.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(Option<&Credentials>) -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.observers).push((id, Arc::new(observer)));
        id
    }

    /// Returns `false` if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = lock(&self.observers);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    fn replace(&self, value: Option<Credentials>) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = value;
    }

    fn notify(&self, value: Option<&Credentials>) {
        let observers: Vec<(SubscriptionId, Observer)> = lock(&self.observers).clone();
        for (id, observer) in observers {
            match catch_unwind(AssertUnwindSafe(|| observer(value))) {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    tracing::warn!(subscription = id.0, %error, "credential observer failed");
                }
                Err(_) => {
                    tracing::warn!(subscription = id.0, "credential observer panicked");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStorage;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;

    fn creds(token: &str) -> Credentials {
        Credentials::new(token, "user-1", Some("ana@firm.co".into()), 1_700_000_000_000)
            .expect("valid credentials")
    }

    fn store() -> (Arc<MemorySessionStorage>, CredentialStore) {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = CredentialStore::new(storage.clone());
        (storage, store)
    }

    #[test]
    fn set_then_get_returns_value() {
        let (_, store) = store();
        assert!(store.get().is_none());
        store.set(creds("tok-a"));
        assert_eq!(store.get(), Some(creds("tok-a")));
        assert!(store.has_credentials());
    }

    #[test]
    fn set_persists_and_clear_removes() {
        let (storage, store) = store();
        store.set(creds("tok-a"));
        let persisted = storage.read().expect("read").expect("persisted");
        assert!(persisted.contains(r#""userId":"user-1""#));

        store.clear();
        assert!(store.get().is_none());
        assert_eq!(storage.read().expect("read"), None);
        assert!(matches!(store.require(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn restore_round_trips_in_fresh_store() {
        let storage = Arc::new(MemorySessionStorage::new());
        CredentialStore::new(storage.clone()).set(creds("tok-a"));

        let fresh = CredentialStore::new(storage);
        fresh.restore();
        assert_eq!(fresh.get(), Some(creds("tok-a")));
    }

    #[test]
    fn restore_discards_corrupted_value() {
        let storage = Arc::new(MemorySessionStorage::new());
        CredentialStore::new(storage.clone()).set(creds("tok-a"));
        storage.write("{\"token\":\"tok-a\",\"userId\"").expect("corrupt");

        let fresh = CredentialStore::new(storage.clone());
        fresh.restore();
        assert!(fresh.get().is_none());
        assert_eq!(storage.read().expect("read"), None, "malformed copy removed");
    }

    #[test]
    fn restore_discards_partial_credentials() {
        let storage = Arc::new(MemorySessionStorage::with_value(
            r#"{"token":"","userId":"user-1","timestamp":1}"#,
        ));
        let store = CredentialStore::new(storage);
        store.restore();
        assert!(store.get().is_none());
    }

    #[test]
    fn observers_see_every_mutation_in_order() {
        let (_, store) = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |value| {
            lock(&sink).push(value.map(|c| c.token().to_string()));
            Ok(())
        });

        store.set(creds("tok-a"));
        store.set(creds("tok-b"));
        store.clear();

        assert_eq!(
            *lock(&seen),
            vec![Some("tok-a".to_string()), Some("tok-b".to_string()), None]
        );
    }

    #[test]
    fn failing_observer_does_not_block_others() {
        let (_, store) = store();
        let calls = Arc::new(AtomicUsize::new(0));

        store.subscribe(|_| Err("observer exploded".into()));
        store.subscribe(|_| panic!("observer panicked"));
        let counter = calls.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        store.set(creds("tok-a"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(), Some(creds("tok-a")));
    }

    #[test]
    fn unsubscribed_observer_is_not_called() {
        let (_, store) = store();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set(creds("tok-a"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn observer_can_read_store_during_notification() {
        let (_, store) = store();
        let store = Arc::new(store);
        let reader = Arc::downgrade(&store);
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        store.subscribe(move |_| {
            if let Some(store) = reader.upgrade() {
                *lock(&sink) = store.get().map(|c| c.token().to_string());
            }
            Ok(())
        });

        store.set(creds("tok-a"));
        assert_eq!(lock(&observed).as_deref(), Some("tok-a"));
    }
}
