//! Bridge between a hosting window and the [`CredentialStore`].
//!
//! The host delivers tagged messages carrying the sender's origin. Only
//! origins in the [`AllowedOrigins`] set may hand over credentials; anything
//! else is dropped without touching the store. The relay answers through a
//! [`HostChannel`], announcing readiness once and asking for fresh
//! credentials when the backend rejects the current ones.

use std::collections::HashSet;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use aud_core::Credentials;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::store::CredentialStore;

/// Message type carrying credentials from the host.
pub const CREDENTIALS_MESSAGE: &str = "AUTH_CREDENTIALS";

/// Origins (scheme + host + port) trusted to send credentials. Fixed for the
/// lifetime of a relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedOrigins(HashSet<String>);

impl AllowedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            origins
                .into_iter()
                .map(|o| o.into().trim_end_matches('/').to_string())
                .collect(),
        )
    }

    /// Exact match; no wildcard or suffix matching.
    #[must_use]
    pub fn contains(&self, origin: &str) -> bool {
        self.0.contains(origin)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An inbound event: the payload plus the origin of the window that sent it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InboundMessage {
    pub origin: String,
    pub data: Value,
}

impl InboundMessage {
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }

    fn kind(&self) -> Option<&str> {
        self.data.get("type").and_then(Value::as_str)
    }
}

/// Announcements sent to the hosting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    AuditorReady,
    AuthRequired,
}

/// What the relay did with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Origin not allowed; store untouched.
    Rejected,
    /// Credentials installed in the store.
    Stored,
    /// Credentials message missing its token or user id; store untouched.
    Malformed,
    /// Unrecognized message type from an allowed origin.
    Ignored,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsPayload {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    /// Any JSON number; hosts are not consistent about integer milliseconds.
    #[serde(default)]
    timestamp: Option<Value>,
}

/// Whole milliseconds from a JSON number. Fractions are truncated.
#[allow(clippy::cast_possible_truncation)]
fn timestamp_millis(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|ms| ms.is_finite() && ms.abs() < i64::MAX as f64)
            .map(|ms| ms.trunc() as i64)
    })
}

/// The window (or process) hosting this application.
pub trait HostChannel: Send + Sync {
    /// Whether this application runs nested inside a host that listens for announcements.
    fn is_nested(&self) -> bool;

    /// Deliver an announcement. Fire-and-forget.
    fn post(&self, message: OutboundMessage);
}

/// Top-level context with nobody to announce to.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl HostChannel for DetachedHost {
    fn is_nested(&self) -> bool {
        false
    }

    fn post(&self, message: OutboundMessage) {
        tracing::debug!(?message, "no host window; announcement dropped");
    }
}

/// Writes each announcement as one JSON line, e.g. to stdout of a child process.
pub struct LineHost<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LineHost<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> HostChannel for LineHost<W> {
    fn is_nested(&self) -> bool {
        true
    }

    fn post(&self, message: OutboundMessage) {
        let line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(%error, "failed to encode announcement");
                return;
            }
        };
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            tracing::warn!(%error, "failed to post announcement to host");
        }
    }
}

/// Accepts credentials from trusted host origins into the store and asks the host to sign in again.
pub struct CredentialRelay {
    store: Arc<CredentialStore>,
    origins: AllowedOrigins,
    host: Arc<dyn HostChannel>,
    listening: AtomicBool,
}

impl CredentialRelay {
    pub fn new(
        store: Arc<CredentialStore>,
        origins: AllowedOrigins,
        host: Arc<dyn HostChannel>,
    ) -> Self {
        Self {
            store,
            origins,
            host,
            listening: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Restore persisted credentials and announce readiness when nested.
    ///
    /// Only the first call does anything; later calls return `false`.
    pub fn initialize(&self) -> bool {
        if self.listening.swap(true, Ordering::SeqCst) {
            tracing::debug!("credential relay already initialized");
            return false;
        }
        self.store.restore();
        if self.host.is_nested() {
            self.host.post(OutboundMessage::AuditorReady);
        }
        tracing::debug!(origins = self.origins.len(), "credential relay listening");
        true
    }

    /// Initialize, then dispatch inbound messages until every sender is dropped.
    pub async fn listen(&self, mut inbound: mpsc::Receiver<InboundMessage>) {
        self.initialize();
        while let Some(message) = inbound.recv().await {
            self.handle_message(&message);
        }
        tracing::debug!("inbound channel closed");
    }

    /// Filter and dispatch one inbound message.
    pub fn handle_message(&self, message: &InboundMessage) -> RelayOutcome {
        if !self.origins.contains(&message.origin) {
            tracing::warn!(origin = %message.origin, "rejected message from untrusted origin");
            return RelayOutcome::Rejected;
        }

        if message.kind() != Some(CREDENTIALS_MESSAGE) {
            tracing::debug!(origin = %message.origin, kind = ?message.kind(), "ignoring message");
            return RelayOutcome::Ignored;
        }

        let payload: CredentialsPayload = match serde_json::from_value(message.data.clone()) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(origin = %message.origin, %error, "undecodable credentials message");
                return RelayOutcome::Malformed;
            }
        };

        let timestamp = payload
            .timestamp
            .as_ref()
            .and_then(timestamp_millis)
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        match Credentials::new(
            payload.token.unwrap_or_default(),
            payload.user_id.unwrap_or_default(),
            payload.email,
            timestamp,
        ) {
            Ok(credentials) => {
                tracing::info!(
                    user_id = %credentials.user_id(),
                    email = credentials.email().unwrap_or("-"),
                    token_len = credentials.token().len(),
                    "credentials received from host"
                );
                self.store.set(credentials);
                RelayOutcome::Stored
            }
            Err(error) => {
                tracing::warn!(origin = %message.origin, %error, "incomplete credentials message");
                RelayOutcome::Malformed
            }
        }
    }

    /// Ask the host for fresh credentials. No-op when not nested.
    pub fn request_auth(&self) {
        if self.host.is_nested() {
            self.host.post(OutboundMessage::AuthRequired);
        } else {
            tracing::debug!("authentication required but no host window to ask");
        }
    }

    /// Reaction to a backend 401: forget the credentials and ask for new ones.
    pub fn handle_auth_error(&self) {
        self.store.clear();
        self.request_auth();
    }
}
