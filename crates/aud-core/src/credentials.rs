//! Session credentials relayed by the hosting window.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// An authenticated session: bearer token, user id, optional email, and the
/// capture time in milliseconds since the Unix epoch.
///
/// A `Credentials` value always has a non-empty token and user id. Both
/// [`Credentials::new`] and deserialization enforce this, so partial
/// credentials cannot be constructed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCredentials", rename_all = "camelCase")]
pub struct Credentials {
    token: String,
    user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    timestamp: i64,
}

impl Credentials {
    /// Build credentials, rejecting an empty token or user id.
    ///
    /// A blank email is normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IncompleteCredentials`] naming the empty field.
    pub fn new(
        token: impl Into<String>,
        user_id: impl Into<String>,
        email: Option<String>,
        timestamp: i64,
    ) -> Result<Self, CoreError> {
        let token = token.into();
        let user_id = user_id.into();
        if token.trim().is_empty() {
            return Err(CoreError::IncompleteCredentials("token"));
        }
        if user_id.trim().is_empty() {
            return Err(CoreError::IncompleteCredentials("userId"));
        }
        Ok(Self {
            token,
            user_id,
            email: email.filter(|e| !e.trim().is_empty()),
            timestamp,
        })
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Capture time in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Capture time as a UTC datetime, if the timestamp is in range.
    #[must_use]
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

// Token values never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token_len", &self.token.len())
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCredentials {
    token: String,
    user_id: String,
    #[serde(default)]
    email: Option<String>,
    timestamp: i64,
}

impl TryFrom<RawCredentials> for Credentials {
    type Error = CoreError;

    fn try_from(raw: RawCredentials) -> Result<Self, Self::Error> {
        Self::new(raw.token, raw.user_id, raw.email, raw.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_empty_token() {
        let err = Credentials::new("", "user-1", None, 0).unwrap_err();
        assert!(matches!(err, CoreError::IncompleteCredentials("token")));
    }

    #[test]
    fn rejects_blank_user_id() {
        let err = Credentials::new("tok", "  ", None, 0).unwrap_err();
        assert!(matches!(err, CoreError::IncompleteCredentials("userId")));
    }

    #[test]
    fn blank_email_becomes_none() {
        let creds = Credentials::new("tok", "user-1", Some(String::new()), 1).unwrap();
        assert_eq!(creds.email(), None);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let creds =
            Credentials::new("tok", "user-1", Some("a@b.co".into()), 1_700_000_000_000).unwrap();
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "token": "tok",
                "userId": "user-1",
                "email": "a@b.co",
                "timestamp": 1_700_000_000_000_i64
            })
        );
    }

    #[test]
    fn deserialize_rejects_partial_credentials() {
        let parsed = serde_json::from_str::<Credentials>(
            r#"{"token":"","userId":"user-1","timestamp":1}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn deserialize_without_email() {
        let creds: Credentials =
            serde_json::from_str(r#"{"token":"t","userId":"u","timestamp":5}"#).unwrap();
        assert_eq!(creds.user_id(), "u");
        assert_eq!(creds.email(), None);
        assert_eq!(creds.timestamp(), 5);
    }

    #[test]
    fn debug_output_hides_token() {
        let creds = Credentials::new("super-secret", "user-1", None, 0).unwrap();
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("token_len: 12"));
    }

    #[test]
    fn captured_at_uses_milliseconds() {
        let creds = Credentials::new("t", "u", None, 1_700_000_000_000).unwrap();
        assert_eq!(creds.captured_at().unwrap().timestamp(), 1_700_000_000);
    }
}
