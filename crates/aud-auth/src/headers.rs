//! Request header resolution from the current credential state.
//!
//! Resolution order, first match wins and tiers never mix:
//! 1. session credentials in the [`CredentialStore`]
//! 2. a third-party token file, when a [`LocalTokenSource`] is configured
//! 3. the static fallback identity from configuration
//! 4. nothing (the request goes out unauthenticated)

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::local_token::LocalTokenSource;
use crate::store::CredentialStore;

pub const AUTHORIZATION: &str = "authorization";
pub const USER_ID: &str = "x-user-id";
pub const CONTENT_TYPE: &str = "content-type";
pub const ACCEPT: &str = "accept";

const JSON: &str = "application/json";

/// Header names owned by the builder; callers cannot override them.
#[must_use]
pub fn is_auth_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(AUTHORIZATION) || name.eq_ignore_ascii_case(USER_ID)
}

/// Shape of the request body, which decides the content negotiation headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    /// The transport sets `content-type` itself to carry the boundary.
    Multipart,
    None,
}

/// Deployment-time identity used when no session credential exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackIdentity {
    pub token: String,
    pub user_id: String,
}

impl FallbackIdentity {
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() || !self.user_id.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Session,
    LocalToken,
    Fallback,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Session => "session",
            Self::LocalToken => "local-token",
            Self::Fallback => "fallback",
        })
    }
}

/// The identity a request will carry. Either field may be absent for the fallback tier.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub source: CredentialSource,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

impl fmt::Debug for ResolvedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedIdentity")
            .field("source", &self.source)
            .field("token_len", &self.token.as_ref().map(String::len))
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AuthHeaderBuilder {
    store: Arc<CredentialStore>,
    local: Option<LocalTokenSource>,
    fallback: FallbackIdentity,
}

impl AuthHeaderBuilder {
    #[must_use]
    pub const fn new(store: Arc<CredentialStore>, fallback: FallbackIdentity) -> Self {
        Self {
            store,
            local: None,
            fallback,
        }
    }

    #[must_use]
    pub fn with_local_tokens(mut self, source: LocalTokenSource) -> Self {
        self.local = Some(source);
        self
    }

    /// Identity from the highest tier that has one.
    #[must_use]
    pub fn resolve(&self) -> Option<ResolvedIdentity> {
        if let Some(credentials) = self.store.get()
            && !credentials.token().is_empty()
        {
            return Some(ResolvedIdentity {
                source: CredentialSource::Session,
                token: Some(credentials.token().to_string()),
                user_id: Some(credentials.user_id().to_string()),
                email: credentials.email().map(str::to_string),
            });
        }

        if let Some(token) = self.local.as_ref().and_then(LocalTokenSource::load) {
            return Some(ResolvedIdentity {
                source: CredentialSource::LocalToken,
                token: Some(token.access_token),
                user_id: Some(token.user_id),
                email: token.email,
            });
        }

        if self.fallback.is_configured() {
            return Some(ResolvedIdentity {
                source: CredentialSource::Fallback,
                token: Some(self.fallback.token.clone()).filter(|t| !t.is_empty()),
                user_id: Some(self.fallback.user_id.clone()).filter(|u| !u.is_empty()),
                email: None,
            });
        }

        None
    }

    /// Only the `authorization` and `x-user-id` entries.
    #[must_use]
    pub fn auth_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        if let Some(identity) = self.resolve() {
            if let Some(token) = identity.token {
                headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
            }
            if let Some(user_id) = identity.user_id {
                headers.insert(USER_ID.to_string(), user_id);
            }
        }
        headers
    }

    /// Auth headers plus content negotiation for the given body.
    #[must_use]
    pub fn build_headers(&self, body: BodyKind) -> BTreeMap<String, String> {
        let mut headers = self.auth_headers();
        headers.extend(Self::content_headers(body));
        headers
    }

    /// Content negotiation only, for requests that skip authentication.
    #[must_use]
    pub fn content_headers(body: BodyKind) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        if body == BodyKind::Json {
            headers.insert(CONTENT_TYPE.to_string(), JSON.to_string());
        }
        headers.insert(ACCEPT.to_string(), JSON.to_string());
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStorage;
    use aud_core::Credentials;
    use pretty_assertions::assert_eq;

    fn empty_store() -> Arc<CredentialStore> {
        Arc::new(CredentialStore::new(Arc::new(MemorySessionStorage::new())))
    }

    fn session(store: &CredentialStore) {
        store.set(Credentials::new("session-jwt", "user-9", None, 1).expect("valid credentials"));
    }

    #[test]
    fn no_credentials_and_no_fallback_means_no_auth() {
        let builder = AuthHeaderBuilder::new(empty_store(), FallbackIdentity::default());
        let headers = builder.build_headers(BodyKind::Json);
        assert!(!headers.contains_key(AUTHORIZATION));
        assert!(!headers.contains_key(USER_ID));
        assert_eq!(headers.get(CONTENT_TYPE).map(String::as_str), Some("application/json"));
        assert!(builder.resolve().is_none());
    }

    #[test]
    fn session_beats_fallback() {
        let store = empty_store();
        session(&store);
        let builder =
            AuthHeaderBuilder::new(store, FallbackIdentity::new("static-jwt", "static-user"));

        let headers = builder.build_headers(BodyKind::None);
        assert_eq!(headers.get(AUTHORIZATION).map(String::as_str), Some("Bearer session-jwt"));
        assert_eq!(headers.get(USER_ID).map(String::as_str), Some("user-9"));
        assert_eq!(builder.resolve().map(|i| i.source), Some(CredentialSource::Session));
    }

    #[test]
    fn fallback_used_when_store_empty() {
        let builder = AuthHeaderBuilder::new(
            empty_store(),
            FallbackIdentity::new("static-jwt", "static-user"),
        );
        let headers = builder.auth_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(AUTHORIZATION).map(String::as_str), Some("Bearer static-jwt"));
    }

    #[test]
    fn fallback_user_id_alone_sends_only_identity() {
        let builder = AuthHeaderBuilder::new(empty_store(), FallbackIdentity::new("", "static-user"));
        let headers = builder.auth_headers();
        assert!(!headers.contains_key(AUTHORIZATION));
        assert_eq!(headers.get(USER_ID).map(String::as_str), Some("static-user"));
    }

    #[test]
    fn multipart_omits_content_type() {
        let store = empty_store();
        session(&store);
        let builder = AuthHeaderBuilder::new(store, FallbackIdentity::default());
        let headers = builder.build_headers(BodyKind::Multipart);
        assert!(!headers.contains_key(CONTENT_TYPE));
        assert_eq!(headers.get(ACCEPT).map(String::as_str), Some("application/json"));
        assert!(headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn local_token_sits_between_session_and_fallback() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        std::fs::write(
            tmp.path().join("sb-auth-token"),
            r#"{"access_token":"local-jwt","user":{"id":"local-user"}}"#,
        )
        .expect("write");

        let store = empty_store();
        let builder = AuthHeaderBuilder::new(store.clone(), FallbackIdentity::new("static-jwt", ""))
            .with_local_tokens(LocalTokenSource::new(tmp.path()));

        assert_eq!(
            builder.auth_headers().get(AUTHORIZATION).map(String::as_str),
            Some("Bearer local-jwt")
        );

        session(&store);
        assert_eq!(
            builder.auth_headers().get(AUTHORIZATION).map(String::as_str),
            Some("Bearer session-jwt")
        );
    }

    #[test]
    fn content_headers_never_carry_auth() {
        let headers = AuthHeaderBuilder::content_headers(BodyKind::Json);
        assert_eq!(headers.len(), 2);
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn auth_header_names_match_case_insensitively() {
        assert!(is_auth_header("Authorization"));
        assert!(is_auth_header("X-User-Id"));
        assert!(!is_auth_header("x-request-id"));
    }

    #[test]
    fn resolved_identity_debug_hides_token() {
        let store = empty_store();
        session(&store);
        let builder = AuthHeaderBuilder::new(store, FallbackIdentity::default());
        let debug = format!("{:?}", builder.resolve().expect("identity"));
        assert!(!debug.contains("session-jwt"));
        assert!(debug.contains("token_len"));
    }
}
