//! # aud-client
//!
//! Authenticated HTTP client for the Auditor extraction backend.
//!
//! Every call goes through [`ApiClient::request`], which attaches the headers
//! resolved by [`AuthHeaderBuilder`] and reacts to a 401 by clearing the
//! session and asking the host for fresh credentials. Resource operations
//! live in one module each:
//! - tax declarations (`declaration`)
//! - RUT registrations (`rut`)
//! - electronic invoices (`invoice`)
//! - tax calendars (`tax_calendar`)
//! - clients and providers (`client_provider`)
//! - accounting clients (`accounting_client`)

pub mod accounting_client;
pub mod client_provider;
pub mod declaration;
pub mod invoice;
pub mod progress;
pub mod rut;
pub mod tax_calendar;

mod error;
mod http;

pub use error::ApiError;
pub use progress::{ProgressSink, ProgressTracker, UploadFile};

use std::sync::Arc;
use std::time::Duration;

use aud_auth::headers::is_auth_header;
use aud_auth::{AuthHeaderBuilder, BodyKind, CredentialRelay};
use aud_config::ApiConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{check_response, decode};
use crate::progress::upload_form;

// ── Request options ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Form),
}

impl RequestBody {
    const fn kind(&self) -> BodyKind {
        match self {
            Self::Empty => BodyKind::None,
            Self::Json(_) => BodyKind::Json,
            Self::Multipart(_) => BodyKind::Multipart,
        }
    }
}

/// Per-call options for [`ApiClient::request`].
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub body: RequestBody,
    /// Extra headers. They override derived content headers, never auth headers.
    pub headers: Vec<(String, String)>,
    /// Send no derived auth headers; caller headers are used as given.
    pub bypass_auth: bool,
    /// Overrides the client-wide timeout.
    pub timeout: Option<Duration>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn json(body: Value) -> Self {
        Self {
            body: RequestBody::Json(body),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn multipart(form: Form) -> Self {
        Self {
            body: RequestBody::Multipart(form),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn bypass_auth(mut self) -> Self {
        self.bypass_auth = true;
        self
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the extraction backend.
///
/// Every call carries the current auth headers; a 401 is routed back to the relay.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    upload_timeout: Duration,
    headers: AuthHeaderBuilder,
    relay: Arc<CredentialRelay>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying `reqwest::Client`
    /// cannot be built.
    pub fn new(
        config: &ApiConfig,
        headers: AuthHeaderBuilder,
        relay: Arc<CredentialRelay>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_timeout: Duration::from_secs(config.upload_timeout_secs),
            headers,
            relay,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn relay(&self) -> &Arc<CredentialRelay> {
        &self.relay
    }

    /// The header source every request consults.
    #[must_use]
    pub const fn auth(&self) -> &AuthHeaderBuilder {
        &self.headers
    }

    /// Issue one request with auth headers merged in.
    ///
    /// A 401 clears the session, asks the host for credentials, and yields
    /// [`ApiError::Unauthorized`]. Every other status is returned as is.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] on 401, [`ApiError::Timeout`] when the
    /// deadline elapses, [`ApiError::Transport`] for other send failures and
    /// [`ApiError::InvalidHeader`] for headers that cannot be encoded.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let kind = options.body.kind();

        let mut headers = if options.bypass_auth {
            AuthHeaderBuilder::content_headers(kind)
        } else {
            self.headers.build_headers(kind)
        };
        for (name, value) in options.headers {
            let name = name.to_ascii_lowercase();
            if !options.bypass_auth && is_auth_header(&name) {
                tracing::debug!(header = %name, "ignoring caller-supplied auth header");
                continue;
            }
            headers.insert(name, value);
        }

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .headers(to_header_map(&headers)?);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match options.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        tracing::debug!(%method, path, "request");
        let resp = builder.send().await.map_err(ApiError::from_transport)?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(%method, path, "backend rejected credentials");
            self.relay.handle_auth_error();
            return Err(ApiError::Unauthorized);
        }
        Ok(resp)
    }

    /// `GET` and decode.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request, status check, or decode.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        let options = RequestOptions {
            query,
            ..RequestOptions::default()
        };
        self.send_json(Method::GET, path, options).await
    }

    /// `POST` a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request, status check, or decode.
    pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let options = RequestOptions::json(encode(body)?);
        self.send_json(Method::POST, path, options).await
    }

    /// `PUT` a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request, status check, or decode.
    pub async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let options = RequestOptions::json(encode(body)?);
        self.send_json(Method::PUT, path, options).await
    }

    /// `POST` a multipart form under the upload timeout and decode the response.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the request, status check, or decode.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let options = RequestOptions::multipart(form).timeout(self.upload_timeout);
        self.send_json(Method::POST, path, options).await
    }

    /// Upload `parts` plus text `fields`, reporting progress to `sink`.
    ///
    /// The tracker is closed before returning, whatever the outcome.
    async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: &[(&'static str, &UploadFile)],
        fields: Vec<(&'static str, String)>,
        sink: Option<ProgressSink>,
    ) -> Result<T, ApiError> {
        let tracker = ProgressTracker::for_files(parts.iter().map(|(_, f)| *f), sink);
        let result = self.upload_tracked(path, parts, fields, &tracker).await;
        tracker.close();
        result
    }

    async fn upload_tracked<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: &[(&'static str, &UploadFile)],
        fields: Vec<(&'static str, String)>,
        tracker: &Arc<ProgressTracker>,
    ) -> Result<T, ApiError> {
        let form = fields
            .into_iter()
            .fold(upload_form(parts, tracker)?, |form, (name, value)| {
                form.text(name, value)
            });
        self.post_multipart(path, form).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let resp = check_response(self.request(method, path, options).await?).await?;
        decode(resp).await
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Validation(format!("cannot encode request body: {e}")))
}

fn to_header_map(
    headers: &std::collections::BTreeMap<String, String>,
) -> Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Fail fast when an upload operation gets no files.
fn require_files(files: &[UploadFile]) -> Result<(), ApiError> {
    if files.is_empty() {
        return Err(ApiError::Validation(
            "at least one file must be selected".to_string(),
        ));
    }
    Ok(())
}

/// Percent-encode a path segment.
fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_map_rejects_control_characters() {
        let mut headers = std::collections::BTreeMap::new();
        headers.insert("x-user-id".to_string(), "bad\nvalue".to_string());
        let err = to_header_map(&headers).unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader { .. }));
    }

    #[test]
    fn empty_file_list_is_a_validation_error() {
        assert!(matches!(require_files(&[]), Err(ApiError::Validation(_))));
    }

    #[test]
    fn segment_encodes_reserved_characters() {
        assert_eq!(segment("900 123/4"), "900%20123%2F4");
    }

    #[test]
    fn options_builder_collects_query_and_headers() {
        let options = RequestOptions::default()
            .query("page", 2)
            .header("X-Request-Id", "abc")
            .timeout(Duration::from_secs(5));
        assert_eq!(options.query, vec![("page".to_string(), "2".to_string())]);
        assert_eq!(options.headers.len(), 1);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert!(!options.bypass_auth);
    }
}
