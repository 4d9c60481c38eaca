//! # aud-auth
//!
//! Session credentials for Auditor.
//!
//! The [`CredentialStore`] owns the current credentials and persists them
//! through a [`SessionStorage`] backend. The [`CredentialRelay`] accepts
//! credentials from a hosting window over a postMessage-style channel,
//! filtered by [`AllowedOrigins`]. The [`AuthHeaderBuilder`] turns the current
//! state into request headers, falling back to local token files and a static
//! identity.

pub mod error;
pub mod headers;
pub mod local_token;
pub mod relay;
pub mod session;
pub mod store;

pub use error::AuthError;
pub use headers::{AuthHeaderBuilder, BodyKind, CredentialSource, FallbackIdentity, ResolvedIdentity};
pub use local_token::LocalTokenSource;
pub use relay::{
    AllowedOrigins, CredentialRelay, DetachedHost, HostChannel, InboundMessage, LineHost,
    OutboundMessage, RelayOutcome,
};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use store::{CredentialStore, ObserverError, SubscriptionId};
