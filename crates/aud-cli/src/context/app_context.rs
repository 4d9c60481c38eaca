use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use aud_auth::{
    AllowedOrigins, AuthHeaderBuilder, CredentialRelay, CredentialStore, FallbackIdentity,
    FileSessionStorage, HostChannel, LocalTokenSource, MemorySessionStorage, SessionStorage,
};
use aud_client::ApiClient;
use aud_config::AuditorConfig;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: AuditorConfig,
    pub client: ApiClient,
    pub session_path: Option<PathBuf>,
}

impl AppContext {
    /// Wire session storage, the credential store, the relay and the API client.
    ///
    /// The relay is initialized here, so persisted credentials are restored
    /// before any command runs.
    pub fn init(config: AuditorConfig, host: Arc<dyn HostChannel>) -> anyhow::Result<Self> {
        let session_path = config.session_path();
        let storage: Arc<dyn SessionStorage> = match &session_path {
            Some(path) => Arc::new(FileSessionStorage::new(path)),
            None => {
                tracing::warn!("no data directory; session credentials will not persist");
                Arc::new(MemorySessionStorage::new())
            }
        };

        let store = Arc::new(CredentialStore::new(storage));
        let origins = AllowedOrigins::new(config.auth.allowed_origins.iter());
        let relay = Arc::new(CredentialRelay::new(Arc::clone(&store), origins, host));
        relay.initialize();

        let fallback = FallbackIdentity::new(
            config.auth.fallback_token.as_str(),
            config.auth.fallback_user_id.as_str(),
        );
        let mut headers = AuthHeaderBuilder::new(store, fallback);
        if let Some(dir) = &config.auth.local_token_dir {
            headers = headers.with_local_tokens(LocalTokenSource::new(dir));
        }

        let client = ApiClient::new(&config.api, headers, relay)
            .context("failed to build API client")?;

        Ok(Self {
            config,
            client,
            session_path,
        })
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        self.client.relay().store()
    }
}

#[cfg(test)]
mod tests {
    use aud_auth::DetachedHost;
    use aud_core::Credentials;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> AuditorConfig {
        let mut config = AuditorConfig::default();
        config.auth.session_path = Some(dir.path().join("session.json"));
        config
    }

    #[test]
    fn store_is_shared_with_the_client_and_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::init(config_in(&dir), Arc::new(DetachedHost)).unwrap();
        let creds = Credentials::new("tok", "user-1", None, 1_700_000_000_000).unwrap();

        ctx.store().set(creds.clone());
        assert_eq!(ctx.client.relay().store().get(), Some(creds.clone()));

        let restarted = AppContext::init(config_in(&dir), Arc::new(DetachedHost)).unwrap();
        assert_eq!(restarted.store().get(), Some(creds));
    }
}
