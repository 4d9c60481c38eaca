use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("session storage error: {0}")]
    SessionStorage(String),

    #[error("no session credentials; run `auditor auth login` or start `auditor relay`")]
    NotAuthenticated,
}
