//! Cross-cutting error types for Auditor.
//!
//! Domain-specific errors (`AuthError`, `ApiError`, `ConfigError`) live in
//! their respective crates. The CLI converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Auditor crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Credentials must carry both a token and a user id.
    #[error("Incomplete credentials: {0} is empty")]
    IncompleteCredentials(&'static str),

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Aggregate counters of a batch response disagree with its result list.
    #[error(
        "Inconsistent batch: total {total}, successful {successful}, failed {failed}, results {results}"
    )]
    InconsistentBatch {
        total: usize,
        successful: usize,
        failed: usize,
        results: usize,
    },
}
