//! Auth tokens left on disk by a third-party identity client.
//!
//! The identity client persists its session as JSON files whose name contains
//! `auth-token`. A file qualifies only when it carries an `access_token` and
//! a `user.id`; other files are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const TOKEN_FILE_MARKER: &str = "auth-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalToken {
    pub access_token: String,
    pub user_id: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct StoredSession {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<StoredUser>,
}

#[derive(Deserialize)]
struct StoredUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LocalTokenSource {
    dir: PathBuf,
}

impl LocalTokenSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First qualifying token file, by file name order.
    #[must_use]
    pub fn load(&self) -> Option<LocalToken> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!(dir = %self.dir.display(), %error, "local token dir unreadable");
                return None;
            }
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.contains(TOKEN_FILE_MARKER))
            })
            .collect();
        candidates.sort();

        candidates.iter().find_map(|path| parse_token_file(path))
    }
}

fn parse_token_file(path: &Path) -> Option<LocalToken> {
    let raw = fs::read_to_string(path).ok()?;
    let session: StoredSession = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "skipping unparseable token file");
            return None;
        }
    };
    let access_token = session.access_token.filter(|t| !t.is_empty())?;
    let user = session.user?;
    let user_id = user.id.filter(|id| !id.is_empty())?;
    Some(LocalToken {
        access_token,
        user_id,
        email: user.email.filter(|e| !e.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_qualifying_token_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        fs::write(
            tmp.path().join("sb-project-auth-token"),
            r#"{"access_token":"local-jwt","user":{"id":"u-42","email":"ana@firm.co"}}"#,
        )
        .expect("write");

        let token = LocalTokenSource::new(tmp.path()).load().expect("token");
        assert_eq!(
            token,
            LocalToken {
                access_token: "local-jwt".into(),
                user_id: "u-42".into(),
                email: Some("ana@firm.co".into()),
            }
        );
    }

    #[test]
    fn skips_files_without_user_or_marker() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        fs::write(tmp.path().join("a-auth-token"), r#"{"access_token":"no-user"}"#).expect("write");
        fs::write(tmp.path().join("b-auth-token"), "not json").expect("write");
        fs::write(
            tmp.path().join("settings.json"),
            r#"{"access_token":"x","user":{"id":"y"}}"#,
        )
        .expect("write");

        assert!(LocalTokenSource::new(tmp.path()).load().is_none());
    }

    #[test]
    fn missing_dir_yields_nothing() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        assert!(LocalTokenSource::new(tmp.path().join("absent")).load().is_none());
    }
}
