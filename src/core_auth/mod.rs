use log::warn;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("accounts file {0} is not readable")]
    StoreUnavailable(PathBuf),

    #[error("login incorrect for user {0}")]
    BadCredentials(String),
}

/// One record of the accounts file. The password is compared during the
/// scan and never carried out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub home_dir: String,
}

/// Read-only lookup over the accounts file: whitespace-separated
/// `username password home_directory` triples, one record per line (records
/// may in fact span lines, the parser only cares about token order).
///
/// The file is re-read on every authentication attempt so account edits take
/// effect without a restart.
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Scans the store for the first record matching `username` and
    /// `password`. Both comparisons are case-sensitive and verbatim.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Account, AuthError> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            warn!("cannot read accounts file {:?}: {}", self.path, e);
            AuthError::StoreUnavailable(self.path.clone())
        })?;

        let mut fields = contents.split_whitespace();
        while let (Some(user), Some(pass), Some(home)) =
            (fields.next(), fields.next(), fields.next())
        {
            if user == username && pass == password {
                return Ok(Account {
                    username: user.to_string(),
                    home_dir: home.to_string(),
                });
            }
        }

        Err(AuthError::BadCredentials(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn store_with(contents: &str) -> (tempfile::TempDir, AccountStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, AccountStore::new(path))
    }

    #[tokio::test]
    async fn matching_record_logs_in() {
        let (_dir, store) = store_with("alice secret /srv/alice\nbob hunter2 /srv/bob\n");
        let account = store.authenticate("bob", "hunter2").await.unwrap();
        assert_eq!(account.home_dir, "/srv/bob");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let (_dir, store) = store_with("alice secret /srv/alice\n");
        assert!(matches!(
            store.authenticate("alice", "wrong").await,
            Err(AuthError::BadCredentials(_))
        ));
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() {
        let (_dir, store) = store_with("alice secret /srv/alice\n");
        assert!(store.authenticate("mallory", "secret").await.is_err());
    }

    #[tokio::test]
    async fn comparisons_are_case_sensitive() {
        let (_dir, store) = store_with("alice secret /srv/alice\n");
        assert!(store.authenticate("Alice", "secret").await.is_err());
        assert!(store.authenticate("alice", "SECRET").await.is_err());
    }

    #[tokio::test]
    async fn first_match_wins() {
        let (_dir, store) = store_with("alice one /first\nalice one /second\n");
        let account = store.authenticate("alice", "one").await.unwrap();
        assert_eq!(account.home_dir, "/first");
    }

    #[tokio::test]
    async fn records_may_span_lines() {
        let (_dir, store) = store_with("alice\nsecret\n/srv/alice bob pw /srv/bob");
        assert!(store.authenticate("alice", "secret").await.is_ok());
        assert!(store.authenticate("bob", "pw").await.is_ok());
    }

    #[tokio::test]
    async fn missing_file_is_store_unavailable() {
        let store = AccountStore::new("/no/such/accounts/file");
        assert!(matches!(
            store.authenticate("alice", "secret").await,
            Err(AuthError::StoreUnavailable(_))
        ));
    }
}
