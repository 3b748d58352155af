//! File-backed session storage.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use matharena_core::model::StoredSession;
use matharena_core::{SessionStore, StoreError};

/// Keeps the signed-in session as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;

        // Replace via a sibling temp file.
        let tmp = self.path.with_extension("json.tmp");
        let written =
            write_private(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `contents` to a new file only the owner can read.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matharena_core::model::{AuthToken, UserId};

    fn session() -> StoredSession {
        StoredSession {
            token: AuthToken("Bearer jwt".into()),
            user_id: UserId(4),
            username: "aboba".into(),
            signed_in_at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_is_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_dirs_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/matharena/session.json"));
        let saved = session();

        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), Some(saved));
        assert!(!dir.path().join("nested/matharena/session.json.tmp").exists());
    }

    #[test]
    fn failed_replace_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let err = FileSessionStore::new(&path).save(&session()).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(!dir.path().join("session.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::new(&path).save(&session()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&session()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        let err = FileSessionStore::new(path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn stored_json_uses_consistent_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::new(&path).save(&session()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["token"], "Bearer jwt");
        assert_eq!(value["user_id"], 4);
        assert_eq!(value["username"], "aboba");
    }
}
