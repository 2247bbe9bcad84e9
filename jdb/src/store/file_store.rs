use crate::collection::Document;
use crate::common::{COLLECTION_FILE_EXT, TEMP_FILE_SUFFIX};
use crate::errors::{ErrorKind, JdbError, JdbResult};
use crate::store::StoreProvider;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File-backed store keeping one JSON file per collection.
///
/// A collection named `users` lives at `<root>/users.jdb` and holds a pretty
/// printed JSON array of documents, so files stay inspectable and editable
/// with ordinary JSON tooling.
///
/// Writes are crash-safe: content goes to `<root>/users.jdb.tmp` first, the
/// file is synced, and only then renamed over the final path. A crash during
/// flush leaves the previous file intact; at worst a stale `.tmp` file
/// remains, which the next successful flush overwrites.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: &Path) -> Self {
        FileStore {
            root: root.to_path_buf(),
        }
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", name, COLLECTION_FILE_EXT))
    }

    fn temp_path(&self, name: &str) -> PathBuf {
        self.root.join(format!(
            "{}.{}.{}",
            name, COLLECTION_FILE_EXT, TEMP_FILE_SUFFIX
        ))
    }
}

impl StoreProvider for FileStore {
    fn ensure_root(&self) -> JdbResult<()> {
        fs::create_dir_all(&self.root).map_err(|err| {
            log::error!(
                "Failed to create data directory {}: {}",
                self.root.display(),
                err
            );
            JdbError::new_with_cause(
                &format!("Failed to create data directory {}", self.root.display()),
                ErrorKind::IOError,
                err.into(),
            )
        })
    }

    fn read_all(&self, name: &str) -> JdbResult<Option<Vec<Document>>> {
        let path = self.collection_path(name);
        // a missing file means the collection was never flushed; attempting
        // the read avoids a second racy existence check
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                log::error!("Failed to read collection file {}: {}", path.display(), err);
                return Err(JdbError::new_with_cause(
                    &format!("Failed to read collection file {}", path.display()),
                    ErrorKind::IOError,
                    err.into(),
                ));
            }
        };

        let documents: Vec<Document> = serde_json::from_str(&content).map_err(|err| {
            log::error!(
                "Collection file {} holds invalid content: {}",
                path.display(),
                err
            );
            JdbError::new_with_cause(
                &format!("Collection file {} holds invalid content", path.display()),
                ErrorKind::FileCorrupted,
                err.into(),
            )
        })?;

        Ok(Some(documents))
    }

    fn write_all(&self, name: &str, documents: &[Document]) -> JdbResult<()> {
        let temp_path = self.temp_path(name);
        let final_path = self.collection_path(name);

        let content = serde_json::to_string_pretty(documents)?;

        let mut file = File::create(&temp_path).map_err(|err| {
            log::error!("Failed to create temp file {}: {}", temp_path.display(), err);
            JdbError::new_with_cause(
                &format!("Failed to create temp file {}", temp_path.display()),
                ErrorKind::IOError,
                err.into(),
            )
        })?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        // rename is atomic on the same filesystem, so readers see either the
        // old file or the new one, never a partial write
        fs::rename(&temp_path, &final_path).map_err(|err| {
            log::error!(
                "Failed to move {} into place: {}",
                temp_path.display(),
                err
            );
            JdbError::new_with_cause(
                &format!("Failed to move {} into place", temp_path.display()),
                ErrorKind::IOError,
                err.into(),
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.ensure_root().unwrap();
        (dir, store)
    }

    #[test]
    fn test_read_missing_collection_is_none() {
        let (_dir, store) = store();
        assert!(store.read_all("users").unwrap().is_none());
    }

    #[test]
    fn test_read_without_root_directory_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(&dir.path().join("never-created"));
        assert!(store.read_all("users").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (_dir, store) = store();
        let docs = vec![doc! { name: "Alice" }, doc! { name: "Bob" }];

        store.write_all("users", &docs).unwrap();
        let loaded = store.read_all("users").unwrap().unwrap();
        assert_eq!(loaded, docs);
    }

    #[test]
    fn test_empty_collection_round_trips_as_empty() {
        let (_dir, store) = store();
        store.write_all("users", &[]).unwrap();
        let loaded = store.read_all("users").unwrap();
        assert_eq!(loaded, Some(vec![]));
    }

    #[test]
    fn test_file_is_pretty_json_array() {
        let (dir, store) = store();
        store.write_all("users", &[doc! { name: "Alice" }]).unwrap();

        let content = fs::read_to_string(dir.path().join("users.jdb")).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.is_array());
    }

    #[test]
    fn test_no_temp_file_left_after_flush() {
        let (dir, store) = store();
        store.write_all("users", &[doc! { x: 1 }]).unwrap();
        assert!(!dir.path().join("users.jdb.tmp").exists());
    }

    #[test]
    fn test_corrupted_file_reports_file_corrupted() {
        let (dir, store) = store();
        fs::write(dir.path().join("users.jdb"), "{ not json ]").unwrap();

        let result = store.read_all("users");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::FileCorrupted);
    }

    #[test]
    fn test_ensure_root_is_idempotent() {
        let (_dir, store) = store();
        store.ensure_root().unwrap();
        store.ensure_root().unwrap();
    }

    #[test]
    fn test_failed_flush_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("data");
        let store = FileStore::new(&root);
        store.ensure_root().unwrap();
        store.write_all("users", &[doc! { name: "Alice" }]).unwrap();

        // replace the root directory with a plain file so the temp file
        // cannot be created
        let saved = fs::read(root.join("users.jdb")).unwrap();
        fs::remove_dir_all(&root).unwrap();
        fs::write(&root, b"").unwrap();

        let result = store.write_all("users", &[doc! { name: "Bob" }]);
        assert!(result.is_err());

        // restore and verify the old content is still what we saved
        fs::remove_file(&root).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("users.jdb"), &saved).unwrap();
        let loaded = store.read_all("users").unwrap().unwrap();
        assert_eq!(loaded[0].get("name").as_str(), Some("Alice"));
    }
}
