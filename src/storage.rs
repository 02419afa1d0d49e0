// Durable key-value storage backed by JSON documents on disk

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable store adapter: one JSON document per key, overwritten whole on
/// every save.
///
/// Storage failures never reach the caller. `load` falls back to the provided
/// default and `save` degrades to a no-op, each leaving only a diagnostic
/// log behind, so callers keep a functional in-memory state even when the
/// disk is unavailable or the stored document is corrupt.
pub struct Storage {
    base_path: PathBuf,
}

impl Storage {
    /// Open or create a storage directory at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create storage directory")?;
        Ok(Self { base_path })
    }

    /// Get the base path of this storage directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Read the value stored under `key`, falling back to `default` when the
    /// key is absent or the stored document cannot be decoded.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = ?e, "Failed to load stored value, using default");
                default
            }
        }
    }

    /// Persist `value` under `key`, replacing whatever was stored before.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!(key, error = ?e, "Failed to persist value, keeping in-memory state only");
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.document_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).context("Failed to read stored document")?;
        let value = serde_json::from_str(&raw).context("Failed to decode stored document")?;

        debug!(key, "Loaded stored document");
        Ok(Some(value))
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.document_path(key)?;
        let json = serde_json::to_string_pretty(value).context("Failed to serialize value")?;

        // Write to a sibling temp file and rename over the target, so an
        // interrupted write never clobbers the previous document.
        let tmp = path.with_extension("json.tmp");
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .context("Failed to open temp document for writing")?;

        // Acquire exclusive lock before writing
        file.lock_exclusive().context("Failed to acquire file lock")?;

        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &path).context("Failed to replace stored document")?;

        debug!(key, "Saved document");
        Ok(())
    }

    fn document_path(&self, key: &str) -> Result<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.base_path.join(format!("{key}.json")))
    }

    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(eyre!("Storage key cannot be empty"));
        }
        if key.len() > 64 {
            return Err(eyre!("Storage key too long: {} (max 64 chars)", key));
        }
        if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(eyre!(
                "Invalid storage key: {} (must be alphanumeric with _/-)",
                key
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: i64,
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("store");

        let storage = Storage::open(&dir).unwrap();
        assert!(dir.exists());
        assert_eq!(storage.base_path(), dir);
    }

    #[test]
    fn test_load_missing_key_returns_default() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();

        let value: Vec<Doc> = storage.load("absent", Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();

        let doc = Doc {
            name: "first".to_string(),
            count: 3,
        };
        storage.save("doc", &doc);
        assert!(temp.path().join("doc.json").exists());

        let loaded: Doc = storage.load(
            "doc",
            Doc {
                name: String::new(),
                count: 0,
            },
        );
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_save_overwrites_whole_document() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();

        storage.save("items", &vec![1, 2, 3]);
        storage.save("items", &vec![9]);

        let loaded: Vec<i64> = storage.load("items", Vec::new());
        assert_eq!(loaded, vec![9]);
    }

    #[test]
    fn test_corrupt_document_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();

        fs::write(temp.path().join("doc.json"), "{not json").unwrap();

        let loaded: Vec<Doc> = storage.load("doc", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_shape_mismatch_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();

        // Valid JSON, wrong shape for Doc
        fs::write(temp.path().join("doc.json"), r#"{"unexpected": true}"#).unwrap();

        let fallback = Doc {
            name: "fallback".to_string(),
            count: -1,
        };
        let loaded: Doc = storage.load("doc", fallback.clone());
        assert_eq!(loaded, fallback);
    }

    #[test]
    fn test_invalid_key_is_a_noop() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::open(temp.path()).unwrap();

        storage.save("bad/key", &vec![1]);
        assert!(fs::read_dir(temp.path()).unwrap().next().is_none());

        let loaded: Vec<i64> = storage.load("bad/key", vec![7]);
        assert_eq!(loaded, vec![7]);
    }

    #[test]
    fn test_validate_key() {
        assert!(Storage::validate_key("todos").is_ok());
        assert!(Storage::validate_key("todo_list-2").is_ok());

        assert!(Storage::validate_key("").is_err());
        assert!(Storage::validate_key("bad/key").is_err());
        assert!(Storage::validate_key(&"a".repeat(65)).is_err());
    }
}
