//! services/app/src/adapters/preferences.rs
//!
//! Adapters for the `PreferenceStore` port: a JSON file on disk for the real app,
//! and an in-memory map for tests and key-less demo runs.

use async_trait::async_trait;
use careconnect_core::ports::{PortError, PortResult, PreferenceStore};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

//=========================================================================================
// File-backed Store
//=========================================================================================

/// Keeps preferences as a flat JSON object (`{"theme": "dark"}`) in a single file.
///
/// Keys this store does not own are carried over on every write, whatever their type.
pub struct FilePreferenceStore {
    path: PathBuf,
    // Held across every read and read-modify-write of the file.
    lock: tokio::sync::Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: tokio::sync::Mutex::new(()),
        }
    }

    // Sibling file the next contents are written to before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    /// Raw file contents. A missing file is `Ok(None)`.
    async fn read_raw(&self) -> PortResult<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Unexpected(format!(
                "Failed to read preferences file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn load(&self) -> PortResult<Map<String, Value>> {
        match self.read_raw().await? {
            Some(bytes) => parse_preferences(&bytes).map_err(|e| {
                PortError::Unexpected(format!(
                    "Preferences file {} is not a valid JSON object: {}",
                    self.path.display(),
                    e
                ))
            }),
            None => Ok(Map::new()),
        }
    }

    async fn store(&self, values: &Map<String, Value>) -> PortResult<()> {
        let json = serde_json::to_vec_pretty(values)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let staging = self.staging_path();
        tokio::fs::write(&staging, json).await.map_err(|e| {
            PortError::Unexpected(format!(
                "Failed to write preferences file {}: {}",
                staging.display(),
                e
            ))
        })?;
        tokio::fs::rename(&staging, &self.path).await.map_err(|e| {
            PortError::Unexpected(format!(
                "Failed to replace preferences file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

fn parse_preferences(bytes: &[u8]) -> serde_json::Result<Map<String, Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    serde_json::from_slice(bytes)
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let values = self.load().await?;
        Ok(values.get(key).and_then(Value::as_str).map(str::to_string))
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let _guard = self.lock.lock().await;

        // Unparseable contents are replaced rather than blocking every later write.
        let mut values = match self.read_raw().await? {
            Some(bytes) => parse_preferences(&bytes).unwrap_or_else(|e| {
                warn!(
                    path = %self.path.display(),
                    "Discarding unreadable preferences file: {}",
                    e
                );
                Map::new()
            }),
            None => Map::new(),
        };
        values.insert(key.to_string(), Value::String(value.to_string()));
        self.store(&values).await?;

        debug!(key, path = %self.path.display(), "Preference saved");
        Ok(())
    }
}

//=========================================================================================
// In-memory Store
//=========================================================================================

#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| PortError::Unexpected("preference map poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| PortError::Unexpected("preference map poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trips_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let store = FilePreferenceStore::new(path.clone());

        assert_eq!(store.get("theme").await.unwrap(), None);

        store.set("theme", "dark").await.unwrap();
        store.set("language", "hi").await.unwrap();

        // A fresh instance reads what the first one wrote.
        let reopened = FilePreferenceStore::new(path);
        assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("language").await.unwrap().as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::new(path);
        assert!(matches!(store.get("theme").await, Err(PortError::Unexpected(_))));
    }

    #[tokio::test]
    async fn truncated_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme":"da"#).unwrap();

        let store = FilePreferenceStore::new(path);
        store.set("theme", "light").await.unwrap();

        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));
        assert!(!dir.path().join("prefs.json.tmp").exists());
    }

    #[tokio::test]
    async fn non_string_values_are_kept_but_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme":"dark","version":2}"#).unwrap();

        let store = FilePreferenceStore::new(path.clone());
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
        assert_eq!(store.get("version").await.unwrap(), None);

        store.set("theme", "light").await.unwrap();
        let saved: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(saved["version"], 2);
        assert_eq!(saved["theme"], "light");
    }

    #[tokio::test]
    async fn blank_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "\n").unwrap();

        let store = FilePreferenceStore::new(path);
        assert_eq!(store.get("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn memory_store_overwrites() {
        let store = MemoryPreferenceStore::new();
        store.set("theme", "light").await.unwrap();
        store.set("theme", "dark").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }
}
