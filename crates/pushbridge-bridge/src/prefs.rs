// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Portable key-value stores.
//
// `MemoryStore` keeps everything in a map (tests, embedding hosts that own
// persistence themselves). `FileStore` writes one JSON object per namespace
// into a directory and is durable across process restarts.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pushbridge_core::error::{BridgeError, Result};
use tracing::{debug, instrument};

use crate::traits::KeyValueStore;

fn poisoned<T>(_: T) -> BridgeError {
    BridgeError::Storage("store lock poisoned".into())
}

/// In-memory key-value store.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().map_err(poisoned)?;
        Ok(values
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().map_err(poisoned)?;
        values.insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }
}

/// Directory-backed key-value store, one `<namespace>.json` file each.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous value intact.
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        debug!(path = %dir.display(), "file store opened");
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn namespace_path(&self, namespace: &str) -> Result<PathBuf> {
        let valid = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !namespace.starts_with('.');
        if !valid {
            return Err(BridgeError::InvalidArgument(format!(
                "invalid store namespace: {namespace:?}"
            )));
        }
        Ok(self.dir.join(format!("{namespace}.json")))
    }

    fn read_namespace(&self, path: &Path) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| BridgeError::Storage(format!("{}: {e}", path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let path = self.namespace_path(namespace)?;
        let mut values = self.read_namespace(&path)?;
        Ok(values.remove(key))
    }

    #[instrument(skip(self, value), fields(len = value.len()))]
    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let path = self.namespace_path(namespace)?;
        let _guard = self.write_lock.lock().map_err(poisoned)?;

        let mut values = self.read_namespace(&path)?;
        values.insert(key.to_string(), value.to_string());

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec(&values)?)?;
        std::fs::rename(&tmp, &path)?;

        debug!("value committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_scopes_by_namespace() {
        let store = MemoryStore::new();
        store.set("Notifications", "current", "[]").expect("set");
        assert_eq!(
            store.get("Notifications", "current").expect("get").as_deref(),
            Some("[]")
        );
        assert_eq!(store.get("Other", "current").expect("get"), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = FileStore::open(dir.path()).expect("open");
            store
                .set("Notifications", "current", r#"["hello"]"#)
                .expect("set");
        }

        let reopened = FileStore::open(dir.path()).expect("reopen");
        assert_eq!(
            reopened.get("Notifications", "current").expect("get").as_deref(),
            Some(r#"["hello"]"#)
        );
    }

    #[test]
    fn file_store_overwrites_and_keeps_other_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        store.set("ns", "a", "1").expect("set a");
        store.set("ns", "b", "2").expect("set b");
        store.set("ns", "a", "3").expect("overwrite a");

        assert_eq!(store.get("ns", "a").expect("get").as_deref(), Some("3"));
        assert_eq!(store.get("ns", "b").expect("get").as_deref(), Some("2"));
        assert_eq!(store.get("ns", "missing").expect("get"), None);
    }

    #[test]
    fn file_store_rejects_path_like_namespaces() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        assert!(matches!(
            store.set("../escape", "k", "v"),
            Err(BridgeError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.get("", "k"),
            Err(BridgeError::InvalidArgument(_))
        ));
    }
}
