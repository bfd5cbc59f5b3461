//! # Blob Store
//!
//! Key/value storage for raw configuration documents. The API stores the
//! site configuration under [`SITE_CONFIG_KEY`] and replaces it whole on
//! every write; readers see either the previous or the new blob, never a
//! mix.

use std::collections::HashMap;
use std::fmt;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

/// Key under which the site configuration blob lives.
pub const SITE_CONFIG_KEY: &str = "site-config";

/// Failures from a [`BlobStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Keys are restricted to `[A-Za-z0-9_-]+` so they map to file names.
    #[error("invalid store key {0:?}")]
    InvalidKey(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage contract for raw configuration blobs.
pub trait BlobStore: Send + Sync + fmt::Debug {
    /// The blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the blob under `key` atomically.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// ── In-memory ───────────────────────────────────────────────────────────────

/// In-process store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── File-backed ─────────────────────────────────────────────────────────────

/// One `<key>.json` file per key under a directory.
///
/// Each write goes to its own uniquely named temp file in the same
/// directory, is synced, then renamed over the target. Concurrent writers
/// never share a temp file, so the last rename wins whole.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StoreError::Io { path, source }
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{key}.json."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(io_err(&self.dir))?;
        tmp.write_all(value.as_bytes()).map_err(io_err(tmp.path()))?;
        tmp.as_file().sync_all().map_err(io_err(tmp.path()))?;
        tmp.persist(&path).map_err(|err| StoreError::Io {
            path: path.clone(),
            source: err.error,
        })?;

        // Make the rename itself durable.
        if let Ok(dir) = std::fs::File::open(&self.dir) {
            let _ = dir.sync_all();
        }
        tracing::debug!(path = %path.display(), bytes = value.len(), "blob replaced");
        Ok(())
    }
}

/// File store when `dir` is given, in-memory store otherwise.
pub fn open(dir: Option<&Path>) -> Result<Arc<dyn BlobStore>, StoreError> {
    match dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "using file-backed config store");
            Ok(Arc::new(FileStore::open(dir)?))
        }
        None => {
            tracing::info!("using in-memory config store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_replaces_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get(SITE_CONFIG_KEY).unwrap(), None);
        store.set(SITE_CONFIG_KEY, "{}").unwrap();
        store.set(SITE_CONFIG_KEY, r#"{"a":1}"#).unwrap();
        assert_eq!(store.get(SITE_CONFIG_KEY).unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn memory_store_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let store = MemoryStore::new();
        for key in ["", "../etc/passwd", "a/b", "site config"] {
            assert!(matches!(store.set(key, "x"), Err(StoreError::InvalidKey(_))), "{key:?}");
        }
    }

    #[test]
    fn file_store_round_trips_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).unwrap();
        assert_eq!(store.get(SITE_CONFIG_KEY).unwrap(), None);

        store.set(SITE_CONFIG_KEY, "first").unwrap();
        store.set(SITE_CONFIG_KEY, "second").unwrap();
        assert_eq!(store.get(SITE_CONFIG_KEY).unwrap().as_deref(), Some("second"));

        let names: Vec<String> = std::fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["site-config.json"]);
    }

    #[test]
    fn file_store_concurrent_writers_never_tear() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::open(dir.path()).unwrap());
        let blobs: Vec<String> = (0..8u8)
            .map(|n| char::from(b'a' + n).to_string().repeat(200 * 1024))
            .collect();
        store.set(SITE_CONFIG_KEY, &blobs[0]).unwrap();

        let writers: Vec<_> = blobs
            .iter()
            .cloned()
            .map(|blob| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..30)
                        .filter(|_| store.set(SITE_CONFIG_KEY, &blob).is_err())
                        .count()
                })
            })
            .collect();
        let reader = {
            let store = Arc::clone(&store);
            let blobs = blobs.clone();
            std::thread::spawn(move || {
                (0..2000)
                    .filter(|_| {
                        let seen = store.get(SITE_CONFIG_KEY).unwrap().unwrap();
                        !blobs.contains(&seen)
                    })
                    .count()
            })
        };

        let failed_writes: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();
        let torn_reads = reader.join().unwrap();
        assert_eq!((failed_writes, torn_reads), (0, 0));

        let names: Vec<String> = std::fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["site-config.json"]);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::open(dir.path()).unwrap().set("k", "persisted").unwrap();
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));
    }
}
