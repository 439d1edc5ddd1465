//! Key-value persistence backends.
//!
//! The board treats storage as an opaque synchronous string store: one `get`
//! at startup and one `set` after every committed mutation.
//!
//! - `MemoryStore` - shared in-process map, used by tests and headless hosts
//! - `FileStore` - one JSON file per key, written atomically
//! - `LocalStorageStore` - browser `localStorage` (wasm32 only)

use crate::error::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Synchronous string store the board is persisted to.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.lock().entries.insert(key.into(), value.into());
        store
    }

    /// Raw stored value, bypassing the write counter.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.lock().entries.get(key).cloned()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    /// Make subsequent writes fail, simulating a full or revoked storage.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.lock().entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(StoreError::Backend("writes disabled".to_string()));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

// ============================================================================
// FileStore
// ============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temp file in the same directory and are renamed into place,
/// so a crash mid-write never leaves a truncated board behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the platform data directory (`~/.local/share/laneboard`
    /// on Linux).
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join("laneboard")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Path separators in the key are flattened.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

// ============================================================================
// LocalStorageStore
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::KeyValueStore;
    use crate::error::StoreError;
    use wasm_bindgen::JsValue;

    /// Browser `window.localStorage`.
    pub struct LocalStorageStore {
        storage: web_sys::Storage,
    }

    impl LocalStorageStore {
        /// `None` when there is no window or storage access is denied.
        pub fn from_window() -> Option<Self> {
            let storage = web_sys::window()?.local_storage().ok()??;
            Some(Self { storage })
        }
    }

    fn js_error(err: JsValue) -> StoreError {
        StoreError::Backend(format!("{:?}", err))
    }

    impl KeyValueStore for LocalStorageStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.storage.get_item(key).map_err(js_error)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.storage.set_item(key, value).map_err(js_error)
        }
    }
}
