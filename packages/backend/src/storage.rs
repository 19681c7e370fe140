//! # Local key/value persistence
//!
//! [`KvStore`] is the small string store behind session caching and the
//! diagnostic error log. Implementations never surface storage failures:
//! a broken store degrades to "no data" and the app keeps working without
//! persistence.
//!
//! | Store | Platform | Backing |
//! |-------|----------|---------|
//! | [`MemoryStore`] | all (tests, fallback) | `Mutex<HashMap>` |
//! | [`FileStore`] | desktop / mobile | one file per key under the platform data dir |
//! | [`LocalStorage`] | web | `window.localStorage` |

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// String key/value persistence with silent degradation.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory KvStore for testing and as a last-resort fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.lock().unwrap().remove(key);
    }
}

/// Filesystem-backed KvStore for desktop and mobile persistence.
///
/// One file per key under the base directory. Keys are used as file names
/// directly; callers use short literal keys, never user input.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileStore {
    base: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(base: std::path::PathBuf) -> Self {
        Self { base }
    }

    /// Store under the platform data directory (`~/.local/share/noteless/`
    /// on Linux, `~/Library/Application Support/noteless/` on macOS).
    pub fn in_data_dir() -> Self {
        let base = dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("noteless");
        Self::new(base)
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.base.join(key)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = std::fs::create_dir_all(&self.base);
        let _ = std::fs::write(self.path_for(key), value);
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.path_for(key));
    }
}

/// Browser `localStorage` adapter. Zero-size: the storage handle is looked
/// up on every call, so the type stays `Send + Sync` even though the JS
/// handle itself is not.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Debug, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KvStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            // Quota or privacy-mode failures degrade to no persistence.
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// The default store for the current platform.
pub fn default_store() -> Arc<dyn KvStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(LocalStorage::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(FileStore::in_data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("session"), None);

        store.set("session", "{\"token\":\"abc\"}");
        assert_eq!(store.get("session").as_deref(), Some("{\"token\":\"abc\"}"));

        store.set("session", "{\"token\":\"def\"}");
        assert_eq!(store.get("session").as_deref(), Some("{\"token\":\"def\"}"));

        store.remove("session");
        assert_eq!(store.get("session"), None);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v");
        assert_eq!(other.get("k").as_deref(), Some("v"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("noteless_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        assert_eq!(store.get("session"), None);
        store.set("session", "persisted");

        // Re-open from the same directory
        let store2 = FileStore::new(dir.clone());
        assert_eq!(store2.get("session").as_deref(), Some("persisted"));

        store2.remove("session");
        assert_eq!(store.get("session"), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_missing_dir_degrades_silently() {
        let store = FileStore::new(std::path::PathBuf::from(
            "/nonexistent/noteless/definitely/missing",
        ));
        assert_eq!(store.get("anything"), None);
        store.remove("anything");
    }
}
