//! Persisted session state.
//!
//! The uploader core never reads ambient state; everything it needs arrives
//! as explicit parameters. What does persist between runs is the signed-in
//! session, most importantly the access token the ingest API expects as a
//! bearer header. It lives behind a small key-value interface so tests and
//! embedders can swap the file-backed store for an in-memory one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

/// Store key the HTTP transport reads before each request.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Errors from session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value store for session state.
pub trait SessionStore: Send + Sync {
    /// Returns the value for a key, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes a key.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// Session store persisted to a JSON file.
///
/// Entries are cached in memory and written back on every mutation.
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Opens a store, loading existing entries from disk.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let entries = load_entries(&path)?;
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Writes the current entries to disk.
    fn persist(&self) -> Result<(), StoreError> {
        let map = self.entries.read().unwrap();
        let json = serde_json::to_string_pretty(&*map)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        debug!("persisted {} session entries to {:?}", map.len(), self.path);
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        {
            let mut map = self.entries.write().unwrap();
            map.insert(key.to_string(), value.to_string());
        }
        self.persist()
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        {
            let mut map = self.entries.write().unwrap();
            map.remove(key);
        }
        self.persist()
    }
}

/// Loads entries from a JSON file on disk.
fn load_entries(path: &Path) -> Result<HashMap<String, String>, StoreError> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let data = std::fs::read_to_string(path)?;
    let entries: HashMap<String, String> = serde_json::from_str(&data)?;
    debug!("loaded {} session entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Returns the default session file path.
pub fn default_store_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("vidora").join("session.json"))
}

/// Returns the platform-specific config directory.
fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        std::env::var("HOME")
            .ok()
            .map(|h| PathBuf::from(h).join(".config"))
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().unwrap().remove(key);
        Ok(())
    }
}
