//! Key-value side-store for intake defaults.
//!
//! The submit flow remembers a few values across sessions (currently the
//! operator's name). They live in a small JSON object file next to the
//! collections, read and rewritten whole on every access like everything
//! else in the storage layer. The store is injected where it is needed,
//! never reached through ambient state.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// A tiny persistent string-to-string map.
#[derive(Debug)]
pub struct PrefsStore {
    /// Path to the prefs file.
    path: PathBuf,
}

impl PrefsStore {
    /// Open the side-store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        Ok(Self { path })
    }

    /// Get the path to the prefs file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_map()?.get(key).cloned())
    }

    /// Store a value, replacing any previous one for the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or written.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map)?;
        debug!("Stored pref '{key}'");
        Ok(())
    }

    /// Remove a value, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or written.
    pub fn remove(&self, key: &str) -> Result<Option<String>> {
        let mut map = self.load_map()?;
        let removed = map.remove(key);
        if removed.is_some() {
            self.save_map(&map)?;
        }
        Ok(removed)
    }

    fn load_map(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| Error::CollectionParse {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(Error::CollectionRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let text = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, text).map_err(|source| Error::CollectionWrite {
            path: self.path.clone(),
            source,
        })
    }
}
