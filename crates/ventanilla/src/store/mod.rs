//! Storage layer for ventanilla.
//!
//! Each collection is one JSON file holding a pretty-printed array of
//! records in insertion order. Every operation reloads the file and every
//! mutation rewrites it whole; nothing is cached between calls and no index
//! is kept, so reads and updates are O(n) over the collection. Collections
//! are small (manual staff entry), which is what this design assumes.

pub mod prefs;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{Record, RecordKind};

pub use prefs::PrefsStore;

/// Whole-file JSON persistence for one collection.
///
/// Mutations are not serialized against each other: `create` and `update`
/// each perform their own load and save, and the last save wins. A
/// concurrent mutation that loaded before another saved is silently lost.
#[derive(Debug)]
pub struct RecordStore {
    /// Path to the collection file.
    path: PathBuf,
    /// Kind stamped on every record in this collection.
    kind: RecordKind,
}

impl RecordStore {
    /// Open a store for one collection, creating parent directories if
    /// they don't exist. The collection file itself is only created by the
    /// first mutation; a missing file reads as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl AsRef<Path>, kind: RecordKind) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opened {} store at {}", kind, path.display());
        Ok(Self { path, kind })
    }

    /// Get the path to the collection file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the kind stamped on records in this collection.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Load the whole collection in insertion order.
    ///
    /// A missing file is a normal startup state and reads as an empty
    /// collection, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain a
    /// valid JSON array of records.
    pub fn load(&self) -> Result<Vec<Record>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| Error::CollectionParse {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(Error::CollectionRead {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Rewrite the collection file with the given sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let text = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, text).map_err(|source| Error::CollectionWrite {
            path: self.path.clone(),
            source,
        })
    }

    /// Create a record from caller-supplied fields and persist it.
    ///
    /// The store assigns `id` (current Unix milliseconds), `tipo` (this
    /// collection's kind), and `fecha` (now, ISO-8601); caller-supplied
    /// values for those keys are discarded. The new record is appended and
    /// the whole collection rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded or saved.
    pub fn create(&self, fields: BTreeMap<String, String>) -> Result<Record> {
        let mut records = self.load()?;
        let record = Record::new(self.kind, fields);

        records.push(record.clone());
        self.save(&records)?;

        info!("Created {} {}", self.kind, record.id);
        Ok(record)
    }

    /// Shallow-merge a patch into the first record with the given id and
    /// persist the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record matches the id, in
    /// which case the file is left untouched. Returns an error if the
    /// collection cannot be loaded or saved.
    pub fn update(&self, id: i64, patch: BTreeMap<String, String>) -> Result<Record> {
        let mut records = self.load()?;

        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            debug!("Update target {} {} not found", self.kind, id);
            return Err(Error::not_found(self.kind, id));
        };

        record.apply_patch(patch);
        let updated = record.clone();
        self.save(&records)?;

        info!("Updated {} {}", self.kind, id);
        Ok(updated)
    }
}
