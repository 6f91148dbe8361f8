//! The intake service: both collections behind one handle.
//!
//! [`IntakeService`] owns a [`RecordStore`] per collection ("reclamos" and
//! "solicitudes"), which differ only in the kind they stamp on records, and
//! adds the merged listing the review view is built on. It holds no state
//! between calls; every operation goes back to disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::record::{Record, RecordKind};
use crate::store::RecordStore;

/// Claims and requests under a single data directory.
#[derive(Debug)]
pub struct IntakeService {
    claims: RecordStore,
    requests: RecordStore,
}

impl IntakeService {
    /// Open both collections under the given data directory, creating it
    /// if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|source| Error::DirectoryCreate {
                path: data_dir.to_path_buf(),
                source,
            })?;
        }

        let claims = RecordStore::open(
            data_dir.join(RecordKind::Reclamo.file_name()),
            RecordKind::Reclamo,
        )?;
        let requests = RecordStore::open(
            data_dir.join(RecordKind::Solicitud.file_name()),
            RecordKind::Solicitud,
        )?;

        info!("Intake service opened at {}", data_dir.display());
        Ok(Self { claims, requests })
    }

    /// Get the store backing one collection.
    #[must_use]
    pub fn store(&self, kind: RecordKind) -> &RecordStore {
        match kind {
            RecordKind::Reclamo => &self.claims,
            RecordKind::Solicitud => &self.requests,
        }
    }

    /// Get the backing file path of one collection.
    #[must_use]
    pub fn collection_path(&self, kind: RecordKind) -> PathBuf {
        self.store(kind).path().to_path_buf()
    }

    /// List one collection in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded.
    pub fn list(&self, kind: RecordKind) -> Result<Vec<Record>> {
        self.store(kind).load()
    }

    /// Create a record in one collection from caller-supplied fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded or saved.
    pub fn create(&self, kind: RecordKind, fields: BTreeMap<String, String>) -> Result<Record> {
        self.store(kind).create(fields)
    }

    /// Shallow-merge a patch into a record identified by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the id is absent from the
    /// collection, or an error if it cannot be loaded or saved.
    pub fn update(
        &self,
        kind: RecordKind,
        id: i64,
        patch: BTreeMap<String, String>,
    ) -> Result<Record> {
        self.store(kind).update(id, patch)
    }

    /// The merged listing: all claims followed by all requests, each in
    /// insertion order. Recomputed on every call, never re-sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if either collection cannot be loaded.
    pub fn list_merged(&self) -> Result<Vec<Record>> {
        let mut records = self.claims.load()?;
        records.extend(self.requests.load()?);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn test_service(dir: &tempfile::TempDir) -> IntakeService {
        IntakeService::open(dir.path().join("data")).expect("failed to open service")
    }

    #[test]
    fn test_open_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let service = test_service(&dir);

        assert!(dir.path().join("data").exists());
        assert_eq!(
            service.collection_path(RecordKind::Reclamo),
            dir.path().join("data/reclamos.json")
        );
    }

    #[test]
    fn test_create_goes_to_right_collection() {
        let dir = tempfile::tempdir().unwrap();
        let service = test_service(&dir);

        let claim = service
            .create(RecordKind::Reclamo, fields(&[("empleado", "jperez")]))
            .unwrap();
        let request = service
            .create(RecordKind::Solicitud, fields(&[("email", "a@b.com")]))
            .unwrap();

        assert_eq!(claim.tipo, RecordKind::Reclamo);
        assert_eq!(request.tipo, RecordKind::Solicitud);

        assert_eq!(service.list(RecordKind::Reclamo).unwrap(), vec![claim]);
        assert_eq!(service.list(RecordKind::Solicitud).unwrap(), vec![request]);
    }

    #[test]
    fn test_list_merged_is_claims_then_requests() {
        let dir = tempfile::tempdir().unwrap();
        let service = test_service(&dir);

        let request = service
            .create(RecordKind::Solicitud, fields(&[("comentario", "poda")]))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let claim = service
            .create(RecordKind::Reclamo, fields(&[("comentario", "bache")]))
            .unwrap();

        // Claims come first even though the request was created earlier.
        let merged = service.list_merged().unwrap();
        assert_eq!(merged, vec![claim, request]);

        let mut expected = service.list(RecordKind::Reclamo).unwrap();
        expected.extend(service.list(RecordKind::Solicitud).unwrap());
        assert_eq!(service.list_merged().unwrap(), expected);
    }

    #[test]
    fn test_list_merged_empty() {
        let dir = tempfile::tempdir().unwrap();
        let service = test_service(&dir);

        assert_eq!(service.list_merged().unwrap(), Vec::new());
    }

    #[test]
    fn test_update_routes_by_kind() {
        let dir = tempfile::tempdir().unwrap();
        let service = test_service(&dir);

        let claim = service
            .create(RecordKind::Reclamo, fields(&[("email", "old@b.com")]))
            .unwrap();

        let updated = service
            .update(RecordKind::Reclamo, claim.id, fields(&[("email", "new@b.com")]))
            .unwrap();
        assert_eq!(updated.field("email"), Some("new@b.com"));

        // The same id does not exist in the other collection.
        let result = service.update(RecordKind::Solicitud, claim.id, BTreeMap::new());
        assert!(result.unwrap_err().is_not_found());
    }
}
