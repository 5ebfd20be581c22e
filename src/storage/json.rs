//! JSON file-based artifact store.
//!
//! A human-readable storage implementation using JSON serialization with
//! atomic file writes (write-to-temp + rename), so a crash mid-write never
//! leaves a corrupt store behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1), the whole document is loaded into memory once
//! - **Write**: O(n), the whole document is serialized on each change
//! - **Best for**: tens of hosts with small artifacts, infrequent writes

use crate::domain::{HostDockError, HostId, Result};
use crate::storage::backend::ArtifactStore;
use crate::storage::models::{DiskImageRecord, PairingRecord, SavedHostRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level document serialized to disk.
///
/// Saved hosts are a vector because their order is part of the contract;
/// artifacts are keyed maps because only identity lookup is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    /// Format version for future migrations.
    version: u32,

    /// Saved hosts in save order.
    #[serde(default)]
    saved_hosts: Vec<SavedHostRecord>,

    /// Pairing credentials keyed by host identifier.
    #[serde(default)]
    pairings: HashMap<HostId, PairingRecord>,

    /// Disk-image caches keyed by host identifier.
    #[serde(default)]
    disk_images: HashMap<HostId, DiskImageRecord>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: 1,
            saved_hosts: Vec::new(),
            pairings: HashMap::new(),
            disk_images: HashMap::new(),
        }
    }
}

/// JSON file artifact store.
///
/// Keeps the entire document in memory and persists it after each mutation.
/// `Send` but not `Sync`; designed to be owned by the single background
/// worker, matching the registry's threading model.
#[derive(Debug)]
pub struct JsonStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory document, loaded on creation.
    doc: StoreDocument,

    /// Set when `doc` has changes not yet written to disk.
    dirty: bool,
}

impl JsonStore {
    /// Creates or opens a JSON store at the given path.
    ///
    /// Loads existing data when the file exists, otherwise starts from an
    /// empty document. Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be read, or it contains invalid JSON.
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening json artifact store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let doc = if file_path.exists() {
            Self::load(&file_path)?
        } else {
            tracing::debug!("no existing store, starting empty");
            StoreDocument::default()
        };

        tracing::debug!(
            saved_hosts = doc.saved_hosts.len(),
            pairings = doc.pairings.len(),
            disk_images = doc.disk_images.len(),
            "artifact store opened"
        );

        Ok(Self {
            file_path,
            doc,
            dirty: false,
        })
    }

    fn load(path: &PathBuf) -> Result<StoreDocument> {
        let contents = std::fs::read_to_string(path)?;
        let doc: StoreDocument = serde_json::from_str(&contents)
            .map_err(|e| HostDockError::Storage(format!("failed to parse store: {e}")))?;

        tracing::debug!(version = doc.version, "loaded store document");
        Ok(doc)
    }

    /// Writes the document to disk atomically (temp file + rename).
    fn persist(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping persist, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.doc)
            .map_err(|e| HostDockError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "store persisted");
        Ok(())
    }
}

impl ArtifactStore for JsonStore {
    fn saved_hosts(&self) -> Result<Vec<SavedHostRecord>> {
        let _span = tracing::debug_span!("store_saved_hosts").entered();

        let hosts = self.doc.saved_hosts.clone();
        tracing::debug!(count = hosts.len(), "retrieved saved hosts");
        Ok(hosts)
    }

    fn upsert_saved_host(&mut self, record: &SavedHostRecord) -> Result<()> {
        let _span = tracing::debug_span!("store_upsert_saved_host",
            identifier = %record.identifier,
            name = %record.name,
        )
        .entered();

        if let Some(existing) = self
            .doc
            .saved_hosts
            .iter_mut()
            .find(|h| h.identifier == record.identifier)
        {
            tracing::debug!("updating saved host in place");
            existing.clone_from(record);
        } else {
            tracing::debug!("appending new saved host");
            self.doc.saved_hosts.push(record.clone());
        }

        self.dirty = true;
        self.persist()
    }

    fn remove_saved_host(&mut self, identifier: &HostId) -> Result<bool> {
        let _span =
            tracing::debug_span!("store_remove_saved_host", identifier = %identifier).entered();

        let before = self.doc.saved_hosts.len();
        self.doc.saved_hosts.retain(|h| &h.identifier != identifier);
        let existed = self.doc.saved_hosts.len() != before;

        if existed {
            self.dirty = true;
            self.persist()?;
        }

        tracing::debug!(existed = existed, "saved host removal complete");
        Ok(existed)
    }

    fn save_pairing(&mut self, identifier: &HostId, record: Option<&PairingRecord>) -> Result<()> {
        let _span = tracing::debug_span!("store_save_pairing",
            identifier = %identifier,
            clearing = record.is_none(),
        )
        .entered();

        match record {
            Some(record) => {
                self.doc.pairings.insert(identifier.clone(), record.clone());
            }
            None => {
                self.doc.pairings.remove(identifier);
            }
        }

        self.dirty = true;
        self.persist()
    }

    fn load_pairing(&self, identifier: &HostId) -> Result<Option<PairingRecord>> {
        let record = self.doc.pairings.get(identifier).cloned();
        tracing::debug!(identifier = %identifier, found = record.is_some(), "pairing lookup");
        Ok(record)
    }

    fn save_disk_image(
        &mut self,
        identifier: &HostId,
        record: Option<&DiskImageRecord>,
    ) -> Result<()> {
        let _span = tracing::debug_span!("store_save_disk_image",
            identifier = %identifier,
            clearing = record.is_none(),
        )
        .entered();

        match record {
            Some(record) => {
                self.doc
                    .disk_images
                    .insert(identifier.clone(), record.clone());
            }
            None => {
                self.doc.disk_images.remove(identifier);
            }
        }

        self.dirty = true;
        self.persist()
    }

    fn load_disk_image(&self, identifier: &HostId) -> Result<Option<DiskImageRecord>> {
        let record = self.doc.disk_images.get(identifier).cloned();
        tracing::debug!(identifier = %identifier, found = record.is_some(), "disk image lookup");
        Ok(record)
    }
}

impl Drop for JsonStore {
    /// Flushes unsaved changes on drop as a last resort.
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.persist() {
                tracing::error!(error = %e, "failed to persist store on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceType, HostRecord};

    fn record(id: &str, name: &str) -> SavedHostRecord {
        SavedHostRecord::from_host(&HostRecord::discovered(id, name, DeviceType::Iphone))
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::open(dir.path().join("registry.json")).unwrap()
    }

    #[test]
    fn saved_hosts_round_trip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = store_in(&dir);
            store.upsert_saved_host(&record("a", "Alpha")).unwrap();
            store.upsert_saved_host(&record("b", "Beta")).unwrap();
        }

        let store = store_in(&dir);
        let hosts = store.saved_hosts().unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].identifier.as_str(), "a");
        assert_eq!(hosts[1].identifier.as_str(), "b");
    }

    #[test]
    fn upsert_keeps_position_and_updates_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.upsert_saved_host(&record("a", "Alpha")).unwrap();
        store.upsert_saved_host(&record("b", "Beta")).unwrap();
        store.upsert_saved_host(&record("a", "Renamed")).unwrap();

        let hosts = store.saved_hosts().unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].identifier.as_str(), "a");
        assert_eq!(hosts[0].name, "Renamed");
    }

    #[test]
    fn remove_reports_absence_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.upsert_saved_host(&record("a", "Alpha")).unwrap();
        assert!(store.remove_saved_host(&HostId::new("a")).unwrap());
        assert!(!store.remove_saved_host(&HostId::new("a")).unwrap());
        assert!(store.saved_hosts().unwrap().is_empty());
    }

    #[test]
    fn pairing_save_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let id = HostId::new("a");

        store
            .save_pairing(&id, Some(&PairingRecord::new(vec![1, 2, 3])))
            .unwrap();
        assert_eq!(store.load_pairing(&id).unwrap().unwrap().data, vec![1, 2, 3]);

        store.save_pairing(&id, None).unwrap();
        assert!(store.load_pairing(&id).unwrap().is_none());
    }

    #[test]
    fn disk_image_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let id = HostId::new("a");

        {
            let mut store = store_in(&dir);
            store
                .save_disk_image(&id, Some(&DiskImageRecord::new(vec![9; 16], vec![7; 4])))
                .unwrap();
        }

        let store = store_in(&dir);
        let image = store.load_disk_image(&id).unwrap().unwrap();
        assert_eq!(image.image, vec![9; 16]);
        assert_eq!(image.signature, vec![7; 4]);
    }

    #[test]
    fn corrupt_document_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonStore::open(path).unwrap_err();
        assert!(matches!(err, HostDockError::Storage(_)));
    }
}
