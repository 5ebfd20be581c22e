//! Artifact store abstraction.
//!
//! This module defines the [`ArtifactStore`] trait that abstracts over
//! persistence backends for saved hosts and cached per-host artifacts. The
//! background worker talks only to this trait, so backends can be swapped
//! without touching registry logic.
//!
//! # Design
//!
//! The trait is minimal and use-case driven: one method per worker operation,
//! not a generic key-value surface. Clearing an artifact is expressed by
//! passing `None`, mirroring the registry's "save empty means clear" contract.

use crate::domain::{HostId, Result};
use crate::storage::models::{DiskImageRecord, PairingRecord, SavedHostRecord};

/// Abstraction over persistent storage for saved hosts and artifacts.
///
/// Implementations must preserve saved-host insertion order and keep at most
/// one saved host, one pairing record, and one disk-image record per
/// identifier.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes
///   (default)
pub trait ArtifactStore: Send {
    /// Returns all saved hosts in the order they were saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn saved_hosts(&self) -> Result<Vec<SavedHostRecord>>;

    /// Inserts a saved host, or updates it in place when the identifier is
    /// already present. Updates keep the host's position in the order.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn upsert_saved_host(&mut self, record: &SavedHostRecord) -> Result<()>;

    /// Removes a saved host. Returns `false` when no such host was saved;
    /// absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn remove_saved_host(&mut self, identifier: &HostId) -> Result<bool>;

    /// Persists or clears the pairing credential for a host.
    ///
    /// `Some(record)` overwrites any existing credential; `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn save_pairing(&mut self, identifier: &HostId, record: Option<&PairingRecord>) -> Result<()>;

    /// Returns the cached pairing credential for a host, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn load_pairing(&self, identifier: &HostId) -> Result<Option<PairingRecord>>;

    /// Persists or clears the disk-image cache for a host.
    ///
    /// `Some(record)` overwrites any existing image; `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write operation fails.
    fn save_disk_image(
        &mut self,
        identifier: &HostId,
        record: Option<&DiskImageRecord>,
    ) -> Result<()>;

    /// Returns the cached disk image for a host, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn load_disk_image(&self, identifier: &HostId) -> Result<Option<DiskImageRecord>>;
}
