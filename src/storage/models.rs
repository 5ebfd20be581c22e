//! Storage record models for the persistence layer.
//!
//! These are the raw record types written to disk. They are kept separate from
//! the domain [`HostRecord`](crate::domain::HostRecord): storage records carry
//! bookkeeping timestamps and omit the transient `discovered`/`connected`
//! flags, which only ever reflect the current discovery session.

use crate::domain::{DeviceType, HostId, HostRecord};
use serde::{Deserialize, Serialize};

/// A saved host as persisted in the artifact store.
///
/// Saved hosts survive across scans and application restarts. Rehydration into
/// a domain record resets the transient flags; the state machine refreshes
/// them against the live discovery set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedHostRecord {
    /// Stable host identifier, unique within the saved list.
    pub identifier: HostId,

    /// Display name at the time the host was saved.
    pub name: String,

    /// Device-type tag at the time the host was saved.
    pub device_type: DeviceType,

    /// Network address, present for manually added hosts.
    pub address: Option<String>,

    /// Unix timestamp when the host was saved.
    pub saved_at: i64,
}

impl SavedHostRecord {
    /// Creates a record from a live host, stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use hostdock::domain::{DeviceType, HostRecord};
    /// use hostdock::storage::SavedHostRecord;
    ///
    /// let host = HostRecord::discovered("udid-1", "Bench iPad", DeviceType::Ipad);
    /// let record = SavedHostRecord::from_host(&host);
    /// assert_eq!(record.identifier, host.identifier);
    /// ```
    #[must_use]
    pub fn from_host(host: &HostRecord) -> Self {
        Self {
            identifier: host.identifier.clone(),
            name: host.name.clone(),
            device_type: host.device_type,
            address: host.address.clone(),
            saved_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Rehydrates the record into a domain host.
    ///
    /// The returned host is neither discovered nor connected; both flags are
    /// recomputed by the state machine from the current discovery set.
    #[must_use]
    pub fn into_host(self) -> HostRecord {
        HostRecord {
            identifier: self.identifier,
            name: self.name,
            device_type: self.device_type,
            address: self.address,
            discovered: false,
            connected: false,
        }
    }
}

/// Cached pairing credential for one host.
///
/// Opaque to the registry: the bytes come from and go back to the pairing
/// protocol layer unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRecord {
    /// Opaque credential bytes.
    pub data: Vec<u8>,

    /// Unix timestamp of the last write.
    pub updated_at: i64,
}

impl PairingRecord {
    /// Wraps credential bytes with a current timestamp.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Cached developer disk image for one host.
///
/// The image and its signature are cleared together; a record never exists
/// with only one of the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskImageRecord {
    /// Image bytes.
    pub image: Vec<u8>,

    /// Detached signature over the image.
    pub signature: Vec<u8>,

    /// Unix timestamp of the last write.
    pub updated_at: i64,
}

impl DiskImageRecord {
    /// Wraps an image and its signature with a current timestamp.
    #[must_use]
    pub fn new(image: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            image,
            signature,
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}
