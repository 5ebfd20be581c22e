//! Host domain model.
//!
//! This module defines the core [`HostRecord`] type representing a remote device
//! known to the registry, either found by network discovery or saved by the user.
//! The [`HostId`] newtype is the join key everywhere: between the saved and
//! discovered sequences, the artifact store, and the worker protocol.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, stable identifier of a host.
///
/// Identifiers are stable across discovery sessions and are the only key used
/// to correlate a discovered host with its saved twin and its cached artifacts.
///
/// # Examples
///
/// ```
/// use hostdock::domain::HostId;
///
/// let id = HostId::new("00:11:22:33:44:55");
/// assert_eq!(id.as_str(), "00:11:22:33:44:55");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(String);

impl HostId {
    /// Creates an identifier from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for HostId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Device-type tag reported by discovery.
///
/// Unrecognized device classes map to [`DeviceType::Unknown`]; the tag only
/// affects the row label, never registry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Device class was not reported or not recognized.
    #[default]
    Unknown,
    /// Phone-class device.
    Iphone,
    /// Tablet-class device.
    Ipad,
}

impl DeviceType {
    /// Returns the human-readable label for row rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Iphone => "iPhone",
            Self::Ipad => "iPad",
        }
    }
}

/// A remote device record known to the registry.
///
/// The same record type backs both sequences: `found_hosts` entries come from
/// discovery events with `discovered = true`, while `saved_hosts` entries are
/// rehydrated from storage and have their `discovered`/`connected` flags
/// refreshed against the current discovery set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Unique stable identifier, the join key between the two sequences.
    pub identifier: HostId,

    /// Display name shown in the device list.
    pub name: String,

    /// Device-type tag used for the row label.
    pub device_type: DeviceType,

    /// Network address, when known. Manual hosts always carry one; discovered
    /// hosts may omit it if the transport resolves by identifier.
    pub address: Option<String>,

    /// Whether the host is currently visible to discovery.
    pub discovered: bool,

    /// Whether a protocol session to the host is currently established.
    pub connected: bool,
}

impl HostRecord {
    /// Creates a record for a host reported by discovery.
    ///
    /// # Examples
    ///
    /// ```
    /// use hostdock::domain::{DeviceType, HostRecord};
    ///
    /// let host = HostRecord::discovered("udid-1", "Living Room iPad", DeviceType::Ipad);
    /// assert!(host.discovered);
    /// assert!(!host.connected);
    /// ```
    pub fn discovered(
        identifier: impl Into<HostId>,
        name: impl Into<String>,
        device_type: DeviceType,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            device_type,
            address: None,
            discovered: true,
            connected: false,
        }
    }

    /// Creates a record for a host entered manually by the user.
    ///
    /// Manual hosts are not (yet) visible to discovery, so the address doubles
    /// as the identifier: it is the only stable datum the user provided.
    pub fn manual(name: impl Into<String>, address: impl Into<String>) -> Self {
        let address = address.into();
        Self {
            identifier: HostId::new(address.clone()),
            name: name.into(),
            device_type: DeviceType::Unknown,
            address: Some(address),
            discovered: false,
            connected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_host_uses_address_as_identifier() {
        let host = HostRecord::manual("Workbench", "192.168.1.40");
        assert_eq!(host.identifier.as_str(), "192.168.1.40");
        assert_eq!(host.address.as_deref(), Some("192.168.1.40"));
        assert!(!host.discovered);
    }

    #[test]
    fn device_type_labels() {
        assert_eq!(DeviceType::Unknown.label(), "Unknown");
        assert_eq!(DeviceType::Iphone.label(), "iPhone");
        assert_eq!(DeviceType::Ipad.label(), "iPad");
    }

    #[test]
    fn host_id_serializes_transparently() {
        let id = HostId::new("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
