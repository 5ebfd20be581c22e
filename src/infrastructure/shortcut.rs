//! Shortcut URL codec.
//!
//! A shortcut URL is a shareable locator for one host, suitable for clipboard
//! export and for launching the application back into a connection flow:
//!
//! ```text
//! hostdock://connect?identifier=<id>&name=<name>[&address=<addr>]
//! ```
//!
//! Query values are percent-encoded. The encoder is the clipboard-export half;
//! the decoder is the receiving half used by the add-host entry point when the
//! application is opened through its URL scheme.

use crate::domain::{HostDockError, HostId, HostRecord, Result};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// URL scheme and fixed path of every shortcut URL.
const PREFIX: &str = "hostdock://connect?";

/// Characters passed through unencoded in query values.
///
/// Everything outside RFC 3986 unreserved gets percent-encoded, which keeps
/// the codec symmetric without tracking query-specific exceptions.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The host reference carried by a decoded shortcut URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutTarget {
    /// Identifier of the referenced host.
    pub identifier: HostId,

    /// Display name at the time the URL was produced.
    pub name: String,

    /// Network address, when the host had one.
    pub address: Option<String>,
}

/// Encodes a shareable shortcut URL for a host.
///
/// # Examples
///
/// ```
/// use hostdock::domain::{DeviceType, HostRecord};
/// use hostdock::infrastructure::encode_shortcut_url;
///
/// let host = HostRecord::discovered("udid-1", "Bench iPhone", DeviceType::Iphone);
/// let url = encode_shortcut_url(&host);
/// assert_eq!(url, "hostdock://connect?identifier=udid-1&name=Bench%20iPhone");
/// ```
#[must_use]
pub fn encode_shortcut_url(host: &HostRecord) -> String {
    let mut url = format!(
        "{PREFIX}identifier={}&name={}",
        utf8_percent_encode(host.identifier.as_str(), COMPONENT),
        utf8_percent_encode(&host.name, COMPONENT),
    );

    if let Some(address) = &host.address {
        url.push_str("&address=");
        url.push_str(&utf8_percent_encode(address, COMPONENT).to_string());
    }

    url
}

/// Decodes a shortcut URL back into a host reference.
///
/// # Errors
///
/// Returns [`HostDockError::Shortcut`] when the scheme or path does not match,
/// a query value is not valid UTF-8 after decoding, or a required parameter
/// (`identifier`, `name`) is missing.
pub fn decode_shortcut_url(url: &str) -> Result<ShortcutTarget> {
    let query = url
        .strip_prefix(PREFIX)
        .ok_or_else(|| HostDockError::Shortcut(format!("not a shortcut url: {url}")))?;

    let mut identifier = None;
    let mut name = None;
    let mut address = None;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| HostDockError::Shortcut(format!("malformed query pair: {pair}")))?;

        let value = percent_decode_str(raw)
            .decode_utf8()
            .map_err(|e| HostDockError::Shortcut(format!("invalid encoding in {key}: {e}")))?
            .into_owned();

        match key {
            "identifier" => identifier = Some(value),
            "name" => name = Some(value),
            "address" => address = Some(value),
            // Unknown parameters are ignored for forward compatibility.
            _ => {}
        }
    }

    let identifier = identifier
        .ok_or_else(|| HostDockError::Shortcut("missing identifier parameter".to_string()))?;
    let name = name.ok_or_else(|| HostDockError::Shortcut("missing name parameter".to_string()))?;

    Ok(ShortcutTarget {
        identifier: HostId::new(identifier),
        name,
        address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceType;

    #[test]
    fn encodes_reserved_characters() {
        let mut host = HostRecord::discovered("id with spaces", "A&B's iPad", DeviceType::Ipad);
        host.address = Some("192.168.1.7".to_string());

        let url = encode_shortcut_url(&host);
        assert!(url.starts_with("hostdock://connect?identifier=id%20with%20spaces"));
        assert!(url.contains("name=A%26B%27s%20iPad"));
        assert!(url.ends_with("address=192.168.1.7"));
    }

    #[test]
    fn round_trips_through_decode() {
        let mut host = HostRecord::discovered("udid=1&x", "Bench / Lab", DeviceType::Iphone);
        host.address = Some("fe80::1".to_string());

        let target = decode_shortcut_url(&encode_shortcut_url(&host)).unwrap();
        assert_eq!(target.identifier, host.identifier);
        assert_eq!(target.name, host.name);
        assert_eq!(target.address, host.address);
    }

    #[test]
    fn rejects_foreign_scheme() {
        let err = decode_shortcut_url("https://example.com/?identifier=a&name=b").unwrap_err();
        assert!(matches!(err, HostDockError::Shortcut(_)));
    }

    #[test]
    fn rejects_missing_identifier() {
        let err = decode_shortcut_url("hostdock://connect?name=b").unwrap_err();
        assert!(matches!(err, HostDockError::Shortcut(_)));
    }
}
