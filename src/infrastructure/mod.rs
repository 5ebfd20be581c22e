//! Infrastructure layer for filesystem and encoding concerns.
//!
//! This module hosts the small utilities the registry needs from its
//! environment: resolving the on-disk storage location and encoding/decoding
//! shareable shortcut URLs.

pub mod paths;
pub mod shortcut;

pub use paths::{data_dir, resolve_data_dir, store_file};
pub use shortcut::{decode_shortcut_url, encode_shortcut_url, ShortcutTarget};
