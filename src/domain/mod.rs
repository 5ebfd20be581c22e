//! Domain layer for the host registry.
//!
//! This module contains the core domain types, independent of storage,
//! worker, or platform concerns. Business rules live here and in the
//! application state machine; external dependencies stay behind trait seams.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`host`]: Host record, identifier, and device-type tag
//!
//! # Examples
//!
//! ```
//! use hostdock::domain::{DeviceType, HostRecord, Result};
//!
//! fn discover_host() -> Result<HostRecord> {
//!     Ok(HostRecord::discovered("udid-1", "Bench iPhone", DeviceType::Iphone))
//! }
//! ```

pub mod error;
pub mod host;

pub use error::{HostDockError, Result};
pub use host::{DeviceType, HostId, HostRecord};
