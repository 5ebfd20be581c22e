//! Storage layer for saved hosts and cached per-host artifacts.
//!
//! This module persists everything that survives a scan: the ordered saved
//! host list, pairing credentials, and disk-image caches, all keyed by host
//! identifier. It uses JSON file storage with atomic writes.
//!
//! # Modules
//!
//! - `backend`: [`ArtifactStore`] trait for backend implementations
//! - `json`: JSON file-based implementation
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod models;

pub use backend::ArtifactStore;
pub use json::JsonStore;
pub use models::{DiskImageRecord, PairingRecord, SavedHostRecord};
