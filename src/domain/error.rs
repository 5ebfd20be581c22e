//! Error types for the host registry.
//!
//! This module defines the centralized error type [`HostDockError`] and a type
//! alias [`Result`] used throughout the crate. All errors are implemented with
//! the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for host registry operations.
///
/// Consolidates the failure conditions of the registry's subsystems: the
/// artifact store, the lockdown protocol seam, the background worker, and
/// configuration loading. Variants carry a description of what went wrong;
/// I/O errors convert automatically via `#[from]`.
#[derive(Debug, Error)]
pub enum HostDockError {
    /// Artifact store operation failed.
    ///
    /// Reading or writing the saved-host list or a cached pairing/disk-image
    /// artifact did not complete.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A lockdown protocol call failed.
    ///
    /// Raised by [`LockdownController`](crate::platform::LockdownController)
    /// implementations when starting a session or resetting pairing fails.
    /// These failures are surfaced to the caller, never discarded.
    #[error("lockdown error: {0}")]
    Lockdown(String),

    /// Background worker could not complete an operation.
    #[error("worker error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("configuration error: {0}")]
    Config(String),

    /// A shortcut URL could not be encoded or decoded.
    #[error("shortcut url error: {0}")]
    Shortcut(String),
}

/// A specialized `Result` type for host registry operations.
pub type Result<T> = std::result::Result<T, HostDockError>;
