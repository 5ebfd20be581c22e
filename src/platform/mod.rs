//! Platform capability seams.
//!
//! The registry core contains no compiled-in platform branches. Anything the
//! original surface did behind an `#if os(...)` check is expressed here as a
//! capability trait: the embedding runtime selects implementations at startup
//! and hands the registry a [`Capabilities`] snapshot describing what was
//! wired. The state machine consults the snapshot; the trait objects are held
//! by whoever executes the corresponding effect (the runtime for clipboard
//! actions, the background worker for lockdown calls).

use crate::domain::{HostId, Result};

/// Clipboard access for shortcut-URL export.
///
/// Implemented by the embedding runtime for platforms that have a pasteboard.
/// The runtime invokes it when executing
/// [`Action::CopyToClipboard`](crate::app::Action::CopyToClipboard).
pub trait Clipboard: Send {
    /// Places a shortcut URL on the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform clipboard rejects the write.
    fn copy_url(&self, url: &str) -> Result<()>;
}

/// Driver for the device-management handshake protocol.
///
/// Held by the background worker and used during the clear-pairing sequence.
/// Both operations may fail; failures propagate back to the interactive layer
/// as worker errors instead of being swallowed.
pub trait LockdownController: Send {
    /// Establishes a protocol session with the host.
    ///
    /// Only called when no session is already established.
    ///
    /// # Errors
    ///
    /// Returns an error if the handshake fails or the host is unreachable.
    fn start_session(&mut self, identifier: &HostId) -> Result<()>;

    /// Asks the host to forget its pairing with this machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the request or the session drops.
    fn reset_pairing(&mut self, identifier: &HostId) -> Result<()>;
}

/// Snapshot of the capabilities the embedding runtime wired at startup.
///
/// Consulted by the event handler to decide whether capability-gated events
/// (copy shortcut URL, the lockdown half of clear-pairing) produce effects.
///
/// # Examples
///
/// ```
/// use hostdock::platform::Capabilities;
///
/// let caps = Capabilities { clipboard: true, lockdown: false };
/// assert!(caps.clipboard);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// A [`Clipboard`] implementation is available.
    pub clipboard: bool,

    /// A [`LockdownController`] implementation is wired into the worker.
    ///
    /// The flag travels with the clear-pairing worker message; advertising it
    /// without actually wiring a controller surfaces as a worker error
    /// instead of a silently skipped reset sequence.
    pub lockdown: bool,
}

impl Capabilities {
    /// A snapshot with every capability present.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            clipboard: true,
            lockdown: true,
        }
    }

    /// A snapshot with no capabilities, the safe default for headless hosts.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            clipboard: false,
            lockdown: false,
        }
    }
}
