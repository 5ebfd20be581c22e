//! Side effects emitted by the event handler.
//!
//! Actions are the boundary between pure state transitions and the embedding
//! runtime. The handler never touches the network, the clipboard, or the
//! worker directly; it returns actions and the runtime executes them in
//! order. This keeps every transition testable without platform plumbing.

use crate::worker::WorkerMessage;

/// A side effect to be executed by the embedding runtime.
///
/// Returned by [`handle_event`](crate::app::handle_event) alongside the
/// render flag. Execution order matters: actions are carried out in the
/// order they appear in the returned vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start the platform host-discovery listener.
    StartDiscovery,

    /// Stop the platform host-discovery listener.
    StopDiscovery,

    /// Place a shortcut URL on the system clipboard.
    ///
    /// Only emitted when the clipboard capability is present.
    CopyToClipboard {
        /// Fully encoded shortcut URL.
        url: String,
    },

    /// Post a message to the background worker.
    PostToWorker(WorkerMessage),
}
