//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes discovery
//! events, user commands, and worker responses, translating them into state
//! changes and action sequences. It is the primary control flow coordinator
//! for the registry.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the embedding runtime or the background worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Scan lifecycle**: `StartScanning`, `StopScanning`, `ScanFailed`
//! - **Discovery**: `HostDiscovered`, `HostLost`
//! - **Registry commands**: `SaveHost`, `AddHost`, `RemoveSavedHost`,
//!   `SelectHost`
//! - **Per-host operations**: `CopyShortcutUrl`, `ClearPairing`,
//!   `SavePairing`, `SaveDiskImage`
//! - **Worker**: `WorkerResponse` with typed message variants

use crate::app::scan::ScanState;
use crate::app::state::PendingOperation;
use crate::app::{Action, AppState};
use crate::domain::{HostId, HostRecord, Result};
use crate::infrastructure::encode_shortcut_url;
use crate::storage::SavedHostRecord;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by discovery, user commands, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The handler processes these sequentially, ensuring
/// deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Requests discovery start and the initial saved-host load.
    ///
    /// The startup work runs once per scan lifetime: repeated requests while
    /// already scanning are no-ops.
    StartScanning,

    /// Stops discovery. A later `StartScanning` restarts it.
    StopScanning,

    /// Reports a host appearing on the network (or updating its record).
    HostDiscovered {
        /// Discovered host record.
        host: HostRecord,
    },

    /// Reports a host leaving the network.
    HostLost {
        /// Identifier of the vanished host.
        identifier: HostId,
    },

    /// Reports a discovery failure.
    ///
    /// Stops the scan and surfaces the error; the user can start again.
    ScanFailed {
        /// Error message describing the failure.
        error: String,
    },

    /// Saves the identified host into the persisted list.
    SaveHost {
        /// Identifier of the host to save.
        identifier: HostId,
    },

    /// Adds a host by manual entry, using the address as its identifier.
    AddHost {
        /// User-chosen display name.
        name: String,
        /// Network address, also used as the stable identifier.
        address: String,
    },

    /// Removes a host from the persisted list.
    ///
    /// Discovery membership is unaffected; a host still on the network stays
    /// in the discovered section.
    RemoveSavedHost {
        /// Identifier of the host to remove.
        identifier: HostId,
    },

    /// Moves the selection cursor; `None` clears it.
    SelectHost(Option<HostId>),

    /// Copies the host's shortcut URL to the clipboard.
    ///
    /// Requires the clipboard capability; a no-op without it.
    CopyShortcutUrl {
        /// Identifier of the host to encode.
        identifier: HostId,
    },

    /// Starts the composite unpair operation for a host.
    ClearPairing {
        /// Identifier of the host to unpair.
        identifier: HostId,
    },

    /// Persists or clears the pairing credential for a host.
    SavePairing {
        /// Identifier of the host the credential belongs to.
        identifier: HostId,
        /// Credential bytes, or `None` to clear.
        data: Option<Vec<u8>>,
    },

    /// Persists or clears the disk-image cache for a host.
    SaveDiskImage {
        /// Identifier of the host the image belongs to.
        identifier: HostId,
        /// Image bytes, or `None` to clear.
        image: Option<Vec<u8>>,
        /// Detached signature over the image.
        signature: Option<Vec<u8>>,
    },

    /// Clears the last surfaced error.
    DismissError,

    /// Wraps a response from the background worker.
    ///
    /// Processed by matching on the inner [`WorkerResponse`] variant. Clears
    /// the pending status line and folds results back into state.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates registry state, and returns actions to execute.
///
/// This is the single entry point for all state transitions. It
/// pattern-matches on event types, calls state mutation methods, and collects
/// actions to be executed by the embedding runtime.
///
/// # Parameters
///
/// * `state` - Mutable reference to registry state
/// * `event` - Event to process
///
/// # Returns
///
/// A tuple of `(should_render, actions)`: whether the view model changed, and
/// the side effects to execute in order.
///
/// # Errors
///
/// Returns errors from state mutation methods. Worker failures do not arrive
/// here as `Err`; they arrive as [`WorkerResponse::Error`] events and land in
/// `state.last_error`.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let span = tracing::debug_span!("handle_event", event_type = ?std::mem::discriminant(event));
    let _guard = span.entered();

    match event {
        Event::StartScanning => Ok(start_scanning(state)),
        Event::StopScanning => Ok(stop_scanning(state)),

        Event::HostDiscovered { host } => {
            state.upsert_found_host(host.clone());
            Ok((true, vec![]))
        }

        Event::HostLost { identifier } => {
            tracing::debug!(identifier = %identifier, "host lost");
            state.remove_found_host(identifier);
            Ok((true, vec![]))
        }

        Event::ScanFailed { error } => {
            tracing::warn!(error = %error, "discovery scan failed");
            state.scan = ScanState::Stopped;
            state.last_error = Some(format!("scan failed: {error}"));
            Ok((true, vec![]))
        }

        Event::SaveHost { identifier } => Ok(save_host(state, identifier)),

        Event::AddHost { name, address } => {
            let host = HostRecord::manual(name.clone(), address.clone());
            Ok(persist_host(state, host))
        }

        Event::RemoveSavedHost { identifier } => {
            if state.unmark_saved(identifier) {
                tracing::debug!(identifier = %identifier, "saved host removed");
                let message = WorkerMessage::remove_saved_host(identifier.to_string());
                Ok((true, vec![Action::PostToWorker(message)]))
            } else {
                tracing::debug!(identifier = %identifier, "host was not saved");
                Ok((false, vec![]))
            }
        }

        Event::SelectHost(identifier) => {
            state.select_host(identifier.clone());
            Ok((true, vec![]))
        }

        Event::CopyShortcutUrl { identifier } => Ok(copy_shortcut_url(state, identifier)),

        Event::ClearPairing { identifier } => Ok(clear_pairing(state, identifier)),

        Event::SavePairing { identifier, data } => {
            let message = WorkerMessage::save_pairing(identifier.to_string(), data.clone());
            Ok((false, vec![Action::PostToWorker(message)]))
        }

        Event::SaveDiskImage {
            identifier,
            image,
            signature,
        } => {
            let message = WorkerMessage::save_disk_image(
                identifier.to_string(),
                image.clone(),
                signature.clone(),
            );
            Ok((false, vec![Action::PostToWorker(message)]))
        }

        Event::DismissError => {
            let had_error = state.last_error.take().is_some();
            Ok((had_error, vec![]))
        }

        Event::WorkerResponse(response) => Ok(handle_worker_response(state, response)),
    }
}

/// Starts discovery and the initial saved-host load, once per scan lifetime.
fn start_scanning(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.scan.is_scanning() {
        tracing::debug!("scan already running, ignoring start request");
        return (false, vec![]);
    }

    tracing::debug!(previous = ?state.scan, "starting discovery scan");
    state.scan = ScanState::Scanning;

    let actions = vec![
        Action::PostToWorker(WorkerMessage::load_saved_hosts()),
        Action::StartDiscovery,
    ];
    (true, actions)
}

fn stop_scanning(state: &mut AppState) -> (bool, Vec<Action>) {
    if !state.scan.is_scanning() {
        return (false, vec![]);
    }

    tracing::debug!("stopping discovery scan");
    state.scan = ScanState::Stopped;
    (true, vec![Action::StopDiscovery])
}

/// Saves a host already known to the registry.
fn save_host(state: &mut AppState, identifier: &HostId) -> (bool, Vec<Action>) {
    let Some(host) = state.host(identifier).cloned() else {
        tracing::debug!(identifier = %identifier, "save requested for unknown host");
        return (false, vec![]);
    };
    persist_host(state, host)
}

/// Appends a host to the saved list and persists it via the worker.
///
/// Idempotent: a host whose identifier is already saved produces no state
/// change and no worker message.
fn persist_host(state: &mut AppState, host: HostRecord) -> (bool, Vec<Action>) {
    let record = SavedHostRecord::from_host(&host);
    if !state.mark_saved(host) {
        return (false, vec![]);
    }

    let message = WorkerMessage::persist_saved_host(record);
    (true, vec![Action::PostToWorker(message)])
}

/// Encodes and copies a shortcut URL, gated on the clipboard capability.
fn copy_shortcut_url(state: &mut AppState, identifier: &HostId) -> (bool, Vec<Action>) {
    if !state.capabilities.clipboard {
        tracing::debug!("no clipboard capability, ignoring copy request");
        return (false, vec![]);
    }

    let Some(host) = state.host(identifier) else {
        tracing::debug!(identifier = %identifier, "copy requested for unknown host");
        return (false, vec![]);
    };

    let url = encode_shortcut_url(host);
    tracing::debug!(identifier = %identifier, url = %url, "copying shortcut url");
    (false, vec![Action::CopyToClipboard { url }])
}

/// Sets the unpair status line and posts the composite worker operation.
///
/// The lockdown half runs only when the platform capability is present; the
/// flag travels with the message so the worker can detect a capability that
/// was advertised but never wired. Falls back to the raw identifier for the
/// status line when the host is not currently in either list; cached
/// artifacts may outlive list membership.
fn clear_pairing(state: &mut AppState, identifier: &HostId) -> (bool, Vec<Action>) {
    let (name, connected) = state
        .host(identifier)
        .map_or_else(|| (identifier.to_string(), false), |h| (h.name.clone(), h.connected));
    let lockdown = state.capabilities.lockdown;

    let status = format!("Unpairing {name}...");
    tracing::debug!(
        identifier = %identifier,
        connected = connected,
        lockdown = lockdown,
        "clearing pairing"
    );
    state.status = Some(PendingOperation {
        identifier: identifier.clone(),
        message: status.clone(),
    });

    let message = WorkerMessage::clear_pairing(identifier.to_string(), connected, lockdown, status);
    (true, vec![Action::PostToWorker(message)])
}

/// Folds a worker response back into state.
///
/// The pending status line resolves only on the response for the operation
/// that raised it (matched by identifier) or on a worker error; responses to
/// unrelated earlier operations leave it in place. Failures land in
/// `last_error` rather than being dropped.
fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> (bool, Vec<Action>) {
    let resolves_status = match response {
        WorkerResponse::PairingCleared { identifier } => state
            .status
            .as_ref()
            .is_some_and(|pending| pending.identifier.as_str() == identifier),
        WorkerResponse::Error { .. } => state.status.is_some(),
        _ => false,
    };
    let status_cleared = resolves_status && state.status.take().is_some();

    let changed = match response {
        WorkerResponse::SavedHostsLoaded { hosts } => {
            tracing::debug!(count = hosts.len(), "saved hosts loaded");
            state.set_saved_hosts(hosts.clone());
            true
        }

        WorkerResponse::HostPersisted { identifier } => {
            tracing::debug!(identifier = %identifier, "host persisted");
            false
        }

        WorkerResponse::HostRemoved { identifier, existed } => {
            tracing::debug!(identifier = %identifier, existed = existed, "host removal finished");
            false
        }

        WorkerResponse::PairingSaved {
            identifier,
            cleared,
        } => {
            tracing::debug!(identifier = %identifier, cleared = cleared, "pairing saved");
            false
        }

        WorkerResponse::DiskImageSaved {
            identifier,
            cleared,
        } => {
            tracing::debug!(identifier = %identifier, cleared = cleared, "disk image saved");
            false
        }

        WorkerResponse::PairingCleared { identifier } => {
            tracing::debug!(identifier = %identifier, "pairing cleared");
            true
        }

        WorkerResponse::Error { message } => {
            tracing::warn!(error = %message, "worker operation failed");
            state.last_error = Some(message.clone());
            true
        }
    };

    (changed || status_cleared, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceType;
    use crate::platform::Capabilities;

    fn state() -> AppState {
        AppState::new(Capabilities::none())
    }

    fn discovered(id: &str, name: &str) -> HostRecord {
        HostRecord::discovered(id, name, DeviceType::Iphone)
    }

    fn discover(state: &mut AppState, id: &str, name: &str) {
        handle_event(
            state,
            &Event::HostDiscovered {
                host: discovered(id, name),
            },
        )
        .unwrap();
    }

    #[test]
    fn start_scanning_runs_startup_work_once() {
        let mut state = state();

        let (render, actions) = handle_event(&mut state, &Event::StartScanning).unwrap();
        assert!(render);
        assert!(matches!(
            actions[0],
            Action::PostToWorker(WorkerMessage::LoadSavedHosts { .. })
        ));
        assert_eq!(actions[1], Action::StartDiscovery);

        let (render, actions) = handle_event(&mut state, &Event::StartScanning).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn scan_restarts_after_stop() {
        let mut state = state();
        handle_event(&mut state, &Event::StartScanning).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::StopScanning).unwrap();
        assert_eq!(actions, vec![Action::StopDiscovery]);
        assert_eq!(state.scan, ScanState::Stopped);

        let (_, actions) = handle_event(&mut state, &Event::StartScanning).unwrap();
        assert_eq!(actions.len(), 2);
        assert!(state.scan.is_scanning());
    }

    #[test]
    fn scan_failure_stops_and_surfaces() {
        let mut state = state();
        handle_event(&mut state, &Event::StartScanning).unwrap();

        handle_event(
            &mut state,
            &Event::ScanFailed {
                error: "socket closed".to_string(),
            },
        )
        .unwrap();

        assert_eq!(state.scan, ScanState::Stopped);
        assert_eq!(state.last_error.as_deref(), Some("scan failed: socket closed"));
    }

    #[test]
    fn saving_a_found_host_leaves_found_list_unchanged() {
        let mut state = state();
        discover(&mut state, "a", "Alpha");
        discover(&mut state, "b", "Beta");

        let (render, actions) = handle_event(
            &mut state,
            &Event::SaveHost {
                identifier: HostId::new("a"),
            },
        )
        .unwrap();

        assert!(render);
        assert!(matches!(
            actions[0],
            Action::PostToWorker(WorkerMessage::PersistSavedHost { .. })
        ));
        assert_eq!(state.saved_hosts.len(), 1);
        assert_eq!(state.saved_hosts[0].identifier, HostId::new("a"));
        assert_eq!(state.found_hosts.len(), 2);
    }

    #[test]
    fn saving_twice_posts_one_persist() {
        let mut state = state();
        discover(&mut state, "a", "Alpha");
        let event = Event::SaveHost {
            identifier: HostId::new("a"),
        };

        let (_, first) = handle_event(&mut state, &event).unwrap();
        let (render, second) = handle_event(&mut state, &event).unwrap();

        assert_eq!(first.len(), 1);
        assert!(!render);
        assert!(second.is_empty());
        assert_eq!(state.saved_hosts.len(), 1);
    }

    #[test]
    fn add_host_saves_with_address_identifier() {
        let mut state = state();

        let (_, actions) = handle_event(
            &mut state,
            &Event::AddHost {
                name: "Bench iPad".to_string(),
                address: "10.0.0.7".to_string(),
            },
        )
        .unwrap();

        assert_eq!(actions.len(), 1);
        assert_eq!(state.saved_hosts[0].identifier, HostId::new("10.0.0.7"));
        assert!(!state.saved_hosts[0].discovered);
    }

    #[test]
    fn removing_a_saved_host_posts_removal() {
        let mut state = state();
        discover(&mut state, "a", "Alpha");
        handle_event(
            &mut state,
            &Event::SaveHost {
                identifier: HostId::new("a"),
            },
        )
        .unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::RemoveSavedHost {
                identifier: HostId::new("a"),
            },
        )
        .unwrap();

        assert!(render);
        assert!(matches!(
            &actions[0],
            Action::PostToWorker(WorkerMessage::RemoveSavedHost { identifier, .. })
                if identifier == "a"
        ));
        assert!(state.saved_hosts.is_empty());
        assert_eq!(state.found_hosts.len(), 1);
    }

    #[test]
    fn removing_an_unsaved_host_is_a_no_op() {
        let mut state = state();
        let (render, actions) = handle_event(
            &mut state,
            &Event::RemoveSavedHost {
                identifier: HostId::new("ghost"),
            },
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn copy_shortcut_url_requires_clipboard_capability() {
        let mut state = state();
        discover(&mut state, "udid-1", "Bench iPhone");

        let event = Event::CopyShortcutUrl {
            identifier: HostId::new("udid-1"),
        };
        let (_, actions) = handle_event(&mut state, &event).unwrap();
        assert!(actions.is_empty());

        state.capabilities.clipboard = true;
        let (_, actions) = handle_event(&mut state, &event).unwrap();
        assert_eq!(
            actions,
            vec![Action::CopyToClipboard {
                url: "hostdock://connect?identifier=udid-1&name=Bench%20iPhone".to_string(),
            }]
        );
    }

    fn pending(id: &str, message: &str) -> PendingOperation {
        PendingOperation {
            identifier: HostId::new(id),
            message: message.to_string(),
        }
    }

    #[test]
    fn clear_pairing_sets_status_and_posts_composite() {
        let mut state = state();
        let mut host = discovered("a", "Alpha");
        host.connected = true;
        handle_event(&mut state, &Event::HostDiscovered { host }).unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::ClearPairing {
                identifier: HostId::new("a"),
            },
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.status, Some(pending("a", "Unpairing Alpha...")));
        assert!(matches!(
            &actions[0],
            Action::PostToWorker(WorkerMessage::ClearPairing {
                identifier,
                connected: true,
                lockdown: false,
                ..
            }) if identifier == "a"
        ));
    }

    #[test]
    fn clear_pairing_carries_the_lockdown_capability() {
        let mut state = AppState::new(Capabilities::all());
        discover(&mut state, "a", "Alpha");

        let (_, actions) = handle_event(
            &mut state,
            &Event::ClearPairing {
                identifier: HostId::new("a"),
            },
        )
        .unwrap();

        assert!(matches!(
            &actions[0],
            Action::PostToWorker(WorkerMessage::ClearPairing { lockdown: true, .. })
        ));
    }

    #[test]
    fn matching_response_clears_status() {
        let mut state = state();
        state.status = Some(pending("a", "Unpairing Alpha..."));

        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::PairingCleared {
                identifier: "a".to_string(),
            }),
        )
        .unwrap();

        assert!(render);
        assert_eq!(state.status, None);
    }

    #[test]
    fn unrelated_responses_leave_status_pending() {
        let mut state = state();
        state.status = Some(pending("a", "Unpairing Alpha..."));

        // A persist queued before the unpair finishes first.
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::HostPersisted {
                identifier: "b".to_string(),
            }),
        )
        .unwrap();
        assert!(state.status.is_some());

        // An unpair of a different host resolves its own status, not this one.
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::PairingCleared {
                identifier: "b".to_string(),
            }),
        )
        .unwrap();
        assert_eq!(state.status, Some(pending("a", "Unpairing Alpha...")));
    }

    #[test]
    fn worker_error_lands_in_last_error() {
        let mut state = state();
        state.status = Some(pending("a", "Unpairing Alpha..."));

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                message: "clear pairing: lockdown error: host refused".to_string(),
            }),
        )
        .unwrap();

        assert_eq!(state.status, None);
        assert_eq!(
            state.last_error.as_deref(),
            Some("clear pairing: lockdown error: host refused")
        );

        let (render, _) = handle_event(&mut state, &Event::DismissError).unwrap();
        assert!(render);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn saved_hosts_loaded_fold_into_state() {
        let mut state = state();
        discover(&mut state, "a", "Alpha");

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::SavedHostsLoaded {
                hosts: vec![SavedHostRecord::from_host(&discovered("a", "Alpha"))],
            }),
        )
        .unwrap();

        assert_eq!(state.saved_hosts.len(), 1);
        assert!(state.saved_hosts[0].discovered);
    }
}
