//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! registry, along with methods for list maintenance, selection management,
//! and view model generation. It is the single source of truth for all
//! transient registry state.
//!
//! # Architecture
//!
//! `AppState` holds two ordered host lists joined by identifier: `saved_hosts`
//! (persisted, survives scans) and `found_hosts` (ephemeral, driven by
//! discovery events). A host identifier may appear in both at once; within
//! one list it appears at most once. The selection cursor always points at a
//! host present in at least one list, or at nothing.
//!
//! # State Components
//!
//! - **Saved hosts**: persisted list in save order, loaded via the worker
//! - **Found hosts**: discovery results in order of first sight
//! - **Selection**: cursor identifying the highlighted host
//! - **Scan state**: discovery lifecycle, see [`ScanState`]
//! - **Status / error**: user-visible progress line and last surfaced failure

use crate::app::scan::ScanState;
use crate::domain::{HostId, HostRecord};
use crate::platform::Capabilities;
use crate::storage::SavedHostRecord;
use crate::ui::DeviceListViewModel;

/// An in-flight worker operation with its user-visible status line.
///
/// The identifier ties the status to the host it was raised for, so a
/// response belonging to a different operation never resolves it early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOperation {
    /// Host the operation targets.
    pub identifier: HostId,

    /// Status line shown while the operation is pending.
    pub message: String,
}

/// Central registry state container.
///
/// Mutated only by the event handler in response to events and worker
/// responses. View models are computed on demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Saved hosts in save order.
    ///
    /// Loaded from the artifact store on the first scan start and kept in
    /// sync with it through worker messages. Each entry's `discovered` flag
    /// reflects whether the same identifier is currently in `found_hosts`.
    pub saved_hosts: Vec<HostRecord>,

    /// Discovered hosts in order of first sight.
    ///
    /// Ephemeral; entries appear on `HostDiscovered` and disappear on
    /// `HostLost`. Never persisted.
    pub found_hosts: Vec<HostRecord>,

    /// Selection cursor.
    ///
    /// Holds the identifier of the highlighted host. Cleared whenever the
    /// host leaves both lists, so the cursor never dangles.
    pub selected_host: Option<HostId>,

    /// Discovery scan lifecycle.
    pub scan: ScanState,

    /// Pending long-running worker operation, if any.
    ///
    /// Set when the operation starts, cleared when the response for that
    /// operation (or a worker error) arrives.
    pub status: Option<PendingOperation>,

    /// Last surfaced failure, shown until dismissed.
    pub last_error: Option<String>,

    /// Platform capabilities selected at startup.
    ///
    /// Gates the clipboard and lockdown paths; the handler consults these
    /// instead of compile-time platform branches.
    pub capabilities: Capabilities,
}

impl AppState {
    /// Creates an empty registry state with the given platform capabilities.
    #[must_use]
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            saved_hosts: Vec::new(),
            found_hosts: Vec::new(),
            selected_host: None,
            scan: ScanState::default(),
            status: None,
            last_error: None,
            capabilities,
        }
    }

    /// Looks up a host by identifier, preferring the discovered entry.
    ///
    /// The discovered entry carries live connectivity and address data, so it
    /// wins over the saved entry when both exist.
    #[must_use]
    pub fn host(&self, identifier: &HostId) -> Option<&HostRecord> {
        self.found_hosts
            .iter()
            .find(|h| &h.identifier == identifier)
            .or_else(|| {
                self.saved_hosts
                    .iter()
                    .find(|h| &h.identifier == identifier)
            })
    }

    /// Returns `true` when the identifier is in the saved list.
    #[must_use]
    pub fn is_saved(&self, identifier: &HostId) -> bool {
        self.saved_hosts
            .iter()
            .any(|h| &h.identifier == identifier)
    }

    /// Inserts or refreshes a discovered host.
    ///
    /// A host already in `found_hosts` is updated in place, keeping its
    /// position in order of first sight. A matching saved host is marked
    /// discovered and picks up the fresh name and address.
    pub fn upsert_found_host(&mut self, host: HostRecord) {
        if let Some(saved) = self
            .saved_hosts
            .iter_mut()
            .find(|h| h.identifier == host.identifier)
        {
            saved.discovered = true;
            saved.connected = host.connected;
            saved.name.clone_from(&host.name);
            saved.address.clone_from(&host.address);
        }

        if let Some(existing) = self
            .found_hosts
            .iter_mut()
            .find(|h| h.identifier == host.identifier)
        {
            *existing = host;
        } else {
            tracing::debug!(identifier = %host.identifier, name = %host.name, "host discovered");
            self.found_hosts.push(host);
        }
    }

    /// Removes a host from the discovered list.
    ///
    /// A matching saved host stays in the saved list but is marked offline.
    /// The selection is cleared if it pointed at a host that is now gone
    /// from both lists.
    pub fn remove_found_host(&mut self, identifier: &HostId) {
        self.found_hosts.retain(|h| &h.identifier != identifier);

        if let Some(saved) = self
            .saved_hosts
            .iter_mut()
            .find(|h| &h.identifier == identifier)
        {
            saved.discovered = false;
            saved.connected = false;
        }

        self.revalidate_selection();
    }

    /// Replaces the saved list with records loaded from storage.
    ///
    /// Each record joins against `found_hosts` by identifier so hosts that
    /// are currently visible on the network come back marked discovered.
    pub fn set_saved_hosts(&mut self, records: Vec<SavedHostRecord>) {
        self.saved_hosts = records
            .into_iter()
            .map(|record| {
                let mut host = record.into_host();
                if let Some(found) = self
                    .found_hosts
                    .iter()
                    .find(|h| h.identifier == host.identifier)
                {
                    host.discovered = true;
                    host.connected = found.connected;
                    host.address.clone_from(&found.address);
                }
                host
            })
            .collect();

        self.revalidate_selection();
    }

    /// Appends a host to the saved list if its identifier is not there yet.
    ///
    /// Returns `true` when the host was appended. Saving an already-saved
    /// host is a no-op, which makes the save operation idempotent.
    pub fn mark_saved(&mut self, host: HostRecord) -> bool {
        if self.is_saved(&host.identifier) {
            tracing::debug!(identifier = %host.identifier, "host already saved");
            return false;
        }

        tracing::debug!(identifier = %host.identifier, name = %host.name, "host saved");
        self.saved_hosts.push(host);
        true
    }

    /// Removes a host from the saved list, leaving `found_hosts` untouched.
    ///
    /// Returns `true` when a host was actually removed.
    pub fn unmark_saved(&mut self, identifier: &HostId) -> bool {
        let before = self.saved_hosts.len();
        self.saved_hosts.retain(|h| &h.identifier != identifier);
        let removed = self.saved_hosts.len() != before;

        if removed {
            self.revalidate_selection();
        }
        removed
    }

    /// Moves the selection cursor.
    ///
    /// Selecting an identifier that is in neither list clears the cursor
    /// instead of leaving it dangling.
    pub fn select_host(&mut self, identifier: Option<HostId>) {
        self.selected_host = identifier.filter(|id| self.host(id).is_some());
    }

    /// Clears the selection when the selected host has left both lists.
    fn revalidate_selection(&mut self) {
        if let Some(selected) = self.selected_host.take() {
            if self.host(&selected).is_some() {
                self.selected_host = Some(selected);
            }
        }
    }

    /// Computes the device-list view model from the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> DeviceListViewModel {
        crate::ui::compute_viewmodel(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceType;

    fn discovered(id: &str, name: &str) -> HostRecord {
        HostRecord::discovered(id, name, DeviceType::Iphone)
    }

    #[test]
    fn lookup_prefers_discovered_entry() {
        let mut state = AppState::new(Capabilities::none());
        let mut offline = discovered("a", "Old Name");
        offline.discovered = false;
        state.saved_hosts.push(offline);
        state.upsert_found_host(discovered("a", "New Name"));

        let host = state.host(&HostId::new("a")).unwrap();
        assert!(host.discovered);
        assert_eq!(host.name, "New Name");
    }

    #[test]
    fn host_lost_keeps_saved_entry_offline() {
        let mut state = AppState::new(Capabilities::none());
        state.upsert_found_host(discovered("a", "Alpha"));
        assert!(state.mark_saved(discovered("a", "Alpha")));

        state.remove_found_host(&HostId::new("a"));

        assert!(state.found_hosts.is_empty());
        assert_eq!(state.saved_hosts.len(), 1);
        assert!(!state.saved_hosts[0].discovered);
    }

    #[test]
    fn saving_twice_is_saving_once() {
        let mut state = AppState::new(Capabilities::none());
        assert!(state.mark_saved(discovered("a", "Alpha")));
        assert!(!state.mark_saved(discovered("a", "Alpha")));
        assert_eq!(state.saved_hosts.len(), 1);
    }

    #[test]
    fn unmark_saved_leaves_found_hosts_untouched() {
        let mut state = AppState::new(Capabilities::none());
        state.upsert_found_host(discovered("a", "Alpha"));
        state.mark_saved(discovered("a", "Alpha"));

        assert!(state.unmark_saved(&HostId::new("a")));

        assert!(state.saved_hosts.is_empty());
        assert_eq!(state.found_hosts.len(), 1);
    }

    #[test]
    fn selection_clears_when_host_leaves_both_lists() {
        let mut state = AppState::new(Capabilities::none());
        state.upsert_found_host(discovered("a", "Alpha"));
        state.select_host(Some(HostId::new("a")));
        assert_eq!(state.selected_host, Some(HostId::new("a")));

        state.remove_found_host(&HostId::new("a"));
        assert_eq!(state.selected_host, None);
    }

    #[test]
    fn selecting_unknown_host_clears_cursor() {
        let mut state = AppState::new(Capabilities::none());
        state.upsert_found_host(discovered("a", "Alpha"));
        state.select_host(Some(HostId::new("a")));

        state.select_host(Some(HostId::new("ghost")));
        assert_eq!(state.selected_host, None);
    }

    #[test]
    fn loaded_saved_hosts_join_against_found() {
        let mut state = AppState::new(Capabilities::none());
        state.upsert_found_host(discovered("a", "Alpha"));

        let records = vec![
            SavedHostRecord::from_host(&discovered("a", "Alpha")),
            SavedHostRecord::from_host(&discovered("b", "Beta")),
        ];
        state.set_saved_hosts(records);

        assert!(state.saved_hosts[0].discovered);
        assert!(!state.saved_hosts[1].discovered);
    }
}
