//! Device-list view model computation.
//!
//! This module transforms registry state into a renderable representation
//! with Saved and Discovered sections. The computation is pure: any frontend
//! can call it on a state snapshot and draw the result however it likes.

use crate::app::AppState;
use crate::domain::HostId;
use crate::ui::rows::{render_row, HostRow};

/// Renderable snapshot of the device list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceListViewModel {
    /// Saved hosts in save order, joined with live discovery state.
    pub saved: Vec<HostRow>,

    /// Discovered hosts not in the saved list, in order of first sight.
    ///
    /// Hosts that are both saved and discovered render in the saved section
    /// only, carrying their live connectivity there.
    pub discovered: Vec<HostRow>,

    /// Identifier of the highlighted host, if any.
    pub selected: Option<HostId>,

    /// Status line for a pending operation.
    pub status: Option<String>,

    /// Last surfaced failure.
    pub last_error: Option<String>,
}

/// Computes the device-list view model from a state snapshot.
#[must_use]
pub fn compute_viewmodel(state: &AppState) -> DeviceListViewModel {
    let saved = state
        .saved_hosts
        .iter()
        .map(|host| render_row(host, true))
        .collect();

    let discovered = state
        .found_hosts
        .iter()
        .filter(|host| !state.is_saved(&host.identifier))
        .map(|host| render_row(host, false))
        .collect();

    DeviceListViewModel {
        saved,
        discovered,
        selected: state.selected_host.clone(),
        status: state.status.as_ref().map(|pending| pending.message.clone()),
        last_error: state.last_error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceType, HostRecord};
    use crate::platform::Capabilities;

    fn discovered(id: &str, name: &str) -> HostRecord {
        HostRecord::discovered(id, name, DeviceType::Iphone)
    }

    #[test]
    fn saved_hosts_leave_the_discovered_section() {
        let mut state = AppState::new(Capabilities::none());
        state.upsert_found_host(discovered("a", "Alpha"));
        state.upsert_found_host(discovered("b", "Beta"));
        state.mark_saved(discovered("a", "Alpha"));

        let vm = compute_viewmodel(&state);
        assert_eq!(vm.saved.len(), 1);
        assert_eq!(vm.saved[0].identifier, HostId::new("a"));
        assert!(!vm.saved[0].dimmed);
        assert_eq!(vm.discovered.len(), 1);
        assert_eq!(vm.discovered[0].identifier, HostId::new("b"));
    }

    #[test]
    fn selection_and_status_pass_through() {
        let mut state = AppState::new(Capabilities::none());
        state.upsert_found_host(discovered("a", "Alpha"));
        state.select_host(Some(HostId::new("a")));
        state.status = Some(crate::app::PendingOperation {
            identifier: HostId::new("a"),
            message: "Unpairing Alpha...".to_string(),
        });

        let vm = compute_viewmodel(&state);
        assert_eq!(vm.selected, Some(HostId::new("a")));
        assert_eq!(vm.status.as_deref(), Some("Unpairing Alpha..."));
    }
}
