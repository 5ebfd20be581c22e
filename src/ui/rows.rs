//! Per-host row rendering.

use crate::domain::{HostId, HostRecord};

/// Renderable representation of one host row.
///
/// Carries everything a frontend needs to draw the row without reaching back
/// into registry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRow {
    /// Identifier for selection and command dispatch.
    pub identifier: HostId,

    /// Display title, the host's name.
    pub title: String,

    /// Human-readable device-type label.
    pub device_label: &'static str,

    /// Whether the host is in the saved list (toggle affordance).
    pub saved: bool,

    /// Whether to draw the row dimmed: saved but not currently on the
    /// network.
    pub dimmed: bool,

    /// Whether a protocol session is established with the host.
    pub connected: bool,
}

/// Renders one host into a row.
///
/// Pure function of its inputs; the caller supplies the saved flag because
/// membership lives in registry state, not on the record.
#[must_use]
pub fn render_row(host: &HostRecord, saved: bool) -> HostRow {
    HostRow {
        identifier: host.identifier.clone(),
        title: host.name.clone(),
        device_label: host.device_type.label(),
        saved,
        dimmed: saved && !host.discovered,
        connected: host.connected,
    }
}
