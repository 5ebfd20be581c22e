//! Discovery scan lifecycle.

/// Lifecycle of the host discovery scan.
///
/// Scanning starts at most once per state entry: a `StartScanning` event only
/// performs the one-time startup work (loading saved hosts, starting
/// discovery) when transitioning out of `NotStarted` or `Stopped`. Repeated
/// start requests while already `Scanning` are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// No scan has been started yet; saved hosts are not loaded.
    #[default]
    NotStarted,

    /// Discovery is running and saved hosts have been requested.
    Scanning,

    /// Discovery was stopped or failed; a later start request restarts it.
    Stopped,
}

impl ScanState {
    /// Returns `true` while discovery is running.
    #[must_use]
    pub const fn is_scanning(self) -> bool {
        matches!(self, Self::Scanning)
    }
}
