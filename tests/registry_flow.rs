//! End-to-end registry flow: state machine, worker, storage, and the
//! clipboard capability wired together the way an embedding runtime would.

use hostdock::platform::{Capabilities, Clipboard};
use hostdock::worker::RegistryWorker;
use hostdock::{
    handle_event, Action, AppState, DeviceType, Event, HostId, HostRecord, Result,
};
use std::sync::{Arc, Mutex};

/// Clipboard double recording everything copied to it.
#[derive(Clone, Default)]
struct MemClipboard {
    copied: Arc<Mutex<Vec<String>>>,
}

impl Clipboard for MemClipboard {
    fn copy_url(&self, url: &str) -> Result<()> {
        self.copied.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Minimal embedding runtime: executes actions synchronously, feeding worker
/// responses straight back into the state machine.
struct Runtime {
    state: AppState,
    worker: RegistryWorker,
    clipboard: MemClipboard,
    discovery_running: bool,
}

impl Runtime {
    fn new(store_dir: &std::path::Path, capabilities: Capabilities) -> Self {
        Self {
            state: AppState::new(capabilities),
            worker: RegistryWorker::open_at(store_dir).unwrap(),
            clipboard: MemClipboard::default(),
            discovery_running: false,
        }
    }

    fn dispatch(&mut self, event: &Event) {
        let (_, actions) = handle_event(&mut self.state, event).unwrap();
        for action in actions {
            match action {
                Action::StartDiscovery => self.discovery_running = true,
                Action::StopDiscovery => self.discovery_running = false,
                Action::CopyToClipboard { url } => self.clipboard.copy_url(&url).unwrap(),
                Action::PostToWorker(message) => {
                    let response = self.worker.handle_message(message);
                    self.dispatch(&Event::WorkerResponse(response));
                }
            }
        }
    }
}

fn bench_iphone() -> HostRecord {
    HostRecord::discovered("udid-1", "Bench iPhone", DeviceType::Iphone)
}

#[test]
fn saved_hosts_survive_a_registry_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut runtime = Runtime::new(dir.path(), Capabilities::none());
        runtime.dispatch(&Event::StartScanning);
        runtime.dispatch(&Event::HostDiscovered {
            host: bench_iphone(),
        });
        runtime.dispatch(&Event::SaveHost {
            identifier: HostId::new("udid-1"),
        });
        assert!(runtime.discovery_running);
    }

    let mut runtime = Runtime::new(dir.path(), Capabilities::none());
    runtime.dispatch(&Event::StartScanning);

    assert_eq!(runtime.state.saved_hosts.len(), 1);
    assert_eq!(runtime.state.saved_hosts[0].name, "Bench iPhone");
    assert!(!runtime.state.saved_hosts[0].discovered);
}

#[test]
fn copy_shortcut_url_reaches_the_clipboard() {
    let dir = tempfile::tempdir().unwrap();
    let mut runtime = Runtime::new(dir.path(), Capabilities::all());

    runtime.dispatch(&Event::StartScanning);
    runtime.dispatch(&Event::HostDiscovered {
        host: bench_iphone(),
    });
    runtime.dispatch(&Event::CopyShortcutUrl {
        identifier: HostId::new("udid-1"),
    });

    let copied = runtime.clipboard.copied.lock().unwrap();
    assert_eq!(
        copied.as_slice(),
        ["hostdock://connect?identifier=udid-1&name=Bench%20iPhone"]
    );
}

#[test]
fn clear_pairing_resolves_the_status_line() {
    let dir = tempfile::tempdir().unwrap();
    let mut runtime = Runtime::new(dir.path(), Capabilities::none());

    runtime.dispatch(&Event::StartScanning);
    runtime.dispatch(&Event::HostDiscovered {
        host: bench_iphone(),
    });
    runtime.dispatch(&Event::SavePairing {
        identifier: HostId::new("udid-1"),
        data: Some(vec![1, 2, 3]),
    });

    // Synchronous runtime: the worker response arrives inside dispatch, so
    // the pending status is already resolved by the time it returns.
    runtime.dispatch(&Event::ClearPairing {
        identifier: HostId::new("udid-1"),
    });

    assert_eq!(runtime.state.status, None);
    assert_eq!(runtime.state.last_error, None);
}

#[test]
fn advertised_lockdown_without_a_controller_surfaces_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // Capabilities claim lockdown, but nothing calls set_lockdown.
    let mut runtime = Runtime::new(dir.path(), Capabilities::all());

    runtime.dispatch(&Event::StartScanning);
    runtime.dispatch(&Event::HostDiscovered {
        host: bench_iphone(),
    });
    runtime.dispatch(&Event::ClearPairing {
        identifier: HostId::new("udid-1"),
    });

    let error = runtime.state.last_error.as_deref().unwrap();
    assert!(error.contains("no controller is wired"));
    assert_eq!(runtime.state.status, None);
}

#[test]
fn removing_a_saved_host_keeps_it_discovered() {
    let dir = tempfile::tempdir().unwrap();
    let mut runtime = Runtime::new(dir.path(), Capabilities::none());

    runtime.dispatch(&Event::StartScanning);
    runtime.dispatch(&Event::HostDiscovered {
        host: bench_iphone(),
    });
    runtime.dispatch(&Event::SaveHost {
        identifier: HostId::new("udid-1"),
    });
    runtime.dispatch(&Event::RemoveSavedHost {
        identifier: HostId::new("udid-1"),
    });

    let vm = runtime.state.compute_viewmodel();
    assert!(vm.saved.is_empty());
    assert_eq!(vm.discovered.len(), 1);
    assert_eq!(vm.discovered[0].identifier, HostId::new("udid-1"));
}
