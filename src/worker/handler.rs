//! Background worker for storage and protocol operations.
//!
//! The worker owns the artifact store and, when the platform provides one, the
//! lockdown controller. All registry persistence and every protocol call runs
//! here, off the interactive path; the interactive thread only ever posts
//! [`WorkerMessage`]s and folds the resulting [`WorkerResponse`]s back into
//! state. Spans created here attach to the posting thread's trace context.

use crate::domain::{HostDockError, HostId, Result};
use crate::infrastructure::paths;
use crate::platform::LockdownController;
use crate::storage::backend::ArtifactStore;
use crate::storage::models::{DiskImageRecord, PairingRecord, SavedHostRecord};
use crate::storage::JsonStore;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Worker state processing registry operations.
///
/// The embedding runtime constructs one worker (usually on its own thread),
/// feeds it messages in post order, and delivers each response back to the
/// state machine as an event. Per-host operations therefore apply in the order
/// the user issued them.
pub struct RegistryWorker {
    /// Artifact store backend.
    store: Box<dyn ArtifactStore>,

    /// Lockdown controller, absent on platforms without the capability.
    lockdown: Option<Box<dyn LockdownController>>,
}

impl RegistryWorker {
    /// Creates a worker backed by the default JSON store location.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be created or parsed.
    pub fn open_default() -> Result<Self> {
        let store = JsonStore::open(paths::store_file())?;
        Ok(Self::new(Box::new(store)))
    }

    /// Creates a worker with the JSON store inside an explicit data
    /// directory.
    ///
    /// This is the path for a configured `data_dir`: the embedding runtime
    /// resolves the directory once (see
    /// [`resolve_data_dir`](crate::infrastructure::resolve_data_dir)) and
    /// hands it over as a value instead of mutating process state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be created or parsed.
    pub fn open_at(data_dir: &std::path::Path) -> Result<Self> {
        let store = JsonStore::open(data_dir.join("registry.json"))?;
        Ok(Self::new(Box::new(store)))
    }

    /// Creates a worker over an explicit store backend.
    #[must_use]
    pub fn new(store: Box<dyn ArtifactStore>) -> Self {
        Self {
            store,
            lockdown: None,
        }
    }

    /// Wires the platform lockdown controller.
    ///
    /// Without one, the clear-pairing operation still clears cached artifacts
    /// but skips the protocol sequence.
    pub fn set_lockdown(&mut self, controller: Box<dyn LockdownController>) {
        self.lockdown = Some(controller);
    }

    /// Standardizes result-to-response conversion and logging for one
    /// storage/protocol operation.
    fn complete<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_saved_hosts(&mut self) -> WorkerResponse {
        Self::complete("load saved hosts", self.store.saved_hosts(), |hosts| {
            tracing::debug!(count = hosts.len(), "saved hosts loaded");
            WorkerResponse::SavedHostsLoaded { hosts }
        })
    }

    fn handle_persist_saved_host(&mut self, record: SavedHostRecord) -> WorkerResponse {
        let identifier = record.identifier.to_string();
        Self::complete(
            "persist saved host",
            self.store.upsert_saved_host(&record),
            |()| WorkerResponse::HostPersisted { identifier },
        )
    }

    fn handle_remove_saved_host(&mut self, identifier: String) -> WorkerResponse {
        let id = HostId::new(identifier.clone());
        Self::complete(
            "remove saved host",
            self.store.remove_saved_host(&id),
            |existed| WorkerResponse::HostRemoved { identifier, existed },
        )
    }

    fn handle_save_pairing(&mut self, identifier: String, data: Option<Vec<u8>>) -> WorkerResponse {
        let id = HostId::new(identifier.clone());
        let cleared = data.is_none();
        let record = data.map(PairingRecord::new);

        Self::complete(
            "save pairing",
            self.store.save_pairing(&id, record.as_ref()),
            |()| {
                tracing::debug!(identifier = %identifier, cleared = cleared, "pairing saved");
                WorkerResponse::PairingSaved { identifier, cleared }
            },
        )
    }

    fn handle_save_disk_image(
        &mut self,
        identifier: String,
        image: Option<Vec<u8>>,
        signature: Option<Vec<u8>>,
    ) -> WorkerResponse {
        let id = HostId::new(identifier.clone());
        let cleared = image.is_none();
        let record = image.map(|image| DiskImageRecord::new(image, signature.unwrap_or_default()));

        Self::complete(
            "save disk image",
            self.store.save_disk_image(&id, record.as_ref()),
            |()| {
                tracing::debug!(identifier = %identifier, cleared = cleared, "disk image saved");
                WorkerResponse::DiskImageSaved { identifier, cleared }
            },
        )
    }

    /// Composite unpair: clear both cached artifacts, then run the lockdown
    /// reset sequence when the capability was requested.
    ///
    /// Artifact clears happen first and unconditionally, so a protocol
    /// failure never leaves stale credentials behind. The session start is
    /// skipped when the host already has an established session. A request
    /// for the reset sequence without a wired controller is a wiring bug and
    /// is surfaced as an error rather than reported as success.
    fn handle_clear_pairing(
        &mut self,
        identifier: String,
        connected: bool,
        lockdown: bool,
        status: &str,
    ) -> WorkerResponse {
        let id = HostId::new(identifier.clone());
        tracing::info!(identifier = %id, status = %status, "starting composite unpair");

        let result = self
            .store
            .save_pairing(&id, None)
            .and_then(|()| self.store.save_disk_image(&id, None))
            .and_then(|()| {
                if !lockdown {
                    tracing::debug!(identifier = %id, "lockdown not requested, artifacts cleared only");
                    return Ok(());
                }
                match self.lockdown.as_mut() {
                    Some(controller) => {
                        if !connected {
                            tracing::debug!(identifier = %id, "starting lockdown session");
                            controller.start_session(&id)?;
                        }
                        tracing::debug!(identifier = %id, "resetting pairing");
                        controller.reset_pairing(&id)
                    }
                    None => Err(HostDockError::Lockdown(
                        "lockdown capability requested but no controller is wired".to_string(),
                    )),
                }
            });

        Self::complete("clear pairing", result, |()| WorkerResponse::PairingCleared {
            identifier,
        })
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Rebuilds the OpenTelemetry context from the serialized trace IDs so
    /// worker spans link to the interactive-thread span that posted the
    /// message. The returned guard must be held for the operation's duration.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = match message {
            WorkerMessage::LoadSavedHosts { trace_context, .. }
            | WorkerMessage::PersistSavedHost { trace_context, .. }
            | WorkerMessage::RemoveSavedHost { trace_context, .. }
            | WorkerMessage::SavePairing { trace_context, .. }
            | WorkerMessage::SaveDiskImage { trace_context, .. }
            | WorkerMessage::ClearPairing { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }

    /// Processes one worker message and returns the response to deliver back
    /// to the state machine.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadSavedHosts { .. } => self.handle_load_saved_hosts(),
            WorkerMessage::PersistSavedHost { record, .. } => {
                self.handle_persist_saved_host(record)
            }
            WorkerMessage::RemoveSavedHost { identifier, .. } => {
                self.handle_remove_saved_host(identifier)
            }
            WorkerMessage::SavePairing {
                identifier, data, ..
            } => self.handle_save_pairing(identifier, data),
            WorkerMessage::SaveDiskImage {
                identifier,
                image,
                signature,
                ..
            } => self.handle_save_disk_image(identifier, image, signature),
            WorkerMessage::ClearPairing {
                identifier,
                connected,
                lockdown,
                status,
                ..
            } => self.handle_clear_pairing(identifier, connected, lockdown, &status),
        }
    }
}
