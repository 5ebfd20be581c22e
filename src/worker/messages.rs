//! Background worker message types.
//!
//! This module defines the request and response protocol between the
//! interactive state machine and the background worker that owns the artifact
//! store and the lockdown controller. It also implements distributed tracing
//! context propagation across the thread boundary.

use crate::storage::models::SavedHostRecord;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so spans created
/// inside the worker link back to the interactive-thread span that posted the
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates builder methods for [`WorkerMessage`] variants.
///
/// Each builder attaches the current trace context automatically so call sites
/// never have to thread it through by hand.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_saved_hosts(LoadSavedHosts {}),
    persist_saved_host(PersistSavedHost { record: SavedHostRecord }),
    remove_saved_host(RemoveSavedHost { identifier: String }),
    save_pairing(SavePairing { identifier: String, data: Option<Vec<u8>> }),
    save_disk_image(SaveDiskImage {
        identifier: String,
        image: Option<Vec<u8>>,
        signature: Option<Vec<u8>>,
    }),
    clear_pairing(ClearPairing {
        identifier: String,
        connected: bool,
        lockdown: bool,
        status: String,
    }),
}

/// Messages posted from the interactive thread to the worker.
///
/// Each variant corresponds to one storage or protocol operation executed off
/// the interactive path. All variants carry an optional trace context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load the ordered saved-host list from the artifact store.
    LoadSavedHosts {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Insert or update one saved host.
    PersistSavedHost {
        /// Record to persist.
        record: SavedHostRecord,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Remove one saved host; absence is not an error.
    RemoveSavedHost {
        /// Identifier of the host to remove.
        identifier: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist or clear the pairing credential for a host.
    ///
    /// `data: None` clears the cached credential.
    SavePairing {
        /// Identifier of the host the credential belongs to.
        identifier: String,

        /// Credential bytes, or `None` to clear.
        data: Option<Vec<u8>>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist or clear the disk-image cache for a host.
    ///
    /// `image: None` clears the cache; the signature is ignored in that case.
    SaveDiskImage {
        /// Identifier of the host the image belongs to.
        identifier: String,

        /// Image bytes, or `None` to clear.
        image: Option<Vec<u8>>,

        /// Detached signature over the image.
        signature: Option<Vec<u8>>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Composite unpair operation for one host.
    ///
    /// Clears the pairing credential and disk-image cache, then, when the
    /// lockdown capability was requested, drives the reset sequence: start a
    /// session if the host is not already connected, then reset pairing.
    /// Requesting the sequence without a wired controller is an error.
    ClearPairing {
        /// Identifier of the host to unpair.
        identifier: String,

        /// Whether a protocol session is already established, which skips the
        /// session start.
        connected: bool,

        /// Whether the lockdown reset sequence should run, taken from the
        /// platform capability snapshot.
        lockdown: bool,

        /// User-visible status line shown while the operation is pending.
        status: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

/// Responses sent from the worker back to the interactive thread.
///
/// Folded back into application state as
/// [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The saved-host list was loaded.
    SavedHostsLoaded {
        /// Saved hosts in save order.
        hosts: Vec<SavedHostRecord>,
    },

    /// A saved host was persisted.
    HostPersisted {
        /// Identifier of the persisted host.
        identifier: String,
    },

    /// A saved-host removal completed.
    HostRemoved {
        /// Identifier of the removed host.
        identifier: String,

        /// Whether the host was actually present in the store.
        existed: bool,
    },

    /// A pairing credential write or clear completed.
    PairingSaved {
        /// Identifier of the affected host.
        identifier: String,

        /// Whether the operation cleared rather than wrote.
        cleared: bool,
    },

    /// A disk-image write or clear completed.
    DiskImageSaved {
        /// Identifier of the affected host.
        identifier: String,

        /// Whether the operation cleared rather than wrote.
        cleared: bool,
    },

    /// The composite unpair operation completed.
    PairingCleared {
        /// Identifier of the unpaired host.
        identifier: String,
    },

    /// A worker operation failed.
    ///
    /// Surfaced to the user via `AppState::last_error`; never silently
    /// dropped.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
