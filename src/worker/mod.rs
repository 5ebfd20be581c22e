//! Background worker for storage and lockdown protocol operations.
//!
//! This module implements the worker that handles all artifact-store I/O and
//! lockdown protocol calls off the interactive path. Messages carry a trace
//! context so worker spans link back to the posting thread for observability.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::RegistryWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
