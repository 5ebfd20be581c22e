//! OpenTelemetry-based observability with file-based trace export.
//!
//! Distributed tracing for the registry, using OTLP JSON written to a local
//! file for offline analysis. The worker protocol propagates trace context
//! across threads, so one user operation shows up as a single trace spanning
//! the interactive thread and the worker.
//!
//! # Architecture
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON file
//! ```
//!
//! # Configuration
//!
//! Trace level comes from the `trace_level` config option, defaulting to
//! `"info"`. Traces land in `<data_dir>/hostdock-otlp.json` with automatic
//! rotation at 10 MB and three retained backups.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider with file export
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
