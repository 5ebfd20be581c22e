//! Tracing initialization and subscriber setup.
//!
//! Wires the complete observability pipeline, from `tracing` macros through
//! OpenTelemetry to the file exporter.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Sets up a pipeline that filters spans by the configured trace level,
/// hands them to OpenTelemetry, serializes them as OTLP JSON, and appends
/// them to a rotating trace file in the data directory.
///
/// # Trace Level Resolution
///
/// 1. `config.trace_level` if set
/// 2. Default: `"info"`
///
/// # File Location
///
/// Traces are written to `<data_dir>/hostdock-otlp.json`, where the data
/// directory follows the same resolution as the artifact store: the
/// configured `data_dir` first, then the environment/platform fallback (see
/// [`crate::infrastructure::paths::resolve_data_dir`]).
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Returns silently if directory creation fails (observability is
///   optional, the registry keeps working without it)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```no_run
/// use hostdock::observability::init_tracing;
/// use hostdock::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::resolve_data_dir(config.data_dir.as_deref());
    if let Err(_e) = std::fs::create_dir_all(&data_dir) {
        // Nothing to export to without a data directory
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "hostdock",
    )]);

    let trace_file = data_dir.join("hostdock-otlp.json");
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("hostdock");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
