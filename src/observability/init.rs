//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros through `tracing-opentelemetry` into the file exporter.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE: &str = "contactbook-otlp.json";

/// Installs the global tracing subscriber with file-based OTLP export.
///
/// The filter level comes from `config.trace_level` and defaults to `"info"`.
/// Traces go to [`TRACE_FILE`] next to the contacts file.
///
/// Observability is optional: if no directory can be determined or created, or a
/// subscriber is already installed, this does nothing. Returns the trace file path
/// when the subscriber was installed.
///
/// # Example
///
/// ```no_run
/// use contactbook::observability::init_tracing;
/// use contactbook::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// let _trace_file = init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let trace_dir = config
        .storage_file()
        .and_then(|path| path.parent().map(PathBuf::from))?;
    std::fs::create_dir_all(&trace_dir).ok()?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        exporter::SCOPE_NAME,
    )]);

    let trace_file = trace_dir.join(TRACE_FILE);
    let provider = exporter::file_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(exporter::SCOPE_NAME));

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(trace_file)
}
