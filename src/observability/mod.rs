//! OpenTelemetry-based tracing with file export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → rotating file
//! ```
//!
//! - **Format**: one OTLP JSON `resourceSpans` document per line
//! - **Rotation**: 10 MiB per file, 3 backups (`.1` newest)
//! - **Level**: `trace_level` from [`Config`](crate::Config), default `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: OTLP JSON span exporter and tracer provider
//! - [`file_writer`]: Size-rotated trace file

pub mod exporter;
pub mod file_writer;
mod init;

pub use init::{init_tracing, TRACE_FILE};
