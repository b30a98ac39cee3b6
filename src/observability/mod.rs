//! Structured tracing with file export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer provider → JsonLinesExporter
//!                                                                   │
//!                                              <data_dir>/foldergrid-trace.jsonl (+ .1 .. .3)
//! ```
//!
//! Spans are exported one JSON object per line as soon as they close. The file
//! rotates at 10 MB and keeps three numbered backups.
//!
//! # Usage
//!
//! ```no_run
//! use foldergrid::observability::init_tracing;
//! use foldergrid::Config;
//!
//! let config = Config {
//!     trace_level: Some("debug".to_string()),
//!     ..Config::default()
//! };
//! init_tracing(&config);
//! tracing::debug!("console started");
//! ```

mod exporter;
mod file_writer;
mod init;

pub use file_writer::{RotatingFile, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
pub use init::{init_tracing, TRACE_FILE};
