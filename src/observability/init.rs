//! Subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the span file inside the data directory.
pub const TRACE_FILE: &str = "foldergrid-trace.jsonl";

/// Installs the global subscriber: an `EnvFilter` followed by an OpenTelemetry layer
/// that writes finished spans to `<data_dir>/foldergrid-trace.jsonl`.
///
/// `RUST_LOG` wins over `config.trace_level`; without either the level is `info`.
/// Returns `false` when tracing could not be installed, either because the data
/// directory cannot be created or because a global subscriber already exists.
pub fn init_tracing(config: &Config) -> bool {
    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.trace_level.as_deref().unwrap_or("info")));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", env!("CARGO_PKG_NAME")),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::tracer_provider(config.data_dir.join(TRACE_FILE), resource);
    let tracer = provider.tracer(env!("CARGO_PKG_NAME"));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(data_dir = %config.data_dir.display(), "tracing initialized");
    }
    installed
}
