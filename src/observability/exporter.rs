//! Span exporter writing one JSON object per finished span.

use super::file_writer::RotatingFile;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::time::SystemTime;

/// Writes spans as JSON lines:
///
/// ```json
/// {"service":"foldergrid","name":"commit_move_items","traceId":"…","spanId":"…",
///  "parentSpanId":"","start":"2024-05-01T10:00:00.000000Z","durationUs":812,
///  "attributes":{"selected":2},"events":[…],"status":"unset"}
/// ```
pub(crate) struct JsonLinesExporter {
    file: RotatingFile,
    service: String,
    shut_down: bool,
}

impl JsonLinesExporter {
    pub(crate) fn new(file: RotatingFile, resource: &Resource) -> Self {
        Self {
            file,
            service: service_name(resource),
            shut_down: false,
        }
    }

    fn span_line(&self, span: &SpanData) -> JsonValue {
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| d.as_micros());
        let parent = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };
        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "at": timestamp(event.timestamp),
                    "attributes": attributes_object(&event.attributes),
                })
            })
            .collect();

        json!({
            "service": self.service,
            "name": span.name,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "start": timestamp(span.start_time),
            "durationUs": u64::try_from(duration_us).unwrap_or(u64::MAX),
            "attributes": attributes_object(&span.attributes),
            "events": events,
            "status": status_label(&span.status),
        })
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.shut_down {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.file.write_line(&self.span_line(span).to_string()))
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.service = service_name(resource);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .field("shut_down", &self.shut_down)
            .finish()
    }
}

/// Builds a provider that hands every finished span straight to the file exporter.
pub(crate) fn tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(RotatingFile::new(path), &resource);
    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn service_name(resource: &Resource) -> String {
    resource
        .iter()
        .find(|(key, _)| key.as_str() == "service.name")
        .map_or_else(|| "unknown".to_string(), |(_, value)| value.to_string())
}

fn timestamp(at: SystemTime) -> String {
    DateTime::<Utc>::from(at).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn status_label(status: &Status) -> String {
    match status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    }
}

fn attributes_object(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_native_json_types() {
        let attrs = [
            KeyValue::new("selected", 2_i64),
            KeyValue::new("grid", "productTable"),
            KeyValue::new("changed", true),
        ];
        assert_eq!(
            attributes_object(&attrs),
            json!({"selected": 2, "grid": "productTable", "changed": true})
        );
    }

    #[test]
    fn service_name_comes_from_resource() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "foldergrid")]);
        assert_eq!(service_name(&resource), "foldergrid");
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label(&Status::Unset), "unset");
        assert_eq!(status_label(&Status::error("boom")), "error: boom");
    }
}
