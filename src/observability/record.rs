//! Compact JSON shape of one exported span.
//!
//! Each line of the trace file is a single [`SpanRecord`]:
//!
//! ```json
//! {"trace_id":"4bf92f3577b34da6a3ce929d0e0e4736","span_id":"00f067aa0ba902b7",
//!  "name":"handle_event","start_unix_nanos":1718000000000000000,"duration_micros":412,
//!  "attributes":{"event":"Char('路')","results":3}}
//! ```

use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanRecord {
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub name: String,
    pub start_unix_nanos: u64,
    pub duration_micros: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, JsonValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventRecord>,
    /// Error description when the span ended with an error status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A log event recorded inside a span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub name: String,
    /// Time since the span started.
    pub offset_micros: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, JsonValue>,
}

impl SpanRecord {
    #[must_use]
    pub fn from_span(span: &SpanData) -> Self {
        let parent_span_id =
            (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));
        let error = match &span.status {
            Status::Error { description } => Some(description.to_string()),
            Status::Unset | Status::Ok => None,
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            start_unix_nanos: unix_nanos(span.start_time),
            duration_micros: micros_between(span.start_time, span.end_time),
            attributes: attribute_map(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| EventRecord {
                    name: event.name.to_string(),
                    offset_micros: micros_between(span.start_time, event.timestamp),
                    attributes: attribute_map(&event.attributes),
                })
                .collect(),
            error,
        }
    }
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

fn micros_between(start: SystemTime, end: SystemTime) -> u64 {
    end.duration_since(start)
        .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
}

fn attribute_map(attributes: &[KeyValue]) -> BTreeMap<String, JsonValue> {
    attributes
        .iter()
        .map(|kv| (kv.key.to_string(), json_value(&kv.value)))
        .collect()
}

/// Maps an OpenTelemetry attribute value to plain JSON.
///
/// Arrays fall back to their display form.
#[must_use]
pub fn json_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Array(_) => JsonValue::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_become_plain_json() {
        assert_eq!(json_value(&Value::Bool(true)), serde_json::json!(true));
        assert_eq!(json_value(&Value::I64(3)), serde_json::json!(3));
        assert_eq!(json_value(&Value::F64(1.5)), serde_json::json!(1.5));
        assert_eq!(json_value(&Value::from("路痴哥")), serde_json::json!("路痴哥"));
    }

    #[test]
    fn empty_fields_are_omitted() {
        let record = SpanRecord {
            trace_id: "0".repeat(32),
            span_id: "0".repeat(16),
            parent_span_id: None,
            name: "load_catalog".to_string(),
            start_unix_nanos: 1,
            duration_micros: 2,
            attributes: BTreeMap::new(),
            events: Vec::new(),
            error: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(object["name"], "load_catalog");
        assert!(!object.contains_key("error"));
    }

    #[test]
    fn clock_skew_yields_zero_duration() {
        let later = UNIX_EPOCH + std::time::Duration::from_secs(10);
        assert_eq!(micros_between(later, UNIX_EPOCH), 0);
        assert_eq!(micros_between(UNIX_EPOCH, later), 10_000_000);
    }
}
