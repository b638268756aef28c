// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Body encoding classification and field extraction for contact submissions.
//!
//! Everything here is pure: the handler reads bytes off the wire and these
//! functions turn them into [`Fields`].

use serde_json::Value;
use tracing::warn;

use folio_core::Fields;

/// Field receiving free text and non-object JSON.
pub const MESSAGE_FIELD: &str = "message";

/// Multipart field whose value is expanded into record fields.
pub const DATA_FIELD: &str = "data";

/// How a request body is encoded, resolved once from `content-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Multipart,
    Json,
    Text,
    Unknown,
}

impl BodyEncoding {
    /// Classify a `content-type` header value (case-insensitive substring match).
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Unknown;
        };
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("multipart/form-data") {
            Self::Multipart
        } else if content_type.contains("application/json") {
            Self::Json
        } else if content_type.contains("text/") {
            Self::Text
        } else {
            Self::Unknown
        }
    }

    /// Decode a non-multipart body. Returns `None` when the body is absent.
    ///
    /// Multipart bodies are streamed part by part and never reach here; they
    /// decode to `None`.
    pub fn decode(self, body: &str) -> Option<Fields> {
        if body.trim().is_empty() {
            return None;
        }
        match self {
            Self::Multipart => None,
            Self::Json => match serde_json::from_str::<Value>(body) {
                Ok(value) => fields_from_json(value),
                Err(e) => {
                    warn!(error = %e, "discarding malformed JSON body");
                    None
                }
            },
            Self::Text => Some(message(Value::String(body.to_string()))),
            Self::Unknown => match serde_json::from_str::<Value>(body) {
                Ok(value) => fields_from_json(value),
                Err(_) => Some(message(Value::String(body.to_string()))),
            },
        }
    }
}

/// Turn a parsed JSON body into fields.
///
/// Objects contribute their members, `null` contributes nothing, and any other
/// value is kept whole under `message`.
pub fn fields_from_json(value: Value) -> Option<Fields> {
    match value {
        Value::Object(map) if map.is_empty() => None,
        Value::Object(map) => Some(map),
        Value::Null => None,
        other => Some(message(other)),
    }
}

/// Record one plain (non-file) multipart field.
///
/// `data` is expanded: a JSON object merges its members, anything else is
/// stored verbatim under `message`.
pub fn apply_form_field(fields: &mut Fields, name: &str, value: String) {
    if name != DATA_FIELD {
        fields.insert(name.to_string(), Value::String(value));
        return;
    }
    match serde_json::from_str::<Value>(&value) {
        Ok(Value::Object(map)) => fields.extend(map),
        Ok(_) => {
            fields.insert(MESSAGE_FIELD.to_string(), Value::String(value));
        }
        Err(e) => {
            warn!(error = %e, "multipart data field is not JSON, storing as message");
            fields.insert(MESSAGE_FIELD.to_string(), Value::String(value));
        }
    }
}

/// Parse a raw query string into string-valued fields. Duplicate keys: last wins.
///
/// A query that cannot be decoded contributes nothing.
pub fn query_fields(query: Option<&str>) -> Fields {
    let mut fields = Fields::new();
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return fields;
    };
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => {
            for (key, value) in pairs {
                fields.insert(key, Value::String(value));
            }
        }
        Err(e) => warn!(error = %e, "ignoring undecodable query string"),
    }
    fields
}

fn message(value: Value) -> Fields {
    let mut fields = Fields::new();
    fields.insert(MESSAGE_FIELD.to_string(), value);
    fields
}
