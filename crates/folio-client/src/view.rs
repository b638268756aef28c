// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The response as shown to the user.

use serde_json::{json, Value};

use crate::highlight;

/// Response payload: parsed JSON or literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

/// Outcome of one send, local or remote.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseView {
    pub status: u16,
    /// Wall-clock time of the round trip. `None` when the request never completed.
    pub elapsed_ms: Option<u64>,
    pub payload: Payload,
}

impl ResponseView {
    /// Interpret a received body. JSON is parsed only when the content type says so.
    pub fn from_response(
        status: u16,
        content_type: Option<&str>,
        body: String,
        elapsed_ms: u64,
    ) -> Self {
        let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
        let payload = if is_json {
            match serde_json::from_str(&body) {
                Ok(value) => Payload::Json(value),
                Err(_) => Payload::Text(body),
            }
        } else {
            Payload::Text(body)
        };
        Self {
            status,
            elapsed_ms: Some(elapsed_ms),
            payload,
        }
    }

    /// The local answer to a write request without any data.
    pub fn no_data() -> Self {
        Self {
            status: 400,
            elapsed_ms: Some(0),
            payload: Payload::Json(json!({ "error": "No data given" })),
        }
    }

    /// The answer when the request could not be completed.
    pub fn network_failure(details: impl Into<String>) -> Self {
        Self {
            status: 500,
            elapsed_ms: None,
            payload: Payload::Json(json!({
                "error": "Failed to fetch data",
                "details": details.into(),
            })),
        }
    }

    /// JSON pretty-printed with two-space indentation, text as received.
    pub fn rendered(&self) -> String {
        match &self.payload {
            Payload::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Payload::Text(text) => text.clone(),
        }
    }

    /// Highlighted markup for JSON payloads; text is only escaped.
    pub fn to_html(&self) -> String {
        match &self.payload {
            Payload::Json(_) => highlight::to_html(&self.rendered()),
            Payload::Text(text) => highlight::escape_html(text),
        }
    }

    /// Terminal-colored JSON; text is printed as received.
    pub fn to_ansi(&self) -> String {
        match &self.payload {
            Payload::Json(_) => highlight::to_ansi(&self.rendered()),
            Payload::Text(text) => text.clone(),
        }
    }

    /// e.g. `201 Created · 12 ms`
    pub fn status_line(&self) -> String {
        let reason = reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        let status = format!("{} {reason}", self.status);
        match self.elapsed_ms {
            Some(ms) => format!("{} · {ms} ms", status.trim_end()),
            None => status.trim_end().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_type_parses_body() {
        let view = ResponseView::from_response(
            200,
            Some("application/json; charset=utf-8"),
            r#"{"b":1,"a":2}"#.into(),
            5,
        );
        assert_eq!(view.payload, Payload::Json(json!({"b": 1, "a": 2})));
        assert_eq!(view.rendered(), "{\n  \"b\": 1,\n  \"a\": 2\n}");
    }

    #[test]
    fn non_json_content_type_stays_literal() {
        let view = ResponseView::from_response(200, Some("text/html"), "{\"a\":1}".into(), 1);
        assert_eq!(view.payload, Payload::Text("{\"a\":1}".into()));
        assert_eq!(view.rendered(), "{\"a\":1}");
    }

    #[test]
    fn text_payload_is_not_highlighted() {
        let view = ResponseView::from_response(200, Some("text/plain"), "{\"a\":1}".into(), 1);
        assert_eq!(view.to_html(), "{\"a\":1}");
        assert_eq!(view.to_ansi(), "{\"a\":1}");

        let markup = ResponseView::from_response(200, None, "<b>{\"a\":1}</b>".into(), 1);
        assert_eq!(markup.to_html(), "&lt;b&gt;{\"a\":1}&lt;/b&gt;");
    }

    #[test]
    fn json_payload_is_highlighted() {
        let view = ResponseView::from_response(200, Some("application/json"), "{\"a\":1}".into(), 1);
        assert!(view.to_html().contains(r#"<span class="json-key">"a":</span>"#));
    }

    #[test]
    fn invalid_json_falls_back_to_text() {
        let view = ResponseView::from_response(502, Some("application/json"), "oops".into(), 1);
        assert_eq!(view.payload, Payload::Text("oops".into()));
    }

    #[test]
    fn local_and_failure_views() {
        let rejected = ResponseView::no_data();
        assert_eq!(rejected.status, 400);
        assert_eq!(rejected.elapsed_ms, Some(0));
        assert_eq!(rejected.rendered(), "{\n  \"error\": \"No data given\"\n}");

        let failed = ResponseView::network_failure("connection refused");
        assert_eq!(failed.status, 500);
        assert_eq!(failed.elapsed_ms, None);
        match failed.payload {
            Payload::Json(v) => {
                assert_eq!(v["error"], "Failed to fetch data");
                assert_eq!(v["details"], "connection refused");
            }
            Payload::Text(_) => panic!("expected JSON payload"),
        }
    }

    #[test]
    fn status_line_includes_reason_and_time() {
        assert_eq!(ResponseView::no_data().status_line(), "400 Bad Request · 0 ms");
        assert_eq!(
            ResponseView::network_failure("x").status_line(),
            "500 Internal Server Error"
        );
    }
}
