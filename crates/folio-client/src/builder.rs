// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure translation of a [`RequestDraft`] into a concrete request.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::draft::{DraftFile, Method, RawType, RequestDraft};

/// Bytes left unescaped in query components: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Multipart part name carrying the attached file.
pub const FILE_PART: &str = "document";

/// Multipart part name carrying the raw body next to a file.
pub const DATA_PART: &str = "data";

/// A request ready to be issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: BuiltBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuiltBody {
    None,
    Raw {
        content_type: &'static str,
        text: String,
    },
    Multipart {
        file: DraftFile,
        data: Option<String>,
    },
}

/// Percent-encode one query key or value.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Build the outbound request for `draft` against `base_url`.
pub fn build(draft: &RequestDraft, base_url: &str) -> BuiltRequest {
    let mut url = format!("{}/api{}", base_url.trim_end_matches('/'), draft.path);

    let query = draft
        .active_params()
        .map(|p| format!("{}={}", encode_component(&p.key), encode_component(&p.value)))
        .collect::<Vec<_>>()
        .join("&");
    if !query.is_empty() {
        url.push(if draft.path.contains('?') { '&' } else { '?' });
        url.push_str(&query);
    }

    let body = if draft.method.is_write() {
        match (&draft.attachment, draft.raw_payload()) {
            (Some(file), data) => BuiltBody::Multipart {
                file: file.clone(),
                data: data.map(str::to_string),
            },
            (None, Some(text)) => BuiltBody::Raw {
                content_type: match draft.raw_type {
                    RawType::Json => "application/json",
                    _ => "text/plain",
                },
                text: text.to_string(),
            },
            (None, None) => BuiltBody::None,
        }
    } else {
        BuiltBody::None
    };

    let sets_content_type = !matches!(body, BuiltBody::None);
    let headers = draft
        .headers
        .iter()
        .filter(|h| h.is_active())
        .filter(|h| !(sets_content_type && h.key.trim().eq_ignore_ascii_case("content-type")))
        .map(|h| (h.key.trim().to_string(), h.value.clone()))
        .collect();

    BuiltRequest {
        method: draft.method,
        url,
        headers,
        body,
    }
}
