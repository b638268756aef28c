// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The editable request draft.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use folio_core::FolioError;

use crate::routes::Route;

/// HTTP methods offered by the simulator.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Every variant of `T` as shown to users, e.g. `GET|POST|PUT|PATCH|DELETE`.
pub fn choices<T: IntoEnumIterator + std::fmt::Display>() -> String {
    T::iter().map(|v| v.to_string()).collect::<Vec<_>>().join("|")
}

impl Method {
    /// Methods that carry a request body.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One query-parameter or header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
}

impl Row {
    /// An enabled row without description.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: String::new(),
            enabled: true,
        }
    }

    /// Enabled with a non-blank key.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BodyMode {
    #[default]
    None,
    Raw,
}

/// Sub-type of a raw body. Only `Json` changes what is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum RawType {
    #[default]
    #[serde(rename = "JSON")]
    #[strum(serialize = "JSON")]
    Json,
    Text,
    JavaScript,
    #[serde(rename = "HTML")]
    #[strum(serialize = "HTML")]
    Html,
    #[serde(rename = "XML")]
    #[strum(serialize = "XML")]
    Xml,
}

/// A file attached to the draft, sent as the `document` part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DraftFile {
    /// Read a file from disk, guessing its media type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, FolioError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| FolioError::Client {
            message: format!("cannot read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            content_type: guess_content_type(&filename).map(str::to_string),
            filename,
            bytes,
        })
    }
}

fn guess_content_type(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    let content_type = match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "json" => "application/json",
        "txt" | "md" => "text/plain",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(content_type)
}

/// Everything the user has composed for the next send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    pub method: Method,
    /// Path below `/api`, optionally with its own query string.
    pub path: String,
    pub query_params: Vec<Row>,
    pub headers: Vec<Row>,
    pub body_mode: BodyMode,
    pub raw_body: String,
    pub raw_type: RawType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<DraftFile>,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            method: Method::Get,
            path: "/about".to_string(),
            query_params: Vec::new(),
            headers: Vec::new(),
            body_mode: BodyMode::Raw,
            raw_body: String::new(),
            raw_type: RawType::Json,
            attachment: None,
        }
    }
}

impl RequestDraft {
    /// Set the path from user input, stripping a pasted `<base_url>/api` prefix.
    pub fn set_path(&mut self, input: &str, base_url: &str) {
        let api_root = format!("{}/api", base_url.trim_end_matches('/'));
        let path = input.trim().strip_prefix(api_root.as_str()).unwrap_or(input.trim());
        self.path = if path.is_empty() || path.starts_with('/') || path.starts_with('?') {
            path.to_string()
        } else {
            format!("/{path}")
        };
    }

    /// Point the draft at a catalog route, adopting its method.
    pub fn select_route(&mut self, route: &Route) {
        self.path = route.path.to_string();
        self.method = route.method;
    }

    /// The raw body, when raw mode is on and it is not blank.
    pub fn raw_payload(&self) -> Option<&str> {
        (self.body_mode == BodyMode::Raw && !self.raw_body.trim().is_empty())
            .then_some(self.raw_body.as_str())
    }

    pub fn active_params(&self) -> impl Iterator<Item = &Row> {
        self.query_params.iter().filter(|r| r.is_active())
    }

    /// Whether a write request would carry any data at all.
    pub fn has_payload(&self) -> bool {
        self.raw_payload().is_some()
            || self.active_params().next().is_some()
            || self.attachment.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use std::str::FromStr;

    const BASE: &str = "http://localhost:8080";

    #[test]
    fn write_methods() {
        assert!(Method::Post.is_write());
        assert!(Method::Put.is_write());
        assert!(Method::Patch.is_write());
        assert!(!Method::Get.is_write());
        assert!(!Method::Delete.is_write());
    }

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!(Method::from_str("patch").unwrap(), Method::Patch);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn set_path_strips_pasted_base_url() {
        let mut draft = RequestDraft::default();
        draft.set_path("http://localhost:8080/api/projects?x=1", BASE);
        assert_eq!(draft.path, "/projects?x=1");

        draft.set_path("/skills", "http://localhost:8080/");
        assert_eq!(draft.path, "/skills");
    }

    #[test]
    fn set_path_adds_leading_slash() {
        let mut draft = RequestDraft::default();
        draft.set_path("about", BASE);
        assert_eq!(draft.path, "/about");
    }

    #[test]
    fn select_route_sets_path_and_method() {
        let mut draft = RequestDraft::default();
        draft.select_route(routes::find("/contact").unwrap());
        assert_eq!(draft.path, "/contact");
        assert_eq!(draft.method, Method::Post);
    }

    #[test]
    fn payload_detection() {
        let mut draft = RequestDraft::default();
        assert!(!draft.has_payload());

        draft.raw_body = "   ".into();
        assert!(!draft.has_payload(), "blank body is not data");

        draft.query_params.push(Row {
            enabled: false,
            ..Row::new("a", "1")
        });
        draft.query_params.push(Row::new("  ", "x"));
        assert!(!draft.has_payload(), "disabled or blank-key params are not data");

        draft.query_params.push(Row::new("a", ""));
        assert!(draft.has_payload());
    }

    #[test]
    fn raw_body_ignored_outside_raw_mode() {
        let draft = RequestDraft {
            body_mode: BodyMode::None,
            raw_body: "{\"a\":1}".into(),
            ..RequestDraft::default()
        };
        assert!(draft.raw_payload().is_none());
        assert!(!draft.has_payload());
    }

    #[test]
    fn draft_serializes_with_camel_case_keys() {
        let draft = RequestDraft {
            raw_type: RawType::Html,
            ..RequestDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["method"], "GET");
        assert_eq!(json["bodyMode"], "raw");
        assert_eq!(json["rawType"], "HTML");
        assert!(json.get("queryParams").unwrap().is_array());

        let back: RequestDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn choices_list_every_variant() {
        assert_eq!(choices::<Method>(), "GET|POST|PUT|PATCH|DELETE");
        assert_eq!(choices::<RawType>(), "JSON|Text|JavaScript|HTML|XML");
    }

    #[tokio::test]
    async fn from_path_reads_file_and_guesses_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.PDF");
        std::fs::write(&path, b"%PDF").unwrap();

        let file = DraftFile::from_path(&path).await.unwrap();
        assert_eq!(file.filename, "resume.PDF");
        assert_eq!(file.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(file.bytes, b"%PDF");
    }

    #[tokio::test]
    async fn from_path_missing_file_errors() {
        let err = DraftFile::from_path(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, FolioError::Client { .. }));
    }
}
