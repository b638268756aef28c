// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config errors as miette diagnostics.
//!
//! Figment errors are mapped to [`ConfigError`]s. Unknown keys are located in
//! the TOML text they came from and get a "did you mean" hint.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in {}", section_label(section))]
    #[diagnostic(code(folio::config::unknown_key), help("{}", unknown_key_help(suggestion.as_deref(), valid_keys)))]
    UnknownKey {
        key: String,
        /// Dotted table path, empty for the top level.
        section: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not recognized here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(folio::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(code(folio::config::missing_key), help("set `{key}` in folio.toml or via FOLIO_* env vars"))]
    MissingKey { key: String },

    /// Deserialized, but unusable.
    #[error("invalid setting: {message}")]
    #[diagnostic(code(folio::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(folio::config::other))]
    Other(String),
}

fn section_label(section: &str) -> String {
    if section.is_empty() {
        "the top level".to_string()
    } else {
        format!("[{section}]")
    }
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let valid = format!("valid keys here: {valid_keys}");
    match suggestion {
        Some(key) => format!("did you mean `{key}`? {valid}"),
        None => valid,
    }
}

/// Map every error inside `err` to a diagnostic.
///
/// `toml_sources` are `(name, content)` pairs used to point at offending keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| diagnose(&error, toml_sources))
        .collect()
}

fn diagnose(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    let section = error.path.join(".");
    match &error.kind {
        Kind::UnknownField(key, expected) => {
            let (span, src) = match source_for(error, toml_sources) {
                Some((name, content)) => match locate_key(content, &section, key) {
                    Some(offset) => (
                        Some(SourceSpan::new(offset.into(), key.len())),
                        Some(NamedSource::new(name, content.clone())),
                    ),
                    None => (None, None),
                },
                None => (None, None),
            };
            ConfigError::UnknownKey {
                key: key.clone(),
                suggestion: suggest_key(key, expected),
                valid_keys: expected.join(", "),
                section,
                span,
                src,
            }
        }
        Kind::MissingField(key) => ConfigError::MissingKey {
            key: qualified(&section, key),
        },
        Kind::InvalidType(found, expected) => ConfigError::InvalidType {
            key: section,
            found: found.to_string(),
            expected: expected.clone(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn qualified(section: &str, key: &str) -> String {
    if section.is_empty() {
        key.to_string()
    } else {
        format!("{section}.{key}")
    }
}

/// The TOML text an error came from. Inline strings carry no file name, so a
/// single candidate source is assumed to be the one.
fn source_for<'a>(
    error: &figment::Error,
    toml_sources: &'a [(String, String)],
) -> Option<&'a (String, String)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| s.file_path())
        .map(|p| p.display().to_string());
    match file {
        Some(file) => toml_sources.iter().find(|(name, _)| *name == file),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    }
}

/// Byte offset of `key` inside the `[section]` table of `content`.
///
/// Lines are scanned while tracking the current table header, so a key with
/// the same name in another table is never matched. An empty `section` means
/// the keys before the first header.
pub fn locate_key(content: &str, section: &str, key: &str) -> Option<usize> {
    let mut current = String::new();
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let body = line.trim_start();
        if let Some(header) = body.strip_prefix('[') {
            current = header
                .split(']')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            continue;
        }
        if current != section {
            continue;
        }
        let is_key = body
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if is_key {
            return Some(start + line.len() - body.len());
        }
    }
    None
}

/// Closest valid key to `unknown`, if any is similar enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Print each error to stderr with miette's graphical report.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
