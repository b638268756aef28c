// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON syntax highlighting as HTML spans or ANSI colors.
//!
//! Text that does not parse as JSON is passed through (HTML-escaped for
//! the HTML renderer) without highlighting.

use std::sync::LazyLock;

use colored::Colorize;
use regex::Regex;
use serde_json::Value;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"("(\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(\s*:)?|\b(true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?)"#,
    )
    .unwrap()
});

/// Lexical class of a highlighted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Key,
    String,
    Boolean,
    Number,
    Null,
}

impl TokenKind {
    fn classify(token: &str) -> Self {
        if token.starts_with('"') {
            if token.ends_with(':') {
                Self::Key
            } else {
                Self::String
            }
        } else if token == "true" || token == "false" {
            Self::Boolean
        } else if token == "null" {
            Self::Null
        } else {
            Self::Number
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Key => "json-key",
            Self::String => "json-string",
            Self::Boolean => "json-boolean",
            Self::Number => "json-number",
            Self::Null => "json-null",
        }
    }

    fn paint(self, token: &str) -> String {
        match self {
            Self::Key => token.cyan(),
            Self::String => token.yellow(),
            Self::Boolean => token.blue(),
            Self::Number => token.green(),
            Self::Null => token.magenta(),
        }
        .to_string()
    }
}

/// Highlight `text` as HTML: `<span class="json-key">…</span>` and friends.
pub fn to_html(text: &str) -> String {
    match pretty(text) {
        Some(pretty) => tokenize(&escape_html(&pretty), |kind, token| {
            format!(r#"<span class="{}">{token}</span>"#, kind.css_class())
        }),
        None => escape_html(text),
    }
}

/// Highlight `text` with ANSI colors.
pub fn to_ansi(text: &str) -> String {
    match pretty(text) {
        Some(pretty) => tokenize(&pretty, |kind, token| kind.paint(token)),
        None => text.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn pretty(text: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

fn tokenize(text: &str, mut paint: impl FnMut(TokenKind, &str) -> String) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut last = 0;
    for token in TOKEN.find_iter(text) {
        out.push_str(&text[last..token.start()]);
        out.push_str(&paint(TokenKind::classify(token.as_str()), token.as_str()));
        last = token.end();
    }
    out.push_str(&text[last..]);
    out
}
