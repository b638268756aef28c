// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio send` and `folio routes` command implementations.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use folio_client::{DraftFile, Method, RawType, RequestDraft, ResponseView, Row, Simulator, ROUTES};
use folio_config::FolioConfig;
use folio_core::FolioError;

/// Flags describing a single simulated request.
#[derive(Args, Debug)]
pub struct SendArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE).
    pub method: Method,

    /// Path below `/api`, e.g. `/about`. A full `<base>/api/...` URL is accepted.
    pub path: String,

    /// Query parameter as `key=value`. Repeatable.
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Header as `Name: value`. Repeatable.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Raw request body.
    #[arg(short, long)]
    pub body: Option<String>,

    /// Raw body type (JSON, Text, JavaScript, HTML, XML).
    #[arg(long, default_value = "JSON")]
    pub raw_type: RawType,

    /// File to attach as the `document` part.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the highlighted body as HTML markup instead of terminal colors.
    #[arg(long)]
    pub html: bool,

    /// Server to talk to, overriding `[client].base_url`.
    #[arg(long)]
    pub base_url: Option<String>,
}

impl SendArgs {
    /// Assemble the draft these flags describe.
    pub async fn to_draft(&self, base_url: &str) -> Result<RequestDraft, FolioError> {
        let mut draft = RequestDraft {
            method: self.method,
            raw_type: self.raw_type,
            ..RequestDraft::default()
        };
        draft.set_path(&self.path, base_url);
        for param in &self.params {
            draft.query_params.push(parse_param(param)?);
        }
        for header in &self.headers {
            draft.headers.push(parse_header(header)?);
        }
        if let Some(body) = &self.body {
            draft.raw_body = body.clone();
        }
        if let Some(path) = &self.file {
            draft.attachment = Some(DraftFile::from_path(path).await?);
        }
        Ok(draft)
    }
}

/// Parse `key=value`. A missing `=` means an empty value.
pub fn parse_param(input: &str) -> Result<Row, FolioError> {
    let (key, value) = input.split_once('=').unwrap_or((input, ""));
    row(key, value, input)
}

/// Parse `Name: value`, also accepting `Name=value`.
pub fn parse_header(input: &str) -> Result<Row, FolioError> {
    let (key, value) = input
        .split_once(':')
        .or_else(|| input.split_once('='))
        .ok_or_else(|| usage(format!("expected `Name: value`, got `{input}`")))?;
    row(key, value, input)
}

fn row(key: &str, value: &str, input: &str) -> Result<Row, FolioError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(usage(format!("missing key in `{input}`")));
    }
    Ok(Row::new(key, value.trim()))
}

pub(crate) fn usage(message: String) -> FolioError {
    FolioError::Client {
        message,
        source: None,
    }
}

/// Runs the `folio send` command.
pub async fn run_send(config: &FolioConfig, args: SendArgs) -> Result<(), FolioError> {
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| config.client.base_url.clone());
    let draft = args.to_draft(&base_url).await?;
    let simulator = Simulator::new(base_url)?;
    let view = simulator.send(&draft).await?;
    print_view(&view, args.html);
    Ok(())
}

/// Print a response: colored status line, then the highlighted body.
pub fn print_view(view: &ResponseView, html: bool) {
    let status = view.status_line();
    let status = match view.status {
        200..=299 => status.green(),
        400..=499 => status.yellow(),
        _ => status.red(),
    };
    println!("{}", status.bold());
    if html {
        println!("{}", view.to_html());
    } else {
        println!("{}", view.to_ansi());
    }
}

/// Runs the `folio routes` command.
pub fn run_routes() {
    for route in &ROUTES {
        println!(
            "{:<7} {:<14} {}",
            route.method.to_string().bold(),
            route.path.cyan(),
            route.description.dimmed()
        );
    }
}
