// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio shell` command implementation.
//!
//! An interactive request simulator: each line edits the current draft or
//! sends it. The draft lives only as long as the shell.

use std::path::PathBuf;

use colored::Colorize;
use folio_client::routes::{self, Route};
use folio_client::{choices, BodyMode, DraftFile, Method, RawType, RequestDraft, Row, Simulator};
use folio_config::FolioConfig;
use folio_core::FolioError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::send::{parse_header, parse_param, print_view, run_routes, usage};

/// The command reference, with the method and raw-type choices filled in.
pub fn help_text() -> String {
    let rows = [
        (format!("method <{}>", choices::<Method>()), "set the method"),
        ("path <path or url>".to_string(), "set the path below /api"),
        ("route <path>".to_string(), "pick a catalog route (sets method too)"),
        ("param <key=value>".to_string(), "add or replace a query parameter"),
        ("unparam <key>".to_string(), "remove a query parameter"),
        ("header <Name: value>".to_string(), "add or replace a header"),
        ("unheader <name>".to_string(), "remove a header"),
        ("body <text>".to_string(), "set the raw body (empty clears it)"),
        ("mode <none|raw>".to_string(), "set the body mode"),
        (format!("type <{}>", choices::<RawType>()), "set the raw body type"),
        ("file [path]".to_string(), "attach a file (no path detaches)"),
        ("html".to_string(), "toggle HTML output"),
        ("show".to_string(), "print the draft"),
        ("send".to_string(), "send the draft"),
        ("clear".to_string(), "reset the draft"),
        ("routes".to_string(), "list the catalog"),
        ("help".to_string(), "this text"),
        ("exit".to_string(), "leave the shell"),
    ];
    let width = rows.iter().map(|(cmd, _)| cmd.len()).max().unwrap_or(0);
    let mut out = String::from("commands:");
    for (cmd, what) in &rows {
        out.push_str(&format!("\n  {cmd:<width$}  {what}"));
    }
    out
}

/// A change to the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Method(Method),
    Path(String),
    Route(&'static Route),
    Param(Row),
    Unparam(String),
    Header(Row),
    Unheader(String),
    Body(String),
    Mode(BodyMode),
    Type(RawType),
    File(Option<PathBuf>),
    Clear,
}

/// One shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Edit(Edit),
    ToggleHtml,
    Show,
    Send,
    Routes,
    Help,
    Exit,
}

/// Parse a non-empty shell line.
pub fn parse_command(line: &str) -> Result<Command, FolioError> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    let command = match word.to_ascii_lowercase().as_str() {
        "method" => Command::Edit(Edit::Method(parse_enum(rest, "method", choices::<Method>())?)),
        "path" => Command::Edit(Edit::Path(required(rest, "path")?.to_string())),
        "route" => {
            let path = required(rest, "route")?;
            let route = routes::find(path)
                .ok_or_else(|| usage(format!("unknown route `{path}`, see `routes`")))?;
            Command::Edit(Edit::Route(route))
        }
        "param" => Command::Edit(Edit::Param(parse_param(required(rest, "param")?)?)),
        "unparam" => Command::Edit(Edit::Unparam(required(rest, "unparam")?.to_string())),
        "header" => Command::Edit(Edit::Header(parse_header(required(rest, "header")?)?)),
        "unheader" => Command::Edit(Edit::Unheader(required(rest, "unheader")?.to_string())),
        "body" => Command::Edit(Edit::Body(rest.to_string())),
        "mode" => Command::Edit(Edit::Mode(parse_enum(rest, "mode", "none|raw".to_string())?)),
        "type" => Command::Edit(Edit::Type(parse_enum(rest, "type", choices::<RawType>())?)),
        "file" => Command::Edit(Edit::File((!rest.is_empty()).then(|| PathBuf::from(rest)))),
        "clear" => Command::Edit(Edit::Clear),
        "html" => Command::ToggleHtml,
        "show" => Command::Show,
        "send" => Command::Send,
        "routes" => Command::Routes,
        "help" | "?" => Command::Help,
        "exit" | "quit" | "/exit" | "/quit" => Command::Exit,
        other => return Err(usage(format!("unknown command `{other}`, try `help`"))),
    };
    Ok(command)
}

fn required<'a>(rest: &'a str, command: &str) -> Result<&'a str, FolioError> {
    if rest.is_empty() {
        Err(usage(format!("`{command}` needs an argument")))
    } else {
        Ok(rest)
    }
}

fn parse_enum<T: std::str::FromStr>(
    rest: &str,
    what: &str,
    expected: String,
) -> Result<T, FolioError> {
    rest.parse()
        .map_err(|_| usage(format!("invalid {what} `{rest}`, expected {expected}")))
}

/// Apply `edit` to `draft`. Rows are keyed case-insensitively for headers.
pub async fn apply(
    draft: &mut RequestDraft,
    edit: Edit,
    base_url: &str,
) -> Result<(), FolioError> {
    match edit {
        Edit::Method(method) => draft.method = method,
        Edit::Path(path) => draft.set_path(&path, base_url),
        Edit::Route(route) => draft.select_route(route),
        Edit::Param(row) => upsert(&mut draft.query_params, row, |a, b| a == b),
        Edit::Unparam(key) => draft.query_params.retain(|r| r.key != key),
        Edit::Header(row) => upsert(&mut draft.headers, row, |a, b| a.eq_ignore_ascii_case(b)),
        Edit::Unheader(key) => draft.headers.retain(|r| !r.key.eq_ignore_ascii_case(&key)),
        Edit::Body(text) => {
            draft.raw_body = text;
            if !draft.raw_body.is_empty() {
                draft.body_mode = BodyMode::Raw;
            }
        }
        Edit::Mode(mode) => draft.body_mode = mode,
        Edit::Type(raw_type) => draft.raw_type = raw_type,
        Edit::File(Some(path)) => draft.attachment = Some(DraftFile::from_path(&path).await?),
        Edit::File(None) => draft.attachment = None,
        Edit::Clear => *draft = RequestDraft::default(),
    }
    Ok(())
}

fn upsert(rows: &mut Vec<Row>, row: Row, same_key: impl Fn(&str, &str) -> bool) {
    match rows.iter_mut().find(|r| same_key(&r.key, &row.key)) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

/// Human-readable summary of the draft.
pub fn describe(draft: &RequestDraft) -> String {
    let mut out = format!("{} /api{}\n", draft.method, draft.path);
    for row in &draft.query_params {
        let state = if row.is_active() { "" } else { " (disabled)" };
        out.push_str(&format!("  param  {}={}{state}\n", row.key, row.value));
    }
    for row in &draft.headers {
        let state = if row.is_active() { "" } else { " (disabled)" };
        out.push_str(&format!("  header {}: {}{state}\n", row.key, row.value));
    }
    out.push_str(&format!("  body   {} ({})", draft.body_mode, draft.raw_type));
    if !draft.raw_body.is_empty() {
        out.push_str(&format!(": {}", draft.raw_body));
    }
    out.push('\n');
    if let Some(file) = &draft.attachment {
        out.push_str(&format!(
            "  file   {} ({} bytes)\n",
            file.filename,
            file.bytes.len()
        ));
    }
    out
}

/// Runs the `folio shell` interactive REPL.
pub async fn run_shell(config: FolioConfig) -> Result<(), FolioError> {
    let base_url = config.client.base_url.clone();
    let simulator = Simulator::new(base_url.clone())?;
    let mut draft = RequestDraft::default();
    let mut html = false;

    let mut rl = DefaultEditor::new()
        .map_err(|e| FolioError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "folio shell".bold().green());
    println!("Talking to {}. Type {} for commands.\n", base_url.cyan(), "help".yellow());

    loop {
        let prompt = format!("{} {}> ", draft.method.to_string().green(), draft.path);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match parse_command(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}: {e}", "error".red());
                        continue;
                    }
                };
                debug!(?command, "shell command");

                match command {
                    Command::Edit(edit) => {
                        if let Err(e) = apply(&mut draft, edit, &base_url).await {
                            eprintln!("{}: {e}", "error".red());
                        }
                    }
                    Command::ToggleHtml => {
                        html = !html;
                        println!("html output {}", if html { "on" } else { "off" });
                    }
                    Command::Show => print!("{}", describe(&draft)),
                    Command::Send => match simulator.send(&draft).await {
                        Ok(view) => print_view(&view, html),
                        Err(e) => eprintln!("{}: {e}", "error".red()),
                    },
                    Command::Routes => run_routes(),
                    Command::Help => println!("{}", help_text()),
                    Command::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
