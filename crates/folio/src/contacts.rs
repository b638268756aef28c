// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `folio contacts` command implementation.
//!
//! Reads stored submissions straight from the SQLite database, newest first.

use colored::Colorize;
use folio_config::FolioConfig;
use folio_core::{ContactRecord, ContactStore, FolioError};
use folio_storage::SqliteContactStore;

/// Runs the `folio contacts` command.
pub async fn run_contacts(
    config: &FolioConfig,
    limit: Option<i64>,
    json: bool,
) -> Result<(), FolioError> {
    let store = SqliteContactStore::new(config.storage.clone());
    store.initialize().await?;
    let records = store.list(limit).await?;
    store.close().await?;

    if json {
        let documents: Vec<_> = records.iter().map(as_json).collect();
        let out = serde_json::to_string_pretty(&documents)
            .map_err(|e| FolioError::Internal(format!("failed to encode contacts: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "no contacts stored".dimmed());
        return Ok(());
    }
    for record in &records {
        print!("{}", format_record(record));
    }
    Ok(())
}

fn as_json(record: &ContactRecord) -> serde_json::Value {
    let mut document = serde_json::Map::new();
    document.insert("id".into(), record.id.0.clone().into());
    document.extend(record.to_document());
    serde_json::Value::Object(document)
}

fn format_record(record: &ContactRecord) -> String {
    let mut out = format!(
        "{} {}\n",
        record.id.0.bold(),
        record.created_at.to_rfc3339().dimmed()
    );
    for (key, value) in &record.fields {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.push_str(&format!("  {}: {value}\n", key.cyan()));
    }
    out
}
