// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence layer for the Folio portfolio service.
//!
//! Provides WAL-mode SQLite contact storage with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`, plus write-once
//! on-disk storage for uploaded attachments.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod uploads;

pub use adapter::SqliteContactStore;
pub use database::Database;
pub use uploads::{sanitize_filename, DiskFileStore};
