// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Folio portfolio service.
//!
//! This crate provides the error type, the contact and attachment types, and
//! the adapter traits that the storage backends and test doubles implement.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::FolioError;
pub use types::{
    AdapterType, Attachment, ContactId, ContactRecord, Fields, HealthStatus, NewContact, Upload,
};

pub use traits::{ContactStore, FileStore, PluginAdapter};
