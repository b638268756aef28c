// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Folio integration tests.
//!
//! Provides in-memory adapters for fast, deterministic tests without a
//! database or filesystem.
//!
//! # Components
//!
//! - [`MemoryContactStore`] - Contact store keeping records in a `Vec`, with failure injection
//! - [`MemoryFileStore`] - File store capturing uploads, with per-filename failure injection

pub mod memory_files;
pub mod memory_store;

pub use memory_files::MemoryFileStore;
pub use memory_store::MemoryContactStore;
