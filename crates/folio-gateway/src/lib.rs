// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Folio portfolio service.
//!
//! Serves the read-only portfolio sections, ingests contact submissions in
//! multipart, JSON, or text form, and serves stored uploads back.

pub mod content;
pub mod encoding;
pub mod handlers;
pub mod ingest;
pub mod server;

pub use content::{PortfolioContent, Section};
pub use encoding::BodyEncoding;
pub use ingest::{ContactCreated, ContactIngestor, IngestError, ParsedBody};
pub use server::{bind, router, serve, GatewayState, ServerConfig};
