// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request simulator for the Folio portfolio API.
//!
//! A [`RequestDraft`] holds what the user composed. [`builder::build`] turns
//! it into a concrete request, [`Simulator`] issues it, and [`ResponseView`]
//! renders the answer with JSON highlighting.

pub mod builder;
pub mod draft;
pub mod highlight;
pub mod routes;
pub mod simulator;
pub mod view;

pub use builder::{build, BuiltBody, BuiltRequest};
pub use draft::{choices, BodyMode, DraftFile, Method, RawType, RequestDraft, Row};
pub use routes::{Route, ROUTES};
pub use simulator::{SendError, SendPhase, Simulator};
pub use view::{Payload, ResponseView};
