// SPDX-License-Identifier: MPL-2.0

//! Booth facade
//!
//! The booth ties the session, filter engine, camera manager and export
//! together for an external orchestrator. The orchestrator sends
//! [`Message`]s to [`Booth::update`] and schedules the returned [`Action`];
//! orchestrators that prefer awaiting can call the typed operations
//! (`capture_now`, `timed_capture`, `import_uploads`, `create_strip`,
//! `save_strip`, `share_strip`) directly.
//!
//! # Architecture
//!
//! - `state`: booth model and message types
//! - `update`: message dispatch
//! - `handlers`: handlers grouped by domain

mod handlers;
mod state;
mod update;

pub use state::{Action, Booth, ImportSummary, Message};
