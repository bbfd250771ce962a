// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for photo acquisition and strip composition
//!
//! All heavy pixel work runs on tokio's blocking pool so the orchestrator's
//! event loop keeps responding.
//!
//! # Pipeline Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Video Source │ ──▶ │  Photo Pipeline   │ ──▶ │   Session    │
//! │ Upload Files │     │  - Mirror         │     │  (ordered)   │
//! │              │     │  - Live filter    │     │              │
//! │              │     │  - Decode         │     │              │
//! └──────────────┘     └───────────────────┘     └──────┬───────┘
//!                                                        │
//! ┌──────────────┐     ┌───────────────────┐            │
//! │  JPEG File   │ ◀── │  Strip Pipeline   │ ◀──────────┘
//! │              │     │  - Layout         │
//! │              │     │  - Render         │
//! │              │     │  - Encoding       │
//! └──────────────┘     └───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Capture, upload import, countdown and encoding
//! - [`strip`]: Layout geometry and strip rendering

pub mod photo;
pub mod strip;
