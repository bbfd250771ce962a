// SPDX-License-Identifier: MPL-2.0

//! Photo Booth - capture or import photos and compose them into a strip
//!
//! This library provides the pipeline behind a client-side photo booth:
//! capturing still frames from a video source, pixel filters, strip
//! composition, the session state machine, and export.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: The `Booth` facade driven by an external orchestrator
//! - [`backends`]: Video source abstraction and lifecycle management
//! - [`filters`]: Per-pixel color filters and the filter engine
//! - [`pipelines`]: Photo capture/import/encoding and strip composition
//! - [`session`]: Ordered photos and workflow steps
//! - [`share`]: Share targets and the link fallback
//! - [`config`]: Booth configuration
//! - [`storage`]: Output directory and file naming
//!
//! # Example
//!
//! ```ignore
//! let mut booth = Booth::new(Config::default(), provider)?;
//! booth.update(Message::Start(AcquisitionMode::Upload)).await;
//! booth.import_uploads(files).await?;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod filters;
pub mod pipelines;
pub mod session;
pub mod share;
pub mod storage;

// Re-export commonly used types
pub use app::{Action, Booth, ImportSummary, Message};
pub use config::Config;
pub use constants::PhotoTimerSetting;
pub use errors::{AppError, AppResult};
pub use filters::{FilterEngine, FilterType};
pub use pipelines::strip::{BackgroundColor, LayoutMode, LayoutSpec, StripCompositor};
pub use session::{AcquisitionMode, Photo, PhotoId, Session, Step};
