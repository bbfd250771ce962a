// SPDX-License-Identifier: MPL-2.0

//! Video source abstraction
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   Booth (handlers)  │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    SourceManager    │  ← Device selection, single in-flight acquisition
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ SourceProvider Trait│  ← Enumerate and open devices
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │  VideoSource Trait  │  ← Frames from one open device
//! └─────────────────────┘
//! ```

pub mod manager;
pub mod still_source;
pub mod types;

pub use manager::SourceManager;
pub use still_source::{StillSource, StillSourceProvider};
pub use types::*;

use futures::future::BoxFuture;

/// An open video source
///
/// Frames are RGBA at the source's native resolution.
pub trait VideoSource: Send + Sync {
    /// The device this source was opened from
    fn device(&self) -> &CameraDevice;

    /// The most recent frame
    ///
    /// A source that has not produced a sized frame yet returns
    /// `SourceError::NotReady` or a 0x0 frame.
    fn current_frame(&self) -> SourceResult<CameraFrame>;

    /// Release the underlying device
    fn stop(&mut self);
}

/// Enumerates and opens camera devices
pub trait SourceProvider: Send + Sync {
    /// List available cameras
    fn enumerate(&self) -> SourceResult<Vec<CameraDevice>>;

    /// Open a device
    ///
    /// Opening may wait on warm-up or a permission prompt.
    fn open(&self, device: &CameraDevice) -> BoxFuture<'static, SourceResult<Box<dyn VideoSource>>>;
}
