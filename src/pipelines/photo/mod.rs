// SPDX-License-Identifier: MPL-2.0

//! Photo acquisition pipeline
//!
//! ```text
//! Video Source → Capture (mirror) → Live Filter → Session
//! Upload Files → Decode (HEIC convert) ──────────→ Session
//! ```
//!
//! # Pipeline Stages
//!
//! 1. **Capture**: Copy one frame at native resolution, mirrored for selfies
//! 2. **Filter**: Render the live filter selected at capture time
//! 3. **Import**: Decode uploaded files concurrently, skipping failures
//! 4. **Encoding**: Convert composed strips to JPEG/PNG for export

pub mod capture;
pub mod encoding;
pub mod import;
pub mod timer;

pub use capture::PhotoCapture;
pub use encoding::{EncodedImage, EncodingFormat, EncodingQuality, PhotoEncoder};
pub use import::{
    HeifConverter, ImportReport, ImportedImage, SkippedFile, UnavailableHeifConverter,
    UploadFile, import_uploads,
};
pub use timer::{Countdown, CountdownResult, CountdownTick, run_countdown};

use crate::backends::camera::SourceManager;
use crate::errors::AppResult;
use crate::filters::{FilterOutcome, FilterType, apply_filter_image};
use image::RgbaImage;
use tracing::info;

/// A freshly captured photo, before it joins the session
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    /// Unfiltered pixels
    pub original: RgbaImage,
    /// Pixels with `filter` rendered
    pub filtered: RgbaImage,
    pub filter: FilterType,
    pub outcome: FilterOutcome,
}

/// Capture pipeline: source frame → capture → live filter
pub struct PhotoPipeline {
    mirror_front: bool,
}

impl PhotoPipeline {
    pub fn new(mirror_front: bool) -> Self {
        Self { mirror_front }
    }

    /// Capture from the active source and render `filter` over it
    ///
    /// The filter render runs on the blocking pool.
    pub async fn capture(
        &self,
        manager: &SourceManager,
        filter: FilterType,
    ) -> AppResult<CapturedPhoto> {
        let original = PhotoCapture::capture_from_source(manager, self.mirror_front)?;
        info!(
            width = original.width(),
            height = original.height(),
            filter = %filter,
            "Photo captured"
        );
        Self::with_filter(original, filter).await
    }

    /// Render `filter` over an already captured image on the blocking pool
    pub async fn with_filter(original: RgbaImage, filter: FilterType) -> AppResult<CapturedPhoto> {
        let captured =
            tokio::task::spawn_blocking(move || Self::with_filter_blocking(original, filter))
                .await??;
        Ok(captured)
    }

    /// Render `filter` on the calling thread
    pub fn with_filter_blocking(
        original: RgbaImage,
        filter: FilterType,
    ) -> AppResult<CapturedPhoto> {
        let mut filtered = original.clone();
        let outcome = apply_filter_image(&mut filtered, filter)?;
        Ok(CapturedPhoto {
            original,
            filtered,
            filter,
            outcome,
        })
    }
}
