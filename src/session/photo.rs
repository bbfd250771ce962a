// SPDX-License-Identifier: GPL-3.0-only

//! Photos held by a session

use crate::filters::FilterType;
use chrono::{DateTime, Local};
use image::RgbaImage;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique photo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a photo came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// Captured from a camera
    Camera { device: String },
    /// Imported from a file
    Upload { name: String },
}

/// A photo in the session
///
/// `pixels` always holds `original` with `applied_filter` rendered over it.
#[derive(Debug, Clone)]
pub struct Photo {
    pub id: PhotoId,
    /// Unfiltered pixels, kept so filters never stack
    pub original: Arc<RgbaImage>,
    /// Pixels as displayed and composed
    pub pixels: Arc<RgbaImage>,
    pub applied_filter: FilterType,
    pub captured_at: DateTime<Local>,
    pub source: PhotoSource,
}

impl Photo {
    /// A photo with no filter applied
    pub fn new(image: RgbaImage, source: PhotoSource) -> Self {
        let original = Arc::new(image);
        Self {
            id: PhotoId::new(),
            pixels: Arc::clone(&original),
            original,
            applied_filter: FilterType::None,
            captured_at: Local::now(),
            source,
        }
    }

    /// A photo captured with a live filter already rendered
    pub fn with_filter(
        original: RgbaImage,
        filtered: RgbaImage,
        filter: FilterType,
        source: PhotoSource,
    ) -> Self {
        Self {
            id: PhotoId::new(),
            original: Arc::new(original),
            pixels: Arc::new(filtered),
            applied_filter: filter,
            captured_at: Local::now(),
            source,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}
