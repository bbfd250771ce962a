// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for video sources

use crate::errors::SourceError;
use std::sync::Arc;
use std::time::Instant;

/// Result type for video source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Frame data storage, shared without copying between source and pipeline
pub type FrameData = Arc<[u8]>;

/// Which way a camera points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Selfie camera, mirrored when configured
    #[default]
    Front,
    /// Rear camera
    Back,
    /// USB or otherwise unknown placement
    External,
}

impl Facing {
    /// Parse a platform location hint ("front", "user", "back", "environment")
    pub fn from_location(location: &str) -> Self {
        match location.to_lowercase().as_str() {
            "front" | "user" => Facing::Front,
            "back" | "rear" | "environment" => Facing::Back,
            _ => Facing::External,
        }
    }

    /// The facing a switch request asks for
    pub fn opposite(&self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back | Facing::External => Facing::Front,
        }
    }
}

/// A selectable camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// Backend-specific identifier
    pub id: String,
    pub facing: Facing,
}

impl std::fmt::Display for CameraDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A single RGBA video frame
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, `stride` bytes per row
    pub data: FrameData,
    /// Row stride in bytes (may include padding)
    pub stride: u32,
    /// Timestamp when frame was captured
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Wrap tightly packed RGBA data
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data: Arc::from(data.into_boxed_slice()),
            stride: width * 4, // RGBA = 4 bytes per pixel
            captured_at: Instant::now(),
        }
    }

    /// A source with no negotiated size yet reports 0x0
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
