// SPDX-License-Identifier: MPL-2.0

//! Photo capture from a video source
//!
//! This module grabs a single frame and turns it into an owned RGBA image at
//! the source's native resolution. Frames are never resampled.

use crate::backends::camera::SourceManager;
use crate::backends::camera::types::{CameraFrame, Facing, SourceResult};
use crate::errors::SourceError;
use image::RgbaImage;
use tracing::{debug, info};

/// Photo capture handler
pub struct PhotoCapture;

impl PhotoCapture {
    /// Copy a frame into an RGBA image, optionally flipped horizontally
    ///
    /// # Arguments
    /// * `frame` - Source frame (RGBA, possibly with row padding)
    /// * `mirrored` - Flip left/right, as for a front-facing preview
    ///
    /// # Returns
    /// * `Ok(RgbaImage)` - Image with the frame's exact dimensions
    /// * `Err(SourceError::NotReady)` - The frame has zero width or height
    pub fn capture_frame(frame: &CameraFrame, mirrored: bool) -> SourceResult<RgbaImage> {
        if frame.is_empty() {
            return Err(SourceError::NotReady);
        }

        let width = frame.width as usize;
        let height = frame.height as usize;
        let row_bytes = width * 4;
        let stride = frame.stride as usize;

        if stride < row_bytes || frame.data.len() < stride * (height - 1) + row_bytes {
            return Err(SourceError::Backend(format!(
                "Frame data too small: {}x{} stride {} with {} bytes",
                width,
                height,
                stride,
                frame.data.len()
            )));
        }

        let mut pixels = Vec::with_capacity(row_bytes * height);
        for row in frame.data.chunks(stride).take(height) {
            pixels.extend_from_slice(&row[..row_bytes]);
        }

        let mut image = RgbaImage::from_raw(frame.width, frame.height, pixels)
            .ok_or_else(|| SourceError::Backend("Failed to create RGBA image from frame".into()))?;

        if mirrored {
            image::imageops::flip_horizontal_in_place(&mut image);
        }

        debug!(
            width = frame.width,
            height = frame.height,
            mirrored,
            "Frame captured"
        );
        Ok(image)
    }

    /// Capture the current frame from the manager's active source
    ///
    /// Mirroring applies only to front-facing sources, and only when
    /// `mirror_front` is set.
    pub fn capture_from_source(
        manager: &SourceManager,
        mirror_front: bool,
    ) -> SourceResult<RgbaImage> {
        info!("Capturing photo from video source");

        let frame = manager.capture_frame()?;
        let mirrored = mirror_front && manager.active_facing() == Some(Facing::Front);
        Self::capture_frame(&frame, mirrored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    fn gradient_frame(width: u32, height: u32, padding: u32) -> CameraFrame {
        let stride = width * 4 + padding;
        let mut data = vec![0xAAu8; (stride * height) as usize];
        for y in 0..height {
            for x in 0..width {
                let i = (y * stride + x * 4) as usize;
                data[i..i + 4].copy_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        CameraFrame {
            width,
            height,
            data: Arc::from(data),
            stride,
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_capture_keeps_native_resolution() {
        let frame = gradient_frame(6, 3, 8);
        let image = PhotoCapture::capture_frame(&frame, false).unwrap();
        assert_eq!(image.dimensions(), (6, 3));
        assert_eq!(image.get_pixel(5, 2).0, [5, 2, 7, 255]);
    }

    #[test]
    fn test_mirrored_capture_flips_columns() {
        let frame = gradient_frame(4, 2, 0);
        let image = PhotoCapture::capture_frame(&frame, true).unwrap();
        assert_eq!(image.get_pixel(0, 1).0, [3, 1, 7, 255]);
        assert_eq!(image.get_pixel(3, 0).0, [0, 0, 7, 255]);
    }

    #[test]
    fn test_zero_sized_frame_not_ready() {
        let frame = CameraFrame::from_rgba(0, 0, Vec::new());
        assert_eq!(
            PhotoCapture::capture_frame(&frame, false),
            Err(SourceError::NotReady)
        );
    }
}
