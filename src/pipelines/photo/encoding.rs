// SPDX-License-Identifier: GPL-3.0-only

//! Async image encoding
//!
//! This module handles encoding composed strips to:
//! - JPEG (with quality control)
//! - PNG (lossless)
//!
//! All encoding operations run on the blocking pool.

use crate::constants::export;
use crate::errors::ExportError;
use crate::storage;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    #[default]
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }

    /// MIME type handed to share targets
    pub fn mime_type(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "image/jpeg",
            EncodingFormat::Png => "image/png",
        }
    }

    /// Guess a format from an output path; anything but `.png` is JPEG
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => EncodingFormat::Png,
            _ => EncodingFormat::Jpeg,
        }
    }
}

/// Encoding quality settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// Strip export default (0.9)
    Standard,
    /// Maximum quality (minimal compression)
    Maximum,
    /// Explicit JPEG quality, 1-100
    Custom(u8),
}

impl EncodingQuality {
    /// Get JPEG quality value (1-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            EncodingQuality::Low => 60,
            EncodingQuality::Medium => 80,
            EncodingQuality::Standard => export::DEFAULT_JPEG_QUALITY,
            EncodingQuality::Maximum => 98,
            EncodingQuality::Custom(q) => (*q).clamp(1, 100),
        }
    }
}

/// Encoded image data ready for saving
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

/// Strip encoder
#[derive(Debug, Clone, Copy)]
pub struct PhotoEncoder {
    format: EncodingFormat,
    quality: EncodingQuality,
}

impl PhotoEncoder {
    /// Create a new encoder with JPEG format at the export default quality
    pub fn new() -> Self {
        Self {
            format: EncodingFormat::Jpeg,
            quality: EncodingQuality::Standard,
        }
    }

    /// Set encoding format
    pub fn set_format(&mut self, format: EncodingFormat) {
        self.format = format;
    }

    /// Set encoding quality (only affects JPEG)
    pub fn set_quality(&mut self, quality: EncodingQuality) {
        self.quality = quality;
    }

    pub fn format(&self) -> EncodingFormat {
        self.format
    }

    /// Encode on the calling thread
    pub fn encode_blocking(&self, image: &RgbaImage) -> Result<EncodedImage, ExportError> {
        let data = match self.format {
            EncodingFormat::Jpeg => Self::encode_jpeg(image, self.quality)?,
            EncodingFormat::Png => Self::encode_png(image)?,
        };

        debug!(size = data.len(), format = ?self.format, "Encoding complete");

        Ok(EncodedImage {
            data,
            format: self.format,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Encode asynchronously on the blocking pool
    pub async fn encode(&self, image: RgbaImage) -> Result<EncodedImage, ExportError> {
        info!(
            width = image.width(),
            height = image.height(),
            format = ?self.format,
            "Starting encoding"
        );

        let encoder = *self;
        tokio::task::spawn_blocking(move || encoder.encode_blocking(&image))
            .await
            .map_err(|e| ExportError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }

    /// Save encoded image to disk asynchronously
    ///
    /// Generates a timestamped `photo-strip-<millis>` filename in `output_dir`,
    /// creating the directory if needed.
    pub async fn save(
        &self,
        encoded: &EncodedImage,
        output_dir: PathBuf,
    ) -> Result<PathBuf, ExportError> {
        let filepath = output_dir.join(storage::strip_filename(encoded.format));
        self.save_to(encoded, filepath).await
    }

    /// Save encoded image to an explicit path
    pub async fn save_to(
        &self,
        encoded: &EncodedImage,
        filepath: PathBuf,
    ) -> Result<PathBuf, ExportError> {
        info!(path = %filepath.display(), "Saving strip");

        let data = encoded.data.clone();
        let filepath_clone = filepath.clone();
        tokio::task::spawn_blocking(move || storage::write_file(&filepath_clone, &data))
            .await
            .map_err(|e| ExportError::SaveFailed(format!("Save task error: {}", e)))??;

        info!(path = %filepath.display(), "Strip saved successfully");
        Ok(filepath)
    }

    /// Encode image as JPEG (alpha dropped)
    fn encode_jpeg(image: &RgbaImage, quality: EncodingQuality) -> Result<Vec<u8>, ExportError> {
        let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());

        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| ExportError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    /// Encode image as PNG
    fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();

        image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageFormat::Png,
            )
            .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new()
    }
}
