// SPDX-License-Identifier: GPL-3.0-only

//! Upload import
//!
//! Files are filtered by extension or MIME type, truncated to the free slots
//! in the session, then decoded concurrently. Files that fail to decode are
//! reported and skipped; the rest of the batch still imports.

use crate::constants::file_formats;
use crate::errors::DecodeError;
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A user-supplied file
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    /// MIME type reported by the picker, if any
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes,
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, None, bytes))
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Whether the name or MIME type names an image we accept
    pub fn is_supported(&self) -> bool {
        self.extension()
            .is_some_and(|ext| file_formats::is_image_extension(&ext))
            || self
                .mime
                .as_deref()
                .is_some_and(file_formats::is_image_mime)
    }

    /// Whether the file needs HEIC/HEIF conversion
    pub fn is_heif(&self) -> bool {
        self.extension()
            .is_some_and(|ext| file_formats::is_heif_extension(&ext))
            || self.mime.as_deref().is_some_and(file_formats::is_heif_mime)
    }
}

/// Converts HEIC/HEIF bytes into a format the `image` crate decodes
pub trait HeifConverter: Send + Sync {
    fn convert(&self, bytes: &[u8]) -> Result<Vec<u8>, DecodeError>;
}

/// Converter used when no HEIC decoder is available; every file is skipped
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableHeifConverter;

impl HeifConverter for UnavailableHeifConverter {
    fn convert(&self, _bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
        Err(DecodeError::HeifConversion(
            "no HEIC/HEIF decoder available".into(),
        ))
    }
}

/// A decoded upload
#[derive(Debug, Clone)]
pub struct ImportedImage {
    pub name: String,
    pub image: RgbaImage,
}

/// A file left out of the import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub name: String,
    pub reason: DecodeError,
}

/// Result of importing a batch
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Decoded images, in selection order
    pub imported: Vec<ImportedImage>,
    /// Files that were unsupported or failed to decode
    pub skipped: Vec<SkippedFile>,
    /// Supported files dropped because the session had no room
    pub truncated: usize,
}

/// Decode one upload to RGBA
pub fn decode_upload(
    file: &UploadFile,
    converter: &dyn HeifConverter,
) -> Result<RgbaImage, DecodeError> {
    if !file.is_supported() {
        return Err(DecodeError::UnsupportedFormat(file.name.clone()));
    }

    let image = if file.is_heif() {
        let converted = converter.convert(&file.bytes)?;
        image::load_from_memory(&converted)?
    } else {
        image::load_from_memory(&file.bytes)?
    };

    Ok(image.to_rgba8())
}

/// Import up to `remaining_slots` supported files
pub async fn import_uploads(
    files: Vec<UploadFile>,
    remaining_slots: usize,
    converter: Arc<dyn HeifConverter>,
) -> ImportReport {
    let mut report = ImportReport::default();

    let (supported, unsupported): (Vec<_>, Vec<_>) =
        files.into_iter().partition(UploadFile::is_supported);

    for file in unsupported {
        warn!(name = %file.name, "Skipping unsupported upload");
        report.skipped.push(SkippedFile {
            reason: DecodeError::UnsupportedFormat(file.name.clone()),
            name: file.name,
        });
    }

    report.truncated = supported.len().saturating_sub(remaining_slots);
    if report.truncated > 0 {
        info!(
            dropped = report.truncated,
            remaining_slots, "Upload batch exceeds free slots"
        );
    }

    let tasks = supported.into_iter().take(remaining_slots).map(|file| {
        let converter = Arc::clone(&converter);
        tokio::task::spawn_blocking(move || {
            let result = decode_upload(&file, converter.as_ref());
            (file.name, result)
        })
    });

    for joined in futures::future::join_all(tasks).await {
        match joined {
            Ok((name, Ok(image))) => {
                debug!(name = %name, width = image.width(), height = image.height(), "Upload decoded");
                report.imported.push(ImportedImage { name, image });
            }
            Ok((name, Err(reason))) => {
                warn!(name = %name, error = %reason, "Skipping upload that failed to decode");
                report.skipped.push(SkippedFile { name, reason });
            }
            Err(e) => {
                warn!(error = %e, "Decode task failed");
                report.skipped.push(SkippedFile {
                    name: String::new(),
                    reason: DecodeError::Corrupt(format!("Decode task error: {}", e)),
                });
            }
        }
    }

    info!(
        imported = report.imported.len(),
        skipped = report.skipped.len(),
        "Upload import complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut buffer = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_mime_type_accepted_without_extension() {
        let file = UploadFile::new("capture", Some("image/png".into()), Vec::new());
        assert!(file.is_supported());
        assert!(!UploadFile::new("notes.txt", None, Vec::new()).is_supported());
    }

    #[tokio::test]
    async fn test_batch_truncated_before_decode() {
        let files = vec![
            UploadFile::new("a.png", None, png_bytes(2, 2)),
            UploadFile::new("b.txt", None, b"hello".to_vec()),
            UploadFile::new("c.png", None, png_bytes(3, 1)),
            UploadFile::new("d.png", None, png_bytes(1, 1)),
        ];

        let report = import_uploads(files, 2, Arc::new(UnavailableHeifConverter)).await;

        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.imported[0].name, "a.png");
        assert_eq!(report.imported[1].image.dimensions(), (3, 1));
        assert_eq!(report.truncated, 1);
        assert_eq!(report.skipped.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_and_heic_files_skipped() {
        let files = vec![
            UploadFile::new("broken.jpg", None, vec![0xFF, 0xD8, 0x00]),
            UploadFile::new("IMG_0001.HEIC", None, vec![0u8; 32]),
            UploadFile::new("ok.png", None, png_bytes(2, 2)),
        ];

        let report = import_uploads(files, 3, Arc::new(UnavailableHeifConverter)).await;

        assert_eq!(report.imported.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert!(
            report
                .skipped
                .iter()
                .any(|s| matches!(s.reason, DecodeError::HeifConversion(_)))
        );
    }
}
