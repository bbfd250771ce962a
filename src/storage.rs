// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for exported strips

use crate::constants::export;
use crate::errors::ExportError;
use crate::pipelines::photo::EncodingFormat;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default output directory: `<Pictures>/PhotoBooth`
///
/// Falls back to the home directory, then the working directory, when no
/// Pictures directory is known.
pub fn default_output_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(export::OUTPUT_FOLDER)
}

/// `photo-strip-<unix millis>.<ext>`
pub fn strip_filename(format: EncodingFormat) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!(
        "{}{}.{}",
        export::FILENAME_PREFIX,
        millis,
        format.extension()
    )
}

/// Write `data` to `path`, creating parent directories
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ExportError::SaveFailed(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    std::fs::write(path, data).map_err(|e| {
        ExportError::SaveFailed(format!("Failed to save {}: {}", path.display(), e))
    })?;

    debug!(path = %path.display(), size = data.len(), "File written");
    Ok(())
}
