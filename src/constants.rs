// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Photo timer setting for delayed capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhotoTimerSetting {
    /// Capture immediately
    Off,
    /// 3 second countdown (default)
    #[default]
    Sec3,
    /// 5 second countdown
    Sec5,
    /// 10 second countdown
    Sec10,
}

impl PhotoTimerSetting {
    /// All timer choices in cycling order
    pub const ALL: [PhotoTimerSetting; 4] = [
        PhotoTimerSetting::Off,
        PhotoTimerSetting::Sec3,
        PhotoTimerSetting::Sec5,
        PhotoTimerSetting::Sec10,
    ];

    /// Countdown length in whole seconds (0 = immediate)
    pub fn seconds(&self) -> u32 {
        match self {
            PhotoTimerSetting::Off => 0,
            PhotoTimerSetting::Sec3 => 3,
            PhotoTimerSetting::Sec5 => 5,
            PhotoTimerSetting::Sec10 => 10,
        }
    }

    /// Next setting when cycling through choices
    pub fn next(&self) -> Self {
        match self {
            PhotoTimerSetting::Off => PhotoTimerSetting::Sec3,
            PhotoTimerSetting::Sec3 => PhotoTimerSetting::Sec5,
            PhotoTimerSetting::Sec5 => PhotoTimerSetting::Sec10,
            PhotoTimerSetting::Sec10 => PhotoTimerSetting::Off,
        }
    }

    /// Parse a whole number of seconds into a timer setting
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.seconds() == seconds)
    }

    /// Display label for the timer button
    pub fn display_name(&self) -> &'static str {
        match self {
            PhotoTimerSetting::Off => "Off",
            PhotoTimerSetting::Sec3 => "3s",
            PhotoTimerSetting::Sec5 => "5s",
            PhotoTimerSetting::Sec10 => "10s",
        }
    }
}

/// Session limits
pub mod session {
    /// Photos per strip
    pub const DEFAULT_MAX_PHOTOS: usize = 3;
}

/// Countdown timing
pub mod timing {
    use super::Duration;

    /// Interval between countdown ticks
    pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

    /// Same interval in milliseconds, for scheduled handler messages
    pub const COUNTDOWN_TICK_MS: u64 = 1000;
}

/// Strip geometry (pixels)
pub mod strip {
    /// Stacked layout: fixed strip width
    pub const STACKED_WIDTH: u32 = 400;
    /// Side-by-side layout: fixed strip height
    pub const SIDE_BY_SIDE_HEIGHT: u32 = 400;
    /// Grid layout: fixed square size
    pub const GRID_SIZE: u32 = 800;
    /// Outer padding for every layout
    pub const PADDING: u32 = 40;
    /// Gap between photos
    pub const SPACING: u32 = 30;
    /// Stacked layout caption footer height
    pub const CAPTION_HEIGHT: u32 = 80;
    /// Caption title baseline, measured up from the bottom edge
    pub const CAPTION_OFFSET_FROM_BOTTOM: u32 = 50;
    /// Gap between caption title and date lines
    pub const CAPTION_LINE_GAP: u32 = 25;
    /// Integer scale applied to the 8x8 caption glyphs
    pub const CAPTION_GLYPH_SCALE: u32 = 2;
    /// Grid cell count
    pub const GRID_CELLS: usize = 4;
    /// White frame margin around each photo
    pub const FRAME_MARGIN: u32 = 10;
    /// Inner stroke width
    pub const INNER_STROKE_WIDTH: u32 = 1;
    /// Outer border width
    pub const OUTER_BORDER_WIDTH: u32 = 2;
    /// Longest canvas edge a strip may have
    pub const MAX_STRIP_EDGE: u32 = 16_384;
}

/// Strip colors as RGB triples
pub mod colors {
    pub const WHITE: [u8; 3] = [0xff, 0xff, 0xff];
    pub const BLACK: [u8; 3] = [0x00, 0x00, 0x00];
    /// hsl(251 86% 67%)
    pub const PRIMARY: [u8; 3] = [0x7d, 0x62, 0xf3];
    /// hsl(189 94% 42%)
    pub const ACCENT: [u8; 3] = [0x06, 0xb2, 0xd0];
    /// Photo frame fill
    pub const FRAME: [u8; 3] = WHITE;
    /// Thin stroke just inside the frame
    pub const INNER_STROKE: [u8; 3] = [0xe5, 0xe5, 0xe5];
    /// 2px border around the whole strip
    pub const OUTER_BORDER: [u8; 3] = [0xcc, 0xcc, 0xcc];
    /// Caption text on a white background
    pub const CAPTION_ON_WHITE: [u8; 3] = [0x66, 0x66, 0x66];
    /// Caption text on any other background
    pub const CAPTION_ON_COLOR: [u8; 3] = WHITE;
}

/// Caption defaults
pub mod caption {
    pub const DEFAULT_TITLE: &str = "BOOTHLY";
    /// Date line format
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Export and share
pub mod export {
    /// JPEG quality for exported strips (0.9 on a 0-1 scale)
    pub const DEFAULT_JPEG_QUALITY: u8 = 90;
    /// Saved strip filename prefix
    pub const FILENAME_PREFIX: &str = "photo-strip-";
    /// Folder created under the user's Pictures directory
    pub const OUTPUT_FOLDER: &str = "PhotoBooth";
    /// Share fallback link base
    pub const SHARE_LINK_BASE: &str = "https://wa.me/?text=";
    /// Share message body; the origin link is appended
    pub const SHARE_MESSAGE: &str = "Check out my photo strip!";
    /// Default origin mentioned in the share message
    pub const DEFAULT_SHARE_ORIGIN: &str = "https://photobooth.app";
}

/// Supported file formats
pub mod file_formats {
    /// Image extensions accepted for upload (lowercase)
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// HEIC/HEIF extensions, routed through a converter (lowercase)
    pub const HEIF_EXTENSIONS: &[&str] = &["heic", "heif"];

    /// MIME prefix accepted for upload
    pub const IMAGE_MIME_PREFIX: &str = "image/";

    /// Check if an extension is an upload-able image (case-insensitive)
    pub fn is_image_extension(ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        IMAGE_EXTENSIONS.contains(&ext_lower.as_str()) || is_heif_extension(&ext_lower)
    }

    /// Check if an extension is HEIC/HEIF (case-insensitive)
    pub fn is_heif_extension(ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        HEIF_EXTENSIONS.contains(&ext_lower.as_str())
    }

    /// Check if a MIME type names an image
    pub fn is_image_mime(mime: &str) -> bool {
        mime.to_lowercase().starts_with(IMAGE_MIME_PREFIX)
    }

    /// Check if a MIME type names HEIC/HEIF
    pub fn is_heif_mime(mime: &str) -> bool {
        let mime = mime.to_lowercase();
        mime == "image/heic" || mime == "image/heif"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_cycles_back_to_off() {
        let mut setting = PhotoTimerSetting::Off;
        for _ in 0..PhotoTimerSetting::ALL.len() {
            setting = setting.next();
        }
        assert_eq!(setting, PhotoTimerSetting::Off);
    }

    #[test]
    fn test_extension_checks_ignore_case() {
        assert!(file_formats::is_image_extension("JPG"));
        assert!(file_formats::is_image_extension("heic"));
        assert!(file_formats::is_heif_extension("HEIF"));
        assert!(!file_formats::is_image_extension("txt"));
    }
}
