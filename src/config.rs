// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{PhotoTimerSetting, caption, export, session};
use crate::errors::{AppError, AppResult};
use crate::pipelines::strip::{BackgroundColor, LayoutMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Feature switches that replace per-variant booth builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Offer the countdown timer choices
    pub has_timer: bool,
    /// Allow picking a specific camera by index
    pub has_multi_camera_select: bool,
    /// Offer the share action on the export step
    pub has_share: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            has_timer: true,
            has_multi_camera_select: true,
            has_share: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Photos per strip
    pub max_photos: usize,
    /// Mirror front-facing captures horizontally (selfie mode)
    pub mirror_front_camera: bool,
    /// Countdown before each capture
    pub photo_timer: PhotoTimerSetting,
    /// Enabled booth features
    pub capabilities: Capabilities,
    /// JPEG quality for exported strips (1-100)
    pub export_quality: u8,
    /// Layout preselected on the customize step
    pub default_layout: LayoutMode,
    /// Background preselected on the customize step
    pub default_background: BackgroundColor,
    /// Caption title drawn under stacked strips
    pub caption_title: String,
    /// Link appended to the share message
    pub share_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_photos: session::DEFAULT_MAX_PHOTOS,
            mirror_front_camera: true, // Default to mirrored (selfie mode)
            photo_timer: PhotoTimerSetting::default(),
            capabilities: Capabilities::default(),
            export_quality: export::DEFAULT_JPEG_QUALITY,
            default_layout: LayoutMode::default(),
            default_background: BackgroundColor::default(),
            caption_title: caption::DEFAULT_TITLE.to_string(),
            share_origin: export::DEFAULT_SHARE_ORIGIN.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults. The file is never written.
    pub fn load(path: &Path) -> AppResult<Self> {
        info!(path = %path.display(), "Loading configuration");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(contents: &str) -> AppResult<Self> {
        let config: Config = serde_json::from_str(contents)
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;

        config.validate()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> AppResult<()> {
        if self.max_photos == 0 {
            return Err(AppError::Config("max_photos must be at least 1".into()));
        }
        if !(1..=100).contains(&self.export_quality) {
            return Err(AppError::Config(format!(
                "export_quality must be 1-100, got {}",
                self.export_quality
            )));
        }
        Ok(())
    }

    /// Timer applied to captures, honoring the timer capability
    pub fn effective_timer(&self) -> PhotoTimerSetting {
        if self.capabilities.has_timer {
            self.photo_timer
        } else {
            PhotoTimerSetting::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "max_photos": 4 }"#).unwrap();
        assert_eq!(config.max_photos, 4);
        assert_eq!(config.export_quality, 90);
        assert!(config.mirror_front_camera);
    }

    #[test]
    fn test_zero_quality_rejected() {
        let result = Config::from_json(r#"{ "export_quality": 0 }"#);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_timer_disabled_by_capability() {
        let mut config = Config::default();
        config.capabilities.has_timer = false;
        assert_eq!(config.effective_timer(), PhotoTimerSetting::Off);
    }
}
