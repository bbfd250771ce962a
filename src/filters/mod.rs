// SPDX-License-Identifier: MPL-2.0

//! Pixel filter engine
//!
//! Filters are deterministic per-pixel color transforms on tightly packed RGBA
//! buffers, optionally followed by a spatial pass (vignette, sharpen).
//!
//! ```text
//! RGBA buffer → validate → color pass → spatial pass → RGBA buffer
//!                                            ↓ (fails)
//!                                   color pass only (coarse)
//! ```
//!
//! Every channel is clamped to `[0, 255]` and then truncated toward zero.
//! Alpha is never touched.

pub mod color;
pub mod engine;
pub mod spatial;

pub use engine::FilterEngine;

use crate::errors::FilterError;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Named photo filters, in picker order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterType {
    /// No filter applied (displays as "Normal")
    #[default]
    None,
    /// Luma grayscale
    #[serde(alias = "grayscale")]
    BlackWhite,
    /// Boosted red, muted green and blue
    Vintage,
    /// Light sepia with an amber shift
    Warm,
    /// Blue tint with a cold shift
    Cool,
    /// Classic sepia matrix
    Sepia,
    /// High contrast and saturation with darkened corners
    Lomo,
    /// Mild contrast and brightness lift, sharpened
    Clarity,
    /// Light sepia, saturated and warm
    Sunrise,
}

/// How much of a filter was actually rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Color and spatial passes both ran
    Full,
    /// The spatial pass failed; only the color pass ran
    Coarse,
}

impl FilterType {
    /// Every filter in picker order
    pub const ALL: [FilterType; 9] = [
        FilterType::None,
        FilterType::BlackWhite,
        FilterType::Vintage,
        FilterType::Warm,
        FilterType::Cool,
        FilterType::Sepia,
        FilterType::Lomo,
        FilterType::Clarity,
        FilterType::Sunrise,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::BlackWhite => "blackWhite",
            FilterType::Vintage => "vintage",
            FilterType::Warm => "warm",
            FilterType::Cool => "cool",
            FilterType::Sepia => "sepia",
            FilterType::Lomo => "lomo",
            FilterType::Clarity => "clarity",
            FilterType::Sunrise => "sunrise",
        }
    }

    /// Display name for the filter picker
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::None => "Normal",
            FilterType::BlackWhite => "B&W",
            FilterType::Vintage => "Vintage",
            FilterType::Warm => "Warm",
            FilterType::Cool => "Cool",
            FilterType::Sepia => "Sepia",
            FilterType::Lomo => "Lomo",
            FilterType::Clarity => "Clarity",
            FilterType::Sunrise => "Sunrise",
        }
    }

    /// Parse a filter identifier; `grayscale` is accepted for B&W
    pub fn from_id(id: &str) -> Option<Self> {
        if id == "grayscale" {
            return Some(FilterType::BlackWhite);
        }
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Whether this filter ends with a spatial pass
    pub fn has_spatial_pass(&self) -> bool {
        matches!(self, FilterType::Lomo | FilterType::Clarity)
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Check that `data` is a tightly packed `width x height` RGBA buffer
pub fn validate_buffer(data: &[u8], width: u32, height: u32) -> FilterResult<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(FilterError::InvalidBuffer {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Apply a filter in place to an RGBA buffer
///
/// Invalid buffers are rejected before any byte is written. When the spatial
/// pass cannot run, the color pass result is kept and `Coarse` is returned.
pub fn apply_filter_rgba(
    data: &mut [u8],
    width: u32,
    height: u32,
    filter: FilterType,
) -> FilterResult<FilterOutcome> {
    validate_buffer(data, width, height)?;

    if filter == FilterType::None {
        return Ok(FilterOutcome::Full);
    }

    color::apply_color_pass(data, filter)?;

    let spatial = match filter {
        FilterType::Lomo => {
            spatial::apply_vignette(data, width, height);
            Ok(())
        }
        FilterType::Clarity => spatial::apply_sharpen(data, width, height),
        _ => Ok(()),
    };

    match spatial {
        Ok(()) => {
            debug!(filter = %filter, width, height, "Filter applied");
            Ok(FilterOutcome::Full)
        }
        Err(e) => {
            warn!(filter = %filter, error = %e, "Spatial pass failed, keeping color-only result");
            Ok(FilterOutcome::Coarse)
        }
    }
}

/// Apply a filter by identifier; unknown identifiers leave the buffer untouched
pub fn apply_filter_by_id(
    data: &mut [u8],
    width: u32,
    height: u32,
    filter_id: &str,
) -> FilterResult<FilterOutcome> {
    match FilterType::from_id(filter_id) {
        Some(filter) => apply_filter_rgba(data, width, height, filter),
        None => {
            validate_buffer(data, width, height)?;
            warn!(filter_id, "Unknown filter, leaving pixels unchanged");
            Ok(FilterOutcome::Full)
        }
    }
}

/// Apply a filter in place to an RGBA image
pub fn apply_filter_image(image: &mut RgbaImage, filter: FilterType) -> FilterResult<FilterOutcome> {
    let (width, height) = image.dimensions();
    apply_filter_rgba(image, width, height, filter)
}

/// Render a filtered copy of `original`, leaving it untouched
pub fn render_filtered(original: &RgbaImage, filter: FilterType) -> FilterResult<RgbaImage> {
    let mut output = original.clone();
    apply_filter_image(&mut output, filter)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| {
                let v = (i * 37 % 256) as u8;
                [v, 255 - v, v / 2, 200]
            })
            .collect()
    }

    #[test]
    fn test_none_is_identity() {
        let original = checker(5, 4);
        let mut data = original.clone();
        apply_filter_rgba(&mut data, 5, 4, FilterType::None).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let original = checker(3, 3);
        let mut data = original.clone();
        let outcome = apply_filter_by_id(&mut data, 3, 3, "polaroid").unwrap();
        assert_eq!(outcome, FilterOutcome::Full);
        assert_eq!(data, original);
    }

    #[test]
    fn test_buffer_length_mismatch_rejected() {
        let mut data = vec![0u8; 15];
        let result = apply_filter_rgba(&mut data, 2, 2, FilterType::Sepia);
        assert_eq!(
            result,
            Err(FilterError::InvalidBuffer {
                expected: 16,
                actual: 15
            })
        );
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut data = Vec::new();
        let result = apply_filter_rgba(&mut data, 0, 4, FilterType::Vintage);
        assert!(matches!(result, Err(FilterError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_alpha_preserved_by_every_filter() {
        for filter in FilterType::ALL {
            let mut data = checker(4, 4);
            apply_filter_rgba(&mut data, 4, 4, filter).unwrap();
            assert!(data.chunks_exact(4).all(|px| px[3] == 200), "{filter}");
        }
    }

    #[test]
    fn test_clarity_on_tiny_image_falls_back() {
        let mut data = checker(2, 2);
        let outcome = apply_filter_rgba(&mut data, 2, 2, FilterType::Clarity).unwrap();
        assert_eq!(outcome, FilterOutcome::Coarse);
    }

    #[test]
    fn test_grayscale_alias() {
        assert_eq!(FilterType::from_id("grayscale"), Some(FilterType::BlackWhite));
        assert_eq!(FilterType::from_id("blackWhite"), Some(FilterType::BlackWhite));
        assert_eq!(FilterType::from_id("nope"), None);
    }
}
