// SPDX-License-Identifier: MPL-2.0

//! Per-pixel color transforms
//!
//! Channels are processed as `f32` in `0.0..=255.0`, clamped after every
//! stage, and truncated when written back.

use super::{FilterResult, FilterType};
use crate::errors::FilterError;

/// Colorize target for the cool filter (#0066ff)
const COOL_TINT: (f32, f32, f32) = (0.0, 102.0, 255.0);

/// Run the color part of `filter` over every pixel
pub fn apply_color_pass(data: &mut [u8], filter: FilterType) -> FilterResult<()> {
    let len = data.len();
    let pixels: &mut [[u8; 4]] =
        bytemuck::try_cast_slice_mut(data).map_err(|_| FilterError::InvalidBuffer {
            expected: len - len % 4,
            actual: len,
        })?;

    for px in pixels.iter_mut() {
        let (r, g, b) = transform(px[0] as f32, px[1] as f32, px[2] as f32, filter);
        px[0] = to_channel(r);
        px[1] = to_channel(g);
        px[2] = to_channel(b);
    }

    Ok(())
}

/// Clamp to `[0, 255]` then truncate
#[inline]
pub fn to_channel(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Color transform for a single pixel
#[inline]
pub fn transform(r: f32, g: f32, b: f32, filter: FilterType) -> (f32, f32, f32) {
    match filter {
        FilterType::None => (r, g, b),

        FilterType::BlackWhite => {
            let gray = luma(r, g, b);
            (gray, gray, gray)
        }

        FilterType::Sepia => sepia(r, g, b),

        FilterType::Vintage => (clamp(r * 1.2), clamp(g * 0.9), clamp(b * 0.8)),

        FilterType::Warm => {
            let (r, g, b) = blend(r, g, b, sepia(r, g, b), 0.3);
            (clamp(r * 1.1), g, clamp(b * 0.85))
        }

        FilterType::Cool => {
            let (r, g, b) = blend(r, g, b, COOL_TINT, 0.1);
            (clamp(r * 0.9), clamp(g * 0.95), clamp(b * 1.1))
        }

        FilterType::Lomo => {
            let (r, g, b) = contrast(r, g, b, 1.5);
            let (r, g, b) = saturation(r, g, b, 2.0);
            brightness(r, g, b, 0.9)
        }

        FilterType::Clarity => {
            let (r, g, b) = contrast(r, g, b, 1.2);
            let (r, g, b) = brightness(r, g, b, 1.1);
            saturation(r, g, b, 1.1)
        }

        FilterType::Sunrise => {
            let (r, g, b) = blend(r, g, b, sepia(r, g, b), 0.3);
            let (r, g, b) = saturation(r, g, b, 1.3);
            let (r, g, b) = brightness(r, g, b, 1.1);
            (clamp(r * 1.05), g, clamp(b * 0.9))
        }
    }
}

/// BT.601 luma
#[inline]
fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

#[inline]
fn clamp(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

#[inline]
fn sepia(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    (
        clamp(0.393 * r + 0.769 * g + 0.189 * b),
        clamp(0.349 * r + 0.686 * g + 0.168 * b),
        clamp(0.272 * r + 0.534 * g + 0.131 * b),
    )
}

/// Linear mix from the source color toward `target` by `amount`
#[inline]
fn blend(r: f32, g: f32, b: f32, target: (f32, f32, f32), amount: f32) -> (f32, f32, f32) {
    (
        r + (target.0 - r) * amount,
        g + (target.1 - g) * amount,
        b + (target.2 - b) * amount,
    )
}

/// Contrast around mid-gray
#[inline]
fn contrast(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    (
        clamp((r - 128.0) * factor + 128.0),
        clamp((g - 128.0) * factor + 128.0),
        clamp((b - 128.0) * factor + 128.0),
    )
}

/// Saturation relative to luma
#[inline]
fn saturation(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    let gray = luma(r, g, b);
    (
        clamp(gray + (r - gray) * factor),
        clamp(gray + (g - gray) * factor),
        clamp(gray + (b - gray) * factor),
    )
}

/// Multiplicative brightness
#[inline]
fn brightness(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    (clamp(r * factor), clamp(g * factor), clamp(b * factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sepia_coefficients() {
        let mut px = [100u8, 150, 200, 255];
        apply_color_pass(&mut px, FilterType::Sepia).unwrap();
        // 0.393*100 + 0.769*150 + 0.189*200 = 192.45
        // 0.349*100 + 0.686*150 + 0.168*200 = 171.4
        // 0.272*100 + 0.534*150 + 0.131*200 = 133.5
        assert_eq!(px, [192, 171, 133, 255]);
    }

    #[test]
    fn test_sepia_clamps_white() {
        let mut px = [255u8, 255, 255, 7];
        apply_color_pass(&mut px, FilterType::Sepia).unwrap();
        assert_eq!(px, [255, 255, 238, 7]);
    }

    #[test]
    fn test_grayscale_truncates() {
        let mut px = [10u8, 20, 30, 255];
        apply_color_pass(&mut px, FilterType::BlackWhite).unwrap();
        // 2.99 + 11.74 + 3.42 = 18.15
        assert_eq!(px, [18, 18, 18, 255]);
    }

    #[test]
    fn test_vintage_channel_scaling() {
        let mut px = [100u8, 100, 100, 255, 250, 10, 10, 0];
        apply_color_pass(&mut px, FilterType::Vintage).unwrap();
        assert_eq!(px, [120, 90, 80, 255, 255, 9, 8, 0]);
    }

    #[test]
    fn test_named_filters_are_distinct() {
        let sample = (180.0, 120.0, 60.0);
        let outputs: Vec<_> = FilterType::ALL
            .iter()
            .map(|&f| {
                let (r, g, b) = transform(sample.0, sample.1, sample.2, f);
                (to_channel(r), to_channel(g), to_channel(b))
            })
            .collect();
        for (i, a) in outputs.iter().enumerate() {
            for b in outputs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
