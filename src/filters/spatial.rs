// SPDX-License-Identifier: MPL-2.0

//! Spatial filter passes that sample pixel position or neighbors

use super::FilterResult;
use crate::errors::FilterError;

/// Darken pixels toward the corners
///
/// Uses normalized 0-1 coordinates; pixels within 0.3 of the center are
/// untouched and the falloff reaches full black at 0.9.
pub fn apply_vignette(data: &mut [u8], width: u32, height: u32) {
    let w = width as usize;
    let h = height as usize;

    for y in 0..h {
        for x in 0..w {
            let tex_x = (x as f32 + 0.5) / w as f32;
            let tex_y = (y as f32 + 0.5) / h as f32;
            let dx = tex_x - 0.5;
            let dy = tex_y - 0.5;
            let dist = (dx * dx + dy * dy).sqrt();
            let vignette = 1.0 - smoothstep(0.3, 0.9, dist);

            let idx = (y * w + x) * 4;
            for c in 0..3 {
                data[idx + c] = (data[idx + c] as f32 * vignette).clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// 3x3 sharpen: `[[0, -1, 0], [-1, 5, -1], [0, -1, 0]]`
///
/// Border pixels are left as they are. Images narrower or shorter than three
/// pixels have no interior and are rejected.
pub fn apply_sharpen(data: &mut [u8], width: u32, height: u32) -> FilterResult<()> {
    if width < 3 || height < 3 {
        return Err(FilterError::UnsupportedDimensions { width, height });
    }

    let w = width as usize;
    let h = height as usize;
    let original = data.to_vec();
    let at = |x: usize, y: usize, c: usize| original[(y * w + x) * 4 + c] as i32;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            for c in 0..3 {
                let center = at(x, y, c) * 5;
                let top = at(x, y - 1, c);
                let bottom = at(x, y + 1, c);
                let left = at(x - 1, y, c);
                let right = at(x + 1, y, c);

                data[(y * w + x) * 4 + c] = (center - top - bottom - left - right).clamp(0, 255) as u8;
            }
        }
    }

    Ok(())
}

/// Smoothstep function for vignette
#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
