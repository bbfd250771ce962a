// SPDX-License-Identifier: GPL-3.0-only

//! Bitmap caption text for the stacked strip footer

use crate::constants::strip;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgba, RgbaImage};

/// Glyph cell size before scaling
const GLYPH_SIZE: u32 = 8;

/// Caption lines drawn under a stacked strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    /// Already formatted date line
    pub date: String,
}

impl Caption {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
        }
    }

    /// Caption dated today in the local timezone
    pub fn today(title: impl Into<String>) -> Self {
        let date = chrono::Local::now()
            .format(crate::constants::caption::DATE_FORMAT)
            .to_string();
        Self::new(title, date)
    }
}

/// Pixel width of `text` at `scale`
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale.max(1)
}

/// Draw `text` horizontally centered on `center_x` with its baseline at `baseline`
pub fn draw_text_centered(
    img: &mut RgbaImage,
    text: &str,
    center_x: u32,
    baseline: u32,
    color: [u8; 3],
) {
    let scale = strip::CAPTION_GLYPH_SCALE;
    let x = center_x as i32 - (text_width(text, scale) / 2) as i32;
    let y = baseline as i32 - (GLYPH_SIZE * scale) as i32;
    draw_bitmap_text(img, x, y, text, Rgba([color[0], color[1], color[2], 255]), scale);
}

/// Draw `text` with its top-left corner at (`x`, `y`), clipped to the image
fn draw_bitmap_text(img: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    let scale_i = scale.max(1) as i32;
    let mut cursor_x = x;

    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += GLYPH_SIZE as i32 * scale_i;
            continue;
        };

        for (row_idx, row) in glyph.iter().enumerate() {
            for col_idx in 0..GLYPH_SIZE as i32 {
                if (*row >> col_idx) & 1 == 0 {
                    continue;
                }
                let px = cursor_x + col_idx * scale_i;
                let py = y + row_idx as i32 * scale_i;
                for sy in 0..scale_i {
                    for sx in 0..scale_i {
                        let tx = px + sx;
                        let ty = py + sy;
                        if tx >= 0 && ty >= 0 && tx < img.width() as i32 && ty < img.height() as i32
                        {
                            img.put_pixel(tx as u32, ty as u32, color);
                        }
                    }
                }
            }
        }

        cursor_x += GLYPH_SIZE as i32 * scale_i;
    }
}
