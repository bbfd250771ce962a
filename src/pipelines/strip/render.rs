// SPDX-License-Identifier: GPL-3.0-only

//! Strip rendering
//!
//! Draw order: background, then per photo the white frame, the scaled photo
//! and the inner stroke, then the caption, and the outer border last.

use super::caption::{Caption, draw_text_centered};
use super::layout::{LayoutSpec, Rect, StripGeometry};
use crate::constants::{colors, strip};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

fn rgba(rgb: [u8; 3]) -> Rgba<u8> {
    Rgba([rgb[0], rgb[1], rgb[2], 255])
}

/// Fill `rect`, clipped to the canvas
pub fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: [u8; 3]) {
    let color = rgba(color);
    let right = rect.right().min(canvas.width());
    let bottom = rect.bottom().min(canvas.height());
    for y in rect.y..bottom {
        for x in rect.x..right {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Draw a `width`-pixel outline inside `rect`
pub fn stroke_rect(canvas: &mut RgbaImage, rect: Rect, width: u32, color: [u8; 3]) {
    let w = width.min(rect.width).min(rect.height);
    // Top, bottom, left, right bands
    fill_rect(canvas, Rect::new(rect.x, rect.y, rect.width, w), color);
    fill_rect(canvas, Rect::new(rect.x, rect.bottom() - w, rect.width, w), color);
    fill_rect(canvas, Rect::new(rect.x, rect.y, w, rect.height), color);
    fill_rect(canvas, Rect::new(rect.right() - w, rect.y, w, rect.height), color);
}

/// Scale `photo` to `target` and draw it
pub fn draw_photo(canvas: &mut RgbaImage, photo: &RgbaImage, target: Rect) {
    if photo.dimensions() == (target.width, target.height) {
        imageops::overlay(canvas, photo, target.x as i64, target.y as i64);
    } else {
        let resized = imageops::resize(photo, target.width, target.height, FilterType::Triangle);
        imageops::overlay(canvas, &resized, target.x as i64, target.y as i64);
    }
}

/// Render a strip from precomputed geometry
///
/// `photos` must line up with `geometry.placements` by index.
pub fn render_strip(
    photos: &[&RgbaImage],
    geometry: &StripGeometry,
    layout: &LayoutSpec,
    caption: Option<&Caption>,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        geometry.width,
        geometry.height,
        rgba(layout.background.rgb()),
    );

    for placement in &geometry.placements {
        let Some(photo) = photos.get(placement.index) else {
            continue;
        };
        fill_rect(
            &mut canvas,
            placement.slot.expand(strip::FRAME_MARGIN),
            colors::FRAME,
        );
        draw_photo(&mut canvas, photo, placement.image);
        stroke_rect(
            &mut canvas,
            placement.slot.expand(strip::INNER_STROKE_WIDTH),
            strip::INNER_STROKE_WIDTH,
            colors::INNER_STROKE,
        );
    }

    if let (Some(area), Some(caption)) = (geometry.caption, caption) {
        let text_color = if layout.background.is_white() {
            colors::CAPTION_ON_WHITE
        } else {
            colors::CAPTION_ON_COLOR
        };
        let center_x = geometry.width / 2;
        draw_text_centered(&mut canvas, &caption.title, center_x, area.title_baseline, text_color);
        draw_text_centered(&mut canvas, &caption.date, center_x, area.date_baseline, text_color);
    }

    stroke_rect(
        &mut canvas,
        Rect::new(0, 0, geometry.width, geometry.height),
        strip::OUTER_BORDER_WIDTH,
        colors::OUTER_BORDER,
    );

    debug!(
        width = geometry.width,
        height = geometry.height,
        photos = geometry.placements.len(),
        "Strip rendered"
    );
    canvas
}
