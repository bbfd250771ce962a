// SPDX-License-Identifier: GPL-3.0-only

//! Strip layout geometry
//!
//! Geometry is computed from photo sizes alone, so the same inputs always
//! produce the same canvas size and placements.

use crate::constants::{colors, strip};
use crate::errors::CompositionError;
use serde::{Deserialize, Serialize};

/// How photos are arranged on the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Fixed width, photos top to bottom, caption footer
    #[default]
    Stacked,
    /// Fixed height, photos left to right
    SideBySide,
    /// Fixed square, 2x2 cells
    Grid,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] = [LayoutMode::Stacked, LayoutMode::SideBySide, LayoutMode::Grid];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            LayoutMode::Stacked => "stacked",
            LayoutMode::SideBySide => "side-by-side",
            LayoutMode::Grid => "grid",
        }
    }

    /// Display name for the layout picker
    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutMode::Stacked => "Vertical Strip",
            LayoutMode::SideBySide => "Horizontal Strip",
            LayoutMode::Grid => "Grid Layout",
        }
    }

    /// Parse an identifier; `vertical`, `horizontal` and `grid2x2` are accepted too
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "stacked" | "vertical" => Some(LayoutMode::Stacked),
            "side-by-side" | "sidebyside" | "horizontal" => Some(LayoutMode::SideBySide),
            "grid" | "grid2x2" => Some(LayoutMode::Grid),
            _ => None,
        }
    }
}

/// Strip background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundColor {
    #[default]
    White,
    Black,
    Primary,
    Accent,
    /// Any RGB color
    Custom([u8; 3]),
}

impl BackgroundColor {
    /// Presets offered by the background picker
    pub const PRESETS: [BackgroundColor; 4] = [
        BackgroundColor::White,
        BackgroundColor::Black,
        BackgroundColor::Primary,
        BackgroundColor::Accent,
    ];

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            BackgroundColor::White => colors::WHITE,
            BackgroundColor::Black => colors::BLACK,
            BackgroundColor::Primary => colors::PRIMARY,
            BackgroundColor::Accent => colors::ACCENT,
            BackgroundColor::Custom(rgb) => *rgb,
        }
    }

    /// Whether caption text should use the dark-on-white color
    pub fn is_white(&self) -> bool {
        self.rgb() == colors::WHITE
    }

    /// Parse a preset name or `#rrggbb`
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "white" => Some(BackgroundColor::White),
            "black" => Some(BackgroundColor::Black),
            "primary" => Some(BackgroundColor::Primary),
            "accent" => Some(BackgroundColor::Accent),
            hex => parse_hex_rgb(hex).map(BackgroundColor::Custom),
        }
    }
}

/// Parse `#rrggbb` (the `#` is optional)
fn parse_hex_rgb(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Layout choice for one composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub mode: LayoutMode,
    pub background: BackgroundColor,
}

impl LayoutSpec {
    pub fn new(mode: LayoutMode, background: BackgroundColor) -> Self {
        Self { mode, background }
    }
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow by `margin` on every side, saturating at the canvas origin
    pub fn expand(&self, margin: u32) -> Rect {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        Rect {
            x,
            y,
            width: self.x + self.width + margin - x,
            height: self.y + self.height + margin - y,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Where one photo lands on the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index of the photo in the input order
    pub index: usize,
    /// Slot the frame and stroke surround; equals `image` outside the grid
    pub slot: Rect,
    /// Scaled photo rectangle inside the slot
    pub image: Rect,
}

/// Caption baselines for the stacked footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionArea {
    pub title_baseline: u32,
    pub date_baseline: u32,
}

/// Full strip geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripGeometry {
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
    pub caption: Option<CaptionArea>,
}

/// Scale `along` by `target / reference`, rounded, at least one pixel
fn scaled(along: u32, target: u32, reference: u32) -> u32 {
    ((along as f64 * target as f64 / reference as f64).round() as u32).max(1)
}

/// Compute canvas size and photo placements for `sizes` (width, height)
pub fn compute_layout(
    sizes: &[(u32, u32)],
    mode: LayoutMode,
) -> Result<StripGeometry, CompositionError> {
    if sizes.is_empty() {
        return Err(CompositionError::NoPhotos);
    }
    if let Some(index) = sizes.iter().position(|&(w, h)| w == 0 || h == 0) {
        return Err(CompositionError::Render(format!(
            "photo {} has zero size",
            index
        )));
    }

    match mode {
        LayoutMode::Stacked => stacked(sizes),
        LayoutMode::SideBySide => side_by_side(sizes),
        LayoutMode::Grid => Ok(grid(sizes)),
    }
}

/// Advance `offset` past a photo of `extent` plus one spacing
///
/// The running offset must stay within `MAX_STRIP_EDGE`; the strip is
/// declined otherwise.
fn advance(offset: u32, extent: u32) -> Result<u32, CompositionError> {
    let next = u64::from(offset) + u64::from(extent) + u64::from(strip::SPACING);
    u32::try_from(next)
        .ok()
        .filter(|&edge| edge <= strip::MAX_STRIP_EDGE + strip::SPACING)
        .ok_or_else(strip_too_large)
}

fn strip_too_large() -> CompositionError {
    CompositionError::Render(format!(
        "strip too large (longest edge is limited to {} px)",
        strip::MAX_STRIP_EDGE
    ))
}

/// Check a finished canvas edge against `MAX_STRIP_EDGE`
fn bounded(edge: u64) -> Result<u32, CompositionError> {
    u32::try_from(edge)
        .ok()
        .filter(|&edge| edge <= strip::MAX_STRIP_EDGE)
        .ok_or_else(strip_too_large)
}

fn stacked(sizes: &[(u32, u32)]) -> Result<StripGeometry, CompositionError> {
    let image_width = strip::STACKED_WIDTH - 2 * strip::PADDING;
    let mut placements = Vec::with_capacity(sizes.len());
    let mut y = strip::PADDING;

    for (index, &(w, h)) in sizes.iter().enumerate() {
        let image_height = scaled(h, image_width, w);
        let rect = Rect::new(strip::PADDING, y, image_width, image_height);
        placements.push(Placement {
            index,
            slot: rect,
            image: rect,
        });
        y = advance(y, image_height)?;
    }

    // `y` ran one spacing past the last photo
    let photos_bottom = u64::from(y - strip::SPACING);
    let height =
        bounded(photos_bottom + u64::from(strip::CAPTION_HEIGHT) + u64::from(strip::PADDING))?;

    Ok(StripGeometry {
        width: strip::STACKED_WIDTH,
        height,
        placements,
        caption: Some(CaptionArea {
            title_baseline: height - strip::CAPTION_OFFSET_FROM_BOTTOM,
            date_baseline: height - strip::CAPTION_OFFSET_FROM_BOTTOM + strip::CAPTION_LINE_GAP,
        }),
    })
}

fn side_by_side(sizes: &[(u32, u32)]) -> Result<StripGeometry, CompositionError> {
    let image_height = strip::SIDE_BY_SIDE_HEIGHT - 2 * strip::PADDING;
    let mut placements = Vec::with_capacity(sizes.len());
    let mut x = strip::PADDING;

    for (index, &(w, h)) in sizes.iter().enumerate() {
        let image_width = scaled(w, image_height, h);
        let rect = Rect::new(x, strip::PADDING, image_width, image_height);
        placements.push(Placement {
            index,
            slot: rect,
            image: rect,
        });
        x = advance(x, image_width)?;
    }

    let width = bounded(u64::from(x - strip::SPACING) + u64::from(strip::PADDING))?;

    Ok(StripGeometry {
        width,
        height: strip::SIDE_BY_SIDE_HEIGHT,
        placements,
        caption: None,
    })
}

/// Side of one grid cell
pub fn grid_cell_size() -> u32 {
    (strip::GRID_SIZE - 2 * strip::PADDING - strip::SPACING) / 2
}

fn grid(sizes: &[(u32, u32)]) -> StripGeometry {
    let cell = grid_cell_size();
    let far = strip::PADDING + cell + strip::SPACING;
    let origins = [
        (strip::PADDING, strip::PADDING),
        (far, strip::PADDING),
        (strip::PADDING, far),
        (far, far),
    ];

    let placements = sizes
        .iter()
        .zip(origins)
        .enumerate()
        .map(|(index, (&(w, h), (x, y)))| {
            // Contain: fit the long side, letterbox the short one
            let (draw_w, draw_h) = if w >= h {
                (cell, scaled(h, cell, w).min(cell))
            } else {
                (scaled(w, cell, h).min(cell), cell)
            };
            Placement {
                index,
                slot: Rect::new(x, y, cell, cell),
                image: Rect::new(x + (cell - draw_w) / 2, y + (cell - draw_h) / 2, draw_w, draw_h),
            }
        })
        .collect();

    StripGeometry {
        width: strip::GRID_SIZE,
        height: strip::GRID_SIZE,
        placements,
        caption: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_height_formula() {
        let geometry = compute_layout(&[(640, 480), (640, 480)], LayoutMode::Stacked).unwrap();
        // 40 + 240 + 30 + 240 + 80 + 40
        assert_eq!(geometry.width, 400);
        assert_eq!(geometry.height, 670);
        assert_eq!(geometry.placements[1].image.y, 310);
        assert_eq!(
            geometry.caption,
            Some(CaptionArea {
                title_baseline: 620,
                date_baseline: 645
            })
        );
    }

    #[test]
    fn test_side_by_side_width_grows() {
        let geometry =
            compute_layout(&[(400, 400), (800, 400), (400, 800)], LayoutMode::SideBySide).unwrap();
        // 40 + 320 + 30 + 640 + 30 + 160 + 40
        assert_eq!(geometry.width, 1260);
        assert_eq!(geometry.height, 400);
        assert!(geometry.caption.is_none());
    }

    #[test]
    fn test_grid_letterboxes_landscape() {
        let geometry = compute_layout(&[(800, 600); 4], LayoutMode::Grid).unwrap();
        assert_eq!(grid_cell_size(), 345);
        let first = geometry.placements[0];
        assert_eq!(first.image.width, 345);
        assert_eq!(first.image.height, 259);
        assert_eq!(first.image.y, 40 + 43);
        assert_eq!(geometry.placements[3].slot, Rect::new(415, 415, 345, 345));
    }

    #[test]
    fn test_grid_places_at_most_four() {
        let geometry = compute_layout(&[(10, 10); 5], LayoutMode::Grid).unwrap();
        assert_eq!(geometry.placements.len(), 4);
    }

    #[test]
    fn test_background_parsing() {
        assert_eq!(BackgroundColor::from_id("Primary"), Some(BackgroundColor::Primary));
        assert_eq!(
            BackgroundColor::from_id("#10a0FF"),
            Some(BackgroundColor::Custom([0x10, 0xa0, 0xff]))
        );
        assert_eq!(BackgroundColor::from_id("#12345"), None);
        assert!(BackgroundColor::Custom([255, 255, 255]).is_white());
    }

    #[test]
    fn test_zero_photos_declined() {
        assert_eq!(
            compute_layout(&[], LayoutMode::Stacked),
            Err(CompositionError::NoPhotos)
        );
    }
}
