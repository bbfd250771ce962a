// SPDX-License-Identifier: MPL-2.0

//! Integration tests for strip composition

use image::{Rgba, RgbaImage};
use photo_booth::constants::strip;
use photo_booth::errors::{AppError, CompositionError};
use photo_booth::pipelines::strip::layout::grid_cell_size;
use photo_booth::pipelines::strip::{Caption, compute_layout};
use photo_booth::{BackgroundColor, LayoutMode, LayoutSpec, StripCompositor};
use std::sync::Arc;

fn photo(width: u32, height: u32, shade: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([shade, 255 - shade, 128, 255]))
}

#[test]
fn test_compose_zero_photos_declined() {
    // Test that composition refuses an empty photo list
    let result = StripCompositor::compose(&[], &LayoutSpec::default(), None);
    assert_eq!(result, Err(CompositionError::NoPhotos));
}

#[test]
fn test_compose_deterministic_with_fixed_caption() {
    // Test that identical inputs produce identical strips in every layout
    let a = photo(320, 240, 10);
    let b = photo(240, 320, 200);
    let caption = Caption::new("BOOTHLY", "2025-01-01");
    for mode in LayoutMode::ALL {
        let layout = LayoutSpec::new(mode, BackgroundColor::Accent);
        let first = StripCompositor::compose(&[&a, &b], &layout, Some(&caption)).unwrap();
        let second = StripCompositor::compose(&[&a, &b], &layout, Some(&caption)).unwrap();
        assert_eq!(first, second, "{mode:?} is not deterministic");
    }
}

#[test]
fn test_stacked_preserves_aspect_ratio() {
    // Test that each stacked photo keeps its aspect ratio within rounding
    let sizes = [(640, 480), (480, 640), (1920, 1080)];
    let geometry = compute_layout(&sizes, LayoutMode::Stacked).unwrap();
    for (placement, &(w, h)) in geometry.placements.iter().zip(&sizes) {
        let expected = w as f64 / h as f64;
        let actual = placement.image.width as f64 / placement.image.height as f64;
        assert!((expected - actual).abs() / expected < 0.01);
        assert_eq!(placement.image.width, 320);
    }
}

#[test]
fn test_side_by_side_preserves_aspect_ratio() {
    // Test that side-by-side photos share a height and keep their ratios
    let sizes = [(640, 480), (480, 640)];
    let geometry = compute_layout(&sizes, LayoutMode::SideBySide).unwrap();
    assert_eq!(geometry.height, 400);
    for (placement, &(w, h)) in geometry.placements.iter().zip(&sizes) {
        assert_eq!(placement.image.height, 320);
        let expected = w as f64 / h as f64;
        let actual = placement.image.width as f64 / placement.image.height as f64;
        assert!((expected - actual).abs() / expected < 0.01);
    }
    // 40 + 427 + 30 + 240 + 40
    assert_eq!(geometry.width, 777);
}

#[test]
fn test_grid_letterboxes_four_landscape_photos() {
    // Test that four 800x600 photos are contained and centered in their cells
    let photos: Vec<RgbaImage> = (0..4).map(|i| photo(800, 600, i * 60)).collect();
    let refs: Vec<&RgbaImage> = photos.iter().collect();
    let layout = LayoutSpec::new(LayoutMode::Grid, BackgroundColor::Black);

    let sizes: Vec<(u32, u32)> = refs.iter().map(|p| p.dimensions()).collect();
    let geometry = compute_layout(&sizes, LayoutMode::Grid).unwrap();
    assert_eq!((geometry.width, geometry.height), (800, 800));
    for placement in &geometry.placements {
        assert_eq!(placement.image.width, placement.slot.width);
        assert_eq!(placement.image.height, 259);
        // Equal bars above and below
        let top = placement.image.y - placement.slot.y;
        let bottom = placement.slot.bottom() - placement.image.bottom();
        assert!(top.abs_diff(bottom) <= 1);
    }

    let strip = StripCompositor::compose(&refs, &layout, None).unwrap();
    assert_eq!(strip.dimensions(), (800, 800));
    // Letterbox bar inside the first cell is the white frame, not photo pixels
    let first = geometry.placements[0];
    let bar = strip.get_pixel(first.slot.x + first.slot.width / 2, first.slot.y + 5);
    assert_eq!(bar.0, [255, 255, 255, 255]);
    let inside = strip.get_pixel(first.image.x + 10, first.image.y + 10);
    for (got, want) in inside.0.iter().zip([0u8, 255, 128, 255]) {
        assert!(got.abs_diff(want) <= 1);
    }
}

#[test]
fn test_grid_with_two_photos_fills_first_cells() {
    // Test that fewer than four photos fill cells in order
    let geometry = compute_layout(&[(100, 100), (100, 100)], LayoutMode::Grid).unwrap();
    assert_eq!(geometry.placements.len(), 2);
    assert_eq!(geometry.placements[0].slot.y, geometry.placements[1].slot.y);
    assert!(geometry.placements[0].slot.x < geometry.placements[1].slot.x);
}

#[test]
fn test_grid_unused_cells_stay_background() {
    // Test that cells without a photo keep the background color
    let a = photo(100, 100, 10);
    let b = photo(100, 100, 200);
    let layout = LayoutSpec::new(LayoutMode::Grid, BackgroundColor::Black);
    let strip = StripCompositor::compose(&[&a, &b], &layout, None).unwrap();

    let cell = grid_cell_size();
    let far = strip::PADDING + cell + strip::SPACING;
    let black = [0, 0, 0, 255];
    assert_eq!(strip.get_pixel(strip::PADDING + cell / 2, far + cell / 2).0, black);
    assert_eq!(strip.get_pixel(far + cell / 2, far + cell / 2).0, black);

    // Cell 1 carries its white frame just outside the photo
    assert_eq!(
        strip.get_pixel(strip::PADDING - 5, strip::PADDING + cell / 2).0,
        [255, 255, 255, 255]
    );
    assert_ne!(strip.get_pixel(strip::PADDING + cell / 2, strip::PADDING + cell / 2).0, black);
}

#[test]
fn test_oversized_stacked_strip_declined() {
    // Test that very tall photos are declined instead of overflowing the canvas
    let result = compute_layout(&[(1, 7_000_000), (1, 7_000_000)], LayoutMode::Stacked);
    assert!(matches!(result, Err(CompositionError::Render(_))));

    let result = compute_layout(&[(1, 16_000), (1, 16_000)], LayoutMode::Stacked);
    assert!(matches!(result, Err(CompositionError::Render(_))));
}

#[test]
fn test_oversized_side_by_side_strip_declined() {
    // Test that very wide photos are declined instead of overflowing the canvas
    let result = compute_layout(&[(7_000_000, 1); 2], LayoutMode::SideBySide);
    assert!(matches!(result, Err(CompositionError::Render(_))));
}

#[test]
fn test_strip_edges_checked_against_limit() {
    // Test that strips under the edge limit lay out and longer ones are declined
    let geometry = compute_layout(&[(400, 400), (400, 400)], LayoutMode::SideBySide).unwrap();
    assert!(geometry.width <= strip::MAX_STRIP_EDGE);

    // 320 wide, so a photo 160 times taller than wide would need 51200 px
    let result = compute_layout(&[(10, 1600)], LayoutMode::Stacked);
    assert!(matches!(result, Err(CompositionError::Render(_))));
    let geometry = compute_layout(&[(100, 1000)], LayoutMode::Stacked).unwrap();
    assert_eq!(geometry.height, 40 + 3200 + 80 + 40);
}

#[tokio::test]
async fn test_gather_composes_once_every_photo_loaded() {
    // Test that composition waits for every load and keeps their order
    let loads = [(320u32, 240u32, 10u8), (240, 320, 200)].map(|(w, h, shade)| async move {
        let decoded = tokio::task::spawn_blocking(move || photo(w, h, shade))
            .await
            .map_err(|e| AppError::Task(e.to_string()))?;
        Ok::<_, AppError>(Arc::new(decoded))
    });
    let layout = LayoutSpec::new(LayoutMode::SideBySide, BackgroundColor::White);
    let gathered = StripCompositor::gather_and_compose(loads, layout, None)
        .await
        .unwrap();

    let a = photo(320, 240, 10);
    let b = photo(240, 320, 200);
    let direct = StripCompositor::compose(&[&a, &b], &layout, None).unwrap();
    assert_eq!(gathered, direct);
}

#[test]
fn test_outer_border_drawn() {
    // Test that the strip carries a 2px grey outer border
    let a = photo(100, 100, 50);
    let layout = LayoutSpec::new(LayoutMode::Stacked, BackgroundColor::Primary);
    let strip = StripCompositor::compose(&[&a], &layout, None).unwrap();
    assert_eq!(strip.get_pixel(0, 0).0, [0xcc, 0xcc, 0xcc, 255]);
    assert_eq!(strip.get_pixel(1, 1).0, [0xcc, 0xcc, 0xcc, 255]);
    assert_eq!(strip.get_pixel(2, 2).0, [0x7d, 0x62, 0xf3, 255]);
}
