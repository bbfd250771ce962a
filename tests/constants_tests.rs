// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use photo_booth::PhotoTimerSetting;
use photo_booth::constants::{file_formats, strip};

#[test]
fn test_timer_values() {
    // Test that all timer choices exist (Off, 3s, 5s, 10s)
    assert_eq!(PhotoTimerSetting::ALL.len(), 4);
    let seconds: Vec<u32> = PhotoTimerSetting::ALL.iter().map(|s| s.seconds()).collect();
    assert_eq!(seconds, vec![0, 3, 5, 10]);
}

#[test]
fn test_timer_cycle_returns_to_start() {
    // Test that cycling visits every choice and wraps around
    let mut setting = PhotoTimerSetting::Off;
    for _ in 0..PhotoTimerSetting::ALL.len() {
        setting = setting.next();
    }
    assert_eq!(setting, PhotoTimerSetting::Off);
}

#[test]
fn test_upload_extensions() {
    // Test that common image extensions and HEIF are accepted
    for ext in ["png", "JPG", "jpeg", "gif", "bmp", "webp", "heic", "heif"] {
        assert!(file_formats::is_image_extension(ext), "{ext} should be accepted");
    }
    assert!(!file_formats::is_image_extension("txt"));
    assert!(file_formats::is_heif_extension("HEIC"));
}

#[test]
fn test_grid_fits_inside_canvas() {
    // Test that two cells, two paddings and one spacing fit the grid canvas
    let cell = (strip::GRID_SIZE - 2 * strip::PADDING - strip::SPACING) / 2;
    assert!(2 * cell + 2 * strip::PADDING + strip::SPACING <= strip::GRID_SIZE);
}
