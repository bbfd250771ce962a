// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the session state machine

use image::{Rgba, RgbaImage};
use photo_booth::errors::{AppError, SessionError};
use photo_booth::session::PhotoSource;
use photo_booth::{AcquisitionMode, FilterEngine, FilterType, Photo, Session, Step};

fn photo(shade: u8) -> Photo {
    Photo::new(
        RgbaImage::from_pixel(8, 6, Rgba([shade, 100, 50, 255])),
        PhotoSource::Camera {
            device: "Still".to_string(),
        },
    )
}

/// A session holding three photos on the reorder step
fn session_at_reorder() -> Session {
    let mut session = Session::new(3);
    session.start(AcquisitionMode::Camera).unwrap();
    for shade in [10, 20, 30] {
        session.add_photo(photo(shade)).unwrap();
    }
    assert_eq!(session.step(), Step::Review);
    session.advance().unwrap();
    session
}

#[test]
fn test_fourth_photo_rejected() {
    // Test that a full session never accepts a fourth photo
    let mut session = Session::new(3);
    session.start(AcquisitionMode::Upload).unwrap();
    for shade in [1, 2, 3] {
        session.add_photo(photo(shade)).unwrap();
    }
    assert_eq!(session.step(), Step::Review);
    assert!(session.add_photo(photo(4)).is_err());

    // Going back to acquisition keeps the photos and still refuses more
    session.back().unwrap();
    assert_eq!(
        session.add_photo(photo(4)),
        Err(SessionError::CapacityReached { max: 3 })
    );
    assert_eq!(session.photos().len(), 3);
}

#[test]
fn test_reorder_yields_permutation() {
    // Test that any sequence of moves keeps exactly the same ids
    let mut session = session_at_reorder();
    let mut before = session.photo_ids();

    let ids = session.photo_ids();
    let moves = [(0, true), (2, false), (1, true), (2, true), (0, false), (1, false)];
    for (index, up) in moves {
        let id = ids[index];
        if up {
            session.move_up(id).unwrap();
        } else {
            session.move_down(id).unwrap();
        }
    }

    let mut after = session.photo_ids();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn test_move_at_edges_is_noop() {
    // Test that moving the first photo up or the last photo down changes nothing
    let mut session = session_at_reorder();
    let ids = session.photo_ids();
    assert!(!session.move_up(ids[0]).unwrap());
    assert!(!session.move_down(ids[2]).unwrap());
    assert_eq!(session.photo_ids(), ids);

    assert!(session.move_down(ids[0]).unwrap());
    assert_eq!(session.photo_ids(), vec![ids[1], ids[0], ids[2]]);
}

#[test]
fn test_filters_never_stack() {
    // Test that a second filter renders from the original, not the first result
    let mut session = session_at_reorder();
    session.advance().unwrap();
    assert_eq!(session.step(), Step::FilterApply);

    let mut engine = FilterEngine::new();
    let id = session.photo_ids()[0];
    session.set_filter(id, FilterType::Vintage, &mut engine).unwrap();
    session.set_filter(id, FilterType::Sepia, &mut engine).unwrap();

    let photo = session.photo(id).unwrap();
    assert_eq!(photo.applied_filter, FilterType::Sepia);

    let mut expected = photo.original.as_ref().clone();
    photo_booth::filters::apply_filter_image(&mut expected, FilterType::Sepia).unwrap();
    assert_eq!(photo.pixels.as_ref(), &expected);

    session.set_filter(id, FilterType::None, &mut engine).unwrap();
    assert_eq!(session.photo(id).unwrap().pixels, session.photo(id).unwrap().original);
}

#[test]
fn test_export_locks_session() {
    // Test that no photo-mutating operation works once export is reached
    let mut session = session_at_reorder();
    session.advance().unwrap(); // filter
    session.advance().unwrap(); // customize
    session
        .set_composite(RgbaImage::new(4, 4))
        .unwrap();
    assert_eq!(session.advance().unwrap(), Step::Export);

    let id = session.photo_ids()[0];
    let mut engine = FilterEngine::new();
    assert_eq!(session.remove_photo(id).unwrap_err(), SessionError::SessionLocked);
    assert_eq!(session.move_down(id), Err(SessionError::SessionLocked));
    assert_eq!(session.add_photo(photo(9)), Err(SessionError::SessionLocked));
    assert_eq!(
        session.set_filter(id, FilterType::Sepia, &mut engine),
        Err(AppError::Session(SessionError::SessionLocked))
    );
    assert!(session.back().is_err());
    assert_eq!(session.photos().len(), 3);

    // Only restart leaves export
    let dropped = session.restart();
    assert_eq!(dropped.len(), 3);
    assert_eq!(session.step(), Step::Welcome);
    assert!(session.photos().is_empty());
    assert!(session.final_composite().is_none());
}

#[test]
fn test_back_from_customize_drops_strip() {
    // Test that leaving customize discards the composed strip but not photos
    let mut session = session_at_reorder();
    session.advance().unwrap();
    session.advance().unwrap();
    session.set_composite(RgbaImage::new(2, 2)).unwrap();

    assert_eq!(session.back().unwrap(), Step::FilterApply);
    assert!(session.final_composite().is_none());
    assert_eq!(session.photos().len(), 3);
}

#[test]
fn test_next_requires_a_photo() {
    // Test that acquisition cannot be left without photos
    let mut session = Session::default();
    session.start(AcquisitionMode::Upload).unwrap();
    assert_eq!(session.advance(), Err(SessionError::NotEnoughPhotos));
    assert_eq!(session.back().unwrap(), Step::Welcome);
}
