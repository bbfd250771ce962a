// SPDX-License-Identifier: GPL-3.0-only

//! Session state machine
//!
//! The session owns the ordered photo list, the current step and the final
//! strip. Photo-mutating operations check the current step; once the session
//! reaches `Export` every one of them fails with `SessionLocked`.

pub mod photo;
pub mod step;

pub use photo::{Photo, PhotoId, PhotoSource};
pub use step::{AcquisitionMode, Step};

use crate::constants::session as limits;
use crate::errors::SessionError;
use crate::filters::{FilterEngine, FilterOutcome, FilterType};
use image::RgbaImage;
use std::sync::Arc;
use tracing::{debug, info};

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Booth session state
#[derive(Debug, Clone)]
pub struct Session {
    photos: Vec<Photo>,
    step: Step,
    max_photos: usize,
    /// Mode used by the last acquisition, for "back" from review
    last_mode: AcquisitionMode,
    final_composite: Option<Arc<RgbaImage>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(limits::DEFAULT_MAX_PHOTOS)
    }
}

impl Session {
    /// Create an empty session at `Welcome`
    pub fn new(max_photos: usize) -> Self {
        Self {
            photos: Vec::new(),
            step: Step::Welcome,
            max_photos: max_photos.max(1),
            last_mode: AcquisitionMode::default(),
            final_composite: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn photo_ids(&self) -> Vec<PhotoId> {
        self.photos.iter().map(|p| p.id).collect()
    }

    pub fn max_photos(&self) -> usize {
        self.max_photos
    }

    /// Free photo slots
    pub fn remaining_slots(&self) -> usize {
        self.max_photos.saturating_sub(self.photos.len())
    }

    pub fn is_full(&self) -> bool {
        self.photos.len() >= self.max_photos
    }

    pub fn final_composite(&self) -> Option<&Arc<RgbaImage>> {
        self.final_composite.as_ref()
    }

    /// Pixels of every photo, in order, for composition
    pub fn composition_inputs(&self) -> Vec<Arc<RgbaImage>> {
        self.photos.iter().map(|p| Arc::clone(&p.pixels)).collect()
    }

    /// Error for `action` attempted on the current step
    pub(crate) fn rejection(&self, action: &'static str) -> SessionError {
        if self.step == Step::Export {
            SessionError::SessionLocked
        } else {
            SessionError::InvalidTransition {
                from: self.step.to_string(),
                action,
            }
        }
    }

    fn set_step(&mut self, step: Step) {
        info!(from = %self.step, to = %step, "Session step changed");
        self.step = step;
    }

    fn index_of(&self, id: PhotoId) -> SessionResult<usize> {
        self.photos
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SessionError::PhotoNotFound(id.to_string()))
    }

    // ===== Transitions =====

    /// Leave `Welcome` for an acquisition mode
    pub fn start(&mut self, mode: AcquisitionMode) -> SessionResult<()> {
        if self.step != Step::Welcome {
            return Err(self.rejection("start acquisition"));
        }
        self.last_mode = mode;
        self.set_step(Step::Acquisition(mode));
        Ok(())
    }

    /// Explicit "next"
    ///
    /// Leaving acquisition or review needs at least one photo. Leaving
    /// customize needs a composed strip.
    pub fn advance(&mut self) -> SessionResult<Step> {
        let next = self.step.next().ok_or_else(|| self.rejection("advance"))?;

        match self.step {
            Step::Acquisition(_) | Step::Review if self.photos.is_empty() => {
                return Err(SessionError::NotEnoughPhotos);
            }
            Step::CustomizeLayout if self.final_composite.is_none() => {
                return Err(SessionError::NoStrip);
            }
            _ => {}
        }

        if next == Step::Export {
            // Filters can no longer change; originals are not needed
            for photo in &mut self.photos {
                photo.original = Arc::clone(&photo.pixels);
            }
        }

        self.set_step(next);
        Ok(next)
    }

    /// Explicit "back"; never touches photos
    ///
    /// Leaving customize drops the composed strip, which may go stale once
    /// filters or order change.
    pub fn back(&mut self) -> SessionResult<Step> {
        let previous = self
            .step
            .previous(self.last_mode)
            .ok_or_else(|| self.rejection("go back"))?;

        if self.step == Step::CustomizeLayout {
            self.final_composite = None;
        }

        self.set_step(previous);
        Ok(previous)
    }

    /// Reset to an empty session at `Welcome`
    ///
    /// Returns the ids of the photos that were dropped.
    pub fn restart(&mut self) -> Vec<PhotoId> {
        let dropped = self.photo_ids();
        self.photos.clear();
        self.final_composite = None;
        self.last_mode = AcquisitionMode::default();
        self.set_step(Step::Welcome);
        dropped
    }

    // ===== Photo mutation =====

    /// Append a photo during acquisition
    ///
    /// The session moves to `Review` on its own once it holds `max_photos`.
    pub fn add_photo(&mut self, photo: Photo) -> SessionResult<PhotoId> {
        if !self.step.is_acquisition() {
            return Err(self.rejection("add a photo"));
        }
        if self.is_full() {
            return Err(SessionError::CapacityReached {
                max: self.max_photos,
            });
        }

        let id = photo.id;
        debug!(%id, filter = %photo.applied_filter, "Photo added");
        self.photos.push(photo);

        if self.is_full() {
            info!(count = self.photos.len(), "Session full, moving to review");
            self.set_step(Step::Review);
        }
        Ok(id)
    }

    /// Remove a photo before the order is finalized
    pub fn remove_photo(&mut self, id: PhotoId) -> SessionResult<Photo> {
        if !matches!(
            self.step,
            Step::Acquisition(_) | Step::Review | Step::Reorder
        ) {
            return Err(self.rejection("remove a photo"));
        }
        let index = self.index_of(id)?;
        debug!(%id, "Photo removed");
        Ok(self.photos.remove(index))
    }

    fn can_reorder(&self) -> bool {
        matches!(self.step, Step::Reorder | Step::FilterApply)
    }

    /// Swap a photo with its predecessor; `false` when already first
    pub fn move_up(&mut self, id: PhotoId) -> SessionResult<bool> {
        if !self.can_reorder() {
            return Err(self.rejection("reorder photos"));
        }
        let index = self.index_of(id)?;
        if index == 0 {
            return Ok(false);
        }
        self.photos.swap(index, index - 1);
        debug!(%id, to = index - 1, "Photo moved up");
        Ok(true)
    }

    /// Swap a photo with its successor; `false` when already last
    pub fn move_down(&mut self, id: PhotoId) -> SessionResult<bool> {
        if !self.can_reorder() {
            return Err(self.rejection("reorder photos"));
        }
        let index = self.index_of(id)?;
        if index + 1 >= self.photos.len() {
            return Ok(false);
        }
        self.photos.swap(index, index + 1);
        debug!(%id, to = index + 1, "Photo moved down");
        Ok(true)
    }

    /// Render `filter` over a photo's original and make it the displayed pixels
    ///
    /// `applied_filter` only changes after the render succeeds.
    pub fn set_filter(
        &mut self,
        id: PhotoId,
        filter: FilterType,
        engine: &mut FilterEngine,
    ) -> crate::errors::AppResult<FilterOutcome> {
        if !self.can_reorder() {
            return Err(self.rejection("apply a filter").into());
        }
        let index = self.index_of(id)?;
        let photo = &mut self.photos[index];

        let rendered = engine.render(id, &photo.original, filter)?;
        photo.pixels = rendered.image;
        photo.applied_filter = filter;

        info!(%id, filter = %filter, outcome = ?rendered.outcome, "Filter applied to photo");
        Ok(rendered.outcome)
    }

    /// Store the composed strip on the customize step
    pub fn set_composite(&mut self, strip: RgbaImage) -> SessionResult<()> {
        if self.step != Step::CustomizeLayout {
            return Err(self.rejection("store a strip"));
        }
        self.final_composite = Some(Arc::new(strip));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(n: u8) -> Photo {
        Photo::new(
            RgbaImage::from_pixel(4, 4, image::Rgba([n, n, n, 255])),
            PhotoSource::Upload {
                name: format!("{n}.png"),
            },
        )
    }

    #[test]
    fn test_capacity_auto_advances_to_review() {
        let mut session = Session::new(2);
        session.start(AcquisitionMode::Camera).unwrap();
        session.add_photo(upload(1)).unwrap();
        assert!(session.step().is_acquisition());
        session.add_photo(upload(2)).unwrap();
        assert_eq!(session.step(), Step::Review);
    }

    #[test]
    fn test_back_from_welcome_rejected() {
        let mut session = Session::default();
        assert!(matches!(
            session.back(),
            Err(SessionError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_back_to_acquisition_keeps_photos() {
        let mut session = Session::new(1);
        session.start(AcquisitionMode::Upload).unwrap();
        session.add_photo(upload(1)).unwrap();
        assert_eq!(
            session.back().unwrap(),
            Step::Acquisition(AcquisitionMode::Upload)
        );
        assert_eq!(session.photos().len(), 1);
        assert_eq!(
            session.add_photo(upload(2)),
            Err(SessionError::CapacityReached { max: 1 })
        );
    }

    #[test]
    fn test_customize_requires_strip() {
        let mut session = Session::new(1);
        session.start(AcquisitionMode::Camera).unwrap();
        session.add_photo(upload(1)).unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        session.advance().unwrap();
        assert_eq!(session.step(), Step::CustomizeLayout);
        assert_eq!(session.advance(), Err(SessionError::NoStrip));
    }
}
