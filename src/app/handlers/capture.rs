// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles photo capture, the countdown timer, and the live filter.

use crate::app::state::{Action, Booth, Message};
use crate::constants::timing;
use crate::errors::{AppResult, SourceError};
use crate::filters::{FilterOutcome, FilterType, render_filtered};
use crate::pipelines::photo::{
    Countdown, CountdownResult, CountdownTick, PhotoCapture, run_countdown,
};
use crate::session::{AcquisitionMode, Photo, PhotoId, PhotoSource, Step};
use image::RgbaImage;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

impl Booth {
    // =========================================================================
    // Capture Operations Handlers
    // =========================================================================

    /// Create an action that delivers `message` after `millis` milliseconds
    pub(crate) fn delay_action(millis: u64, message: Message) -> Action {
        Action::Delay { millis, message }
    }

    /// Fail unless the session is acquiring from the camera
    pub(crate) fn ensure_camera_step(&self, action: &'static str) -> AppResult<()> {
        if self.session.step() == Step::Acquisition(AcquisitionMode::Camera) {
            Ok(())
        } else {
            Err(self.session.rejection(action).into())
        }
    }

    /// Capture the current frame with the selected filter and add it to the session
    ///
    /// Source and filter are read now, not when any countdown started. The
    /// camera is released once the session fills up.
    pub async fn capture_now(&mut self) -> AppResult<PhotoId> {
        self.ensure_camera_step("capture")?;

        let filter = self.selected_filter;
        let captured = self.pipeline.capture(&self.sources, filter).await?;
        if captured.outcome == FilterOutcome::Coarse {
            warn!(filter = %filter, "Capture used the coarse filter approximation");
        }

        let device = self
            .sources
            .current_device()
            .map(|d| d.name)
            .unwrap_or_default();
        let photo = Photo::with_filter(
            captured.original,
            captured.filtered,
            captured.filter,
            PhotoSource::Camera { device },
        );
        let id = self.session.add_photo(photo)?;
        info!(%id, count = self.session.photos().len(), "Photo added to session");

        if !self.session.step().is_acquisition() {
            self.sources.release();
        }
        Ok(id)
    }

    /// Count down on the tokio clock, then capture
    ///
    /// Returns `Ok(None)` when `cancel` fires first; nothing is captured in
    /// that case. Fails with `Busy` while a tick-driven countdown is running.
    pub async fn timed_capture(
        &mut self,
        cancel: oneshot::Receiver<()>,
    ) -> AppResult<Option<PhotoId>> {
        self.ensure_camera_step("capture")?;
        if self.photo_timer_countdown.is_some() {
            return Err(SourceError::Busy.into());
        }

        let seconds = self.photo_timer_setting.seconds();
        info!(seconds, "Starting awaited photo countdown");
        let result = run_countdown(seconds, cancel, |remaining| {
            debug!(remaining, "Photo timer tick");
        })
        .await;

        match result {
            CountdownResult::Completed => self.capture_now().await.map(Some),
            CountdownResult::Cancelled => Ok(None),
        }
    }

    /// Current camera frame with the live filter, for preview
    pub fn preview(&self) -> AppResult<RgbaImage> {
        let frame = PhotoCapture::capture_from_source(
            &self.sources,
            self.config.mirror_front_camera,
        )?;
        Ok(render_filtered(&frame, self.selected_filter)?)
    }

    pub(crate) async fn handle_capture(&mut self) -> AppResult<Action> {
        // If timer countdown is active, abort it
        if self.photo_timer_countdown.is_some() {
            return Ok(self.handle_abort_photo_timer());
        }

        self.ensure_camera_step("capture")?;

        if let Some(countdown) = Countdown::start(self.photo_timer_setting) {
            self.photo_timer_id += 1;
            self.photo_timer_countdown = Some(countdown);
            return Ok(Self::delay_action(
                timing::COUNTDOWN_TICK_MS,
                Message::PhotoTimerTick(self.photo_timer_id),
            ));
        }

        self.capture_now().await?;
        Ok(Action::None)
    }

    pub(crate) async fn handle_photo_timer_tick(&mut self, id: u64) -> AppResult<Action> {
        if id != self.photo_timer_id {
            debug!(id, current = self.photo_timer_id, "Ignoring tick from an old countdown");
            return Ok(Action::None);
        }
        let Some(countdown) = self.photo_timer_countdown.as_mut() else {
            return Ok(Action::None);
        };

        match countdown.tick() {
            CountdownTick::Remaining(_) => Ok(Self::delay_action(
                timing::COUNTDOWN_TICK_MS,
                Message::PhotoTimerTick(id),
            )),
            CountdownTick::Fire => {
                info!("Photo timer countdown complete - capturing");
                self.photo_timer_countdown = None;
                self.capture_now().await?;
                Ok(Action::None)
            }
        }
    }

    pub(crate) fn handle_abort_photo_timer(&mut self) -> Action {
        if self.photo_timer_countdown.take().is_some() {
            info!("Photo timer countdown aborted");
        }
        Action::None
    }

    pub(crate) fn handle_cycle_photo_timer(&mut self) -> Action {
        if !self.config.capabilities.has_timer {
            debug!("Timer disabled for this booth");
            return Action::None;
        }
        self.photo_timer_setting = self.photo_timer_setting.next();
        info!(timer = ?self.photo_timer_setting, "Photo timer setting changed");
        Action::None
    }

    pub(crate) fn handle_select_filter(&mut self, filter: FilterType) -> Action {
        self.selected_filter = filter;
        info!(filter = %filter, "Live filter selected");
        Action::None
    }
}
