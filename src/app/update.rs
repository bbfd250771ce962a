// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` routes each message to a handler in `handlers`. Handlers return
//! `AppResult<Action>`; failures are logged, kept as `last_error`, and never
//! stop the booth.
//!
//! # Handler Modules
//!
//! - `handlers::capture`: capture, countdown timer, live filter
//! - `handlers::camera`: camera selection and switching
//! - `handlers::session`: navigation, uploads, reorder, per-photo filters
//! - `handlers::export`: layout, strip creation, save and share

use crate::app::state::{Action, Booth, Message};
use crate::errors::AppResult;
use std::time::Duration;
use tracing::warn;

impl Booth {
    /// Main message handler
    pub async fn update(&mut self, message: Message) -> Action {
        let result: AppResult<Action> = match message {
            // ===== Navigation =====
            Message::Start(mode) => self.handle_start(mode).await,
            Message::Next => self.handle_next(),
            Message::Back => self.handle_back().await,
            Message::Restart => self.handle_restart(),

            // ===== Camera =====
            Message::Capture => self.handle_capture().await,
            Message::PhotoTimerTick(id) => self.handle_photo_timer_tick(id).await,
            Message::AbortPhotoTimer => Ok(self.handle_abort_photo_timer()),
            Message::CyclePhotoTimer => Ok(self.handle_cycle_photo_timer()),
            Message::SelectFilter(filter) => Ok(self.handle_select_filter(filter)),
            Message::SelectCamera(index) => self.handle_select_camera(index).await,
            Message::SwitchCamera => self.handle_switch_camera().await,
            Message::RetryCamera => self.handle_retry_camera().await,

            // ===== Photos =====
            Message::ImportUploads(files) => self.handle_import_uploads(files).await,
            Message::RemovePhoto(id) => self.handle_remove_photo(id),
            Message::MovePhotoUp(id) => self.handle_move_photo_up(id),
            Message::MovePhotoDown(id) => self.handle_move_photo_down(id),
            Message::ApplyFilter(id, filter) => self.handle_apply_filter(id, filter),

            // ===== Strip =====
            Message::SelectLayout(mode) => self.handle_select_layout(mode).await,
            Message::SelectBackground(background) => {
                self.handle_select_background(background).await
            }
            Message::CreateStrip => self.handle_create_strip().await,
            Message::SaveStrip => self.handle_save_strip().await,
            Message::ShareStrip => self.handle_share_strip().await,
        };

        match result {
            Ok(action) => {
                self.last_error = None;
                action
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Booth action failed");
                self.last_error = Some(e);
                Action::None
            }
        }
    }

    /// Handle `message` and every delayed follow-up it schedules
    ///
    /// Sleeps on the tokio clock between delayed messages, so a countdown
    /// started here runs to completion before this returns.
    pub async fn dispatch(&mut self, message: Message) {
        let mut pending = Some(message);
        while let Some(message) = pending.take() {
            if let Action::Delay { millis, message } = self.update(message).await {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                pending = Some(message);
            }
        }
    }
}
