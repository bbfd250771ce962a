// SPDX-License-Identifier: GPL-3.0-only

//! Session handlers
//!
//! Handles navigation between steps, upload import, photo removal,
//! reordering and per-photo filters.

use crate::app::state::{Action, Booth, ImportSummary};
use crate::errors::AppResult;
use crate::filters::FilterType;
use crate::pipelines::photo::{UploadFile, import_uploads};
use crate::pipelines::strip::LayoutSpec;
use crate::session::{AcquisitionMode, Photo, PhotoId, PhotoSource, Step};
use tracing::{debug, info, warn};

impl Booth {
    // =========================================================================
    // Navigation Handlers
    // =========================================================================

    /// Stop the countdown and the camera when leaving camera acquisition
    fn leave_camera(&mut self) {
        self.handle_abort_photo_timer();
        self.sources.release();
    }

    pub(crate) async fn handle_start(&mut self, mode: AcquisitionMode) -> AppResult<Action> {
        self.session.start(mode)?;
        if mode == AcquisitionMode::Camera {
            // Stay on the camera step on failure so the user can retry
            let device = self.open_camera().await?;
            info!(camera = %device, "Camera ready");
        }
        Ok(Action::None)
    }

    pub(crate) fn handle_next(&mut self) -> AppResult<Action> {
        let from = self.session.step();
        let to = self.session.advance()?;

        if from.is_acquisition() {
            self.leave_camera();
        }
        if to == Step::Export {
            // Filters are final; cached renders are no longer needed
            self.filters.clear();
        }
        Ok(Action::None)
    }

    pub(crate) async fn handle_back(&mut self) -> AppResult<Action> {
        let from = self.session.step();
        let to = self.session.back()?;

        if from.is_acquisition() {
            self.leave_camera();
        }
        if to == Step::Acquisition(AcquisitionMode::Camera) && !self.session.is_full() {
            let device = self.open_camera().await?;
            info!(camera = %device, "Camera reopened");
        }
        Ok(Action::None)
    }

    pub(crate) fn handle_restart(&mut self) -> AppResult<Action> {
        self.leave_camera();

        let dropped = self.session.restart();
        self.filters.clear();

        self.selected_filter = FilterType::None;
        self.photo_timer_setting = self.config.effective_timer();
        self.layout = LayoutSpec::new(self.config.default_layout, self.config.default_background);
        self.last_saved = None;
        self.last_share = None;

        info!(dropped = dropped.len(), "Session restarted");
        Ok(Action::None)
    }

    // =========================================================================
    // Photo Handlers
    // =========================================================================

    /// Decode `files` and add them to the session
    ///
    /// Only as many supported files as the session has free slots are
    /// decoded. Files that fail to decode are reported and skipped.
    pub async fn import_uploads(&mut self, files: Vec<UploadFile>) -> AppResult<ImportSummary> {
        if self.session.step() != Step::Acquisition(AcquisitionMode::Upload) {
            return Err(self.session.rejection("import uploads").into());
        }

        let report = import_uploads(
            files,
            self.session.remaining_slots(),
            self.heif_converter.clone(),
        )
        .await;

        let mut summary = ImportSummary {
            added: Vec::with_capacity(report.imported.len()),
            skipped: report.skipped,
            truncated: report.truncated,
        };
        for imported in report.imported {
            let photo = Photo::new(
                imported.image,
                PhotoSource::Upload {
                    name: imported.name,
                },
            );
            summary.added.push(self.session.add_photo(photo)?);
        }

        if !summary.skipped.is_empty() {
            warn!(skipped = summary.skipped.len(), "Some uploads were skipped");
        }
        Ok(summary)
    }

    pub(crate) async fn handle_import_uploads(
        &mut self,
        files: Vec<UploadFile>,
    ) -> AppResult<Action> {
        let summary = self.import_uploads(files).await?;
        info!(
            added = summary.added.len(),
            skipped = summary.skipped.len(),
            truncated = summary.truncated,
            "Uploads imported"
        );
        Ok(Action::None)
    }

    pub(crate) fn handle_remove_photo(&mut self, id: PhotoId) -> AppResult<Action> {
        self.session.remove_photo(id)?;
        self.filters.release(id);
        Ok(Action::None)
    }

    pub(crate) fn handle_move_photo_up(&mut self, id: PhotoId) -> AppResult<Action> {
        if !self.session.move_up(id)? {
            debug!(%id, "Photo already first");
        }
        Ok(Action::None)
    }

    pub(crate) fn handle_move_photo_down(&mut self, id: PhotoId) -> AppResult<Action> {
        if !self.session.move_down(id)? {
            debug!(%id, "Photo already last");
        }
        Ok(Action::None)
    }

    pub(crate) fn handle_apply_filter(
        &mut self,
        id: PhotoId,
        filter: FilterType,
    ) -> AppResult<Action> {
        self.session.set_filter(id, filter, &mut self.filters)?;
        Ok(Action::None)
    }
}
