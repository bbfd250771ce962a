// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles opening, selecting and switching cameras.

use crate::app::state::{Action, Booth};
use crate::backends::camera::{CameraDevice, Facing};
use crate::errors::{AppResult, SourceError};
use tracing::info;

impl Booth {
    // =========================================================================
    // Camera Control Handlers
    // =========================================================================

    /// Open the selected camera, or the first front-facing one
    pub(crate) async fn open_camera(&mut self) -> AppResult<CameraDevice> {
        let index = match self.sources.current_index() {
            Some(index) => index,
            None => {
                let devices = self.sources.refresh_devices()?;
                devices
                    .iter()
                    .position(|d| d.facing == Facing::Front)
                    .unwrap_or(0)
            }
        };
        Ok(self.sources.acquire(index).await?)
    }

    pub(crate) async fn handle_select_camera(&mut self, index: usize) -> AppResult<Action> {
        if !self.config.capabilities.has_multi_camera_select {
            return Err(SourceError::SelectionDisabled.into());
        }
        self.ensure_camera_step("select a camera")?;

        let device = self.sources.acquire(index).await?;
        info!(index, camera = %device, "Camera selected");
        Ok(Action::None)
    }

    pub(crate) async fn handle_switch_camera(&mut self) -> AppResult<Action> {
        self.ensure_camera_step("switch cameras")?;

        let device = self.sources.switch_facing().await?;
        info!(camera = %device, facing = ?device.facing, "Switched camera");
        Ok(Action::None)
    }

    pub(crate) async fn handle_retry_camera(&mut self) -> AppResult<Action> {
        self.ensure_camera_step("open the camera")?;

        let device = self.open_camera().await?;
        info!(camera = %device, "Camera reopened");
        Ok(Action::None)
    }
}
