// SPDX-License-Identifier: GPL-3.0-only

//! Still-image video sources
//!
//! A still source serves one fixed frame, loaded from an image file or
//! supplied in memory. It stands in for a camera in headless runs.

use super::types::*;
use super::{SourceProvider, VideoSource};
use crate::errors::SourceError;
use futures::future::BoxFuture;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Load an image file and convert it to a CameraFrame
pub fn load_image_as_frame(path: &Path) -> SourceResult<CameraFrame> {
    info!(path = %path.display(), "Loading image file");

    let img = image::open(path).map_err(|e| {
        SourceError::Backend(format!("Failed to load image '{}': {}", path.display(), e))
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    info!(width, height, "Image loaded successfully");
    Ok(CameraFrame::from_rgba(width, height, rgba.into_raw()))
}

/// A source that always returns the same frame
pub struct StillSource {
    device: CameraDevice,
    frame: CameraFrame,
    stopped: bool,
}

impl StillSource {
    pub fn new(device: CameraDevice, frame: CameraFrame) -> Self {
        Self {
            device,
            frame,
            stopped: false,
        }
    }
}

impl VideoSource for StillSource {
    fn device(&self) -> &CameraDevice {
        &self.device
    }

    fn current_frame(&self) -> SourceResult<CameraFrame> {
        if self.stopped {
            return Err(SourceError::NotReady);
        }
        Ok(self.frame.clone())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// Serves still sources for a fixed device list
#[derive(Default)]
pub struct StillSourceProvider {
    sources: Vec<(CameraDevice, CameraFrame)>,
    /// Simulated warm-up before a device opens
    warm_up: Option<Duration>,
    /// Refuse every open with a permission error
    denied: bool,
}

impl StillSourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a device serving `frame`
    pub fn with_device(mut self, device: CameraDevice, frame: CameraFrame) -> Self {
        self.sources.push((device, frame));
        self
    }

    /// Add a device serving the image at `path`
    pub fn with_image(self, device: CameraDevice, path: &Path) -> SourceResult<Self> {
        let frame = load_image_as_frame(path)?;
        Ok(self.with_device(device, frame))
    }

    /// Delay every open by `duration`
    pub fn with_warm_up(mut self, duration: Duration) -> Self {
        self.warm_up = Some(duration);
        self
    }

    /// Refuse every open as if the user denied camera access
    pub fn denied(mut self) -> Self {
        self.denied = true;
        self
    }
}

impl SourceProvider for StillSourceProvider {
    fn enumerate(&self) -> SourceResult<Vec<CameraDevice>> {
        Ok(self.sources.iter().map(|(d, _)| d.clone()).collect())
    }

    fn open(&self, device: &CameraDevice) -> BoxFuture<'static, SourceResult<Box<dyn VideoSource>>> {
        let found = self
            .sources
            .iter()
            .find(|(d, _)| d.id == device.id)
            .map(|(d, f)| (d.clone(), f.clone()));
        let warm_up = self.warm_up;
        let denied = self.denied;
        let device_name = device.name.clone();

        Box::pin(async move {
            if let Some(delay) = warm_up {
                tokio::time::sleep(delay).await;
            }
            if denied {
                return Err(SourceError::PermissionDenied(device_name));
            }
            let (device, frame) = found.ok_or(SourceError::NoSourceFound)?;
            Ok(Box::new(StillSource::new(device, frame)) as Box<dyn VideoSource>)
        })
    }
}
