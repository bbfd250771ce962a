// SPDX-License-Identifier: GPL-3.0-only

//! Video source lifecycle manager
//!
//! The manager provides:
//! - Device enumeration and selection
//! - At most one in-flight acquisition; a newer request supersedes it
//! - Release of the previous source before a new one is installed

use super::types::*;
use super::{SourceProvider, VideoSource};
use crate::errors::SourceError;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Internal manager state
#[derive(Default)]
struct ManagerState {
    /// Devices from the last enumeration
    devices: Vec<CameraDevice>,
    /// Index into `devices` of the selected camera
    current_index: Option<usize>,
    /// The open source, if any
    active: Option<Box<dyn VideoSource>>,
    /// Bumped by every acquire and release; stale acquisitions compare against it
    generation: u64,
}

/// Video source manager
///
/// Thread-safe and can be shared across tasks.
#[derive(Clone)]
pub struct SourceManager {
    state: Arc<Mutex<ManagerState>>,
    provider: Arc<dyn SourceProvider>,
}

impl SourceManager {
    /// Create a new manager over a provider
    pub fn new(provider: Arc<dyn SourceProvider>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManagerState::default())),
            provider,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        // A panic while holding the lock leaves plain data behind; keep using it
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Enumerate available cameras and cache the list
    pub fn refresh_devices(&self) -> SourceResult<Vec<CameraDevice>> {
        let devices = self.provider.enumerate()?;
        info!(count = devices.len(), "Enumerated cameras");
        if devices.is_empty() {
            return Err(SourceError::NoSourceFound);
        }

        let mut state = self.lock();
        state.devices = devices.clone();
        if state.current_index.is_some_and(|i| i >= devices.len()) {
            state.current_index = None;
        }
        Ok(devices)
    }

    /// Cached device list
    pub fn devices(&self) -> Vec<CameraDevice> {
        self.lock().devices.clone()
    }

    /// Currently selected device
    pub fn current_device(&self) -> Option<CameraDevice> {
        let state = self.lock();
        state.current_index.and_then(|i| state.devices.get(i).cloned())
    }

    /// Index of the currently selected device
    pub fn current_index(&self) -> Option<usize> {
        self.lock().current_index
    }

    /// Whether a source is open
    pub fn is_active(&self) -> bool {
        self.lock().active.is_some()
    }

    /// Open the device at `index`
    ///
    /// Any active source is released first. If another `acquire` or `release`
    /// runs while this one waits on the provider, this call returns
    /// `SourceError::Superseded` and the source it opened is stopped.
    pub async fn acquire(&self, index: usize) -> SourceResult<CameraDevice> {
        let (device, generation) = {
            let mut state = self.lock();
            if state.devices.is_empty() {
                drop(state);
                self.refresh_devices()?;
                state = self.lock();
            }

            let device = state
                .devices
                .get(index)
                .cloned()
                .ok_or(SourceError::InvalidIndex(index))?;

            state.generation += 1;
            state.current_index = Some(index);
            if let Some(mut previous) = state.active.take() {
                info!(device = %previous.device(), "Releasing previous source");
                previous.stop();
            }
            (device, state.generation)
        };

        info!(device = %device, generation, "Acquiring source");
        let opened = self.provider.open(&device).await;

        let mut state = self.lock();
        match opened {
            Ok(mut source) => {
                if state.generation != generation {
                    debug!(device = %device, "Acquisition superseded, stopping source");
                    source.stop();
                    return Err(SourceError::Superseded);
                }
                state.active = Some(source);
                info!(device = %device, "Source ready");
                Ok(device)
            }
            Err(e) => {
                if state.generation != generation {
                    return Err(SourceError::Superseded);
                }
                warn!(device = %device, error = %e, "Failed to acquire source");
                Err(e)
            }
        }
    }

    /// Index of the next camera facing the other way
    ///
    /// Falls back to the next device in the list when no device faces the
    /// other way. Returns `None` with fewer than two devices.
    pub fn switch_target(&self) -> Option<usize> {
        let state = self.lock();
        if state.devices.len() < 2 {
            return None;
        }
        let current = state.current_index.unwrap_or(0);
        let wanted = state
            .devices
            .get(current)
            .map(|d| d.facing.opposite())
            .unwrap_or_default();

        state
            .devices
            .iter()
            .enumerate()
            .find(|(i, d)| *i != current && d.facing == wanted)
            .map(|(i, _)| i)
            .or(Some((current + 1) % state.devices.len()))
    }

    /// Switch to the camera facing the other way
    pub async fn switch_facing(&self) -> SourceResult<CameraDevice> {
        if self.lock().devices.is_empty() {
            self.refresh_devices()?;
        }
        let target = self.switch_target().ok_or(SourceError::NoSourceFound)?;
        self.acquire(target).await
    }

    /// Stop the active source and cancel any in-flight acquisition
    pub fn release(&self) {
        let mut state = self.lock();
        state.generation += 1;
        if let Some(mut source) = state.active.take() {
            info!(device = %source.device(), "Releasing source");
            source.stop();
        }
    }

    /// Grab the current frame from the active source
    pub fn capture_frame(&self) -> SourceResult<CameraFrame> {
        let state = self.lock();
        let source = state.active.as_ref().ok_or(SourceError::NotReady)?;
        source.current_frame()
    }

    /// Facing of the active source
    pub fn active_facing(&self) -> Option<Facing> {
        self.lock().active.as_ref().map(|s| s.device().facing)
    }
}

impl Drop for ManagerState {
    fn drop(&mut self) {
        if let Some(mut source) = self.active.take() {
            source.stop();
        }
    }
}
