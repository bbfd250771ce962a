// SPDX-License-Identifier: GPL-3.0-only

//! Booth state types

use crate::backends::camera::{SourceManager, SourceProvider};
use crate::config::Config;
use crate::constants::PhotoTimerSetting;
use crate::errors::{AppError, AppResult};
use crate::filters::{FilterEngine, FilterType};
use crate::pipelines::photo::{
    Countdown, EncodingQuality, HeifConverter, PhotoEncoder, PhotoPipeline, SkippedFile,
    UnavailableHeifConverter, UploadFile,
};
use crate::pipelines::strip::{BackgroundColor, LayoutMode, LayoutSpec};
use crate::session::{AcquisitionMode, PhotoId, Session};
use crate::share::{NoFileShare, ShareOutcome, ShareTarget};
use crate::storage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Everything an orchestrator can ask the booth to do
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Navigation =====
    /// Leave the welcome step for camera or upload acquisition
    Start(AcquisitionMode),
    /// Explicit "next"
    Next,
    /// Explicit "back"
    Back,
    /// Drop everything and return to welcome
    Restart,

    // ===== Camera =====
    /// Capture, or start the countdown when a timer is set
    Capture,
    /// One countdown second elapsed for the countdown with this id
    PhotoTimerTick(u64),
    /// Cancel the running countdown
    AbortPhotoTimer,
    /// Cycle Off → 3s → 5s → 10s
    CyclePhotoTimer,
    /// Live filter for upcoming captures
    SelectFilter(FilterType),
    /// Open a specific camera by index
    SelectCamera(usize),
    /// Switch between front and back cameras
    SwitchCamera,
    /// Retry opening the selected camera after a failure
    RetryCamera,

    // ===== Photos =====
    ImportUploads(Vec<UploadFile>),
    RemovePhoto(PhotoId),
    MovePhotoUp(PhotoId),
    MovePhotoDown(PhotoId),
    ApplyFilter(PhotoId, FilterType),

    // ===== Strip =====
    SelectLayout(LayoutMode),
    SelectBackground(BackgroundColor),
    CreateStrip,
    SaveStrip,
    ShareStrip,
}

/// Follow-up work a handler asks the orchestrator to schedule
#[derive(Debug, Clone)]
pub enum Action {
    None,
    /// Deliver `message` after `millis` milliseconds
    Delay { millis: u64, message: Message },
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}

/// Result of importing an upload batch into the session
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Ids of the photos added, in selection order
    pub added: Vec<PhotoId>,
    pub skipped: Vec<SkippedFile>,
    /// Supported files left out because the session was full
    pub truncated: usize,
}

/// Photo booth model
///
/// Owns the session, the filter engine, the camera manager and the export
/// settings. The filter engine lives exactly as long as the booth.
pub struct Booth {
    pub(crate) config: Config,
    pub(crate) session: Session,
    pub(crate) filters: FilterEngine,
    pub(crate) sources: SourceManager,
    pub(crate) pipeline: PhotoPipeline,
    pub(crate) encoder: PhotoEncoder,
    pub(crate) heif_converter: Arc<dyn HeifConverter>,
    pub(crate) share_target: Arc<dyn ShareTarget>,
    pub(crate) output_dir: PathBuf,

    /// Current countdown choice
    pub(crate) photo_timer_setting: PhotoTimerSetting,
    /// Active countdown (`None` when idle)
    pub(crate) photo_timer_countdown: Option<Countdown>,
    /// Id of the latest countdown; ticks for older ones are dropped
    pub(crate) photo_timer_id: u64,
    /// Live filter for captures
    pub(crate) selected_filter: FilterType,
    pub(crate) layout: LayoutSpec,

    pub(crate) last_error: Option<AppError>,
    pub(crate) last_saved: Option<PathBuf>,
    pub(crate) last_share: Option<ShareOutcome>,
}

impl Booth {
    /// Create a booth over a camera provider
    ///
    /// Fails when `config` does not validate.
    pub fn new(config: Config, provider: Arc<dyn SourceProvider>) -> AppResult<Self> {
        config.validate()?;

        let mut encoder = PhotoEncoder::new();
        encoder.set_quality(EncodingQuality::Custom(config.export_quality));

        info!(
            max_photos = config.max_photos,
            timer = ?config.effective_timer(),
            capabilities = ?config.capabilities,
            "Booth created"
        );

        Ok(Self {
            session: Session::new(config.max_photos),
            filters: FilterEngine::new(),
            sources: SourceManager::new(provider),
            pipeline: PhotoPipeline::new(config.mirror_front_camera),
            encoder,
            heif_converter: Arc::new(UnavailableHeifConverter),
            share_target: Arc::new(NoFileShare),
            output_dir: storage::default_output_dir(),
            photo_timer_setting: config.effective_timer(),
            photo_timer_countdown: None,
            photo_timer_id: 0,
            selected_filter: FilterType::None,
            layout: LayoutSpec::new(config.default_layout, config.default_background),
            last_error: None,
            last_saved: None,
            last_share: None,
            config,
        })
    }

    pub fn with_heif_converter(mut self, converter: Arc<dyn HeifConverter>) -> Self {
        self.heif_converter = converter;
        self
    }

    pub fn with_share_target(mut self, target: Arc<dyn ShareTarget>) -> Self {
        self.share_target = target;
        self
    }

    /// Directory strips are saved into
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    // ===== Read access for the orchestrator =====

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sources(&self) -> &SourceManager {
        &self.sources
    }

    pub fn filter_engine(&self) -> &FilterEngine {
        &self.filters
    }

    pub fn photo_timer_setting(&self) -> PhotoTimerSetting {
        self.photo_timer_setting
    }

    /// Seconds left on the running countdown
    pub fn countdown_remaining(&self) -> Option<u32> {
        self.photo_timer_countdown.as_ref().map(Countdown::remaining)
    }

    /// Whether a countdown is running
    pub fn is_capturing(&self) -> bool {
        self.photo_timer_countdown.is_some()
    }

    pub fn selected_filter(&self) -> FilterType {
        self.selected_filter
    }

    pub fn layout(&self) -> LayoutSpec {
        self.layout
    }

    /// Error from the last failed message, cleared by the next success
    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    pub fn last_saved(&self) -> Option<&PathBuf> {
        self.last_saved.as_ref()
    }

    pub fn last_share(&self) -> Option<&ShareOutcome> {
        self.last_share.as_ref()
    }
}
