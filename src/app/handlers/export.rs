// SPDX-License-Identifier: GPL-3.0-only

//! Strip handlers
//!
//! Handles layout choice, strip composition, saving and sharing.

use crate::app::state::{Action, Booth};
use crate::errors::{AppResult, ExportError, SessionError};
use crate::pipelines::photo::{EncodedImage, EncodingFormat};
use crate::pipelines::strip::{BackgroundColor, Caption, LayoutMode, StripCompositor};
use crate::session::Step;
use crate::share::{self, ShareOutcome};
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

impl Booth {
    // =========================================================================
    // Strip Handlers
    // =========================================================================

    /// Compose the session photos with the current layout
    ///
    /// Stacked strips get a caption with today's date. The strip is stored
    /// in the session and returned.
    pub async fn create_strip(&mut self) -> AppResult<Arc<RgbaImage>> {
        if self.session.step() != Step::CustomizeLayout {
            return Err(self.session.rejection("create a strip").into());
        }

        let caption = (self.layout.mode == LayoutMode::Stacked)
            .then(|| Caption::today(self.config.caption_title.clone()));
        let strip = StripCompositor::compose_async(
            self.session.composition_inputs(),
            self.layout,
            caption,
        )
        .await?;

        self.session.set_composite(strip)?;
        self.session
            .final_composite()
            .cloned()
            .ok_or_else(|| SessionError::NoStrip.into())
    }

    /// Encode the composed strip with the configured quality
    async fn encode_strip(&self) -> AppResult<EncodedImage> {
        let strip = self
            .session
            .final_composite()
            .ok_or(SessionError::NoStrip)?;
        Ok(self.encoder.encode(strip.as_ref().clone()).await?)
    }

    /// Encode the strip and save it into the output directory
    pub async fn save_strip(&mut self) -> AppResult<PathBuf> {
        let encoded = self.encode_strip().await?;
        let path = self.encoder.save(&encoded, self.output_dir.clone()).await?;
        self.last_saved = Some(path.clone());
        Ok(path)
    }

    /// Encode the strip for `path` and write it there
    ///
    /// A `.png` path is written as PNG, anything else as JPEG.
    pub async fn save_strip_to(&mut self, path: PathBuf) -> AppResult<PathBuf> {
        let mut encoder = self.encoder;
        encoder.set_format(EncodingFormat::from_path(&path));
        let strip = self
            .session
            .final_composite()
            .ok_or(SessionError::NoStrip)?;
        let encoded = encoder.encode(strip.as_ref().clone()).await?;
        let path = encoder.save_to(&encoded, path).await?;
        self.last_saved = Some(path.clone());
        Ok(path)
    }

    /// Share the strip, falling back to a link and a saved copy
    pub async fn share_strip(&mut self) -> AppResult<ShareOutcome> {
        if !self.config.capabilities.has_share {
            return Err(ExportError::ShareFailed("Sharing is disabled".to_string()).into());
        }

        let encoded = self.encode_strip().await?;
        let outcome = share::share_strip(
            self.share_target.as_ref(),
            &encoded,
            &self.encoder,
            self.output_dir.clone(),
            &self.config.share_origin,
        )
        .await?;

        if let ShareOutcome::Fallback { saved_path, .. } = &outcome {
            self.last_saved = Some(saved_path.clone());
        }
        self.last_share = Some(outcome.clone());
        Ok(outcome)
    }

    /// Recompose after a layout change if a strip was already made
    async fn refresh_strip(&mut self) -> AppResult<()> {
        if self.session.step() == Step::CustomizeLayout
            && self.session.final_composite().is_some()
        {
            debug!(layout = ?self.layout, "Layout changed, recomposing strip");
            self.create_strip().await?;
        }
        Ok(())
    }

    pub(crate) async fn handle_select_layout(&mut self, mode: LayoutMode) -> AppResult<Action> {
        self.layout.mode = mode;
        info!(layout = mode.id(), "Layout selected");
        self.refresh_strip().await?;
        Ok(Action::None)
    }

    pub(crate) async fn handle_select_background(
        &mut self,
        background: BackgroundColor,
    ) -> AppResult<Action> {
        self.layout.background = background;
        info!(background = ?background, "Background selected");
        self.refresh_strip().await?;
        Ok(Action::None)
    }

    pub(crate) async fn handle_create_strip(&mut self) -> AppResult<Action> {
        let strip = self.create_strip().await?;
        info!(width = strip.width(), height = strip.height(), "Strip created");
        Ok(Action::None)
    }

    pub(crate) async fn handle_save_strip(&mut self) -> AppResult<Action> {
        self.save_strip().await?;
        Ok(Action::None)
    }

    pub(crate) async fn handle_share_strip(&mut self) -> AppResult<Action> {
        match self.share_strip().await? {
            ShareOutcome::Shared => info!("Strip shared"),
            ShareOutcome::Fallback { link, .. } => info!(link = %link, "Share link ready"),
        }
        Ok(Action::None)
    }
}
