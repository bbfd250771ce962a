// SPDX-License-Identifier: MPL-2.0

//! Strip composition pipeline
//!
//! ```text
//! Photos (all loaded) → Layout geometry → Render → RGBA strip
//! ```
//!
//! Composition never starts until every photo is available; one missing
//! photo fails the whole strip.

pub mod caption;
pub mod layout;
pub mod render;

pub use caption::Caption;
pub use layout::{
    BackgroundColor, LayoutMode, LayoutSpec, Placement, Rect, StripGeometry, compute_layout,
};

use crate::constants::strip;
use crate::errors::{AppResult, CompositionError};
use image::RgbaImage;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Strip compositor
pub struct StripCompositor;

impl StripCompositor {
    /// Compose `photos` into one strip
    ///
    /// Output depends only on the inputs; pass `caption: None` for a strip
    /// without footer text. Grid layouts draw the first four photos.
    pub fn compose(
        photos: &[&RgbaImage],
        layout: &LayoutSpec,
        caption: Option<&Caption>,
    ) -> Result<RgbaImage, CompositionError> {
        let sizes: Vec<(u32, u32)> = photos.iter().map(|p| p.dimensions()).collect();
        let geometry = compute_layout(&sizes, layout.mode)?;

        if layout.mode == LayoutMode::Grid && photos.len() > strip::GRID_CELLS {
            warn!(
                photos = photos.len(),
                drawn = strip::GRID_CELLS,
                "Grid layout only draws the first four photos"
            );
        }

        info!(
            mode = ?layout.mode,
            background = ?layout.background,
            photos = photos.len(),
            width = geometry.width,
            height = geometry.height,
            "Composing strip"
        );

        Ok(render::render_strip(photos, &geometry, layout, caption))
    }

    /// Compose on the blocking pool
    pub async fn compose_async(
        photos: Vec<Arc<RgbaImage>>,
        layout: LayoutSpec,
        caption: Option<Caption>,
    ) -> AppResult<RgbaImage> {
        let strip = tokio::task::spawn_blocking(move || {
            let refs: Vec<&RgbaImage> = photos.iter().map(|p| p.as_ref()).collect();
            Self::compose(&refs, &layout, caption.as_ref())
        })
        .await??;
        Ok(strip)
    }

    /// Wait for every photo, then compose
    ///
    /// If any photo fails to load, nothing is composed and the first error
    /// is returned.
    pub async fn gather_and_compose<I, F>(
        loads: I,
        layout: LayoutSpec,
        caption: Option<Caption>,
    ) -> AppResult<RgbaImage>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = AppResult<Arc<RgbaImage>>>,
    {
        let photos = futures::future::try_join_all(loads).await?;
        Self::compose_async(photos, layout, caption).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, DecodeError};
    use image::Rgba;

    #[test]
    fn test_compose_is_deterministic() {
        let a = RgbaImage::from_pixel(64, 48, Rgba([200, 30, 30, 255]));
        let b = RgbaImage::from_pixel(48, 64, Rgba([30, 200, 30, 255]));
        let layout = LayoutSpec::new(LayoutMode::Stacked, BackgroundColor::Primary);
        let caption = Caption::new("BOOTHLY", "2024-01-01");

        let first = StripCompositor::compose(&[&a, &b], &layout, Some(&caption)).unwrap();
        let second = StripCompositor::compose(&[&a, &b], &layout, Some(&caption)).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_gather_fails_without_partial_strip() {
        let ok = Arc::new(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        let loads = vec![
            futures::future::ready(Ok(ok)),
            futures::future::ready(Err(AppError::Decode(DecodeError::Corrupt("x".into())))),
        ];
        let result =
            StripCompositor::gather_and_compose(loads, LayoutSpec::default(), None).await;
        assert!(matches!(result, Err(AppError::Decode(_))));
    }
}
