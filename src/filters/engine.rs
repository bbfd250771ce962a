// SPDX-License-Identifier: MPL-2.0

//! Filter engine with a per-photo preview cache
//!
//! The engine is an explicit resource: the booth creates one, renders
//! previews through it, and drops it when the session ends. Only the most
//! recent render of each photo is kept, so the cache holds at most one
//! full-resolution copy per photo.

use super::{FilterOutcome, FilterResult, FilterType, apply_filter_image};
use crate::session::PhotoId;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A rendered filter preview
#[derive(Debug, Clone)]
pub struct RenderedFilter {
    pub filter: FilterType,
    pub image: Arc<RgbaImage>,
    pub outcome: FilterOutcome,
}

/// Renders filters and caches the latest result per photo
#[derive(Debug, Default)]
pub struct FilterEngine {
    cache: HashMap<PhotoId, RenderedFilter>,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `filter` over `original`, reusing the cached result when the
    /// photo was last rendered with the same filter
    ///
    /// A render with a different filter replaces the photo's cached entry.
    pub fn render(
        &mut self,
        photo_id: PhotoId,
        original: &RgbaImage,
        filter: FilterType,
    ) -> FilterResult<RenderedFilter> {
        if let Some(hit) = self.cache.get(&photo_id)
            && hit.filter == filter
        {
            debug!(%photo_id, filter = %filter, "Filter cache hit");
            return Ok(hit.clone());
        }

        let mut output = original.clone();
        let outcome = apply_filter_image(&mut output, filter)?;
        let rendered = RenderedFilter {
            filter,
            image: Arc::new(output),
            outcome,
        };

        self.cache.insert(photo_id, rendered.clone());
        Ok(rendered)
    }

    /// Drop the cached render for one photo
    pub fn release(&mut self, photo_id: PhotoId) {
        if self.cache.remove(&photo_id).is_some() {
            debug!(%photo_id, "Released filter preview");
        }
    }

    /// Drop every cached render
    pub fn clear(&mut self) {
        if !self.cache.is_empty() {
            debug!(entries = self.cache.len(), "Clearing filter cache");
        }
        self.cache.clear();
    }

    /// Number of cached renders
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl Drop for FilterEngine {
    fn drop(&mut self) {
        self.clear();
    }
}
