// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Opaque handles passed between the session and its collaborators.
//!
//! `LayerHandle` is assigned by the map/legend layer and only echoed back in
//! change notifications. `RasterHandle` is minted by rasterizers from a global
//! atomic counter so previews can be told apart; handles are never reused
//! within a process.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies the map layer whose style is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerHandle(pub u32);

/// Identifies a rendered preview image
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RasterHandle(u64);

static RASTER_COUNTER: AtomicU64 = AtomicU64::new(1);

impl RasterHandle {
    /// Create a new unique raster handle
    pub fn next() -> Self {
        Self(RASTER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for RasterHandle {
    fn default() -> Self {
        Self::next()
    }
}

/// Reference to an externally owned image (bitmap marker or picture fill)
///
/// The session never reads pixels; it only needs the pixel size to derive
/// the bitmap marker scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Where the owner loaded the image from
    pub source: String,
    pub width: u32,
    pub height: u32,
}

impl ImageRef {
    pub fn new(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width,
            height,
        }
    }

    /// Probe an image file for its pixel size.
    pub fn probe(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("Failed to read image: {}", path.display()))?;
        Ok(Self::new(path.display().to_string(), width, height))
    }

    /// Larger of the two pixel dimensions
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_handles_are_unique() {
        let a = RasterHandle::next();
        let b = RasterHandle::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn probing_missing_image_fails() {
        let err = ImageRef::probe(std::path::Path::new("/no/such/icon.png")).unwrap_err();
        assert!(err.to_string().contains("/no/such/icon.png"));
    }

    #[test]
    fn max_dimension_picks_larger_side() {
        assert_eq!(ImageRef::new("a.png", 16, 32).max_dimension(), 32);
    }
}
