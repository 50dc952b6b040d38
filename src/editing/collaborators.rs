// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Outside parties a session talks to, and the options it opens with.

use kurbo::Size;
use peniko::Color;
use std::sync::Arc;

use super::preview::{NoPreview, PreviewRenderer};
use super::tab_memory::TabMemory;
use crate::fonts::{FontCatalog, SystemFonts};
use crate::model::{LayerHandle, Rgba};
use crate::settings;

/// Told when a layer's style changed and the map and legend need repainting
pub trait RedrawListener: Send + Sync {
    fn style_changed(&self, layer: LayerHandle);
}

/// Logs changes and does nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRedraw;

impl RedrawListener for LogRedraw {
    fn style_changed(&self, layer: LayerHandle) {
        tracing::info!("Style of layer {} changed", layer.0);
    }
}

/// Everything a session calls out to
#[derive(Clone)]
pub struct Collaborators {
    pub preview: Arc<dyn PreviewRenderer>,
    pub redraw: Arc<dyn RedrawListener>,
    pub fonts: Arc<dyn FontCatalog>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            preview: Arc::new(NoPreview),
            redraw: Arc::new(LogRedraw),
            fonts: Arc::new(SystemFonts),
        }
    }
}

/// Per-session behavior switches
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Whether the editor offers Apply (commit without closing)
    pub apply_available: bool,
    /// List every installed font instead of the symbol-font allow list
    pub show_all_fonts: bool,
    pub preview_size: Size,
    pub preview_background: Color,
    /// Where the selected tab is remembered between sessions
    pub tabs: &'static TabMemory,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            apply_available: true,
            show_all_fonts: false,
            preview_size: Size::new(settings::preview::WIDTH, settings::preview::HEIGHT),
            preview_background: Rgba::from_rgb_u32(settings::preview::BACKGROUND).into(),
            tabs: TabMemory::global(),
        }
    }
}
