// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! User-tunable editor options, read from a TOML file.
//!
//! ```toml
//! show_all_fonts = false
//! apply_available = true
//!
//! [preview]
//! width = 96.0
//! height = 96.0
//! background = "#F0F0F0"
//! ```
//!
//! Every key is optional.

use anyhow::{Context, Result};
use kurbo::Size;
use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::editing::{SessionOptions, TabMemory};
use crate::model::Rgba;
use crate::settings;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub show_all_fonts: bool,
    pub apply_available: bool,
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    pub width: f64,
    pub height: f64,
    #[serde(deserialize_with = "hex_color")]
    pub background: Rgba,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            show_all_fonts: false,
            apply_available: true,
            preview: PreviewConfig::default(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: settings::preview::WIDTH,
            height: settings::preview::HEIGHT,
            background: Rgba::from_rgb_u32(settings::preview::BACKGROUND),
        }
    }
}

impl EditorConfig {
    /// Load a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse TOML")?;
        if !(config.preview.width > 0.0 && config.preview.height > 0.0) {
            anyhow::bail!(
                "Preview size must be positive, got {}x{}",
                config.preview.width,
                config.preview.height
            );
        }
        Ok(config)
    }

    /// Session options for these settings, remembering tabs in `tabs`
    pub fn session_options(&self, tabs: &'static TabMemory) -> SessionOptions {
        SessionOptions {
            apply_available: self.apply_available,
            show_all_fonts: self.show_all_fonts,
            preview_size: Size::new(self.preview.width, self.preview.height),
            preview_background: self.preview.background.into(),
            tabs,
        }
    }
}

fn hex_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba, D::Error> {
    let text = String::deserialize(deserializer)?;
    Rgba::from_hex(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid color {text:?}")))
}
