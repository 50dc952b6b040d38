// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! The point style aggregate: marker, outline and fill.
//!
//! Marker and fill each have mutually exclusive modes. Only the fields of
//! the active mode are drawn, but fields of inactive modes are kept (and
//! serialized) so switching back restores what the user entered.

use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::color::Rgba;
use super::ids::ImageRef;

// ============================================================================
// ENUMS
// ============================================================================

/// Which marker representation is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerMode {
    #[default]
    Vector,
    Bitmap,
    FontGlyph,
}

/// Geometry family of a vector marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorShape {
    /// Regular polygon with `vector_side_count` sides
    #[default]
    Regular,
    Cross,
    /// Star whose inner radius is `vector_side_ratio` of the outer one
    Star,
    Circle,
    Arrow,
    Flag,
}

/// Outline dash pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    Custom,
}

/// Which fill representation is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    #[default]
    Solid,
    Hatch,
    Gradient,
    Picture,
}

/// Hatch pattern for `FillMode::Hatch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatchStyle {
    #[default]
    Horizontal,
    Vertical,
    ForwardDiagonal,
    BackwardDiagonal,
    Cross,
    DiagonalCross,
    Percent05,
    Percent10,
    Percent25,
    Percent50,
    Percent75,
    Percent90,
    LightHorizontal,
    LightVertical,
    DashedHorizontal,
    DashedVertical,
    SmallGrid,
    LargeGrid,
    Weave,
    Plaid,
    Sphere,
    SolidDiamond,
}

/// Gradient geometry for `FillMode::Gradient`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientType {
    #[default]
    Linear,
    Rectangular,
    Circle,
}

// ============================================================================
// STYLE PARTS
// ============================================================================

/// Point marker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub mode: MarkerMode,
    pub size: f64,
    /// Degrees, not normalized
    pub rotation: f64,
    pub vector_shape: VectorShape,
    pub vector_side_count: i32,
    /// Stored ratio; the editable value is ten times this
    pub vector_side_ratio: f64,
    pub bitmap: Option<ImageRef>,
    /// Scale the bitmap icon so its larger side matches `size`
    pub scale_bitmap: bool,
    pub font_name: String,
    pub font_glyph_code: u8,
}

/// Outline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub visible: bool,
    pub dash_style: DashStyle,
    /// At least 1; edited as an index `width - 1`
    pub width: f64,
    pub color: Rgba,
    pub transparency: u8,
}

/// Fill settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub visible: bool,
    pub mode: FillMode,
    pub color: Rgba,
    pub transparency: u8,
    pub hatch_style: HatchStyle,
    pub hatch_back_color: Rgba,
    pub hatch_back_transparent: bool,
    pub gradient_type: GradientType,
    pub gradient_color2: Rgba,
    /// Degrees, not normalized
    pub gradient_rotation: f64,
    pub picture: Option<ImageRef>,
}

/// Complete style of a point layer
///
/// Owned by the legend layer; edit sessions borrow it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleModel {
    pub marker: MarkerStyle,
    pub line: LineStyle,
    pub fill: FillStyle,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            mode: MarkerMode::Vector,
            size: 8.0,
            rotation: 0.0,
            vector_shape: VectorShape::Regular,
            vector_side_count: 4,
            vector_side_ratio: 0.5,
            bitmap: None,
            scale_bitmap: false,
            font_name: crate::settings::fonts::DEFAULT_FONT.to_string(),
            font_glyph_code: b'A',
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            visible: true,
            dash_style: DashStyle::Solid,
            width: 1.0,
            color: Rgba::BLACK,
            transparency: 255,
        }
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            visible: true,
            mode: FillMode::Solid,
            color: Rgba::WHITE,
            transparency: 255,
            hatch_style: HatchStyle::Horizontal,
            hatch_back_color: Rgba::WHITE,
            hatch_back_transparent: false,
            gradient_type: GradientType::Linear,
            gradient_color2: Rgba::GRAY,
            gradient_rotation: 0.0,
            picture: None,
        }
    }
}

impl MarkerStyle {
    /// Scale applied to the bitmap icon when drawn.
    ///
    /// Without scaling, or without an icon, the scale is 1.
    pub fn bitmap_scale(&self) -> f64 {
        match &self.bitmap {
            Some(icon) if self.scale_bitmap && icon.max_dimension() > 0 => {
                self.size / f64::from(icon.max_dimension())
            }
            _ => 1.0,
        }
    }
}

impl StyleModel {
    /// Visit every floating point field, for format validation.
    pub(crate) fn float_fields(&self) -> [(&'static str, f64); 5] {
        [
            ("marker.size", self.marker.size),
            ("marker.rotation", self.marker.rotation),
            ("marker.vector_side_ratio", self.marker.vector_side_ratio),
            ("line.width", self.line.width),
            ("fill.gradient_rotation", self.fill.gradient_rotation),
        ]
    }
}

// ============================================================================
// RWLOCK HELPERS
// ============================================================================

/// Acquire a read lock on a shared style, recovering from poison.
///
/// A panic in another holder must not take the legend down with it, so the
/// inner data is used as is.
pub fn read_style(style: &RwLock<StyleModel>) -> RwLockReadGuard<'_, StyleModel> {
    style.read().unwrap_or_else(|poisoned| {
        tracing::warn!("Style RwLock was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Acquire a write lock on a shared style, recovering from poison.
///
/// See [`read_style`] for details on poison recovery.
pub fn write_style(style: &RwLock<StyleModel>) -> RwLockWriteGuard<'_, StyleModel> {
    style.write().unwrap_or_else(|poisoned| {
        tracing::warn!("Style RwLock was poisoned, recovering");
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_scale_follows_size_when_scaling() {
        let mut marker = MarkerStyle {
            size: 16.0,
            bitmap: Some(ImageRef::new("pin.png", 32, 24)),
            scale_bitmap: true,
            ..MarkerStyle::default()
        };
        assert_eq!(marker.bitmap_scale(), 0.5);

        marker.scale_bitmap = false;
        assert_eq!(marker.bitmap_scale(), 1.0);
    }

    #[test]
    fn bitmap_scale_without_icon_is_one() {
        let marker = MarkerStyle {
            size: 40.0,
            scale_bitmap: true,
            ..MarkerStyle::default()
        };
        assert_eq!(marker.bitmap_scale(), 1.0);
    }

    #[test]
    fn enums_serialize_as_snake_case() {
        let json = serde_json::to_string(&HatchStyle::DiagonalCross).unwrap();
        assert_eq!(json, "\"diagonal_cross\"");
        let mode: MarkerMode = serde_json::from_str("\"font_glyph\"").unwrap();
        assert_eq!(mode, MarkerMode::FontGlyph);
    }
}
