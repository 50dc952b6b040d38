// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Field names and typed field edits

use crate::model::{
    DashStyle, FillMode, GradientType, HatchStyle, ImageRef, Rgba, VectorMarker, VectorShape,
};

/// Every externally editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    // marker
    Size,
    Rotation,
    VectorPreset,
    VectorShape,
    VectorSideCount,
    VectorSideRatio,
    BitmapIcon,
    ScaleIcons,
    FontName,
    FontGlyph,
    // outline
    OutlineVisible,
    DashStyle,
    LineWidth,
    OutlineColor,
    // fill
    FillVisible,
    FillMode,
    FillColor,
    Transparency,
    HatchStyle,
    HatchBackColor,
    HatchBackTransparent,
    GradientType,
    GradientColor2,
    GradientRotation,
    Picture,
}

impl FieldName {
    pub const ALL: [FieldName; 25] = [
        FieldName::Size,
        FieldName::Rotation,
        FieldName::VectorPreset,
        FieldName::VectorShape,
        FieldName::VectorSideCount,
        FieldName::VectorSideRatio,
        FieldName::BitmapIcon,
        FieldName::ScaleIcons,
        FieldName::FontName,
        FieldName::FontGlyph,
        FieldName::OutlineVisible,
        FieldName::DashStyle,
        FieldName::LineWidth,
        FieldName::OutlineColor,
        FieldName::FillVisible,
        FieldName::FillMode,
        FieldName::FillColor,
        FieldName::Transparency,
        FieldName::HatchStyle,
        FieldName::HatchBackColor,
        FieldName::HatchBackTransparent,
        FieldName::GradientType,
        FieldName::GradientColor2,
        FieldName::GradientRotation,
        FieldName::Picture,
    ];

    /// Name used by text adapters (`fill_color`, `side_ratio`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Rotation => "rotation",
            Self::VectorPreset => "vector_preset",
            Self::VectorShape => "vector_shape",
            Self::VectorSideCount => "side_count",
            Self::VectorSideRatio => "side_ratio",
            Self::BitmapIcon => "bitmap_icon",
            Self::ScaleIcons => "scale_icons",
            Self::FontName => "font_name",
            Self::FontGlyph => "font_glyph",
            Self::OutlineVisible => "outline_visible",
            Self::DashStyle => "dash_style",
            Self::LineWidth => "line_width",
            Self::OutlineColor => "outline_color",
            Self::FillVisible => "fill_visible",
            Self::FillMode => "fill_mode",
            Self::FillColor => "fill_color",
            Self::Transparency => "transparency",
            Self::HatchStyle => "hatch_style",
            Self::HatchBackColor => "hatch_back_color",
            Self::HatchBackTransparent => "hatch_back_transparent",
            Self::GradientType => "gradient_type",
            Self::GradientColor2 => "gradient_color2",
            Self::GradientRotation => "gradient_rotation",
            Self::Picture => "picture",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// One already validated change coming from a view
///
/// Values are in the units the user edits: `VectorSideRatio` is ten times
/// the stored ratio and `LineWidthIndex` is the width minus one.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Size(f64),
    Rotation(f64),
    /// Pick a palette symbol; resets shape, sides, ratio and rotation
    VectorPreset(VectorMarker),
    VectorShape(VectorShape),
    VectorSideCount(i32),
    VectorSideRatio(f64),
    /// Pick a bitmap icon; switches the marker to bitmap mode
    BitmapIcon(ImageRef),
    ScaleIcons(bool),
    /// Pick a font; may reselect the glyph
    FontName(String),
    /// Pick a glyph; switches the marker to font-glyph mode
    FontGlyph(u8),
    OutlineVisible(bool),
    DashStyle(DashStyle),
    LineWidthIndex(usize),
    OutlineColor(Rgba),
    FillVisible(bool),
    FillMode(FillMode),
    FillColor(Rgba),
    /// Shared by fill and outline
    Transparency(u8),
    HatchStyle(HatchStyle),
    HatchBackColor(Rgba),
    HatchBackTransparent(bool),
    GradientType(GradientType),
    GradientColor2(Rgba),
    GradientRotation(f64),
    Picture(ImageRef),
}

impl FieldEdit {
    pub fn field(&self) -> FieldName {
        match self {
            Self::Size(_) => FieldName::Size,
            Self::Rotation(_) => FieldName::Rotation,
            Self::VectorPreset(_) => FieldName::VectorPreset,
            Self::VectorShape(_) => FieldName::VectorShape,
            Self::VectorSideCount(_) => FieldName::VectorSideCount,
            Self::VectorSideRatio(_) => FieldName::VectorSideRatio,
            Self::BitmapIcon(_) => FieldName::BitmapIcon,
            Self::ScaleIcons(_) => FieldName::ScaleIcons,
            Self::FontName(_) => FieldName::FontName,
            Self::FontGlyph(_) => FieldName::FontGlyph,
            Self::OutlineVisible(_) => FieldName::OutlineVisible,
            Self::DashStyle(_) => FieldName::DashStyle,
            Self::LineWidthIndex(_) => FieldName::LineWidth,
            Self::OutlineColor(_) => FieldName::OutlineColor,
            Self::FillVisible(_) => FieldName::FillVisible,
            Self::FillMode(_) => FieldName::FillMode,
            Self::FillColor(_) => FieldName::FillColor,
            Self::Transparency(_) => FieldName::Transparency,
            Self::HatchStyle(_) => FieldName::HatchStyle,
            Self::HatchBackColor(_) => FieldName::HatchBackColor,
            Self::HatchBackTransparent(_) => FieldName::HatchBackTransparent,
            Self::GradientType(_) => FieldName::GradientType,
            Self::GradientColor2(_) => FieldName::GradientColor2,
            Self::GradientRotation(_) => FieldName::GradientRotation,
            Self::Picture(_) => FieldName::Picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::from_name(field.as_str()), Some(field));
        }
        assert_eq!(FieldName::from_name("colour"), None);
    }

    #[test]
    fn line_width_edit_maps_to_line_width_field() {
        assert_eq!(FieldEdit::LineWidthIndex(2).field(), FieldName::LineWidth);
    }
}
