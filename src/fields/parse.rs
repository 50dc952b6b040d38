// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Text adapter turning `name=value` pairs into typed field edits.
//!
//! Validation lives here, not in the session: a `FieldEdit` that reaches a
//! session is already well typed. Range checks are deliberately absent;
//! negative sizes or two-sided polygons pass through unchanged.

use serde::de::DeserializeOwned;

use super::{FieldEdit, FieldName};
use crate::error::{Result, StyleError};
use crate::model::{ImageRef, Rgba};

/// Parse a single `name=value` argument.
pub fn parse_assignment(arg: &str) -> Result<FieldEdit> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| StyleError::invalid_field(arg, ""))?;
    parse_field_edit(name.trim(), value.trim())
}

/// Parse the text `value` for the field called `name`.
pub fn parse_field_edit(name: &str, value: &str) -> Result<FieldEdit> {
    let field = FieldName::from_name(name).ok_or_else(|| StyleError::invalid_field(name, value))?;
    let invalid = || StyleError::invalid_field(name, value);

    let edit = match field {
        FieldName::Size => FieldEdit::Size(number(value).ok_or_else(invalid)?),
        FieldName::Rotation => FieldEdit::Rotation(number(value).ok_or_else(invalid)?),
        FieldName::VectorPreset => FieldEdit::VectorPreset(variant(value).ok_or_else(invalid)?),
        FieldName::VectorShape => FieldEdit::VectorShape(variant(value).ok_or_else(invalid)?),
        FieldName::VectorSideCount => {
            FieldEdit::VectorSideCount(value.parse().map_err(|_| invalid())?)
        }
        FieldName::VectorSideRatio => {
            FieldEdit::VectorSideRatio(number(value).ok_or_else(invalid)?)
        }
        FieldName::BitmapIcon => FieldEdit::BitmapIcon(image(value).ok_or_else(invalid)?),
        FieldName::ScaleIcons => FieldEdit::ScaleIcons(flag(value).ok_or_else(invalid)?),
        FieldName::FontName if !value.is_empty() => FieldEdit::FontName(value.to_string()),
        FieldName::FontName => return Err(invalid()),
        FieldName::FontGlyph => FieldEdit::FontGlyph(glyph(value).ok_or_else(invalid)?),
        FieldName::OutlineVisible => FieldEdit::OutlineVisible(flag(value).ok_or_else(invalid)?),
        FieldName::DashStyle => FieldEdit::DashStyle(variant(value).ok_or_else(invalid)?),
        FieldName::LineWidth => FieldEdit::LineWidthIndex(value.parse().map_err(|_| invalid())?),
        FieldName::OutlineColor => FieldEdit::OutlineColor(color(value).ok_or_else(invalid)?),
        FieldName::FillVisible => FieldEdit::FillVisible(flag(value).ok_or_else(invalid)?),
        FieldName::FillMode => FieldEdit::FillMode(variant(value).ok_or_else(invalid)?),
        FieldName::FillColor => FieldEdit::FillColor(color(value).ok_or_else(invalid)?),
        FieldName::Transparency => {
            FieldEdit::Transparency(value.parse().map_err(|_| invalid())?)
        }
        FieldName::HatchStyle => FieldEdit::HatchStyle(variant(value).ok_or_else(invalid)?),
        FieldName::HatchBackColor => FieldEdit::HatchBackColor(color(value).ok_or_else(invalid)?),
        FieldName::HatchBackTransparent => {
            FieldEdit::HatchBackTransparent(flag(value).ok_or_else(invalid)?)
        }
        FieldName::GradientType => FieldEdit::GradientType(variant(value).ok_or_else(invalid)?),
        FieldName::GradientColor2 => FieldEdit::GradientColor2(color(value).ok_or_else(invalid)?),
        FieldName::GradientRotation => {
            FieldEdit::GradientRotation(number(value).ok_or_else(invalid)?)
        }
        FieldName::Picture => FieldEdit::Picture(image(value).ok_or_else(invalid)?),
    };
    Ok(edit)
}

fn number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn color(value: &str) -> Option<Rgba> {
    Rgba::from_hex(value)
}

/// A single character, or a `0x`-prefixed byte code
fn glyph(value: &str) -> Option<u8> {
    if let Some(hex) = value.strip_prefix("0x") {
        return u8::from_str_radix(hex, 16).ok();
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => u8::try_from(u32::from(c)).ok(),
        _ => None,
    }
}

/// Enum variants by their snake_case serde name
fn variant<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
}

fn image(value: &str) -> Option<ImageRef> {
    ImageRef::probe(std::path::Path::new(value))
        .map_err(|e| tracing::warn!("{:#}", e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FillMode, HatchStyle, VectorMarker};

    #[test]
    fn parses_typed_values() {
        assert_eq!(
            parse_assignment("fill_color=#ff0000").unwrap(),
            FieldEdit::FillColor(Rgba::RED)
        );
        assert_eq!(
            parse_assignment("fill_mode = gradient").unwrap(),
            FieldEdit::FillMode(FillMode::Gradient)
        );
        assert_eq!(
            parse_assignment("hatch_style=diagonal_cross").unwrap(),
            FieldEdit::HatchStyle(HatchStyle::DiagonalCross)
        );
        assert_eq!(
            parse_assignment("vector_preset=triangle_up").unwrap(),
            FieldEdit::VectorPreset(VectorMarker::TriangleUp)
        );
        assert_eq!(
            parse_assignment("line_width=2").unwrap(),
            FieldEdit::LineWidthIndex(2)
        );
        assert_eq!(
            parse_assignment("outline_visible=off").unwrap(),
            FieldEdit::OutlineVisible(false)
        );
    }

    #[test]
    fn parses_glyph_codes() {
        assert_eq!(
            parse_field_edit("font_glyph", "A").unwrap(),
            FieldEdit::FontGlyph(b'A')
        );
        assert_eq!(
            parse_field_edit("font_glyph", "0x6c").unwrap(),
            FieldEdit::FontGlyph(0x6c)
        );
        assert!(parse_field_edit("font_glyph", "AB").is_err());
    }

    #[test]
    fn out_of_range_numbers_still_parse() {
        assert_eq!(
            parse_field_edit("size", "-3").unwrap(),
            FieldEdit::Size(-3.0)
        );
        assert_eq!(
            parse_field_edit("side_count", "2").unwrap(),
            FieldEdit::VectorSideCount(2)
        );
    }

    #[test]
    fn rejects_unknown_fields_and_bad_values() {
        assert!(matches!(
            parse_assignment("colour=#ffffff"),
            Err(StyleError::InvalidField { field, .. }) if field == "colour"
        ));
        assert!(parse_assignment("size=big").is_err());
        assert!(parse_assignment("size=NaN").is_err());
        assert!(parse_assignment("transparency=300").is_err());
        assert!(parse_assignment("fill_mode=plaid").is_err());
        assert!(parse_assignment("no_equals_sign").is_err());
        assert!(parse_assignment("bitmap_icon=/missing/icon.png").is_err());
    }
}
