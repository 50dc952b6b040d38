// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Flat field projection of a `StyleModel`.
//!
//! Views edit a flat set of values (`StyleFields`); this module maps them
//! onto the nested style and back. Writes are unconditional: every push
//! copies every field, including fields of inactive fill and marker modes,
//! so values entered for a hidden mode survive mode switches. The active
//! field lists only decide what a view shows.

mod edit;
pub mod parse;

pub use edit::{FieldEdit, FieldName};

use crate::fonts::{FontCatalog, glyphs_for};
use crate::model::{
    DashStyle, FillMode, GradientType, HatchStyle, ImageRef, MarkerMode, Rgba, StyleModel,
    VectorShape,
};
use crate::settings;

/// Current value of every editable field, in edited units
#[derive(Debug, Clone, PartialEq)]
pub struct StyleFields {
    // marker
    pub marker_mode: MarkerMode,
    pub size: f64,
    pub rotation: f64,
    pub vector_shape: VectorShape,
    pub vector_side_count: i32,
    /// Ten times the stored ratio
    pub vector_side_ratio: f64,
    pub bitmap_icon: Option<ImageRef>,
    pub scale_icons: bool,
    pub font_name: String,
    pub font_glyph: u8,

    // outline
    pub outline_visible: bool,
    pub dash_style: DashStyle,
    /// Stored width minus one. Fractional widths show truncated and are
    /// only rewritten when the index itself is edited.
    pub line_width_index: usize,
    pub outline_color: Rgba,

    // fill
    pub fill_visible: bool,
    pub fill_mode: FillMode,
    pub fill_color: Rgba,
    pub transparency: u8,
    pub hatch_style: HatchStyle,
    pub hatch_back_color: Rgba,
    pub hatch_back_transparent: bool,
    pub gradient_type: GradientType,
    pub gradient_color2: Rgba,
    pub gradient_rotation: f64,
    pub picture: Option<ImageRef>,
}

/// Fields shown regardless of mode
pub const COMMON_FIELDS: &[FieldName] = &[
    FieldName::Size,
    FieldName::Rotation,
    FieldName::FillColor,
    FieldName::Transparency,
    FieldName::OutlineVisible,
    FieldName::DashStyle,
    FieldName::LineWidth,
    FieldName::OutlineColor,
    FieldName::FillVisible,
    FieldName::FillMode,
];

/// Fill fields a view should expose for `mode`
pub fn active_fill_fields(mode: FillMode) -> &'static [FieldName] {
    match mode {
        FillMode::Solid => &[],
        FillMode::Hatch => &[
            FieldName::HatchStyle,
            FieldName::HatchBackColor,
            FieldName::HatchBackTransparent,
        ],
        FillMode::Gradient => &[
            FieldName::GradientType,
            FieldName::GradientColor2,
            FieldName::GradientRotation,
        ],
        FillMode::Picture => &[FieldName::Picture],
    }
}

/// Marker fields a view should expose for `mode`
pub fn active_marker_fields(mode: MarkerMode) -> &'static [FieldName] {
    match mode {
        MarkerMode::Vector => &[
            FieldName::VectorPreset,
            FieldName::VectorShape,
            FieldName::VectorSideCount,
            FieldName::VectorSideRatio,
        ],
        MarkerMode::Bitmap => &[FieldName::BitmapIcon, FieldName::ScaleIcons],
        MarkerMode::FontGlyph => &[FieldName::FontName, FieldName::FontGlyph],
    }
}

/// Read every field out of the model.
pub fn pull_from_model(model: &StyleModel) -> StyleFields {
    let marker = &model.marker;
    let line = &model.line;
    let fill = &model.fill;
    StyleFields {
        marker_mode: marker.mode,
        size: marker.size,
        rotation: marker.rotation,
        vector_shape: marker.vector_shape,
        vector_side_count: marker.vector_side_count,
        vector_side_ratio: marker.vector_side_ratio * settings::marker::SIDE_RATIO_SCALE,
        bitmap_icon: marker.bitmap.clone(),
        scale_icons: marker.scale_bitmap,
        font_name: marker.font_name.clone(),
        font_glyph: marker.font_glyph_code,

        outline_visible: line.visible,
        dash_style: line.dash_style,
        line_width_index: width_index(line.width),
        outline_color: line.color,

        fill_visible: fill.visible,
        fill_mode: fill.mode,
        fill_color: fill.color,
        transparency: fill.transparency,
        hatch_style: fill.hatch_style,
        hatch_back_color: fill.hatch_back_color,
        hatch_back_transparent: fill.hatch_back_transparent,
        gradient_type: fill.gradient_type,
        gradient_color2: fill.gradient_color2,
        gradient_rotation: fill.gradient_rotation,
        picture: fill.picture.clone(),
    }
}

/// Write every field into the model, whatever the active modes.
pub fn push_to_model(fields: &StyleFields, model: &mut StyleModel) {
    let marker = &mut model.marker;
    marker.mode = fields.marker_mode;
    marker.size = fields.size;
    marker.rotation = fields.rotation;
    marker.vector_shape = fields.vector_shape;
    marker.vector_side_count = fields.vector_side_count;
    // Scaled fields are written back only when the edited value moved;
    // stored / 10 * 10 does not always give back the stored bits.
    if fields.vector_side_ratio != marker.vector_side_ratio * settings::marker::SIDE_RATIO_SCALE {
        marker.vector_side_ratio = fields.vector_side_ratio / settings::marker::SIDE_RATIO_SCALE;
    }
    marker.bitmap.clone_from(&fields.bitmap_icon);
    marker.scale_bitmap = fields.scale_icons;
    marker.font_name.clone_from(&fields.font_name);
    marker.font_glyph_code = fields.font_glyph;

    let line = &mut model.line;
    line.visible = fields.outline_visible;
    line.dash_style = fields.dash_style;
    if fields.line_width_index != width_index(line.width) {
        line.width = fields.line_width_index as f64 + settings::line::WIDTH_INDEX_OFFSET;
    }
    line.color = fields.outline_color;
    line.transparency = fields.transparency;

    let fill = &mut model.fill;
    fill.visible = fields.fill_visible;
    fill.mode = fields.fill_mode;
    fill.color = fields.fill_color;
    fill.transparency = fields.transparency;
    fill.hatch_style = fields.hatch_style;
    fill.hatch_back_color = fields.hatch_back_color;
    fill.hatch_back_transparent = fields.hatch_back_transparent;
    fill.gradient_type = fields.gradient_type;
    fill.gradient_color2 = fields.gradient_color2;
    fill.gradient_rotation = fields.gradient_rotation;
    fill.picture.clone_from(&fields.picture);
}

fn width_index(width: f64) -> usize {
    (width - settings::line::WIDTH_INDEX_OFFSET).max(0.0) as usize
}

/// Result of applying one edit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Applied {
    /// New glyph set when the font changed
    pub glyphs: Option<Vec<u8>>,
}

/// Apply one edit to both the field set and the model.
///
/// Cross-field defaults run here, before the push. Picking a font
/// re-derives its glyph set and reselects the first glyph if the current
/// one is missing. Picking a vector symbol resets the vector geometry.
pub fn apply_edit(
    fields: &mut StyleFields,
    model: &mut StyleModel,
    edit: FieldEdit,
    fonts: &dyn FontCatalog,
) -> Applied {
    let mut applied = Applied::default();
    match edit {
        FieldEdit::FontName(name) => {
            let glyphs = glyphs_for(fonts, &name);
            if let Some(&first) = glyphs.first() {
                if !glyphs.contains(&fields.font_glyph) {
                    tracing::debug!(
                        "Glyph {:#04x} not in {:?}, using {:#04x}",
                        fields.font_glyph,
                        name,
                        first
                    );
                    fields.font_glyph = first;
                }
            }
            fields.font_name = name;
            applied.glyphs = Some(glyphs);
        }
        FieldEdit::VectorPreset(symbol) => {
            push_to_model(fields, model);
            model.marker.set_vector_marker(symbol);
            *fields = pull_from_model(model);
            return applied;
        }
        other => fields.set(other),
    }
    push_to_model(fields, model);
    applied
}

impl StyleFields {
    /// Store a plain edit value. Mode-switching edits also set the mode.
    fn set(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Size(v) => self.size = v,
            FieldEdit::Rotation(v) => self.rotation = v,
            // handled against the model in `apply_edit`
            FieldEdit::VectorPreset(_) => {}
            FieldEdit::VectorShape(v) => self.vector_shape = v,
            FieldEdit::VectorSideCount(v) => self.vector_side_count = v,
            FieldEdit::VectorSideRatio(v) => self.vector_side_ratio = v,
            FieldEdit::BitmapIcon(icon) => {
                self.bitmap_icon = Some(icon);
                self.marker_mode = MarkerMode::Bitmap;
            }
            FieldEdit::ScaleIcons(v) => self.scale_icons = v,
            FieldEdit::FontName(v) => self.font_name = v,
            FieldEdit::FontGlyph(code) => {
                self.font_glyph = code;
                self.marker_mode = MarkerMode::FontGlyph;
            }
            FieldEdit::OutlineVisible(v) => self.outline_visible = v,
            FieldEdit::DashStyle(v) => self.dash_style = v,
            FieldEdit::LineWidthIndex(v) => self.line_width_index = v,
            FieldEdit::OutlineColor(v) => self.outline_color = v,
            FieldEdit::FillVisible(v) => self.fill_visible = v,
            FieldEdit::FillMode(v) => self.fill_mode = v,
            FieldEdit::FillColor(v) => self.fill_color = v,
            FieldEdit::Transparency(v) => self.transparency = v,
            FieldEdit::HatchStyle(v) => self.hatch_style = v,
            FieldEdit::HatchBackColor(v) => self.hatch_back_color = v,
            FieldEdit::HatchBackTransparent(v) => self.hatch_back_transparent = v,
            FieldEdit::GradientType(v) => self.gradient_type = v,
            FieldEdit::GradientColor2(v) => self.gradient_color2 = v,
            FieldEdit::GradientRotation(v) => self.gradient_rotation = v,
            FieldEdit::Picture(picture) => self.picture = Some(picture),
        }
    }

    /// Fields a view should currently show
    pub fn visible_fields(&self) -> Vec<FieldName> {
        COMMON_FIELDS
            .iter()
            .chain(active_marker_fields(self.marker_mode))
            .chain(active_fill_fields(self.fill_mode))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::StaticFonts;
    use crate::model::VectorMarker;
    use proptest::prelude::*;

    fn fonts() -> StaticFonts {
        StaticFonts::new()
            .with_family("Arial", b"ABC".to_vec())
            .with_family("Wingdings", vec![0x21, 0x22, 0x23])
    }

    fn edit(model: &mut StyleModel, fields: &mut StyleFields, e: FieldEdit) -> Applied {
        apply_edit(fields, model, e, &fonts())
    }

    #[test]
    fn pull_then_push_leaves_model_unchanged() {
        let mut model = StyleModel::default();
        model.fill.mode = FillMode::Hatch;
        model.line.width = 3.0;
        let before = model.clone();

        let fields = pull_from_model(&model);
        push_to_model(&fields, &mut model);
        assert_eq!(model, before);
    }

    #[test]
    fn line_width_is_index_plus_one() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        assert_eq!(fields.line_width_index, 0);

        edit(&mut model, &mut fields, FieldEdit::LineWidthIndex(2));
        assert_eq!(model.line.width, 3.0);
    }

    #[test]
    fn side_ratio_is_stored_divided_by_ten() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::VectorSideRatio(4.0));
        assert!((model.marker.vector_side_ratio - 0.4).abs() < 1e-12);
    }

    #[test]
    fn transparency_drives_fill_and_outline() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::Transparency(100));
        assert_eq!(model.fill.transparency, 100);
        assert_eq!(model.line.transparency, 100);
    }

    #[test]
    fn rotation_is_not_normalized() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::Rotation(725.0));
        edit(&mut model, &mut fields, FieldEdit::GradientRotation(-30.0));
        assert_eq!(model.marker.rotation, 725.0);
        assert_eq!(model.fill.gradient_rotation, -30.0);
    }

    #[test]
    fn out_of_range_values_are_accepted() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::Size(-5.0));
        edit(&mut model, &mut fields, FieldEdit::VectorSideCount(1));
        assert_eq!(model.marker.size, -5.0);
        assert_eq!(model.marker.vector_side_count, 1);
    }

    #[test]
    fn hidden_gradient_values_survive_mode_switch() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::FillMode(FillMode::Gradient));
        edit(&mut model, &mut fields, FieldEdit::GradientColor2(Rgba::RED));
        edit(&mut model, &mut fields, FieldEdit::FillMode(FillMode::Solid));
        edit(&mut model, &mut fields, FieldEdit::FillMode(FillMode::Gradient));

        assert_eq!(model.fill.gradient_color2, Rgba::RED);
        assert_eq!(pull_from_model(&model).gradient_color2, Rgba::RED);
    }

    #[test]
    fn font_change_reselects_missing_glyph() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        assert_eq!(fields.font_glyph, b'A');

        let applied = edit(
            &mut model,
            &mut fields,
            FieldEdit::FontName("Wingdings".to_string()),
        );
        assert_eq!(applied.glyphs, Some(vec![0x21, 0x22, 0x23]));
        assert_eq!(model.marker.font_name, "Wingdings");
        assert_eq!(model.marker.font_glyph_code, 0x21);
        assert_eq!(model.marker.mode, MarkerMode::Vector);
    }

    #[test]
    fn font_change_keeps_present_glyph() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::FontGlyph(b'B'));
        edit(&mut model, &mut fields, FieldEdit::FontName("Arial".to_string()));
        assert_eq!(model.marker.font_glyph_code, b'B');
        assert_eq!(model.marker.mode, MarkerMode::FontGlyph);
    }

    #[test]
    fn unknown_font_keeps_glyph_and_reports_empty_set() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        let applied = edit(&mut model, &mut fields, FieldEdit::FontName("Nope".to_string()));
        assert_eq!(applied.glyphs, Some(Vec::new()));
        assert_eq!(model.marker.font_name, "Nope");
        assert_eq!(model.marker.font_glyph_code, b'A');
    }

    #[test]
    fn preset_resets_vector_geometry_and_fields() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::FontGlyph(b'C'));
        edit(&mut model, &mut fields, FieldEdit::VectorPreset(VectorMarker::Star));

        assert_eq!(model.marker.mode, MarkerMode::Vector);
        assert_eq!(model.marker.vector_shape, VectorShape::Star);
        assert_eq!(fields, pull_from_model(&model));
        assert!((fields.vector_side_ratio - 4.0).abs() < 1e-9);
    }

    #[test]
    fn bitmap_icon_switches_marker_mode() {
        let mut model = StyleModel::default();
        let mut fields = pull_from_model(&model);
        edit(
            &mut model,
            &mut fields,
            FieldEdit::BitmapIcon(ImageRef::new("pin.png", 16, 16)),
        );
        assert_eq!(model.marker.mode, MarkerMode::Bitmap);
        assert_eq!(
            fields.visible_fields().last(),
            Some(&FieldName::ScaleIcons)
        );
    }

    #[test]
    fn active_fields_follow_modes() {
        assert!(active_fill_fields(FillMode::Solid).is_empty());
        assert!(active_fill_fields(FillMode::Gradient).contains(&FieldName::GradientColor2));
        assert!(!active_fill_fields(FillMode::Hatch).contains(&FieldName::GradientColor2));
        assert!(active_marker_fields(MarkerMode::FontGlyph).contains(&FieldName::FontName));
    }

    #[test]
    fn unrelated_edit_keeps_stored_ratio_bits() {
        let mut model = StyleModel::default();
        model.marker.vector_side_ratio = 0.11;
        let mut fields = pull_from_model(&model);
        edit(&mut model, &mut fields, FieldEdit::Size(10.0));
        assert_eq!(model.marker.vector_side_ratio.to_bits(), 0.11f64.to_bits());
    }

    #[test]
    fn fractional_line_width_survives_until_index_edit() {
        let mut model = StyleModel::default();
        model.line.width = 2.5;
        let mut fields = pull_from_model(&model);
        assert_eq!(fields.line_width_index, 1);

        edit(&mut model, &mut fields, FieldEdit::Size(10.0));
        assert_eq!(model.line.width, 2.5);

        edit(&mut model, &mut fields, FieldEdit::LineWidthIndex(3));
        assert_eq!(model.line.width, 4.0);
    }

    proptest! {
        #[test]
        fn side_ratio_round_trips_through_storage(v in 0.0f64..100.0) {
            let mut model = StyleModel::default();
            let mut fields = pull_from_model(&model);
            apply_edit(&mut fields, &mut model, FieldEdit::VectorSideRatio(v), &fonts());
            let pulled = pull_from_model(&model).vector_side_ratio;
            prop_assert!((pulled - v).abs() < 1e-9);
        }
    }
}
