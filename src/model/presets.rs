// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Named vector marker symbols offered by the symbol palette.
//!
//! Each preset expands to a shape, side count, side ratio and rotation.
//! Choosing one always switches the marker to vector mode.

use serde::{Deserialize, Serialize};

use super::style::{MarkerMode, MarkerStyle, VectorShape};

/// A symbol in the vector marker palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorMarker {
    Square,
    Circle,
    Diamond,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Cross,
    XCross,
    Star,
    Pentagon,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Asterisk,
    Flag,
}

/// Marker geometry a preset expands to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorPreset {
    pub shape: VectorShape,
    pub side_count: i32,
    /// Stored (not edited) ratio
    pub side_ratio: f64,
    pub rotation: f64,
}

impl VectorMarker {
    pub const ALL: [VectorMarker; 17] = [
        VectorMarker::Square,
        VectorMarker::Circle,
        VectorMarker::Diamond,
        VectorMarker::TriangleUp,
        VectorMarker::TriangleDown,
        VectorMarker::TriangleLeft,
        VectorMarker::TriangleRight,
        VectorMarker::Cross,
        VectorMarker::XCross,
        VectorMarker::Star,
        VectorMarker::Pentagon,
        VectorMarker::ArrowUp,
        VectorMarker::ArrowDown,
        VectorMarker::ArrowLeft,
        VectorMarker::ArrowRight,
        VectorMarker::Asterisk,
        VectorMarker::Flag,
    ];

    pub fn preset(self) -> VectorPreset {
        use VectorShape as S;
        let (shape, side_count, side_ratio, rotation) = match self {
            Self::Square => (S::Regular, 4, 0.5, 45.0),
            Self::Circle => (S::Circle, 36, 0.5, 0.0),
            Self::Diamond => (S::Regular, 4, 0.5, 0.0),
            Self::TriangleUp => (S::Regular, 3, 0.5, 0.0),
            Self::TriangleDown => (S::Regular, 3, 0.5, 180.0),
            Self::TriangleLeft => (S::Regular, 3, 0.5, 270.0),
            Self::TriangleRight => (S::Regular, 3, 0.5, 90.0),
            Self::Cross => (S::Cross, 4, 0.2, 0.0),
            Self::XCross => (S::Cross, 4, 0.2, 45.0),
            Self::Star => (S::Star, 5, 0.4, 0.0),
            Self::Pentagon => (S::Regular, 5, 0.5, 0.0),
            Self::ArrowUp => (S::Arrow, 3, 0.4, 0.0),
            Self::ArrowDown => (S::Arrow, 3, 0.4, 180.0),
            Self::ArrowLeft => (S::Arrow, 3, 0.4, 270.0),
            Self::ArrowRight => (S::Arrow, 3, 0.4, 90.0),
            Self::Asterisk => (S::Star, 6, 0.1, 0.0),
            Self::Flag => (S::Flag, 4, 0.5, 0.0),
        };
        VectorPreset {
            shape,
            side_count,
            side_ratio,
            rotation,
        }
    }
}

impl MarkerStyle {
    /// Switch to vector mode with the geometry of `symbol`.
    pub fn set_vector_marker(&mut self, symbol: VectorMarker) {
        let preset = symbol.preset();
        self.mode = MarkerMode::Vector;
        self.vector_shape = preset.shape;
        self.vector_side_count = preset.side_count;
        self.vector_side_ratio = preset.side_ratio;
        self.rotation = preset.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_switch_to_vector_mode() {
        let mut marker = MarkerStyle {
            mode: MarkerMode::FontGlyph,
            ..MarkerStyle::default()
        };
        marker.set_vector_marker(VectorMarker::TriangleDown);
        assert_eq!(marker.mode, MarkerMode::Vector);
        assert_eq!(marker.vector_side_count, 3);
        assert_eq!(marker.rotation, 180.0);
    }

    #[test]
    fn every_preset_has_a_valid_polygon() {
        for symbol in VectorMarker::ALL {
            let preset = symbol.preset();
            assert!(preset.side_count >= 3, "{symbol:?}");
            assert!(preset.side_ratio > 0.0 && preset.side_ratio <= 1.0, "{symbol:?}");
        }
    }
}
