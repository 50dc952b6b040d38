// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Point style data model

pub mod color;
pub mod file_io;
pub mod ids;
pub mod presets;
pub mod style;

pub use color::Rgba;
pub use ids::{ImageRef, LayerHandle, RasterHandle};
pub use presets::{VectorMarker, VectorPreset};
pub use style::{
    DashStyle, FillMode, FillStyle, GradientType, HatchStyle, LineStyle, MarkerMode, MarkerStyle,
    StyleModel, VectorShape, read_style, write_style,
};
