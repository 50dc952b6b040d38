// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Fixed settings and format constants.
//!
//! Values here are part of the saved-style format or of the editor's
//! fixed behavior. User-tunable options live in `config.rs`.

// ============================================================================
// MARKER SETTINGS
// ============================================================================
/// Vector side ratio is edited as `stored * 10`
const SIDE_RATIO_SCALE: f64 = 10.0;

/// Line width index shown to the user is `width - 1`
const LINE_WIDTH_INDEX_OFFSET: f64 = 1.0;

// ============================================================================
// FONT SETTINGS
// ============================================================================
/// Font selected when the style's font is not in the list
const DEFAULT_FONT: &str = "Arial";

/// Symbol fonts shown when "show all fonts" is off (compared lowercase)
const FONT_ALLOW_LIST: [&str; 5] = [
    "webdings",
    "wingdings",
    "wingdings 2",
    "wingdings 3",
    "times new roman",
];

/// First and last glyph codes offered for fonts without a charmap query
const GLYPH_CODE_FIRST: u8 = 0x20;
const GLYPH_CODE_LAST: u8 = 0xFF;

// ============================================================================
// SNAPSHOT SETTINGS
// ============================================================================
/// Version written into every snapshot envelope
const SNAPSHOT_VERSION: u32 = 1;

// ============================================================================
// PREVIEW SETTINGS
// ============================================================================
const PREVIEW_WIDTH: f64 = 96.0;
const PREVIEW_HEIGHT: f64 = 96.0;
/// Dialog background behind the preview (0xRRGGBB)
const PREVIEW_BACKGROUND: u32 = 0xF0F0F0;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Marker field scaling
pub mod marker {
    /// Factor between the edited side ratio and the stored one.
    pub const SIDE_RATIO_SCALE: f64 = super::SIDE_RATIO_SCALE;
}

/// Outline field scaling
pub mod line {
    /// Offset between stored line width and its list index.
    pub const WIDTH_INDEX_OFFSET: f64 = super::LINE_WIDTH_INDEX_OFFSET;
}

/// Font selection behavior
pub mod fonts {
    pub const DEFAULT_FONT: &str = super::DEFAULT_FONT;
    pub const ALLOW_LIST: [&str; 5] = super::FONT_ALLOW_LIST;
    pub const GLYPH_CODE_FIRST: u8 = super::GLYPH_CODE_FIRST;
    pub const GLYPH_CODE_LAST: u8 = super::GLYPH_CODE_LAST;
}

/// Snapshot format
pub mod snapshot {
    pub const VERSION: u32 = super::SNAPSHOT_VERSION;
}

/// Preview defaults
pub mod preview {
    pub const WIDTH: f64 = super::PREVIEW_WIDTH;
    pub const HEIGHT: f64 = super::PREVIEW_HEIGHT;
    pub const BACKGROUND: u32 = super::PREVIEW_BACKGROUND;
}
