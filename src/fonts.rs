// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Font catalog access for font-glyph markers.
//!
//! The catalog is an outside collaborator; every read failure degrades to
//! an empty list and a warning, never to a session error.

use parley::FontContext;

use crate::error::{Result, StyleError};
use crate::settings::fonts::{ALLOW_LIST, DEFAULT_FONT, GLYPH_CODE_FIRST, GLYPH_CODE_LAST};

/// Source of font family names and their glyph codes
pub trait FontCatalog: Send + Sync {
    /// All installed family names
    fn families(&self) -> Result<Vec<String>>;

    /// Byte codes that can be picked as a marker glyph in `family`
    fn glyph_codes(&self, family: &str) -> Result<Vec<u8>> {
        let _ = family;
        Ok((GLYPH_CODE_FIRST..=GLYPH_CODE_LAST).collect())
    }
}

/// Families that may be offered in the font list.
///
/// With `show_all` off only the symbol-font allow list survives, compared
/// case-insensitively.
pub fn selectable_fonts(catalog: &dyn FontCatalog, show_all: bool) -> Vec<String> {
    let families = match catalog.families() {
        Ok(families) => families,
        Err(e) => {
            tracing::warn!("Font list unavailable: {}", e);
            return Vec::new();
        }
    };
    if show_all {
        return families;
    }
    families
        .into_iter()
        .filter(|name| ALLOW_LIST.contains(&name.to_lowercase().as_str()))
        .collect()
}

/// Pick the list entry matching `current`, else the default font.
///
/// Returns `None` when neither is listed.
pub fn resolve_selection(fonts: &[String], current: &str) -> Option<String> {
    fonts
        .iter()
        .find(|name| name.eq_ignore_ascii_case(current))
        .or_else(|| fonts.iter().find(|name| name.as_str() == DEFAULT_FONT))
        .cloned()
}

/// Glyph codes of `family`, or nothing if the catalog can't say.
pub fn glyphs_for(catalog: &dyn FontCatalog, family: &str) -> Vec<u8> {
    catalog.glyph_codes(family).unwrap_or_else(|e| {
        tracing::warn!("Glyphs of {:?} unavailable: {}", family, e);
        Vec::new()
    })
}

// ============================================================================
// CATALOGS
// ============================================================================

/// Fonts installed on this system, enumerated through parley
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFonts;

impl FontCatalog for SystemFonts {
    fn families(&self) -> Result<Vec<String>> {
        let mut font_cx = FontContext::default();
        let mut names: Vec<String> = font_cx
            .collection
            .family_names()
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// A fixed catalog, for headless use and tests
#[derive(Debug, Default, Clone)]
pub struct StaticFonts {
    families: Vec<(String, Vec<u8>)>,
}

impl StaticFonts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a family with its glyph codes
    pub fn with_family(mut self, name: impl Into<String>, glyphs: impl Into<Vec<u8>>) -> Self {
        self.families.push((name.into(), glyphs.into()));
        self
    }
}

impl FontCatalog for StaticFonts {
    fn families(&self) -> Result<Vec<String>> {
        Ok(self.families.iter().map(|(name, _)| name.clone()).collect())
    }

    fn glyph_codes(&self, family: &str) -> Result<Vec<u8>> {
        self.families
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(family))
            .map(|(_, glyphs)| glyphs.clone())
            .ok_or_else(|| StyleError::FontCatalog(format!("unknown family {family:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl FontCatalog for Broken {
        fn families(&self) -> Result<Vec<String>> {
            Err(StyleError::FontCatalog("no font service".into()))
        }
    }

    fn catalog() -> StaticFonts {
        StaticFonts::new()
            .with_family("Arial", b"ABC".to_vec())
            .with_family("Wingdings", vec![0x21, 0x22])
            .with_family("Times New Roman", b"xyz".to_vec())
            .with_family("Comic Sans MS", b"A".to_vec())
    }

    #[test]
    fn allow_list_filters_when_not_showing_all() {
        let fonts = selectable_fonts(&catalog(), false);
        assert_eq!(fonts, vec!["Wingdings", "Times New Roman"]);
    }

    #[test]
    fn show_all_lists_every_family() {
        assert_eq!(selectable_fonts(&catalog(), true).len(), 4);
    }

    #[test]
    fn catalog_failure_degrades_to_empty() {
        assert!(selectable_fonts(&Broken, true).is_empty());
        assert!(glyphs_for(&Broken, "Arial").is_empty());
    }

    #[test]
    fn selection_matches_case_insensitively() {
        let fonts = selectable_fonts(&catalog(), true);
        assert_eq!(
            resolve_selection(&fonts, "wingdings").as_deref(),
            Some("Wingdings")
        );
    }

    #[test]
    fn selection_falls_back_to_default_font() {
        let fonts = selectable_fonts(&catalog(), true);
        assert_eq!(resolve_selection(&fonts, "Missing").as_deref(), Some("Arial"));

        let symbols = selectable_fonts(&catalog(), false);
        assert_eq!(resolve_selection(&symbols, "Missing"), None);
    }

    #[test]
    fn default_glyph_range_covers_byte_codes() {
        let glyphs = Broken.glyph_codes("anything").unwrap();
        assert_eq!(glyphs.first(), Some(&0x20));
        assert_eq!(glyphs.last(), Some(&0xFF));
    }
}
