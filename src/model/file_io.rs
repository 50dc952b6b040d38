// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! Style files on disk.
//!
//! A style file holds the pretty-printed snapshot envelope, so a loaded
//! style captures to the same snapshot it was saved from.

use anyhow::{Context, Result};
use std::path::Path;

use super::StyleModel;
use crate::snapshot::StyleSnapshot;

impl StyleModel {
    /// Load a style file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read style: {}", path.display()))?;
        let style = StyleSnapshot::from_text(text)
            .decode()
            .with_context(|| format!("Failed to parse style: {}", path.display()))?;
        tracing::debug!("Loaded style from {}", path.display());
        Ok(style)
    }

    /// Save the style to a file, replacing it
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let snapshot = StyleSnapshot::capture_pretty(self)
            .with_context(|| format!("Failed to serialize style for {}", path.display()))?;
        std::fs::write(path, snapshot.as_str())
            .with_context(|| format!("Failed to write style: {}", path.display()))?;
        tracing::info!("Saved style: {}", path.display());
        Ok(())
    }
}

/// Check if a path looks like a style file
pub fn is_style_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FillMode, Rgba};

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.json");

        let mut style = StyleModel::default();
        style.fill.mode = FillMode::Hatch;
        style.fill.hatch_back_color = Rgba::RED;
        style.save(&path).unwrap();

        let loaded = StyleModel::load(&path).unwrap();
        assert_eq!(loaded, style);
        assert_eq!(
            StyleSnapshot::capture(&loaded).unwrap(),
            StyleSnapshot::capture(&style).unwrap()
        );
    }

    #[test]
    fn load_reports_path_on_bad_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();

        let err = StyleModel::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn test_is_style_file() {
        assert!(is_style_file(Path::new("points.json")));
        assert!(is_style_file(Path::new("/styles/POINTS.JSON")));
        assert!(!is_style_file(Path::new("points.toml")));
    }
}
