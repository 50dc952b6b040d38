// Copyright 2025 the Symbology Authors
// SPDX-License-Identifier: Apache-2.0

//! 8-bit RGBA colors as stored in a style.
//!
//! Styles keep colors as plain bytes so snapshots stay exact. Conversion to
//! `peniko::Color` happens only at the preview boundary.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// An sRGB color with straight alpha, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgba = Rgba::rgb(0x00, 0x00, 0x00);
    pub const RED: Rgba = Rgba::rgb(0xff, 0x00, 0x00);
    pub const GRAY: Rgba = Rgba::rgb(0x80, 0x80, 0x80);

    /// Opaque color from three channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Opaque color from `0xRRGGBB`
    pub const fn from_rgb_u32(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::RED));
        assert_eq!(
            Rgba::from_hex("00ff0080"),
            Some(Rgba {
                r: 0,
                g: 0xff,
                b: 0,
                a: 0x80
            })
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgba::from_hex("#ff00"), None);
        assert_eq!(Rgba::from_hex("#gg0000"), None);
        assert_eq!(Rgba::from_hex("#ff00é0"), None);
    }

    #[test]
    fn rgb_u32_unpacks_channels() {
        assert_eq!(Rgba::from_rgb_u32(0x102030), Rgba::rgb(0x10, 0x20, 0x30));
    }
}
