// src/color.rs

//! Defines the 8-bit-per-channel `Color` type used by every surface and
//! drawing call.

use serde::{Deserialize, Serialize};

/// A straight (non-premultiplied) RGBA color.
///
/// Alpha 0 is fully transparent and doubles as the "draw nothing" sentinel:
/// solid primitives drawn with a transparent color are skipped outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    0xff
}

impl Color {
    /// Fully transparent black. Also the "no offset" additive color.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const RED: Color = Color::rgb(0xff, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 0xff, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 0xff);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 0xff
    }

    /// Returns the same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Packs the channels into one word laid out as `0xAARRGGBB`.
    ///
    /// The layout is fixed by value, not by memory order, so it is the same
    /// on every target.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Inverse of [`Color::to_packed`].
    #[inline]
    pub const fn from_packed(word: u32) -> Self {
        Self {
            r: (word >> 16) as u8,
            g: (word >> 8) as u8,
            b: word as u8,
            a: (word >> 24) as u8,
        }
    }

    /// RGBA byte order, as stored in PNG rows.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout_is_argb() {
        let c = Color::rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.to_packed(), 0x4411_2233);
        assert_eq!(Color::from_packed(0x4411_2233), c);
    }

    #[test]
    fn constants_have_expected_alpha() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(Color::WHITE.is_opaque());
        assert_eq!(Color::WHITE.to_packed(), 0xffff_ffff);
        assert_eq!(Color::default(), Color::TRANSPARENT);
    }

    #[test]
    fn deserializing_without_alpha_yields_opaque() {
        let c: Color = serde_json::from_str(r#"{"r": 10, "g": 20, "b": 30}"#).unwrap();
        assert_eq!(c, Color::rgb(10, 20, 30));
    }
}
