// src/glyph.rs

//! Defines the `Glyph` type: where one character lives in a font image and
//! how far the pen moves after drawing it.

use crate::geometry::Rect;

/// One character of a bitmap font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Glyph {
    /// The visible pixels of the character inside the font's source image.
    /// Zero width for characters with no visible pixels.
    pub rect: Rect,
    /// Horizontal pen advance in pixels after this glyph.
    pub advance: i32,
}

impl Glyph {
    pub const fn new(rect: Rect, advance: i32) -> Self {
        Self { rect, advance }
    }

    /// True when drawing this glyph would touch no pixels.
    pub const fn is_blank(&self) -> bool {
        self.rect.is_empty()
    }
}
