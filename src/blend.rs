// src/blend.rs

//! Pixel combination rules.
//!
//! Callers never pass a mode flag. Instead the tint and additive colors of a
//! draw call are classified once by [`select_blend_mode`], and the resulting
//! [`BlendMode`] is applied to every pixel of that call. Plain opaque-white
//! draws therefore take the cheapest path.
//!
//! All three rules finish with straight-alpha source-over compositing. On an
//! opaque destination (the normal case for the screen) this is the linear
//! interpolation `dst + (src - dst) * a`; on a transparent destination it
//! copies the source unchanged, so blitting onto a cleared image is exact.

use crate::color::Color;

/// Which combination rule a draw call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Straight alpha of the source pixel.
    Plain,
    /// Source channels and alpha multiplied by a tint color.
    Tinted,
    /// A per-channel offset added to the source before tinting.
    TintedAdditive,
}

/// Classifies a draw call's modifier colors.
///
/// `Plain` exactly when the tint is opaque white. Otherwise `TintedAdditive`
/// when the additive color carries any red, green or blue offset, else
/// `Tinted`. Additive alpha is never read by the blend math and so does not
/// take part in the decision.
pub fn select_blend_mode(tint: Color, additive: Color) -> BlendMode {
    if tint == Color::WHITE {
        BlendMode::Plain
    } else if (additive.r | additive.g | additive.b) != 0 {
        BlendMode::TintedAdditive
    } else {
        BlendMode::Tinted
    }
}

impl BlendMode {
    /// Combines `src` into `dst` using this rule.
    #[inline]
    pub fn apply(self, dst: Color, src: Color, tint: Color, additive: Color) -> Color {
        match self {
            BlendMode::Plain => blend_plain(dst, src),
            BlendMode::Tinted => blend_tinted(dst, src, tint),
            BlendMode::TintedAdditive => blend_tinted_additive(dst, src, tint, additive),
        }
    }
}

#[inline]
fn mul_div_255(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

/// Source-over compositing of straight-alpha colors, rounded to nearest.
#[inline]
fn composite(dst: Color, src: Color) -> Color {
    match src.a {
        0 => dst,
        0xff => src,
        _ => {
            let sa = src.a as u32;
            let src_weight = sa * 255;
            let dst_weight = dst.a as u32 * (255 - sa);
            let total = src_weight + dst_weight;
            let mix = |s: u8, d: u8| -> u8 {
                ((s as u32 * src_weight + d as u32 * dst_weight + total / 2) / total) as u8
            };
            Color {
                r: mix(src.r, dst.r),
                g: mix(src.g, dst.g),
                b: mix(src.b, dst.b),
                a: ((total + 127) / 255) as u8,
            }
        }
    }
}

/// Straight alpha blend of `src` over `dst`.
#[inline]
pub fn blend_plain(dst: Color, src: Color) -> Color {
    composite(dst, src)
}

/// Multiplies the source by `tint` (alpha included), then blends.
#[inline]
pub fn blend_tinted(dst: Color, src: Color, tint: Color) -> Color {
    let a = mul_div_255(src.a, tint.a);
    if a == 0 {
        return dst;
    }
    let tinted = Color {
        r: mul_div_255(src.r, tint.r),
        g: mul_div_255(src.g, tint.g),
        b: mul_div_255(src.b, tint.b),
        a,
    };
    composite(dst, tinted)
}

/// Adds `additive` to the source channels (saturating at 255), then applies
/// [`blend_tinted`].
#[inline]
pub fn blend_tinted_additive(dst: Color, src: Color, tint: Color, additive: Color) -> Color {
    let boosted = Color {
        r: src.r.saturating_add(additive.r),
        g: src.g.saturating_add(additive.g),
        b: src.b.saturating_add(additive.b),
        a: src.a,
    };
    blend_tinted(dst, boosted, tint)
}
