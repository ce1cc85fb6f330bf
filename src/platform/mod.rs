// src/platform/mod.rs
//
// Window-system boundary: the events a platform delivers, the trait the
// engine drives it through, and the letterbox geometry shared by every
// windowed backend.

use crate::geometry::{saturate_i32, Rect};
use crate::keys::KeyCode;

pub mod headless;
pub mod platform_trait;

pub use headless::HeadlessPlatform;
pub use platform_trait::Platform;


/// An input or window event, in window pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    KeyDown { code: KeyCode, repeat: bool },
    KeyUp { code: KeyCode },
    /// A typed character, as a Unicode scalar value.
    Char(u32),
    MouseButton { button: u8, down: bool, x: i32, y: i32 },
    MouseMove { x: i32, y: i32 },
    /// Wheel movement in notches; positive is away from the user.
    MouseWheel { delta: f32 },
    Resize { width: i32, height: i32 },
    CloseRequested,
}

/// The rect, in window pixels, that a `screen_w` x `screen_h` surface is
/// stretched into: as large as fits while keeping its aspect ratio, and
/// centered. The scaled axis is rounded up.
///
/// Returns an empty rect when any dimension is not positive.
pub fn letterbox_rect(screen_w: i32, screen_h: i32, window_w: i32, window_h: i32) -> Rect {
    if screen_w <= 0 || screen_h <= 0 || window_w <= 0 || window_h <= 0 {
        return Rect::default();
    }
    let src_ar = screen_h as f32 / screen_w as f32;
    let dst_ar = window_h as f32 / window_w as f32;
    let (w, h) = if src_ar < dst_ar {
        (window_w, (window_w as f32 * src_ar).ceil() as i32)
    } else {
        ((window_h as f32 / src_ar).ceil() as i32, window_h)
    };
    Rect::new((window_w - w) / 2, (window_h - h) / 2, w, h)
}

/// Maps a window pixel to a screen pixel through the letterbox `rect`.
///
/// Points in the bars map outside `0..screen_w` / `0..screen_h`; they are
/// clamped to the screen, only saturated at the `i32` range. Returns `None`
/// when `rect` is empty.
pub fn window_to_screen(rect: Rect, screen_w: i32, screen_h: i32, x: i32, y: i32) -> Option<(i32, i32)> {
    if rect.is_empty() {
        return None;
    }
    let sx = (x as i64 - rect.x as i64) * screen_w as i64 / rect.w as i64;
    let sy = (y as i64 - rect.y as i64) * screen_h as i64 / rect.h as i64;
    Some((saturate_i32(sx), saturate_i32(sy)))
}
