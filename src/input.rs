// src/input.rs

//! Per-frame keyboard, mouse and text input state.
//!
//! Each key and mouse button cell is a small automaton driven by platform
//! events:
//!
//! ```text
//!            down event                    up event
//!  (empty) ──────────────► DOWN|PRESSED ─────────────► RELEASED
//!                               │ frame ends               │ frame ends
//!                               ▼                          ▼
//!                             DOWN                      (empty)
//! ```
//!
//! `PRESSED` and `RELEASED` are edges: they stay visible for exactly the
//! frame in which the event arrived and are cleared by
//! [`InputFrame::clear_frame_edges`].

use crate::geometry::saturate_i32;
use crate::keys::{KeyCode, KEY_COUNT, MOUSE_BUTTON_COUNT};
use bitflags::bitflags;
use log::trace;
use std::collections::VecDeque;

/// Maximum number of characters queued between two frames.
pub const CHAR_QUEUE_CAPACITY: usize = 32;

bitflags! {
    /// State of one key or mouse button.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InputFlags: u8 {
        /// Currently held.
        const DOWN = 1 << 0;
        /// Went down during this frame.
        const PRESSED = 1 << 1;
        /// Went up during this frame.
        const RELEASED = 1 << 2;
    }
}

impl InputFlags {
    fn press(&mut self) {
        *self = InputFlags::DOWN | InputFlags::PRESSED;
    }

    fn release(&mut self) {
        self.remove(InputFlags::DOWN);
        self.insert(InputFlags::RELEASED);
    }
}

/// Input state accumulated over one frame.
#[derive(Debug, Clone)]
pub struct InputFrame {
    keys: [InputFlags; KEY_COUNT],
    mouse: [InputFlags; MOUSE_BUTTON_COUNT],
    mouse_pos: (i32, i32),
    mouse_delta: (i32, i32),
    scroll: f32,
    chars: VecDeque<u32>,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl InputFrame {
    pub fn new() -> Self {
        Self {
            keys: [InputFlags::empty(); KEY_COUNT],
            mouse: [InputFlags::empty(); MOUSE_BUTTON_COUNT],
            mouse_pos: (0, 0),
            mouse_delta: (0, 0),
            scroll: 0.0,
            chars: VecDeque::with_capacity(CHAR_QUEUE_CAPACITY),
        }
    }

    // --- Event ingestion ---

    /// A key went down. Auto-repeat events are ignored so `PRESSED` fires
    /// once per physical press.
    pub fn key_down_event(&mut self, code: KeyCode, is_repeat: bool) {
        if is_repeat {
            return;
        }
        self.keys[code as usize].press();
    }

    pub fn key_up_event(&mut self, code: KeyCode) {
        self.keys[code as usize].release();
    }

    /// A mouse button changed state. Buttons outside the tracked range are
    /// ignored.
    pub fn mouse_button_event(&mut self, button: u8, down: bool) {
        let Some(cell) = self.mouse.get_mut(button as usize) else {
            trace!("Ignoring event for untracked mouse button {}", button);
            return;
        };
        if down {
            cell.press();
        } else {
            cell.release();
        }
    }

    /// The pointer moved to `(x, y)` in screen pixels. The movement is added
    /// to the frame's delta, saturating at the `i32` range.
    pub fn mouse_move_event(&mut self, x: i32, y: i32) {
        let (px, py) = self.mouse_pos;
        let (ddx, ddy) = self.mouse_delta;
        self.mouse_delta = (
            saturate_i32(ddx as i64 + x as i64 - px as i64),
            saturate_i32(ddy as i64 + y as i64 - py as i64),
        );
        self.mouse_pos = (x, y);
    }

    /// A wheel step in notches. The last event of a frame wins.
    pub fn scroll_event(&mut self, amount: f32) {
        self.scroll = amount;
    }

    /// A character was typed. Control codes are ignored, and characters
    /// beyond the queue capacity are dropped.
    pub fn char_event(&mut self, code: u32) {
        if code < 32 {
            return;
        }
        if self.chars.len() >= CHAR_QUEUE_CAPACITY {
            trace!("Char queue full, dropping U+{:04X}", code);
            return;
        }
        self.chars.push_back(code);
    }

    /// Ends the frame: clears edges, zeroes the mouse delta and scroll, and
    /// drops any unread characters.
    pub fn clear_frame_edges(&mut self) {
        let edges = InputFlags::PRESSED | InputFlags::RELEASED;
        for cell in self.keys.iter_mut().chain(self.mouse.iter_mut()) {
            cell.remove(edges);
        }
        self.mouse_delta = (0, 0);
        self.scroll = 0.0;
        self.chars.clear();
    }

    // --- Queries ---

    pub fn key_state(&self, key: impl Into<KeyCode>) -> InputFlags {
        self.keys[key.into() as usize]
    }

    pub fn key_down(&self, key: impl Into<KeyCode>) -> bool {
        self.key_state(key).contains(InputFlags::DOWN)
    }

    pub fn key_pressed(&self, key: impl Into<KeyCode>) -> bool {
        self.key_state(key).contains(InputFlags::PRESSED)
    }

    pub fn key_released(&self, key: impl Into<KeyCode>) -> bool {
        self.key_state(key).contains(InputFlags::RELEASED)
    }

    /// State of a mouse button; empty for untracked buttons.
    pub fn mouse_state(&self, button: impl Into<u8>) -> InputFlags {
        self.mouse
            .get(button.into() as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn mouse_down(&self, button: impl Into<u8>) -> bool {
        self.mouse_state(button).contains(InputFlags::DOWN)
    }

    pub fn mouse_pressed(&self, button: impl Into<u8>) -> bool {
        self.mouse_state(button).contains(InputFlags::PRESSED)
    }

    pub fn mouse_released(&self, button: impl Into<u8>) -> bool {
        self.mouse_state(button).contains(InputFlags::RELEASED)
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        self.mouse_pos
    }

    pub fn mouse_delta(&self) -> (i32, i32) {
        self.mouse_delta
    }

    pub fn mouse_scroll(&self) -> f32 {
        self.scroll
    }

    /// Pops the oldest character typed this frame.
    pub fn next_char(&mut self) -> Option<u32> {
        self.chars.pop_front()
    }
}
