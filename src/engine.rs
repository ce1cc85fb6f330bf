// src/engine.rs

//! The frame loop: present, pace, then ingest input.
//!
//! [`Engine::update`] ends one frame and starts the next. It shows the screen
//! drawn since the previous call, sleeps until the next frame is due, clears
//! the per-frame input edges and feeds every pending platform event into the
//! [`InputFrame`]. The application then reads input and draws through
//! [`Engine::canvas_mut`] until it calls `update` again.

use crate::audio::{AudioController, AudioSink};
use crate::color::Color;
use crate::config::Config;
use crate::font::Font;
use crate::geometry::Rect;
use crate::image_io;
use crate::input::InputFrame;
use crate::platform::{letterbox_rect, window_to_screen, Platform, PlatformEvent};
use crate::rasterizer::Canvas;
use crate::surface::PixelSurface;
use anyhow::{Context, Result};
use log::{debug, info, trace};
use std::time::{Duration, Instant};

/// Outcome of one [`Engine::update`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStatus {
    /// Keep going. `dt` is the time in seconds since the previous frame
    /// started.
    Running { dt: f64 },
    /// The window was closed or a quit was requested.
    Quit,
}

pub struct Engine<P: Platform> {
    platform: P,
    canvas: Canvas,
    input: InputFrame,
    audio: AudioController,
    font: Font,
    window_size: (i32, i32),
    step: Duration,
    prev_time: Instant,
    frame_count: u64,
    should_quit: bool,
}

impl<P: Platform> Engine<P> {
    pub fn new(config: &Config, platform: P, audio: Box<dyn AudioSink>) -> Result<Self> {
        let canvas = Canvas::with_size(config.window.width, config.window.height)
            .context("Failed to create screen surface")?;

        let mut audio = AudioController::new(audio);
        audio.set_volume(config.audio.volume);
        audio.set_pan(config.audio.pan);
        audio.set_music_volume(config.audio.music_volume);
        audio.set_music_loop(config.audio.music_loop);

        let window_size = platform.window_size();
        info!(
            "Engine started: '{}' {}x{} screen in {}x{} window ({:?})",
            config.window.title,
            canvas.width(),
            canvas.height(),
            window_size.0,
            window_size.1,
            config.window.flags()
        );

        Ok(Self {
            platform,
            canvas,
            input: InputFrame::new(),
            audio,
            font: Font::builtin().clone(),
            window_size,
            step: Duration::try_from_secs_f64(config.timing.step_time()).unwrap_or_default(),
            prev_time: Instant::now(),
            frame_count: 0,
            should_quit: false,
        })
    }

    /// Finishes the current frame and prepares the next one.
    pub fn update(&mut self) -> Result<FrameStatus> {
        self.platform
            .present(self.canvas.surface())
            .context("Failed to present frame")?;

        let dt = self.pace();
        self.frame_count += 1;

        self.input.clear_frame_edges();
        let events = self
            .platform
            .poll_events()
            .context("Failed to poll platform events")?;
        if !events.is_empty() {
            trace!("Frame {}: {} events", self.frame_count, events.len());
        }
        for event in events {
            self.handle_event(event);
        }

        if self.should_quit {
            info!("Quit requested after {} frames", self.frame_count);
            Ok(FrameStatus::Quit)
        } else {
            Ok(FrameStatus::Running { dt })
        }
    }

    /// Sleeps until the next frame is due. A late frame resynchronizes to
    /// the current time instead of trying to catch up.
    fn pace(&mut self) -> f64 {
        let prev = self.prev_time;
        let now = Instant::now();
        match prev.checked_add(self.step) {
            Some(due) if due > now => {
                std::thread::sleep(due - now);
                self.prev_time = due;
            }
            _ => self.prev_time = now,
        }
        (self.prev_time - prev).as_secs_f64()
    }

    fn handle_event(&mut self, event: PlatformEvent) {
        match event {
            PlatformEvent::KeyDown { code, repeat } => self.input.key_down_event(code, repeat),
            PlatformEvent::KeyUp { code } => self.input.key_up_event(code),
            PlatformEvent::Char(c) => self.input.char_event(c),
            PlatformEvent::MouseButton { button, down, x, y } => {
                self.input.mouse_button_event(button, down);
                self.move_mouse(x, y);
            }
            PlatformEvent::MouseMove { x, y } => self.move_mouse(x, y),
            PlatformEvent::MouseWheel { delta } => self.input.scroll_event(delta),
            PlatformEvent::Resize { width, height } => {
                if width > 0 && height > 0 {
                    debug!("Window resized to {}x{}", width, height);
                    self.window_size = (width, height);
                }
            }
            PlatformEvent::CloseRequested => self.should_quit = true,
        }
    }

    fn move_mouse(&mut self, x: i32, y: i32) {
        let rect = self.letterbox();
        if let Some((sx, sy)) = window_to_screen(rect, self.canvas.width(), self.canvas.height(), x, y) {
            self.input.mouse_move_event(sx, sy);
        }
    }

    /// Where the screen is shown inside the window, in window pixels.
    pub fn letterbox(&self) -> Rect {
        letterbox_rect(
            self.canvas.width(),
            self.canvas.height(),
            self.window_size.0,
            self.window_size.1,
        )
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn input(&self) -> &InputFrame {
        &self.input
    }

    /// Mutable input access, needed to pop typed characters.
    pub fn input_mut(&mut self) -> &mut InputFrame {
        &mut self.input
    }

    pub fn audio(&mut self) -> &mut AudioController {
        &mut self.audio
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Replaces the font used by [`Engine::draw_text`].
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Draws `text` with the engine's current font.
    pub fn draw_text(&mut self, text: &[u8], x: i32, y: i32, color: Color) -> i32 {
        self.canvas.draw_text(&self.font, text, x, y, color)
    }

    /// An opaque copy of the screen as it would appear in the window.
    pub fn screenshot(&self) -> PixelSurface {
        image_io::screenshot(self.canvas.surface())
    }

    pub fn window_size(&self) -> (i32, i32) {
        self.window_size
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Releases the platform and returns it.
    pub fn shutdown(mut self) -> Result<P> {
        self.platform
            .shutdown()
            .context("Failed to shut down platform")?;
        Ok(self.platform)
    }
}

impl<P: Platform> std::fmt::Debug for Engine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("screen", &(self.canvas.width(), self.canvas.height()))
            .field("window_size", &self.window_size)
            .field("frame_count", &self.frame_count)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCommand, ChannelAudioSink, NullAudioSink};
    use crate::keys::{KeySymbol, MouseButton};
    use crate::platform::HeadlessPlatform;
    use test_log::test;

    fn unpaced_config() -> Config {
        let mut config = Config::default();
        config.timing.fps = 0.0;
        config
    }

    fn engine() -> Engine<HeadlessPlatform> {
        Engine::new(
            &unpaced_config(),
            HeadlessPlatform::new(800, 600),
            Box::new(NullAudioSink),
        )
        .unwrap()
    }

    #[test]
    fn screen_matches_config() {
        let e = engine();
        assert_eq!(e.canvas().width(), 200);
        assert_eq!(e.canvas().height(), 200);
        assert_eq!(e.letterbox(), Rect::new(100, 0, 600, 600));
    }

    #[test]
    fn invalid_screen_size_fails_startup() {
        let mut config = unpaced_config();
        config.window.width = 0;
        let err = Engine::new(&config, HeadlessPlatform::new(1, 1), Box::new(NullAudioSink))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("screen surface"));
    }

    #[test]
    fn update_presents_the_drawn_frame() {
        let mut e = engine();
        e.canvas_mut().clear(Color::BLUE);
        assert!(matches!(e.update().unwrap(), FrameStatus::Running { .. }));
        let shown = e.platform().last_frame().unwrap();
        assert!(shown.pixels().iter().all(|p| *p == Color::BLUE));
        assert_eq!(e.frame_count(), 1);
    }

    #[test]
    fn key_edges_last_one_frame() {
        let mut e = engine();
        e.platform_mut().push_event(PlatformEvent::KeyDown {
            code: b' ',
            repeat: false,
        });
        e.update().unwrap();
        assert!(e.input().key_pressed(KeySymbol::Char(b' ')));

        e.update().unwrap();
        assert!(e.input().key_down(KeySymbol::Char(b' ')));
        assert!(!e.input().key_pressed(KeySymbol::Char(b' ')));
    }

    #[test]
    fn mouse_is_mapped_through_the_letterbox() {
        let mut e = engine();
        e.platform_mut().push_event(PlatformEvent::MouseMove { x: 400, y: 300 });
        e.platform_mut().push_event(PlatformEvent::MouseButton {
            button: MouseButton::Left.into(),
            down: true,
            x: 103,
            y: 6,
        });
        e.update().unwrap();
        assert_eq!(e.input().mouse_position(), (1, 2));
        assert_eq!(e.input().mouse_delta(), (1, 2));
        assert!(e.input().mouse_pressed(MouseButton::Left));
    }

    #[test]
    fn resize_changes_the_mapping() {
        let mut e = engine();
        e.platform_mut().push_event(PlatformEvent::Resize {
            width: 200,
            height: 400,
        });
        e.platform_mut().push_event(PlatformEvent::MouseMove { x: 10, y: 110 });
        e.update().unwrap();
        assert_eq!(e.letterbox(), Rect::new(0, 100, 200, 200));
        assert_eq!(e.input().mouse_position(), (10, 10));
    }

    #[test]
    fn minimized_window_keeps_previous_size() {
        let mut e = engine();
        e.platform_mut().push_event(PlatformEvent::Resize {
            width: 0,
            height: 0,
        });
        e.update().unwrap();
        assert_eq!(e.window_size(), (800, 600));
    }

    #[test]
    fn close_request_quits() {
        let mut e = engine();
        e.platform_mut().close_after(2);
        assert!(matches!(e.update().unwrap(), FrameStatus::Running { .. }));
        assert_eq!(e.update().unwrap(), FrameStatus::Quit);
        let platform = e.shutdown().unwrap();
        assert!(platform.is_shut_down());
    }

    #[test]
    fn pacing_waits_for_the_next_step() {
        let mut config = Config::default();
        config.timing.fps = 100.0;
        let mut e = Engine::new(&config, HeadlessPlatform::new(1, 1), Box::new(NullAudioSink)).unwrap();
        let start = Instant::now();
        for _ in 0..3 {
            match e.update().unwrap() {
                FrameStatus::Running { dt } => assert!(dt > 0.0),
                FrameStatus::Quit => panic!("unexpected quit"),
            }
        }
        assert!(start.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn vanishing_frame_rate_waits_at_most_the_longest_step() {
        let mut config = Config::default();
        config.timing.fps = 1e-30;
        let e = Engine::new(&config, HeadlessPlatform::new(1, 1), Box::new(NullAudioSink)).unwrap();
        assert_eq!(e.step, Duration::from_secs(60));
    }

    #[test]
    fn startup_applies_audio_config() {
        let (sink, rx) = ChannelAudioSink::channel();
        let mut config = unpaced_config();
        config.audio.music_volume = 0.3;
        let _e = Engine::new(&config, HeadlessPlatform::new(1, 1), Box::new(sink)).unwrap();
        let got: Vec<AudioCommand> = rx.try_iter().collect();
        assert!(got.contains(&AudioCommand::SetMusicVolume(0.3)));
        assert!(got.contains(&AudioCommand::SetMusicLoop(true)));
    }

    #[test]
    fn draw_text_uses_the_engine_font() {
        let mut e = engine();
        let end = e.draw_text(b"a", 0, 0, Color::BLACK);
        assert_eq!(end, e.font().text_width(b"a"));
        assert!(e.screenshot().pixels().iter().all(|p| p.a == 0xff));
    }
}
