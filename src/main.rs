// src/main.rs

use blink::audio::{AudioCommand, ChannelAudioSink, SoundHandle};
use blink::config::CONFIG;
use blink::engine::{Engine, FrameStatus};
use blink::image_io;
use blink::keys::KeySymbol;
use blink::platform::HeadlessPlatform;
use blink::{Color, PixelSurface, Rect};

use anyhow::Context;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

/// Frames rendered before the demo window closes itself.
const DEMO_FRAMES: u64 = 120;
const DEFAULT_SCREENSHOT_PATH: &str = "blink-screenshot.png";

/// Stands in for a real mixer: logs every command until the engine hangs up.
fn spawn_mixer_log(rx: Receiver<AudioCommand>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for command in rx {
            match command {
                AudioCommand::Load { handle, data } => {
                    debug!("mixer: load {:?} ({} bytes)", handle, data.len())
                }
                other => debug!("mixer: {:?}", other),
            }
        }
        debug!("mixer: channel closed");
    })
}

/// The sample sprite, or a generated checkerboard when the asset is missing.
fn load_sprite() -> anyhow::Result<PixelSurface> {
    match image_io::load_image_file("assets/cat.png") {
        Ok(img) => Ok(img),
        Err(e) => {
            warn!("assets/cat.png unavailable ({}); using a generated sprite", e);
            let mut img = PixelSurface::new(48, 48).context("Failed to create sprite")?;
            for y in 0..48 {
                for x in 0..48 {
                    let color = if (x / 8 + y / 8) % 2 == 0 {
                        Color::rgb(0xf0, 0x90, 0x30)
                    } else {
                        Color::rgba(0x40, 0x20, 0x10, 0xc0)
                    };
                    img.set(x, y, color);
                }
            }
            Ok(img)
        }
    }
}

fn try_load_sound<P: blink::platform::Platform>(engine: &mut Engine<P>, path: &str) -> Option<SoundHandle> {
    match engine.audio().load_sound_file(path) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    }
}

/// Main entry point for the `blink` demo.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting blink...");
    let config = CONFIG.clone();

    let screenshot_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENSHOT_PATH));

    let (window_w, window_h) = config.window.window_size();
    let mut platform = HeadlessPlatform::new(window_w, window_h);
    platform.close_after(DEMO_FRAMES);

    let (sink, mixer_rx) = ChannelAudioSink::channel();
    let mixer = spawn_mixer_log(mixer_rx);

    let mut engine =
        Engine::new(&config, platform, Box::new(sink)).context("Failed to start engine")?;

    let cat = load_sprite()?;
    let jump = try_load_sound(&mut engine, "assets/jump.wav");
    if let Some(song) = try_load_sound(&mut engine, "assets/song.ogg") {
        engine.audio().play_music(song, 3.0);
    }

    info!("Running {} demo frames", DEMO_FRAMES);
    loop {
        match engine.update()? {
            FrameStatus::Running { .. } => {}
            FrameStatus::Quit => break,
        }

        let canvas = engine.canvas_mut();
        canvas.clear(Color::rgb(255, 255, 255));
        canvas.draw_point(50, 50, Color::rgb(0, 0, 255));
        canvas.draw_rect(Rect::new(60, 60, 25, 25), Color::rgb(255, 0, 0));
        canvas.draw_line(10, 50, 50, 150, Color::rgb(255, 0, 0));
        canvas.draw_image_region(&cat, 100, 100, Rect::new(0, 0, 48, 48), Color::WHITE);
        engine.draw_text(b"Hello blink!", 10, 10, Color::BLACK);

        engine
            .canvas_mut()
            .draw_circle_fill(50, 50, 20, Color::rgb(0, 255, 255));

        if engine.input().key_pressed(KeySymbol::Char(b' ')) {
            if let Some(jump) = jump {
                engine.audio().play_sound(jump);
            }
        }
    }

    image_io::save_image(&engine.screenshot(), &screenshot_path)
        .with_context(|| format!("Failed to save screenshot to {}", screenshot_path.display()))?;

    let platform = engine.shutdown()?;
    info!("Presented {} frames", platform.frames_presented());

    if mixer.join().is_err() {
        warn!("Mixer log thread panicked");
    }
    info!("blink exited successfully.");
    Ok(())
}
