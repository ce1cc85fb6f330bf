// src/audio.rs

//! One-way command interface to an external audio mixer.
//!
//! The engine never mixes samples. It hands sound data and playback
//! commands to an [`AudioSink`] and gets nothing back; sounds are referred to
//! by opaque [`SoundHandle`]s that [`AudioController`] allocates.

use anyhow::Context;
use log::{debug, trace, warn};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Opaque reference to a sound registered with the mixer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// A command for the mixer. Fade durations are in seconds; volumes and pan
/// range over 0 to 1.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Registers encoded sound data (WAV or OGG) under `handle`.
    Load { handle: SoundHandle, data: Arc<[u8]> },
    Unload(SoundHandle),
    Play(SoundHandle),
    PlayMusic { sound: SoundHandle, fade: f32 },
    StopMusic { fade: f32 },
    PauseMusic,
    ResumeMusic,
    SetMusicVolume(f32),
    SetMusicLoop(bool),
    SwitchMusic {
        sound: SoundHandle,
        fade_out: f32,
        fade_in: f32,
    },
    SetVolume(f32),
    SetPan(f32),
    SetPause(bool),
}

/// Receiver of mixer commands. Delivery is fire-and-forget.
pub trait AudioSink {
    fn send(&mut self, command: AudioCommand);
}

/// Discards every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn send(&mut self, command: AudioCommand) {
        trace!("Dropping audio command {:?}", command);
    }
}

/// Forwards commands over an mpsc channel to a mixer thread.
#[derive(Debug, Clone)]
pub struct ChannelAudioSink {
    tx: Sender<AudioCommand>,
}

impl ChannelAudioSink {
    pub fn new(tx: Sender<AudioCommand>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end for the mixer.
    pub fn channel() -> (Self, Receiver<AudioCommand>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }
}

impl AudioSink for ChannelAudioSink {
    fn send(&mut self, command: AudioCommand) {
        if let Err(e) = self.tx.send(command) {
            warn!("Audio mixer is gone, dropping {:?}", e.0);
        }
    }
}

/// Front end that allocates sound handles and issues commands to a sink.
pub struct AudioController {
    sink: Box<dyn AudioSink>,
    next_handle: u32,
}

impl AudioController {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            next_handle: 1,
        }
    }

    /// Registers encoded sound bytes with the mixer.
    pub fn load_sound_mem(&mut self, data: &[u8]) -> SoundHandle {
        let handle = SoundHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        debug!("Registering sound {:?} ({} bytes)", handle, data.len());
        self.sink.send(AudioCommand::Load {
            handle,
            data: Arc::from(data),
        });
        handle
    }

    pub fn load_sound_file<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<SoundHandle> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read sound file {}", path.display()))?;
        Ok(self.load_sound_mem(&data))
    }

    pub fn destroy_sound(&mut self, sound: SoundHandle) {
        self.sink.send(AudioCommand::Unload(sound));
    }

    pub fn play_sound(&mut self, sound: SoundHandle) {
        self.sink.send(AudioCommand::Play(sound));
    }

    pub fn play_music(&mut self, sound: SoundHandle, fade: f32) {
        self.sink.send(AudioCommand::PlayMusic { sound, fade });
    }

    pub fn stop_music(&mut self, fade: f32) {
        self.sink.send(AudioCommand::StopMusic { fade });
    }

    pub fn pause_music(&mut self) {
        self.sink.send(AudioCommand::PauseMusic);
    }

    pub fn resume_music(&mut self) {
        self.sink.send(AudioCommand::ResumeMusic);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.sink.send(AudioCommand::SetMusicVolume(volume));
    }

    pub fn set_music_loop(&mut self, looping: bool) {
        self.sink.send(AudioCommand::SetMusicLoop(looping));
    }

    pub fn switch_music(&mut self, sound: SoundHandle, fade_out: f32, fade_in: f32) {
        self.sink.send(AudioCommand::SwitchMusic {
            sound,
            fade_out,
            fade_in,
        });
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.sink.send(AudioCommand::SetVolume(volume));
    }

    pub fn set_pan(&mut self, pan: f32) {
        self.sink.send(AudioCommand::SetPan(pan));
    }

    pub fn set_pause(&mut self, pause: bool) {
        self.sink.send(AudioCommand::SetPause(pause));
    }
}

impl std::fmt::Debug for AudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioController")
            .field("next_handle", &self.next_handle)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn controller() -> (AudioController, Receiver<AudioCommand>) {
        let (sink, rx) = ChannelAudioSink::channel();
        (AudioController::new(Box::new(sink)), rx)
    }

    #[test]
    fn handles_are_unique() {
        let (mut audio, rx) = controller();
        let a = audio.load_sound_mem(b"RIFF");
        let b = audio.load_sound_mem(b"OggS");
        assert_ne!(a, b);

        match rx.try_recv().unwrap() {
            AudioCommand::Load { handle, data } => {
                assert_eq!(handle, a);
                assert_eq!(&data[..], b"RIFF");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn commands_arrive_in_order() {
        let (mut audio, rx) = controller();
        let song = SoundHandle(7);
        audio.play_music(song, 3.0);
        audio.set_music_volume(0.5);
        audio.switch_music(SoundHandle(8), 1.0, 2.0);
        audio.stop_music(0.0);
        audio.set_pause(true);

        let got: Vec<AudioCommand> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![
                AudioCommand::PlayMusic { sound: song, fade: 3.0 },
                AudioCommand::SetMusicVolume(0.5),
                AudioCommand::SwitchMusic {
                    sound: SoundHandle(8),
                    fade_out: 1.0,
                    fade_in: 2.0
                },
                AudioCommand::StopMusic { fade: 0.0 },
                AudioCommand::SetPause(true),
            ]
        );
    }

    #[test]
    fn closed_mixer_is_not_an_error() {
        let (mut audio, rx) = controller();
        drop(rx);
        audio.play_sound(SoundHandle(1));
        audio.set_volume(0.0);
    }

    #[test]
    fn missing_sound_file_is_reported() {
        let mut audio = AudioController::new(Box::new(NullAudioSink));
        assert!(audio.load_sound_file("/nonexistent/blink/jump.wav").is_err());
    }
}
