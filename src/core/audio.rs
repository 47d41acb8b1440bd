//=========================================================================
// Engine Audio
//=========================================================================
//
// Looping engine sound driven by race phase transitions.
//
// The race only emits `EngineSignal`s; this module turns them into
// start/stop calls on an `AudioPlayer`. Audio is best-effort: any
// failure is reported once as `AudioError` and the caller falls back to
// `Silent`, so gameplay never depends on a working output device.
//
// rodio's output stream is not `Send`, so players must be created on
// the thread that uses them.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::Cursor;
use std::path::Path;

use log::{debug, info, warn};
use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, PlayError, Sink, Source, StreamError};

//=== Internal Dependencies ===============================================

use crate::core::race::EngineSignal;

//=== AudioPlayer =========================================================

/// Sink for engine audio cues.
pub trait AudioPlayer {
    /// Starts the looping engine sound, restarting it if already playing.
    fn start_loop(&mut self);

    /// Stops the engine sound. No-op when nothing is playing.
    fn stop_loop(&mut self);

    /// Routes a race signal to the matching call.
    fn handle(&mut self, signal: EngineSignal) {
        match signal {
            EngineSignal::EngineStart => self.start_loop(),
            EngineSignal::EngineStop => self.stop_loop(),
        }
    }
}

//=== Silent ==============================================================

/// Player that ignores every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioPlayer for Silent {
    fn start_loop(&mut self) {}

    fn stop_loop(&mut self) {}
}

//=== AudioError ==========================================================

/// Failures while preparing or playing the engine sound.
#[derive(Debug)]
pub enum AudioError {
    /// Clip file could not be read.
    Io(std::io::Error),

    /// Clip is not a supported audio format.
    Decode(DecoderError),

    /// No usable output device.
    Stream(StreamError),

    /// Output device refused a new sink.
    Play(PlayError),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Failed to read engine sound: {}", e),
            Self::Decode(e) => write!(f, "Failed to decode engine sound: {}", e),
            Self::Stream(e) => write!(f, "No audio output device: {}", e),
            Self::Play(e) => write!(f, "Failed to create audio sink: {}", e),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Stream(e) => Some(e),
            Self::Play(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for AudioError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DecoderError> for AudioError {
    fn from(e: DecoderError) -> Self {
        Self::Decode(e)
    }
}

impl From<StreamError> for AudioError {
    fn from(e: StreamError) -> Self {
        Self::Stream(e)
    }
}

impl From<PlayError> for AudioError {
    fn from(e: PlayError) -> Self {
        Self::Play(e)
    }
}

//=== EngineSound =========================================================

/// Engine loop played through the default output device.
pub struct EngineSound {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clip: Vec<u8>,
    sink: Option<Sink>,
}

impl EngineSound {
    /// Reads and validates the clip, then opens the default output device.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let clip = std::fs::read(path)?;

        // Decode once up front so a bad file fails here, not mid-race
        Decoder::new(Cursor::new(clip.clone()))?;

        let (stream, handle) = OutputStream::try_default()?;
        info!("Engine sound loaded from {}", path.display());

        Ok(Self {
            _stream: stream,
            handle,
            clip,
            sink: None,
        })
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let sink = Sink::try_new(&self.handle)?;
        let source = Decoder::new(Cursor::new(self.clip.clone()))?;
        sink.append(source.repeat_infinite());
        self.sink = Some(sink);
        Ok(())
    }
}

impl AudioPlayer for EngineSound {
    fn start_loop(&mut self) {
        self.stop_loop();

        match self.play() {
            Ok(()) => debug!("Engine sound started"),
            Err(e) => warn!("Engine sound unavailable: {}", e),
        }
    }

    fn stop_loop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            debug!("Engine sound stopped");
        }
    }
}

//=== Construction Helper =================================================

/// Opens the engine sound at `path`, or `Silent` if audio is disabled or
/// anything goes wrong.
pub(crate) fn open_player(path: Option<&Path>) -> Box<dyn AudioPlayer> {
    let Some(path) = path else {
        info!("Audio disabled");
        return Box::new(Silent);
    };

    match EngineSound::load(path) {
        Ok(sound) => Box::new(sound),
        Err(e) => {
            warn!("{}; continuing without sound", e);
            Box::new(Silent)
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
