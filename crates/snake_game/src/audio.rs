//! Sound effects via rodio. Audio is strictly best-effort: a missing
//! output device or a missing wav file disables playback (logged once)
//! and the game runs silent.

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;

const EAT_SOUND_PATH: &str = "assets/audio/eat.wav";

pub struct AudioManager {
    // The stream must outlive every sink playing into it.
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    eat_wav: Option<Vec<u8>>,
}

impl AudioManager {
    pub fn new() -> Self {
        let (stream, handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(err) => {
                log::warn!("No audio output available, running silent: {err}");
                (None, None)
            }
        };

        let eat_wav = match std::fs::read(EAT_SOUND_PATH) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::warn!("Failed to load '{EAT_SOUND_PATH}', eat sound disabled: {err}");
                None
            }
        };

        Self {
            _stream: stream,
            handle,
            eat_wav,
        }
    }

    /// Fire-and-forget playback; a detached sink per eat so overlapping
    /// apples at high speed do not cut each other off.
    pub fn play_eat(&self) {
        let (Some(handle), Some(bytes)) = (&self.handle, &self.eat_wav) else {
            return;
        };
        let Ok(sink) = Sink::try_new(handle) else {
            return;
        };
        let Ok(source) = Decoder::new(Cursor::new(bytes.clone())) else {
            return;
        };
        sink.append(source);
        sink.detach();
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}
