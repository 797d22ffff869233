//! Sound effect playback with `rodio`.

use crate::Error;
use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use simple_walker::{Assets, Sfx, SoundBank};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

/// One sink per sound effect, so each effect can be checked for "still playing" on its own.
struct Voice {
    data: Arc<[u8]>,
    sink: Sink,
}

/// The `rodio` audio backend.
pub struct RodioBank {
    // Must be kept alive for the sinks to make any noise
    _stream: OutputStream,
    _handle: OutputStreamHandle,
    voices: BTreeMap<Sfx, Voice>,
}

impl RodioBank {
    /// Open the default output device and prepare every sound effect.
    ///
    /// Each sound is decoded once up front, so a corrupt file fails here instead of mid-game.
    pub fn new(assets: &Assets) -> Result<Self, Error> {
        let (stream, handle) = OutputStream::try_default()?;

        let mut voices = BTreeMap::new();
        for sfx in Sfx::ALL {
            let data = assets.sound(sfx);
            decode(&data).map_err(|source| Error::AudioDecode { sfx, source })?;

            let sink = Sink::try_new(&handle)?;
            voices.insert(sfx, Voice { data, sink });
        }
        debug!("Audio ready with {} sounds", voices.len());

        Ok(Self {
            _stream: stream,
            _handle: handle,
            voices,
        })
    }
}

fn decode(data: &Arc<[u8]>) -> Result<Decoder<Cursor<Arc<[u8]>>>, rodio::decoder::DecoderError> {
    Decoder::new_wav(Cursor::new(Arc::clone(data)))
}

impl SoundBank for RodioBank {
    fn is_playing(&self, sfx: Sfx) -> bool {
        self.voices
            .get(&sfx)
            .is_some_and(|voice| !voice.sink.empty())
    }

    fn rewind_and_play(&mut self, sfx: Sfx) {
        let Some(voice) = self.voices.get(&sfx) else {
            return;
        };

        // A fresh decoder always starts at the beginning of the file
        match decode(&voice.data) {
            Ok(source) => {
                voice.sink.append(source);
                voice.sink.play();
            }
            Err(err) => warn!("Unable to play {sfx:?}: {err}"),
        }
    }
}
