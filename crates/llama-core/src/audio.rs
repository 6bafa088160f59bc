//! Audio Collaborator
//!
//! The core never plays sound itself. It hands cues and the background
//! music flag to a `CueSink`; a sink that fails is logged and skipped.

use llama_events::{Cue, LoggedEvent};

use crate::error::SinkError;

pub trait CueSink {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError>;

    fn set_music(&mut self, playing: bool) -> Result<(), SinkError>;
}

/// Sink that reports cues to the log instead of a speaker.
#[derive(Debug, Default)]
pub struct TraceSink {
    music: bool,
}

impl TraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn music_playing(&self) -> bool {
        self.music
    }
}

impl CueSink for TraceSink {
    fn play(&mut self, cue: Cue) -> Result<(), SinkError> {
        tracing::debug!(?cue, hz = cue.frequency_hz(), "cue");
        Ok(())
    }

    fn set_music(&mut self, playing: bool) -> Result<(), SinkError> {
        if playing != self.music {
            tracing::debug!(playing, "background music");
        }
        self.music = playing;
        Ok(())
    }
}

/// Sink for environments without audio; every call fails.
#[derive(Debug, Default)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: Cue) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("no audio device".to_string()))
    }

    fn set_music(&mut self, _playing: bool) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("no audio device".to_string()))
    }
}

/// Plays the cue of every event and updates the music flag. Returns how many
/// cues the sink accepted.
pub fn dispatch(sink: &mut dyn CueSink, events: &[LoggedEvent], music: bool) -> usize {
    let mut played = 0;
    for cue in events.iter().filter_map(|logged| logged.event.cue()) {
        match sink.play(cue) {
            Ok(()) => played += 1,
            Err(err) => tracing::warn!(%err, ?cue, "skipping sound cue"),
        }
    }
    if let Err(err) = sink.set_music(music) {
        tracing::warn!(%err, "skipping background music");
    }
    played
}
