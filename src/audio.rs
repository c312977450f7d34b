//! Sound cues emitted by the scene loop
//!
//! Playback lives outside the simulation; the scene only says which cue to
//! play, synchronously, when an event resolves. It never waits on playback.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player ate a creature
    Eat,
    /// Player bumped into something too big to eat
    Hurt,
}

/// Audio collaborator
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that drops every cue (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Records cues in order
impl AudioSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Counts cues per kind
#[derive(Debug, Default, Clone, Copy)]
pub struct CueCounter {
    pub eat: u32,
    pub hurt: u32,
}

impl AudioSink for CueCounter {
    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::Eat => self.eat += 1,
            SoundCue::Hurt => self.hurt += 1,
        }
    }
}
