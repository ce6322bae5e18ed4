use std::io::{self, Write};

/// What happened that deserves a sound.
///
/// Entering a step and a step running out are separate triggers even when
/// they sound the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Cue {
    /// Entered a Prepare or Work step
    PhaseStart,
    /// Entered a short (inter-set) rest
    ShortRestStart,
    /// The active step's countdown reached zero
    PhaseElapsed,
    /// Advanced past the last step
    WorkoutComplete,
}

/// The sound a cue is realised with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Short,
    Long,
    SoftTick,
}

impl Cue {
    pub fn sound(&self) -> Sound {
        match self {
            Cue::PhaseStart | Cue::PhaseElapsed => Sound::Short,
            Cue::ShortRestStart => Sound::SoftTick,
            Cue::WorkoutComplete => Sound::Long,
        }
    }
}

/// Sound collaborator the controller calls into
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell: once for short cues, twice for the long one
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn ring(times: usize) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all("\x07".repeat(times).as_bytes())?;
        out.flush()
    }
}

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        let times = match cue.sound() {
            Sound::Short | Sound::SoftTick => 1,
            Sound::Long => 2,
        };
        if let Err(err) = Self::ring(times) {
            tracing::debug!(%cue, error = %err, "bell write failed");
        }
    }
}

#[derive(Debug, Default)]
pub struct Muted;

impl CueSink for Muted {
    fn play(&mut self, _cue: Cue) {}
}

/// Keeps every cue it receives, for headless runs
#[derive(Debug, Default, Clone)]
pub struct RecordingCues {
    pub played: Vec<Cue>,
}

impl RecordingCues {
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl CueSink for RecordingCues {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

impl<S: CueSink + ?Sized> CueSink for Box<S> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue)
    }
}
