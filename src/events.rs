//! Observable race events and the listener seam for collaborators.
//!
//! The engine never calls into rendering, audio, or storage. It queues these
//! events; the driver drains the queue after every `keystroke`/`tick` and
//! forwards them to whichever collaborators are wired up.

/// Index of a racer within the session roster. Index 0 is always the player.
pub type RacerId = usize;

#[derive(Clone, Debug, PartialEq)]
pub enum RaceEvent {
    /// An input change was accepted cleanly (includes backspace).
    KeyAccepted,
    /// An input change was accepted but appended a wrong character.
    KeyMismatch,
    /// An input change ran past the tolerated mistake and was refused.
    KeyRejectedStall,
    ProgressChanged { racer: RacerId, ratio: f64 },
    RacerFinished { racer: RacerId, rank: u32 },
    /// The player crossed the line; the race is over.
    RaceFinished { rank: u32, wpm: u32, language: String },
}

/// Collaborators (persistence, audio, rendering) subscribe through this seam.
/// Failures stay on the listener's side of the boundary.
pub trait RaceListener {
    fn on_event(&mut self, event: &RaceEvent);
}

/// Named cue an audio collaborator would map to a waveform. The engine never
/// touches audio; the driver translates events into cues and drops them when
/// sound is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Click,
    Error,
    Stall,
    Win,
    Lose,
}

pub fn sound_cue(event: &RaceEvent) -> Option<SoundCue> {
    match event {
        RaceEvent::KeyAccepted => Some(SoundCue::Click),
        RaceEvent::KeyMismatch => Some(SoundCue::Error),
        RaceEvent::KeyRejectedStall => Some(SoundCue::Stall),
        RaceEvent::RaceFinished { rank: 1, .. } => Some(SoundCue::Win),
        RaceEvent::RaceFinished { .. } => Some(SoundCue::Lose),
        _ => None,
    }
}
