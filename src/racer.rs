use crate::pacing::{Pace, FULL_COURSE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RacerKind {
    Player,
    Bot,
}

/// One competitor on the track, player or bot. Progress lives on the 0-100
/// scale the pacing model speaks; `ratio` converts to the 0-1 range
/// collaborators consume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Racer {
    pub kind: RacerKind,
    pub progress: f64,
    pub finished: bool,
    pub finish_order: Option<u32>,
    /// Speed parameter drawn at race start. Bots only.
    pub pace: Option<Pace>,
}

impl Racer {
    pub fn player() -> Self {
        Self {
            kind: RacerKind::Player,
            progress: 0.0,
            finished: false,
            finish_order: None,
            pace: None,
        }
    }

    pub fn bot(pace: Pace) -> Self {
        Self {
            kind: RacerKind::Bot,
            progress: 0.0,
            finished: false,
            finish_order: None,
            pace: Some(pace),
        }
    }

    pub fn ratio(&self) -> f64 {
        (self.progress / FULL_COURSE).clamp(0.0, 1.0)
    }

    pub fn is_player(&self) -> bool {
        self.kind == RacerKind::Player
    }
}
