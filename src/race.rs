//! The race session state machine.
//!
//! The session owns every mutable piece of a race: the roster, the target
//! sentence, the typed text, the logical clock, and the event queue the
//! driver drains. It is strictly reactive: the driver feeds it `keystroke`
//! and `tick` calls and forwards the events it emits. It holds no timers and
//! no wall clock; elapsed time is the tick count at the configured rate.

use crate::events::{RaceEvent, RacerId};
use crate::language::{EmptyPoolError, SentencePool};
use crate::metrics::WpmCounter;
use crate::pacing::{Pace, PacingConfig, FULL_COURSE};
use crate::racer::{Racer, RacerKind};
use crate::typing_policy::{validate, Keystroke};
use crate::TICK_RATE_MS;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

pub const DEFAULT_BOTS: usize = 3;

/// Roster index of the player.
pub const PLAYER: RacerId = 0;

/// Caller-supplied precondition for `start`. The engine has no identity
/// concept; it only refuses to start when the gate says no.
pub trait AccessGate {
    fn is_authorized(&self) -> bool;
}

/// Default gate: everyone may race.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenGate;

impl AccessGate for OpenGate {
    fn is_authorized(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Racing,
    Finished,
}

/// Why a `start` call was refused. The session stays `Idle` in both cases.
#[derive(Debug)]
pub enum StartError {
    NotAuthorized,
    EmptyPool(EmptyPoolError),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::NotAuthorized => write!(f, "not authorized to start a race"),
            StartError::EmptyPool(e) => e.fmt(f),
        }
    }
}

impl Error for StartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StartError::NotAuthorized => None,
            StartError::EmptyPool(e) => Some(e),
        }
    }
}

impl From<EmptyPoolError> for StartError {
    fn from(e: EmptyPoolError) -> Self {
        StartError::EmptyPool(e)
    }
}

pub struct RaceSession {
    pub phase: Phase,
    pub language: String,
    pub target: String,
    pub typed: String,
    /// Roster for the current race. Index 0 is the player, the rest bots.
    /// Empty while `Idle`.
    pub racers: Vec<Racer>,
    /// Consecutive clean keystrokes; resets on mistake, stall, or backspace.
    pub streak: u32,
    pub ticks: u64,
    pub wpm: WpmCounter,
    pub pacing: PacingConfig,
    bot_count: usize,
    finish_count: u32,
    pool: SentencePool,
    gate: Box<dyn AccessGate>,
    rng: StdRng,
    events: Vec<RaceEvent>,
}

impl RaceSession {
    pub fn new(pool: SentencePool, bot_count: usize) -> Self {
        Self::with_rng(pool, bot_count, StdRng::from_entropy())
    }

    /// Session with a caller-seeded generator, for reproducible runs.
    pub fn with_rng(pool: SentencePool, bot_count: usize, rng: StdRng) -> Self {
        Self {
            phase: Phase::Idle,
            language: "en".to_string(),
            target: String::new(),
            typed: String::new(),
            racers: Vec::new(),
            streak: 0,
            ticks: 0,
            wpm: WpmCounter::new(),
            pacing: PacingConfig::default(),
            bot_count,
            finish_count: 0,
            pool,
            gate: Box::new(OpenGate),
            rng,
            events: Vec::new(),
        }
    }

    pub fn with_gate(mut self, gate: Box<dyn AccessGate>) -> Self {
        self.gate = gate;
        self
    }

    /// Select the sentence pool and label conventions for the next race.
    /// Ignored mid-race, like every other out-of-phase request.
    pub fn set_language(&mut self, code: &str) {
        if self.phase != Phase::Racing {
            self.language = code.to_string();
        }
    }

    /// Begin a race: pick a target sentence, reset the roster, draw each
    /// bot's pace, and enter `Racing`. A no-op while a race is already
    /// running; refused when the access gate says no or the pool has no
    /// sentences for `language`.
    pub fn start(&mut self, language: &str) -> Result<(), StartError> {
        if self.phase == Phase::Racing {
            return Ok(());
        }
        if !self.gate.is_authorized() {
            return Err(StartError::NotAuthorized);
        }

        let target = self.pool.pick(language, &mut self.rng)?;
        self.language = language.to_string();
        self.target = target;
        self.typed.clear();
        self.streak = 0;
        self.ticks = 0;
        self.finish_count = 0;
        self.wpm.reset();
        self.events.clear();

        self.racers.clear();
        self.racers.push(Racer::player());
        for _ in 0..self.bot_count {
            let pace = Pace::draw(&self.pacing, &mut self.rng);
            self.racers.push(Racer::bot(pace));
        }

        self.phase = Phase::Racing;
        Ok(())
    }

    /// Process one input-buffer change. Ignored outside `Racing`.
    pub fn keystroke(&mut self, raw: &str) {
        if self.phase != Phase::Racing {
            return;
        }

        match validate(raw, &self.target, &self.typed) {
            Keystroke::Stalled => {
                self.streak = 0;
                self.events.push(RaceEvent::KeyRejectedStall);
            }
            Keystroke::Accepted { text, mistake } => {
                let grew = text.chars().count() > self.typed.chars().count();
                if mistake {
                    self.streak = 0;
                    self.events.push(RaceEvent::KeyMismatch);
                } else {
                    self.streak = if grew { self.streak + 1 } else { 0 };
                    self.events.push(RaceEvent::KeyAccepted);
                }

                self.typed = text;
                let elapsed = self.elapsed_secs();
                self.wpm.update(self.typed.chars().count(), elapsed);

                let ratio = self.player_ratio();
                self.racers[PLAYER].progress = ratio * FULL_COURSE;
                self.events.push(RaceEvent::ProgressChanged {
                    racer: PLAYER,
                    ratio,
                });

                if self.typed == self.target {
                    self.finish_player();
                }
            }
        }
    }

    /// Advance the simulation one step: bump the logical clock and move every
    /// unfinished bot by its jittered pace. Ignored outside `Racing`.
    pub fn tick(&mut self) {
        if self.phase != Phase::Racing {
            return;
        }
        self.ticks += 1;

        for id in 0..self.racers.len() {
            let racer = self.racers[id];
            if racer.kind != RacerKind::Bot || racer.finished {
                continue;
            }
            let Some(pace) = racer.pace else { continue };
            let step = pace.step(&self.pacing, &mut self.rng);

            let crossed;
            let ratio;
            {
                let racer = &mut self.racers[id];
                racer.progress += step;
                crossed = racer.progress >= FULL_COURSE;
                if crossed {
                    racer.progress = FULL_COURSE;
                }
                ratio = racer.ratio();
            }
            self.events
                .push(RaceEvent::ProgressChanged { racer: id, ratio });

            if crossed {
                let rank = self.next_finish_order();
                let racer = &mut self.racers[id];
                racer.finished = true;
                racer.finish_order = Some(rank);
                self.events
                    .push(RaceEvent::RacerFinished { racer: id, rank });
            }
        }
    }

    /// Return to `Idle`, dropping all race state. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.target.clear();
        self.typed.clear();
        self.racers.clear();
        self.streak = 0;
        self.ticks = 0;
        self.finish_count = 0;
        self.wpm.reset();
        self.events.clear();
    }

    /// End the race without a player finish. No rank is recorded and no
    /// finish event fires.
    pub fn abort(&mut self) {
        if self.phase == Phase::Racing {
            self.phase = Phase::Finished;
        }
    }

    /// Race time so far. Frozen once the session leaves `Racing`, since only
    /// `tick` advances the clock.
    pub fn elapsed_secs(&self) -> f64 {
        self.ticks as f64 * (TICK_RATE_MS as f64 / 1000.0)
    }

    pub fn player(&self) -> Option<&Racer> {
        self.racers.first()
    }

    pub fn player_rank(&self) -> Option<u32> {
        self.racers.first().and_then(|r| r.finish_order)
    }

    /// Fraction of the target covered by the typed text, in 0..=1.
    pub fn player_ratio(&self) -> f64 {
        let target_len = self.target.chars().count();
        if target_len == 0 {
            return 0.0;
        }
        (self.typed.chars().count() as f64 / target_len as f64).min(1.0)
    }

    /// Take the queued events, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Roster ordered for display: finished racers by rank, then the rest by
    /// distance covered.
    pub fn standings(&self) -> Vec<(RacerId, &Racer)> {
        self.racers
            .iter()
            .enumerate()
            .sorted_by(|(_, a), (_, b)| match (a.finish_order, b.finish_order) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => b
                    .progress
                    .partial_cmp(&a.progress)
                    .unwrap_or(Ordering::Equal),
            })
            .collect()
    }

    fn finish_player(&mut self) {
        let rank = self.next_finish_order();
        let player = &mut self.racers[PLAYER];
        player.finished = true;
        player.finish_order = Some(rank);
        self.phase = Phase::Finished;

        self.events.push(RaceEvent::RacerFinished {
            racer: PLAYER,
            rank,
        });
        self.events.push(RaceEvent::RaceFinished {
            rank,
            wpm: self.wpm.value(),
            language: self.language.clone(),
        });
    }

    fn next_finish_order(&mut self) -> u32 {
        self.finish_count += 1;
        self.finish_count
    }
}
