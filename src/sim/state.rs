//! Session state and core simulation types
//!
//! Everything one play-through owns lives in [`GameState`]; derived values
//! (score, time remaining) are computed from it, never cached.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::clock::SessionClock;
use super::collision::score_percent;
use super::obstacle::{Obstacle, ObstacleStream};
use crate::tuning::Tuning;

/// Macro-state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for start
    #[default]
    Idle,
    /// Active gameplay, ticking every frame
    Running,
    /// Frozen; only the pause overlay is shown
    Paused,
    /// Session finished (terminal until reset)
    Ended,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// Result record reported once when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub won: bool,
    pub score: u32,
    pub obstacles_passed: u32,
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ObstacleSpawned { id: u32 },
    ObstaclePassed { id: u32 },
    Jumped,
    SessionEnded(SessionResult),
}

/// Complete state of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Set at most once, only while running
    pub outcome: Option<Outcome>,
    pub clock: SessionClock,
    /// Elapsed seconds observed by the most recent tick
    pub elapsed_secs: f64,
    /// Ticks simulated this session
    pub time_ticks: u64,
    pub actor: Actor,
    pub stream: ObstacleStream,
    pub obstacles_passed: u32,
    /// Pending events (not part of the snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            actor: Actor::new(&tuning),
            stream: ObstacleStream::new(&tuning),
            tuning,
            phase: SessionPhase::Idle,
            outcome: None,
            clock: SessionClock::default(),
            elapsed_secs: 0.0,
            time_ticks: 0,
            obstacles_passed: 0,
            events: Vec::new(),
        }
    }

    /// Return to fresh values (Idle, empty field, actor on the ground)
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Idle;
        self.outcome = None;
        self.clock = SessionClock::default();
        self.elapsed_secs = 0.0;
        self.time_ticks = 0;
        self.actor.reset();
        self.stream.reset();
        self.obstacles_passed = 0;
        self.events.clear();
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.stream.obstacles
    }

    pub fn obstacles_spawned(&self) -> u32 {
        self.stream.spawned
    }

    pub fn total_obstacles(&self) -> u32 {
        self.stream.total()
    }

    /// Whole seconds left, clamped at zero
    pub fn time_remaining(&self) -> u32 {
        let duration = self.tuning.game_duration.floor() as u64;
        let elapsed = self.elapsed_secs.floor() as u64;
        duration.saturating_sub(elapsed) as u32
    }

    /// Integer percentage of the session's obstacles passed
    pub fn score(&self) -> u32 {
        score_percent(self.obstacles_passed, self.total_obstacles())
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.outcome.map(|outcome| SessionResult {
            won: outcome == Outcome::Won,
            score: self.score(),
            obstacles_passed: self.obstacles_passed,
        })
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
