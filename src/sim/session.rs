//! Session state machine with frame-callback cancellation
//!
//! The presentation layer schedules one frame callback per [`FrameToken`].
//! Pausing, ending and resetting bump the loop generation before touching
//! state, so a callback that was already scheduled becomes a no-op.

use super::state::{GameEvent, GameState, SessionPhase};
use super::tick;
use crate::tuning::Tuning;

/// Permission to run one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

/// Owns a [`GameState`] and the frame loop's cancellation token
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    generation: u64,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(tuning),
            generation: 0,
        }
    }

    /// Read-only view for rendering and UI text
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    /// Start from idle; returns the token for the first frame
    pub fn start(&mut self, now_ms: f64) -> Option<FrameToken> {
        if !tick::start(&mut self.state, now_ms) {
            return None;
        }
        Some(self.token())
    }

    pub fn pause(&mut self, now_ms: f64) {
        if self.state.phase == SessionPhase::Running {
            self.invalidate();
            tick::pause(&mut self.state, now_ms);
        }
    }

    /// Resume from pause; returns the token for the next frame
    pub fn resume(&mut self, now_ms: f64) -> Option<FrameToken> {
        if !tick::resume(&mut self.state, now_ms) {
            return None;
        }
        Some(self.token())
    }

    /// Pause/resume as a single user action
    pub fn toggle_pause(&mut self, now_ms: f64) -> Option<FrameToken> {
        match self.state.phase {
            SessionPhase::Running => {
                self.pause(now_ms);
                None
            }
            SessionPhase::Paused => self.resume(now_ms),
            _ => None,
        }
    }

    /// Cancel any pending frame and return to a fresh idle session
    pub fn reset(&mut self) {
        self.invalidate();
        self.state.reset();
        log::info!("Session reset");
    }

    pub fn request_jump(&mut self) -> bool {
        tick::request_jump(&mut self.state)
    }

    /// Run the frame a token was issued for.
    ///
    /// Returns the token for the next frame while the session keeps running;
    /// stale tokens do nothing and return `None`.
    pub fn frame(&mut self, token: FrameToken, now_ms: f64) -> Option<FrameToken> {
        if token.generation != self.generation || self.state.phase != SessionPhase::Running {
            return None;
        }
        tick::tick(&mut self.state, now_ms);
        if self.state.phase == SessionPhase::Running {
            Some(token)
        } else {
            self.invalidate();
            None
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    fn token(&self) -> FrameToken {
        FrameToken {
            generation: self.generation,
        }
    }

    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
