//! Player character vertical kinematics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Whether the actor is standing or in the air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AirState {
    #[default]
    Grounded,
    Airborne,
}

/// The jumping character
///
/// `pos` is the top-left corner of its box in screen space (Y grows down).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity, pixels per tick (negative is up)
    pub vel_y: f32,
    pub air: AirState,
    /// Top edge when standing on the ground
    rest_y: f32,
    gravity: f32,
    jump_impulse: f32,
}

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        let rest_y = tuning.actor_rest_y();
        Self {
            pos: Vec2::new(tuning.actor_x, rest_y),
            size: Vec2::new(tuning.actor_width, tuning.actor_height),
            vel_y: 0.0,
            air: AirState::Grounded,
            rest_y,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.air == AirState::Airborne
    }

    pub fn rest_y(&self) -> f32 {
        self.rest_y
    }

    /// Start a jump. Ignored while airborne (no double jump, no buffering).
    ///
    /// Returns whether a jump actually began.
    pub fn jump(&mut self) -> bool {
        if self.air != AirState::Grounded {
            return false;
        }
        self.vel_y = self.jump_impulse;
        self.air = AirState::Airborne;
        true
    }

    /// One semi-implicit Euler step, then clamp to the ground
    pub fn update(&mut self) {
        self.vel_y += self.gravity;
        self.pos.y += self.vel_y;

        if self.pos.y >= self.rest_y {
            self.pos.y = self.rest_y;
            self.vel_y = 0.0;
            self.air = AirState::Grounded;
        }
    }

    pub fn reset(&mut self) {
        self.pos.y = self.rest_y;
        self.vel_y = 0.0;
        self.air = AirState::Grounded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Actor {
        Actor::new(&Tuning::default())
    }

    #[test]
    fn test_starts_grounded_at_rest() {
        let actor = actor();
        assert_eq!(actor.air, AirState::Grounded);
        assert_eq!(actor.pos, Vec2::new(100.0, 290.0));
    }

    #[test]
    fn test_grounded_update_stays_put() {
        let mut actor = actor();
        for _ in 0..10 {
            actor.update();
        }
        assert_eq!(actor.pos.y, actor.rest_y());
        assert_eq!(actor.vel_y, 0.0);
        assert!(!actor.is_airborne());
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let mut actor = actor();
        assert!(actor.jump());
        assert!(actor.is_airborne());

        actor.update();
        // v = -15 + 0.8, y = 290 - 14.2
        assert!((actor.vel_y - (-14.2)).abs() < 1e-4);
        assert!((actor.pos.y - 275.8).abs() < 1e-3);

        let mut ticks = 1;
        while actor.is_airborne() {
            actor.update();
            ticks += 1;
            assert!(actor.pos.y <= actor.rest_y());
            assert!(ticks < 100, "actor never landed");
        }
        assert_eq!(ticks, 37);
        assert_eq!(actor.pos.y, actor.rest_y());
        assert_eq!(actor.vel_y, 0.0);
    }

    #[test]
    fn test_no_double_jump() {
        let mut actor = actor();
        assert!(actor.jump());
        actor.update();
        let vel = actor.vel_y;
        assert!(!actor.jump());
        assert_eq!(actor.vel_y, vel);
    }

    #[test]
    fn test_reset_mid_air() {
        let mut actor = actor();
        actor.jump();
        for _ in 0..5 {
            actor.update();
        }
        actor.reset();
        assert_eq!(actor.air, AirState::Grounded);
        assert_eq!(actor.pos.y, actor.rest_y());
        assert_eq!(actor.vel_y, 0.0);
    }
}
