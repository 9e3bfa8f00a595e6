//! Data-driven game balance
//!
//! Every gameplay constant lives here so a session can be tuned from JSON
//! without touching the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Session length (seconds)
    pub game_duration: f32,
    /// Seconds between obstacle spawns
    pub obstacle_interval: f32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,

    // === Actor ===
    /// Pixels per tick²
    pub gravity: f32,
    /// Pixels per tick, must be negative (upward)
    pub jump_impulse: f32,
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Pixels per tick
    pub obstacle_speed: f32,
    /// Inset applied on all sides of the obstacle for hit testing
    pub hit_inset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration: GAME_DURATION,
            obstacle_interval: OBSTACLE_INTERVAL,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_speed: OBSTACLE_SPEED,
            hit_inset: HIT_INSET,
        }
    }
}

impl Tuning {
    /// Number of obstacles in a full session
    pub fn total_obstacles(&self) -> u32 {
        (self.game_duration / self.obstacle_interval).floor() as u32
    }

    /// Y of the ground surface (top edge of the ground strip)
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Resting Y of the actor's top edge
    pub fn actor_rest_y(&self) -> f32 {
        self.ground_y() - self.actor_height
    }

    /// Y of an obstacle's top edge (obstacles sit on the ground)
    pub fn obstacle_y(&self) -> f32 {
        self.ground_y() - self.obstacle_height
    }

    /// Check that the tuning describes a playable session
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.game_duration > 0.0) {
            return Err(TuningError::NonPositive {
                field: "game_duration",
                value: self.game_duration,
            });
        }
        if !(self.obstacle_interval > 0.0) {
            return Err(TuningError::NonPositive {
                field: "obstacle_interval",
                value: self.obstacle_interval,
            });
        }
        if self.obstacle_interval > self.game_duration {
            return Err(TuningError::IntervalExceedsDuration {
                interval: self.obstacle_interval,
                duration: self.game_duration,
            });
        }
        for (field, value) in [
            ("gravity", self.gravity),
            ("obstacle_speed", self.obstacle_speed),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
        ] {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        if !(self.jump_impulse < 0.0) {
            return Err(TuningError::JumpNotUpward {
                impulse: self.jump_impulse,
            });
        }
        if self.hit_inset < 0.0
            || self.hit_inset * 2.0 >= self.obstacle_width
            || self.hit_inset * 2.0 >= self.obstacle_height
        {
            return Err(TuningError::EmptyHitBox {
                inset: self.hit_inset,
            });
        }
        if self.actor_rest_y() < 0.0 || self.obstacle_y() < 0.0 || self.field_width <= self.actor_x
        {
            return Err(TuningError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
            });
        }
        Ok(())
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }
}

/// Why a tuning was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    Parse(String),
    NonPositive { field: &'static str, value: f32 },
    IntervalExceedsDuration { interval: f32, duration: f32 },
    JumpNotUpward { impulse: f32 },
    EmptyHitBox { inset: f32 },
    FieldTooSmall { width: f32, height: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid tuning JSON: {msg}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive (got {value})")
            }
            Self::IntervalExceedsDuration { interval, duration } => write!(
                f,
                "obstacle_interval {interval}s is longer than game_duration {duration}s"
            ),
            Self::JumpNotUpward { impulse } => {
                write!(f, "jump_impulse must be negative (got {impulse})")
            }
            Self::EmptyHitBox { inset } => {
                write!(f, "hit_inset {inset} leaves no collision box")
            }
            Self::FieldTooSmall { width, height } => {
                write!(f, "field {width}x{height} cannot fit the actor")
            }
        }
    }
}

impl std::error::Error for TuningError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_total_obstacles() {
        let tuning = Tuning::default();
        assert_eq!(tuning.total_obstacles(), 90);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_derived_positions() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ground_y(), 350.0);
        assert_eq!(tuning.actor_rest_y(), 290.0);
        assert_eq!(tuning.obstacle_y(), 310.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "game_duration": 60.0 }"#).unwrap();
        assert_eq!(tuning.game_duration, 60.0);
        assert_eq!(tuning.obstacle_interval, OBSTACLE_INTERVAL);
        assert_eq!(tuning.total_obstacles(), 30);
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero_interval = Tuning {
            obstacle_interval: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero_interval.validate(),
            Err(TuningError::NonPositive { field: "obstacle_interval", .. })
        ));

        let downward_jump = Tuning {
            jump_impulse: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            downward_jump.validate(),
            Err(TuningError::JumpNotUpward { .. })
        ));

        let huge_inset = Tuning {
            hit_inset: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            huge_inset.validate(),
            Err(TuningError::EmptyHitBox { .. })
        ));

        let long_interval = Tuning {
            obstacle_interval: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            long_interval.validate(),
            Err(TuningError::IntervalExceedsDuration { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("invalid tuning JSON"));
    }
}
