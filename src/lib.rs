//! Hop Dodge - a single-screen jump timing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, physics, obstacle stream, collisions, session state)
//! - `renderer`: Backend-independent display list plus canvas/terminal backends
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD text and end-of-session messages

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Session length in seconds
    pub const GAME_DURATION: f32 = 180.0;
    /// Seconds between obstacle spawns
    pub const OBSTACLE_INTERVAL: f32 = 2.0;

    /// Playfield dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Downward acceleration, pixels per tick²
    pub const GRAVITY: f32 = 0.8;
    /// Initial jump velocity, pixels per tick (negative is up)
    pub const JUMP_IMPULSE: f32 = -15.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 100.0;
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 60.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 40.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    /// Horizontal speed, pixels per tick
    pub const OBSTACLE_SPEED: f32 = 3.0;
    /// Collision box inset from the obstacle's visual box, all sides
    pub const HIT_INSET: f32 = 15.0;
}
