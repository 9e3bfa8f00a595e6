//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as millisecond instants from the caller
//! - One tick per rendered frame
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod session;
pub mod state;
pub mod tick;

pub use actor::{Actor, AirState};
pub use clock::SessionClock;
pub use collision::{Aabb, actor_hits_obstacle, has_cleared, score_percent};
pub use obstacle::{Obstacle, ObstacleStream};
pub use session::{FrameToken, Session};
pub use state::{GameEvent, GameState, Outcome, SessionPhase, SessionResult};
pub use tick::tick;
