//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (millisecond instants fed to the simulation)

pub mod time;

pub use time::{SystemClock, TimeSource};
