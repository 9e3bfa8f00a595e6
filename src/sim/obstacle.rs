//! Obstacle stream: slot-based spawn schedule and horizontal motion

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// An approaching obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner of the visual box
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once when the trailing edge clears the actor; never unset
    pub passed: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    pub fn back(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Fully past the left boundary of the field
    pub fn is_off_screen(&self) -> bool {
        self.back() < 0.0
    }

    /// Move one tick to the left
    pub fn advance(&mut self, speed: f32) {
        self.pos.x -= speed;
    }
}

/// Spawn timeline and the active obstacle set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleStream {
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Obstacles created this session
    pub spawned: u32,
    /// Last slot index that produced a spawn (slot 0 never does)
    pub last_slot: u64,
    total: u32,
    interval: f32,
    speed: f32,
    spawn_pos: Vec2,
    size: Vec2,
    next_id: u32,
}

impl ObstacleStream {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: Vec::new(),
            spawned: 0,
            last_slot: 0,
            total: tuning.total_obstacles(),
            interval: tuning.obstacle_interval,
            speed: tuning.obstacle_speed,
            spawn_pos: Vec2::new(tuning.field_width, tuning.obstacle_y()),
            size: Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
            next_id: 1,
        }
    }

    /// Obstacles in a full session
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Slot index for an elapsed time
    pub fn slot_at(&self, elapsed_secs: f64) -> u64 {
        (elapsed_secs / self.interval as f64).floor() as u64
    }

    /// Spawn if a new slot has been reached and the quota is not used up.
    ///
    /// Returns the new obstacle's id.
    pub fn maybe_spawn(&mut self, elapsed_secs: f64) -> Option<u32> {
        let slot = self.slot_at(elapsed_secs);
        if slot <= self.last_slot || self.spawned >= self.total {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            pos: self.spawn_pos,
            size: self.size,
            passed: false,
        });
        self.spawned += 1;
        self.last_slot = slot;
        Some(id)
    }

    /// Pixels per tick
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawned = 0;
        self.last_slot = 0;
        self.next_id = 1;
    }
}
