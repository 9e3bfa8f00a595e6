//! Collision detection and pass scoring
//!
//! Hit tests use a box inset from the obstacle's visual bounds: the art is
//! larger than the lethal area.

use glam::Vec2;

use super::actor::Actor;
use super::obstacle::Obstacle;

/// Axis-aligned box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Strict overlap; boxes sharing only an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Actor hit box (the full visual box)
pub fn actor_box(actor: &Actor) -> Aabb {
    Aabb::from_pos_size(actor.pos, actor.size)
}

/// Obstacle hit box (visual box shrunk by `inset`)
pub fn obstacle_hit_box(obstacle: &Obstacle, inset: f32) -> Aabb {
    Aabb::from_pos_size(obstacle.pos, obstacle.size).inset(inset)
}

/// True if the actor touches the obstacle's lethal area
pub fn actor_hits_obstacle(actor: &Actor, obstacle: &Obstacle, inset: f32) -> bool {
    actor_box(actor).overlaps(&obstacle_hit_box(obstacle, inset))
}

/// Obstacle's right edge strictly left of the actor's left edge
pub fn has_cleared(obstacle: &Obstacle, actor: &Actor) -> bool {
    obstacle.back() < actor.pos.x
}

/// Integer score percentage; 0 when nothing has been passed
pub fn score_percent(passed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (passed as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle {
            id: 1,
            pos: Vec2::new(x, y),
            size: Vec2::new(40.0, 40.0),
            passed: false,
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_pos_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_pos_size(Vec2::new(5.0, 5.0), Vec2::splat(10.0));
        let c = Aabb::from_pos_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Shared edge only
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_inset_shrinks_all_sides() {
        let b = Aabb::from_pos_size(Vec2::new(10.0, 20.0), Vec2::splat(40.0)).inset(15.0);
        assert_eq!(b.min, Vec2::new(25.0, 35.0));
        assert_eq!(b.max, Vec2::new(35.0, 45.0));
    }

    #[test]
    fn test_visual_touch_is_not_a_hit() {
        let tuning = Tuning::default();
        let actor = Actor::new(&tuning);
        // Visual boxes overlap by 10px horizontally, but the inset box starts 5px
        // past the actor's front edge
        let obstacle = obstacle_at(130.0, tuning.obstacle_y());
        assert!(actor_box(&actor).overlaps(&Aabb::from_pos_size(obstacle.pos, obstacle.size)));
        assert!(!actor_hits_obstacle(&actor, &obstacle, tuning.hit_inset));
    }

    #[test]
    fn test_grounded_actor_hit() {
        let tuning = Tuning::default();
        let actor = Actor::new(&tuning);
        let obstacle = obstacle_at(100.0, tuning.obstacle_y());
        assert!(actor_hits_obstacle(&actor, &obstacle, tuning.hit_inset));
    }

    #[test]
    fn test_airborne_actor_clears() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.pos.y = 200.0;
        let obstacle = obstacle_at(100.0, tuning.obstacle_y());
        assert!(!actor_hits_obstacle(&actor, &obstacle, tuning.hit_inset));
    }

    #[test]
    fn test_has_cleared_is_strict() {
        let tuning = Tuning::default();
        let actor = Actor::new(&tuning);
        // Trailing edge exactly at the actor's x
        assert!(!has_cleared(&obstacle_at(60.0, 310.0), &actor));
        assert!(has_cleared(&obstacle_at(59.0, 310.0), &actor));
        // Behind the actor's right edge but not its left edge
        assert!(!has_cleared(&obstacle_at(80.0, 310.0), &actor));
    }

    #[test]
    fn test_score_percent() {
        assert_eq!(score_percent(0, 90), 0);
        assert_eq!(score_percent(45, 90), 50);
        assert_eq!(score_percent(1, 90), 1);
        assert_eq!(score_percent(89, 90), 99);
        assert_eq!(score_percent(90, 90), 100);
        assert_eq!(score_percent(0, 0), 0);
    }
}
