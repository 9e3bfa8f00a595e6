//! Scene generation: sky, ground, the character, obstacles and the pause overlay

use glam::Vec2;
use std::f32::consts::TAU;

use super::{Color, Shape, rgb};
use crate::sim::{Actor, GameState, Obstacle, SessionPhase};

const SKY: Color = rgb(0x87, 0xce, 0xeb);
const GROUND: Color = rgb(0x8b, 0x45, 0x13);
const GROUND_LINE: Color = rgb(0x65, 0x43, 0x21);
const INK: Color = rgb(0, 0, 0);
const FACE: Color = rgb(0xff, 0xff, 0xff);
const VIRUS_BODY: Color = rgb(0xee, 0x5a, 0x6f);
const VIRUS_CORE: Color = rgb(0xff, 0x6b, 0x6b);
const VIRUS_STALK: Color = rgb(0xc4, 0x45, 0x69);
const VIRUS_TIP: Color = rgb(0xff, 0x47, 0x57);
const PAUSE_TINT: Color = [0.0, 0.0, 0.0, 0.5];

/// Spikes around each obstacle
pub const SPIKE_COUNT: usize = 12;
const SPIKE_LENGTH: f32 = 8.0;

/// Build the full display list for the current state
pub fn scene(state: &GameState) -> Vec<Shape> {
    let tuning = &state.tuning;
    let field = Vec2::new(tuning.field_width, tuning.field_height);
    let ground_y = tuning.ground_y();

    let mut shapes = Vec::with_capacity(32 + state.obstacles().len() * (2 + SPIKE_COUNT * 2));

    shapes.push(Shape::Rect {
        pos: Vec2::ZERO,
        size: field,
        color: SKY,
    });
    shapes.push(Shape::Rect {
        pos: Vec2::new(0.0, ground_y),
        size: Vec2::new(field.x, tuning.ground_height),
        color: GROUND,
    });
    shapes.push(Shape::Line {
        from: Vec2::new(0.0, ground_y),
        to: Vec2::new(field.x, ground_y),
        width: 3.0,
        color: GROUND_LINE,
    });

    actor(&state.actor, &mut shapes);
    for obstacle in state.obstacles() {
        virus(obstacle, &mut shapes);
    }

    if state.phase == SessionPhase::Paused {
        shapes.push(Shape::Overlay { color: PAUSE_TINT });
        shapes.push(Shape::Text {
            pos: field / 2.0,
            text: "PAUSED".to_string(),
            size: 48.0,
            color: FACE,
        });
    }

    shapes
}

/// The hatted, mustached character, laid out on a 40x60 box and scaled to the actor
fn actor(actor: &Actor, out: &mut Vec<Shape>) {
    let scale = actor.size / Vec2::new(40.0, 60.0);
    let at = |x: f32, y: f32| actor.pos + Vec2::new(x, y) * scale;
    let rect = |x: f32, y: f32, w: f32, h: f32, color: Color| Shape::Rect {
        pos: at(x, y),
        size: Vec2::new(w, h) * scale,
        color,
    };
    let r = scale.min_element();

    // Overalls
    out.push(rect(8.0, 30.0, 24.0, 30.0, INK));
    // Head with outline
    out.push(Shape::Circle {
        center: at(20.0, 15.0),
        radius: 13.0 * r,
        color: INK,
    });
    out.push(Shape::Circle {
        center: at(20.0, 15.0),
        radius: 12.0 * r,
        color: FACE,
    });
    // Hat
    out.push(rect(8.0, 5.0, 24.0, 8.0, INK));
    out.push(rect(12.0, 0.0, 16.0, 5.0, INK));
    // Eyes
    for x in [16.0, 24.0] {
        out.push(Shape::Circle {
            center: at(x, 15.0),
            radius: 2.0 * r,
            color: INK,
        });
    }
    // Mustache
    out.push(rect(12.0, 20.0, 7.0, 3.0, INK));
    out.push(rect(21.0, 20.0, 7.0, 3.0, INK));
    // Legs and shoes
    out.push(rect(10.0, 45.0, 8.0, 15.0, INK));
    out.push(rect(22.0, 45.0, 8.0, 15.0, INK));
    out.push(rect(8.0, 55.0, 10.0, 5.0, INK));
    out.push(rect(22.0, 55.0, 10.0, 5.0, INK));
}

/// Round spiked obstacle
fn virus(obstacle: &Obstacle, out: &mut Vec<Shape>) {
    let center = obstacle.pos + obstacle.size / 2.0;
    let radius = obstacle.size.min_element() / 2.0;

    out.push(Shape::Circle {
        center,
        radius,
        color: VIRUS_BODY,
    });
    out.push(Shape::Circle {
        center,
        radius: radius * 0.5,
        color: VIRUS_CORE,
    });

    for i in 0..SPIKE_COUNT {
        let angle = TAU * i as f32 / SPIKE_COUNT as f32;
        let dir = Vec2::new(angle.cos(), angle.sin());
        let tip = center + dir * (radius + SPIKE_LENGTH);
        out.push(Shape::Line {
            from: center + dir * radius,
            to: tip,
            width: 2.0,
            color: VIRUS_STALK,
        });
        out.push(Shape::Circle {
            center: tip,
            radius: 3.0,
            color: VIRUS_TIP,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    fn has_overlay(shapes: &[Shape]) -> bool {
        shapes.iter().any(|s| matches!(s, Shape::Overlay { .. }))
    }

    #[test]
    fn test_idle_scene() {
        let state = GameState::new(Tuning::default());
        let shapes = scene(&state);
        assert_eq!(
            shapes[0],
            Shape::Rect {
                pos: Vec2::ZERO,
                size: Vec2::new(800.0, 400.0),
                color: SKY,
            }
        );
        assert!(!has_overlay(&shapes));
        // Overalls start at the actor's box offset
        assert!(shapes.contains(&Shape::Rect {
            pos: Vec2::new(108.0, 320.0),
            size: Vec2::new(24.0, 30.0),
            color: INK,
        }));
    }

    #[test]
    fn test_obstacles_drawn_with_spikes() {
        let mut state = GameState::new(Tuning::default());
        tick::start(&mut state, 0.0);
        tick::tick(&mut state, 2_000.0);
        let base = scene(&GameState::new(Tuning::default())).len();
        let shapes = scene(&state);
        assert_eq!(shapes.len(), base + 2 + SPIKE_COUNT * 2);
        assert!(shapes.contains(&Shape::Circle {
            center: Vec2::new(817.0, 330.0),
            radius: 20.0,
            color: VIRUS_BODY,
        }));
    }

    #[test]
    fn test_pause_overlay_only_when_paused() {
        let mut state = GameState::new(Tuning::default());
        tick::start(&mut state, 0.0);
        assert!(!has_overlay(&scene(&state)));
        tick::pause(&mut state, 500.0);
        let shapes = scene(&state);
        assert!(has_overlay(&shapes));
        assert!(matches!(shapes.last(), Some(Shape::Text { text, .. }) if text == "PAUSED"));
    }
}
