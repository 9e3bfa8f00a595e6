//! Rendering module
//!
//! The scene is described as a backend-independent display list of 2D
//! primitives in field coordinates (pixels, Y down). Backends rasterize it:
//! an HTML canvas on the web, half-block pixels in a terminal on native.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

use glam::Vec2;

use crate::sim::{GameState, SessionPhase};
use crate::ui::Hud;

/// RGBA, components in 0..=1
pub type Color = [f32; 4];

/// Opaque color from 8-bit channels
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// A drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { pos: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    /// Tint over the whole field
    Overlay { color: Color },
    /// Text centered on `pos`
    Text { pos: Vec2, text: String, size: f32, color: Color },
}

/// Everything a backend needs for one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub field: Vec2,
    pub shapes: Vec<Shape>,
    pub hud: Hud,
    pub phase: SessionPhase,
}

impl Frame {
    pub fn build(state: &GameState) -> Self {
        Self {
            field: Vec2::new(state.tuning.field_width, state.tuning.field_height),
            shapes: shapes::scene(state),
            hud: Hud::from_state(state),
            phase: state.phase,
        }
    }
}

/// A drawing backend
pub trait Renderer {
    type Error;

    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}
