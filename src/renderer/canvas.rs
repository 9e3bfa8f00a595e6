//! HTML canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Frame, Renderer, Shape};

fn css(color: &Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

/// Draws frames onto a `<canvas>`, scaling field coordinates to its size
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    fn shape(&self, shape: &Shape, field: (f64, f64)) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match shape {
            Shape::Rect { pos, size, color } => {
                ctx.set_fill_style_str(&css(color));
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&css(color));
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            Shape::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.set_stroke_style_str(&css(color));
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            Shape::Overlay { color } => {
                ctx.set_fill_style_str(&css(color));
                ctx.fill_rect(0.0, 0.0, field.0, field.1);
            }
            Shape::Text {
                pos,
                text,
                size,
                color,
            } => {
                ctx.set_fill_style_str(&css(color));
                ctx.set_font(&format!("bold {}px sans-serif", size));
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    type Error = JsValue;

    fn draw(&mut self, frame: &Frame) -> Result<(), JsValue> {
        let field = (frame.field.x as f64, frame.field.y as f64);
        let sx = self.canvas.width() as f64 / field.0;
        let sy = self.canvas.height() as f64 / field.1;
        self.ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0)?;

        for shape in &frame.shapes {
            self.shape(shape, field)?;
        }
        Ok(())
    }
}
