//! Terminal backend with half-block pixels
//!
//! Each character cell holds two vertical pixels (`▀` with separate
//! foreground/background colors). The bottom row is reserved for the HUD line.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
    terminal,
};
use glam::Vec2;

use super::{Color, Frame, Renderer, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    fn blend(self, color: &Color) -> Rgb {
        let a = color[3].clamp(0.0, 1.0);
        let mix = |dst: u8, src: f32| {
            (dst as f32 * (1.0 - a) + src.clamp(0.0, 1.0) * 255.0 * a).round() as u8
        };
        Rgb(mix(self.0, color[0]), mix(self.1, color[1]), mix(self.2, color[2]))
    }
}

/// Pixel grid, `h` is twice the number of terminal rows it covers
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Rgb(0, 0, 0));
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn paint(&mut self, x: i32, y: i32, color: &Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let i = y as usize * self.w + x as usize;
            self.px[i] = self.px[i].blend(color);
        }
    }

    /// Rasterize one shape; `scale` maps field units to pixels
    pub fn fill_shape(&mut self, shape: &Shape, scale: Vec2) {
        match shape {
            Shape::Rect { pos, size, color } => {
                let min = (*pos * scale).round();
                let max = ((*pos + *size) * scale).round();
                for y in min.y as i32..max.y as i32 {
                    for x in min.x as i32..max.x as i32 {
                        self.paint(x, y, color);
                    }
                }
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                let c = *center * scale;
                let r = *radius * scale;
                // Always at least one pixel so small details stay visible
                let (rx, ry) = (r.x.max(0.5), r.y.max(0.5));
                for y in (c.y - ry).floor() as i32..=(c.y + ry).ceil() as i32 {
                    for x in (c.x - rx).floor() as i32..=(c.x + rx).ceil() as i32 {
                        let dx = (x as f32 + 0.5 - c.x) / rx;
                        let dy = (y as f32 + 0.5 - c.y) / ry;
                        if dx * dx + dy * dy <= 1.0 {
                            self.paint(x, y, color);
                        }
                    }
                }
            }
            Shape::Line { from, to, color, .. } => {
                let a = *from * scale;
                let b = *to * scale;
                let steps = (b - a).abs().max_element().ceil().max(1.0) as i32;
                for i in 0..=steps {
                    let p = a.lerp(b, i as f32 / steps as f32);
                    self.paint(p.x.floor() as i32, p.y.floor() as i32, color);
                }
            }
            Shape::Overlay { color } => {
                for px in &mut self.px {
                    *px = px.blend(color);
                }
            }
            // Text goes to the HUD line
            Shape::Text { .. } => {}
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                queue!(
                    out,
                    style::SetForegroundColor(CColor::Rgb {
                        r: top.0,
                        g: top.1,
                        b: top.2
                    }),
                    style::SetBackgroundColor(CColor::Rgb {
                        r: bot.0,
                        g: bot.1,
                        b: bot.2
                    }),
                    style::Print('\u{2580}') // ▀
                )?;
            }
            queue!(out, style::ResetColor, style::Print("\r\n"))?;
        }
        Ok(())
    }
}

/// Renders frames to a terminal (or any writer)
pub struct TerminalRenderer<W: Write> {
    out: W,
    buf: PixelBuf,
    cols: u16,
    /// Message shown on the HUD line instead of the stats
    banner: Option<String>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        let mut renderer = Self {
            out,
            buf: PixelBuf::new(0, 0),
            cols,
            banner: None,
        };
        renderer.resize(cols, rows);
        renderer
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        let pixel_rows = rows.saturating_sub(1) as usize * 2;
        self.buf.resize(cols as usize, pixel_rows);
    }

    pub fn set_banner(&mut self, banner: Option<String>) {
        self.banner = banner;
    }

    pub fn pixels(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn status_line(&self, frame: &Frame) -> String {
        let text = match &self.banner {
            Some(banner) => banner.clone(),
            None => {
                let paused = frame
                    .shapes
                    .iter()
                    .find_map(|s| match s {
                        Shape::Text { text, .. } => Some(format!("  [{}]", text)),
                        _ => None,
                    })
                    .unwrap_or_default();
                format!(
                    " Time {}  Score {}  Obstacles {}{}",
                    frame.hud.time, frame.hud.score, frame.hud.obstacles, paused
                )
            }
        };
        text.chars().take(self.cols as usize).collect()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let scale = Vec2::new(
            self.buf.w as f32 / frame.field.x,
            self.buf.h as f32 / frame.field.y,
        );
        for shape in &frame.shapes {
            self.buf.fill_shape(shape, scale);
        }
        self.buf.render(&mut self.out)?;

        let status = self.status_line(frame);
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(status)
        )?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::rgb;
    use crate::sim::{GameState, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_rect_fill_scaled() {
        let mut buf = PixelBuf::new(8, 4);
        let red = rgb(255, 0, 0);
        buf.fill_shape(
            &Shape::Rect {
                pos: Vec2::new(0.0, 0.0),
                size: Vec2::new(40.0, 20.0),
                color: red,
            },
            Vec2::splat(0.1),
        );
        assert_eq!(buf.get(0, 0), Rgb(255, 0, 0));
        assert_eq!(buf.get(3, 1), Rgb(255, 0, 0));
        assert_eq!(buf.get(4, 0), Rgb(0, 0, 0));
        assert_eq!(buf.get(0, 2), Rgb(0, 0, 0));
    }

    #[test]
    fn test_line_past_left_edge_not_drawn() {
        let mut buf = PixelBuf::new(4, 4);
        buf.fill_shape(
            &Shape::Line {
                from: Vec2::new(-0.9, 1.0),
                to: Vec2::new(-0.2, 1.0),
                width: 1.0,
                color: rgb(255, 0, 0),
            },
            Vec2::ONE,
        );
        assert_eq!(buf.get(0, 1), Rgb(0, 0, 0));
    }

    #[test]
    fn test_overlay_blends() {
        let mut buf = PixelBuf::new(2, 2);
        buf.fill_shape(
            &Shape::Rect {
                pos: Vec2::ZERO,
                size: Vec2::splat(2.0),
                color: rgb(200, 100, 50),
            },
            Vec2::ONE,
        );
        buf.fill_shape(
            &Shape::Overlay {
                color: [0.0, 0.0, 0.0, 0.5],
            },
            Vec2::ONE,
        );
        assert_eq!(buf.get(1, 1), Rgb(100, 50, 25));
    }

    #[test]
    fn test_draw_writes_hud_line() {
        let mut state = GameState::new(Tuning::default());
        tick::start(&mut state, 0.0);
        tick::tick(&mut state, 3_000.0);

        let mut renderer = TerminalRenderer::new(Vec::new(), 80, 25);
        renderer.draw(&Frame::build(&state)).unwrap();
        let output = String::from_utf8_lossy(renderer.writer()).to_string();
        assert!(output.contains("Time 2:57"));
        assert!(output.contains("Obstacles 0/90"));

        // Sky in the top-left corner
        assert_eq!(renderer.pixels().get(0, 0), Rgb(0x87, 0xce, 0xeb));
    }

    #[test]
    fn test_banner_replaces_stats() {
        let state = GameState::new(Tuning::default());
        let mut renderer = TerminalRenderer::new(Vec::new(), 40, 10);
        renderer.set_banner(Some("Game over! Final score: 3".to_string()));
        renderer.draw(&Frame::build(&state)).unwrap();
        let output = String::from_utf8_lossy(renderer.writer()).to_string();
        assert!(output.contains("Game over!"));
        assert!(!output.contains("Obstacles"));
    }
}
