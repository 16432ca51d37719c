use crate::graphics::PixelBuffer;
use crate::style::{Color, Fill};
use crate::surface::{Surface, TextMetrics};
use crossterm::{
    cursor, queue,
    style::{self, Print, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// Surface backed by terminal cells, two pixels per cell stacked vertically
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    cols: usize,
    rows: usize,
    buffer: PixelBuffer,
    text: Vec<Option<(char, Color)>>,
    fill: Fill,
    alpha: f64,
}

/// Current terminal size in cells (columns, rows)
pub fn terminal_size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => crossterm::terminal::size(),
    }
}

fn term_color(c: Color) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        TerminalSurface {
            cols,
            rows,
            buffer: PixelBuffer::new(cols, rows * 2),
            text: vec![None; cols * rows],
            fill: Fill::Solid(Color::WHITE),
            alpha: 1.0,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = TerminalSurface::new(cols, rows);
    }

    /// Surface pixel to (column, row)
    pub fn cell_of(point: [f64; 2]) -> (f64, f64) {
        (point[0], point[1] / 2.0)
    }

    /// Center of a terminal cell in surface pixels
    pub fn pixel_of(col: u16, row: u16) -> [f64; 2] {
        [col as f64 + 0.5, row as f64 * 2.0 + 1.0]
    }

    /// Writes the frame to `out` and flushes
    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        let mut last: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let top = self.buffer.get(col, row * 2).unwrap_or(Color::BLACK);
                let bottom = self.buffer.get(col, row * 2 + 1).unwrap_or(Color::BLACK);
                let (glyph, fg, bg) = match self.text[row * self.cols + col] {
                    Some((ch, color)) => (ch, color, top.lerp(bottom, 0.5)),
                    None => (HALF_BLOCK, top, bottom),
                };
                if last != Some((fg, bg)) {
                    queue!(
                        out,
                        SetForegroundColor(term_color(fg)),
                        SetBackgroundColor(term_color(bg))
                    )?;
                    last = Some((fg, bg));
                }
                queue!(out, Print(glyph))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (f64, f64) {
        (self.buffer.width as f64, self.buffer.height as f64)
    }

    fn clear(&mut self, color: Color) {
        self.buffer.fill(color);
        self.text.iter_mut().for_each(|t| *t = None);
    }

    fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.buffer.fill_circle(cx, cy, r, &self.fill, self.alpha);
        // Text underneath an opaque shape is painted over
        if self.alpha < 1.0 {
            return;
        }
        let clamp = |v: f64, max: usize| v.max(0.0).min(max as f64) as usize;
        let rows = clamp(((cy - r) / 2.0).floor(), self.rows)
            ..clamp(((cy + r) / 2.0).ceil() + 1.0, self.rows);
        let cols = clamp((cx - r).floor(), self.cols)..clamp((cx + r).ceil() + 1.0, self.cols);
        for row in rows {
            for col in cols.clone() {
                let [px, py] = Self::pixel_of(col as u16, row as u16);
                if (px - cx).powi(2) + (py - cy).powi(2) <= r * r {
                    self.text[row * self.cols + col] = None;
                }
            }
        }
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        self.buffer.stroke_circle(cx, cy, r, color, self.alpha);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _font_size: f64) {
        let (col, row) = Self::cell_of([x, y]);
        let row = row.floor();
        if row < 0.0 || row >= self.rows as f64 {
            return;
        }
        let len = text.chars().count() as f64;
        let start = (col - len / 2.0).round();
        let color = self.fill.base_color().blend_over(Color::BLACK, self.alpha);
        for (i, ch) in text.chars().enumerate() {
            let c = start + i as f64;
            if c >= 0.0 && c < self.cols as f64 {
                self.text[row as usize * self.cols + c as usize] = Some((ch, color));
            }
        }
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn text_metrics(&self) -> TextMetrics {
        // One glyph per cell, two pixels tall
        TextMetrics::Cells {
            width: 1.0,
            height: 2.0,
        }
    }
}
