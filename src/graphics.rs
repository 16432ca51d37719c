use crate::style::{Color, Fill};

/// Software raster target: one `Color` per pixel, row-major
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        PixelBuffer {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Blends `color` over the pixel at (x, y); out-of-range writes are dropped
    pub fn blend(&mut self, x: isize, y: isize, color: Color, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return;
        }
        let offset = y as usize * self.width + x as usize;
        self.pixels[offset] = color.blend_over(self.pixels[offset], alpha);
    }

    /// Fills a circle, sampling the fill at each pixel center
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, fill: &Fill, alpha: f64) {
        if !(r > 0.0) || self.width == 0 || self.height == 0 {
            return;
        }
        // Compute bounding box of the circle
        let min_x = (cx - r).floor().max(0.0) as usize;
        let max_x = (cx + r).ceil().min(self.width as f64 - 1.0);
        let min_y = (cy - r).floor().max(0.0) as usize;
        let max_y = (cy + r).ceil().min(self.height as f64 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        let r2 = r * r;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;
                if (px - cx).powi(2) + (py - cy).powi(2) > r2 {
                    continue;
                }
                let color = match fill {
                    Fill::Solid(c) => *c,
                    Fill::Radial(g) => g.sample(px, py),
                };
                self.blend(x as isize, y as isize, color, alpha);
            }
        }
    }

    /// Draws a line between two points using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color, alpha: f64) {
        let (mut x0, mut y0, x1, y1) = (
            x0.round() as isize,
            y0.round() as isize,
            x1.round() as isize,
            y1.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.blend(x0, y0, color, alpha);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Outlines a circle as a closed polyline
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color, alpha: f64) {
        if !(r > 0.0) {
            return;
        }
        let segments = ((r * std::f64::consts::TAU).ceil() as usize).clamp(8, 720);
        let point = |i: usize| {
            let a = i as f64 / segments as f64 * std::f64::consts::TAU;
            (cx + r * a.cos(), cy + r * a.sin())
        };
        for i in 0..segments {
            let (x0, y0) = point(i);
            let (x1, y1) = point(i + 1);
            self.draw_line(x0, y0, x1, y1, color, alpha);
        }
    }
}
