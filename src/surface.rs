use crate::style::{Color, Fill};

/// Immediate-mode 2D drawing target.
///
/// Coordinates are surface pixels with y pointing down. The fill style and
/// global alpha are shared state: whoever changes alpha restores it.
pub trait Surface {
    /// Width and height in pixels
    fn size(&self) -> (f64, f64);

    fn clear(&mut self, color: Color);

    fn set_fill(&mut self, fill: Fill);

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64);

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color);

    /// Draws text centered on (x, y) with the current fill
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64);

    fn global_alpha(&self) -> f64;

    fn set_global_alpha(&mut self, alpha: f64);

    /// How `fill_text` lays out glyphs
    fn text_metrics(&self) -> TextMetrics {
        TextMetrics::default()
    }
}

/// Text layout of a surface, used to size label hit boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextMetrics {
    /// Glyphs are `glyph_aspect * font_size` wide and one font size tall
    Proportional { glyph_aspect: f64 },
    /// Every glyph fills one fixed cell whatever the font size
    Cells { width: f64, height: f64 },
}

impl Default for TextMetrics {
    fn default() -> Self {
        TextMetrics::Proportional { glyph_aspect: 0.6 }
    }
}

impl TextMetrics {
    /// Width and height of a line of `chars` glyphs
    pub fn extents(&self, chars: usize, font_size: f64) -> [f64; 2] {
        let chars = chars as f64;
        match *self {
            TextMetrics::Proportional { glyph_aspect } => {
                [chars * font_size * glyph_aspect, font_size]
            }
            TextMetrics::Cells { width, height } => [chars * width, height],
        }
    }
}

/// One recorded call against a `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    SetFill(Fill),
    FillCircle { cx: f64, cy: f64, r: f64 },
    StrokeCircle {
        cx: f64,
        cy: f64,
        r: f64,
        color: Color,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
    },
    SetGlobalAlpha(f64),
}

/// Headless surface that records every call
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    alpha: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            alpha: 1.0,
            commands: Vec::new(),
        }
    }

    /// Drops all recorded commands
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Centers of the circles filled so far, in draw order
    pub fn circle_centers(&self) -> Vec<(f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { cx, cy, .. } => Some((*cx, *cy)),
                _ => None,
            })
            .collect()
    }

    /// Text drawn so far, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_fill(&mut self, fill: Fill) {
        self.commands.push(DrawCommand::SetFill(fill));
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.commands.push(DrawCommand::FillCircle { cx, cy, r });
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle { cx, cy, r, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_size: f64) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font_size,
        });
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.commands.push(DrawCommand::SetGlobalAlpha(self.alpha));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_text_grows_with_font_size() {
        let metrics = TextMetrics::default();
        assert_eq!(metrics.extents(4, 10.0), [24.0, 10.0]);
        assert_eq!(metrics.extents(4, 20.0), [48.0, 20.0]);
    }

    #[test]
    fn cell_text_ignores_font_size() {
        let metrics = TextMetrics::Cells {
            width: 1.0,
            height: 2.0,
        };
        assert_eq!(metrics.extents(5, 3.0), [5.0, 2.0]);
        assert_eq!(metrics.extents(5, 30.0), [5.0, 2.0]);
    }
}
