/// RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => {
                let alpha = channel(6)?;
                Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
            }
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    /// Multiplies the RGB channels by `factor`, keeping alpha
    pub fn shade(self, factor: f64) -> Self {
        let f = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
        Color::rgba(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Linear interpolation between two colors, `t` in [0, 1]
    pub fn lerp(self, other: Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let f = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgba(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }

    /// Source-over blend of `self` onto `dst` with an extra alpha factor
    pub fn blend_over(self, dst: Color, alpha: f64) -> Self {
        let a = (self.a as f64 / 255.0 * alpha).clamp(0.0, 1.0);
        let f = |s: u8, d: u8| (s as f64 * a + d as f64 * (1.0 - a)).round() as u8;
        Color::rgb(f(self.r, dst.r), f(self.g, dst.g), f(self.b, dst.b))
    }
}

/// A circle used as one end of a radial gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientCircle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Two-circle radial gradient in the style of a 2D canvas
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner: GradientCircle,
    pub outer: GradientCircle,
    pub stops: Vec<(f64, Color)>,
}

impl RadialGradient {
    /// Color at gradient offset `t`
    pub fn color_at(&self, t: f64) -> Color {
        let Some(&(first_offset, first)) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t <= o1 {
                let span = o1 - o0;
                if span <= 0.0 {
                    return c1;
                }
                return c0.lerp(c1, (t - o0) / span);
            }
        }
        self.stops.last().map(|&(_, c)| c).unwrap_or(first)
    }

    /// Approximate color at a surface point.
    ///
    /// Offsets run from the inner circle's center out to the far side of
    /// the outer circle.
    pub fn sample(&self, x: f64, y: f64) -> Color {
        let d = (x - self.inner.x).hypot(y - self.inner.y);
        let dx = self.outer.x - self.inner.x;
        let dy = self.outer.y - self.inner.y;
        let shift = dx.hypot(dy);
        let reach = self.outer.r + shift - self.inner.r;
        if reach <= 0.0 {
            return self.color_at(1.0);
        }
        self.color_at(((d - self.inner.r) / reach).clamp(0.0, 1.0))
    }
}

/// Fill style for the next fill operation
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    Radial(RadialGradient),
}

impl Fill {
    /// Representative color, used where a gradient cannot be drawn
    pub fn base_color(&self) -> Color {
        match self {
            Fill::Solid(c) => *c,
            Fill::Radial(g) => g.color_at(0.5),
        }
    }
}

/// Stop offsets of the shaded sphere look
pub const SPHERE_STOP_OFFSETS: [f64; 5] = [0.0, 0.2, 0.9, 0.98, 1.0];

/// Stop colors of the shaded sphere look
pub const SPHERE_STOP_COLORS: [Color; 5] = [
    Color::rgb(255, 255, 255),
    Color::rgb(170, 190, 255),
    Color::rgb(40, 60, 170),
    Color::rgb(20, 30, 90),
    Color::rgba(0, 0, 0, 0),
];

/// Brightness multiplier for a projected scale; farther is darker
pub fn depth_shade(scale: f64) -> f64 {
    (0.35 + 0.65 * scale).clamp(0.35, 1.0)
}

/// Shaded sphere gradient, lit from the upper left.
///
/// `colors` are the five stop colors; they are darkened by `depth_shade`.
pub fn sphere_gradient(
    cx: f64,
    cy: f64,
    r: f64,
    colors: &[Color; 5],
    shade: f64,
) -> RadialGradient {
    let stops = SPHERE_STOP_OFFSETS
        .iter()
        .zip(colors.iter())
        .map(|(&offset, &color)| (offset, color.shade(shade)))
        .collect();
    RadialGradient {
        inner: GradientCircle {
            x: cx - r * 0.3,
            y: cy - r * 0.3,
            r: r * 0.05,
        },
        outer: GradientCircle { x: cx, y: cy, r },
        stops,
    }
}

/// Sphere stop colors derived from a single base color
pub fn sphere_palette(base: Color) -> [Color; 5] {
    [
        Color::WHITE,
        base.lerp(Color::WHITE, 0.5),
        base,
        base.shade(0.5),
        base.shade(0.2).with_alpha(0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        let translucent = Color::rgba(255, 128, 0, 128);
        assert_eq!(Color::from_hex("#ff800080"), Some(translucent));
        assert_eq!(Color::from_hex("ff8000"), None);
        assert_eq!(Color::from_hex("#ff80"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn gradient_interpolates_between_stops() {
        let g = sphere_gradient(0.0, 0.0, 10.0, &SPHERE_STOP_COLORS, 1.0);
        assert_eq!(g.color_at(0.0), SPHERE_STOP_COLORS[0]);
        assert_eq!(g.color_at(0.9), SPHERE_STOP_COLORS[2]);
        assert_eq!(g.color_at(1.0), SPHERE_STOP_COLORS[4]);
        assert_eq!(g.color_at(2.0), SPHERE_STOP_COLORS[4]);
        let mid = g.color_at(0.55);
        assert!(mid.b < SPHERE_STOP_COLORS[1].b);
        assert!(mid.b > SPHERE_STOP_COLORS[2].b);
    }

    #[test]
    fn sphere_gradient_uses_fixed_offsets_and_upper_left_focus() {
        let g = sphere_gradient(100.0, 50.0, 20.0, &SPHERE_STOP_COLORS, 1.0);
        let offsets: Vec<f64> = g.stops.iter().map(|s| s.0).collect();
        assert_eq!(offsets, SPHERE_STOP_OFFSETS.to_vec());
        assert!(g.inner.x < g.outer.x && g.inner.y < g.outer.y);
        // The highlight side is brighter than the far side
        let near = g.sample(100.0 - 15.0, 50.0 - 15.0);
        let far = g.sample(100.0 + 12.0, 50.0 + 12.0);
        let brightness = |c: Color| c.r as u16 + c.g as u16 + c.b as u16;
        assert!(brightness(near) > brightness(far));
    }

    #[test]
    fn depth_shade_dims_distant_entities() {
        assert!(depth_shade(0.5) < depth_shade(1.0));
        assert_eq!(depth_shade(2.0), 1.0);
        assert_eq!(depth_shade(0.0), 0.35);
    }

    #[test]
    fn blend_respects_alpha() {
        let out = Color::WHITE.blend_over(Color::BLACK, 0.5);
        assert_eq!(out, Color::rgb(128, 128, 128));
        assert_eq!(Color::WHITE.blend_over(Color::BLACK, 0.0), Color::BLACK);
    }
}
