use crate::projection::Projection;
use crate::style::{depth_shade, sphere_gradient, Color, Fill, SPHERE_STOP_COLORS};
use crate::surface::{Surface, TextMetrics};

/// Color used for a hovered label
pub const HIGHLIGHT: Color = Color::rgb(255, 210, 60);

/// Custom fill for an entity, replacing the variant's default look
pub type StyleOverride = fn(&Entity, &Footprint) -> Fill;

/// Shared state of every entity: where it is and how big it looks
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Model-space position, rotated in place every frame
    pub position: [f64; 3],
    /// Position the entity was created at
    pub anchor: [f64; 3],
    /// Base radius (circles, spheres) or font size (labels)
    pub radius: f64,
    /// Perspective scale from the last projection
    pub scale: f64,
    /// False when the entity is on or behind the eye plane
    pub visible: bool,
}

/// Projected on-screen circle or text anchor of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Circle,
    Sphere,
    Label { text: String },
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub body: Body,
    pub kind: EntityKind,
    pub color: Color,
    pub highlighted: bool,
    pub style_override: Option<StyleOverride>,
}

impl Entity {
    fn with_kind(position: [f64; 3], radius: f64, color: Color, kind: EntityKind) -> Self {
        Entity {
            body: Body {
                position,
                anchor: position,
                radius,
                scale: 1.0,
                visible: true,
            },
            kind,
            color,
            highlighted: false,
            style_override: None,
        }
    }

    pub fn circle(position: [f64; 3], radius: f64, color: Color) -> Self {
        Self::with_kind(position, radius, color, EntityKind::Circle)
    }

    pub fn sphere(position: [f64; 3], radius: f64) -> Self {
        let base = SPHERE_STOP_COLORS[2];
        Self::with_kind(position, radius, base, EntityKind::Sphere)
    }

    pub fn label(
        position: [f64; 3],
        text: impl Into<String>,
        font_size: f64,
        color: Color,
    ) -> Self {
        let kind = EntityKind::Label { text: text.into() };
        Self::with_kind(position, font_size, color, kind)
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style_override = Some(style);
        self
    }

    pub fn z(&self) -> f64 {
        self.body.position[2]
    }

    pub fn is_label(&self) -> bool {
        matches!(self.kind, EntityKind::Label { .. })
    }

    /// Recomputes `scale` and `visible` from the current depth
    pub fn project(&mut self, projection: &Projection) {
        match projection.project_scale(self.z()) {
            Some(scale) => {
                self.body.scale = scale;
                self.body.visible = true;
            }
            None => {
                self.body.scale = 0.0;
                self.body.visible = false;
            }
        }
    }

    /// Screen footprint around `origin`, or `None` when behind the eye
    pub fn footprint(&self, projection: &Projection, origin: [f64; 2]) -> Option<Footprint> {
        let projected = projection.project_point(self.body.position, origin)?;
        Some(Footprint {
            x: projected.x,
            y: projected.y,
            r: self.body.radius * projected.scale,
            scale: projected.scale,
        })
    }

    /// Fill for this frame, derived from the projected scale
    pub fn render_style(&self, fp: &Footprint) -> Fill {
        if let Some(style) = self.style_override {
            return style(self, fp);
        }
        let shade = depth_shade(fp.scale);
        match self.kind {
            EntityKind::Circle => Fill::Solid(self.color.shade(shade)),
            EntityKind::Sphere => {
                let gradient = sphere_gradient(fp.x, fp.y, fp.r, &SPHERE_STOP_COLORS, shade);
                Fill::Radial(gradient)
            }
            EntityKind::Label { .. } if self.highlighted => Fill::Solid(HIGHLIGHT),
            EntityKind::Label { .. } => Fill::Solid(self.color),
        }
    }

    /// Half width and half height of the text box drawn at `fp`
    pub fn label_half_extents(&self, fp: &Footprint, metrics: &TextMetrics) -> [f64; 2] {
        let chars = match &self.kind {
            EntityKind::Label { text } => text.chars().count(),
            _ => 0,
        };
        let [width, height] = metrics.extents(chars, fp.r);
        [width * 0.5, height * 0.5]
    }

    /// Whether `point` falls on this label's text box
    pub fn hit(
        &self,
        projection: &Projection,
        origin: [f64; 2],
        metrics: &TextMetrics,
        point: [f64; 2],
    ) -> bool {
        if !self.is_label() || !self.body.visible {
            return false;
        }
        match self.footprint(projection, origin) {
            Some(fp) => hit_box([fp.x, fp.y], self.label_half_extents(&fp, metrics), point),
            None => false,
        }
    }

    /// Paints the entity. Invisible entities draw nothing; global alpha is
    /// restored before returning.
    pub fn draw(&self, surface: &mut dyn Surface, projection: &Projection, origin: [f64; 2]) {
        if !self.body.visible {
            return;
        }
        let Some(fp) = self.footprint(projection, origin) else {
            return;
        };
        let fill = self.render_style(&fp);
        match &self.kind {
            EntityKind::Circle | EntityKind::Sphere => {
                surface.set_fill(fill);
                surface.fill_circle(fp.x, fp.y, fp.r);
            }
            EntityKind::Label { text } => {
                let previous = surface.global_alpha();
                surface.set_global_alpha(previous * label_alpha(fp.scale));
                surface.set_fill(fill);
                surface.fill_text(text, fp.x, fp.y, fp.r);
                surface.set_global_alpha(previous);
            }
        }
    }
}

/// Labels fade out as they recede
pub fn label_alpha(scale: f64) -> f64 {
    (scale * scale).clamp(0.2, 1.0)
}

/// Point-in-box test against a box centered on `center`
pub fn hit_box(center: [f64; 2], half_extents: [f64; 2], point: [f64; 2]) -> bool {
    (point[0] - center[0]).abs() <= half_extents[0]
        && (point[1] - center[1]).abs() <= half_extents[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use pretty_assertions::assert_eq;

    fn projection() -> Projection {
        Projection::new(300.0).unwrap()
    }

    #[test]
    fn hit_box_uses_half_extents() {
        assert!(hit_box([50.0, 50.0], [20.0, 10.0], [55.0, 58.0]));
        assert!(!hit_box([50.0, 50.0], [20.0, 10.0], [75.0, 58.0]));
        assert!(hit_box([50.0, 50.0], [20.0, 10.0], [70.0, 60.0]));
    }

    #[test]
    fn entity_behind_eye_is_invisible_and_draws_nothing() {
        let mut e = Entity::sphere([0.0, 0.0, -300.0], 10.0);
        e.project(&projection());
        assert!(!e.body.visible);
        let mut surface = RecordingSurface::new(100.0, 100.0);
        e.draw(&mut surface, &projection(), [50.0, 50.0]);
        assert!(surface.commands.is_empty());
        assert_eq!(e.footprint(&projection(), [50.0, 50.0]), None);
    }

    #[test]
    fn radius_shrinks_with_distance() {
        let mut e = Entity::circle([20.0, 0.0, 100.0], 8.0, Color::WHITE);
        e.project(&projection());
        let fp = e.footprint(&projection(), [0.0, 0.0]).unwrap();
        assert_eq!(fp.r, 6.0);
        assert_eq!(fp.x, 15.0);
        assert_eq!(fp.scale, e.body.scale);
    }

    #[test]
    fn label_draw_restores_global_alpha() {
        let mut e = Entity::label([0.0, 0.0, 200.0], "far", 20.0, Color::WHITE);
        e.project(&projection());
        let mut surface = RecordingSurface::new(100.0, 100.0);
        surface.set_global_alpha(0.8);
        surface.reset();
        e.draw(&mut surface, &projection(), [0.0, 0.0]);
        assert_eq!(surface.global_alpha(), 0.8);
        assert_eq!(
            surface.commands.last(),
            Some(&DrawCommand::SetGlobalAlpha(0.8))
        );
        assert_eq!(surface.texts(), vec!["far"]);
    }

    #[test]
    fn sphere_fill_is_a_radial_gradient() {
        let mut e = Entity::sphere([0.0, 0.0, 0.0], 10.0);
        e.project(&projection());
        let fp = e.footprint(&projection(), [50.0, 50.0]).unwrap();
        match e.render_style(&fp) {
            Fill::Radial(g) => {
                assert_eq!(g.outer.r, 10.0);
                assert_eq!(g.stops.len(), 5);
            }
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    #[test]
    fn style_override_replaces_default_look() {
        fn red(_: &Entity, _: &Footprint) -> Fill {
            Fill::Solid(Color::rgb(255, 0, 0))
        }
        let mut e = Entity::sphere([0.0, 0.0, 0.0], 10.0).with_style(red);
        e.project(&projection());
        let fp = e.footprint(&projection(), [0.0, 0.0]).unwrap();
        assert_eq!(e.render_style(&fp), Fill::Solid(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn label_extents_follow_text_and_scale() {
        let mut e = Entity::label([0.0, 0.0, 0.0], "abcd", 10.0, Color::WHITE);
        e.project(&projection());
        let metrics = TextMetrics::default();
        let fp = e.footprint(&projection(), [0.0, 0.0]).unwrap();
        assert_eq!(e.label_half_extents(&fp, &metrics), [12.0, 5.0]);
        assert!(e.hit(&projection(), [0.0, 0.0], &metrics, [11.0, 4.0]));
        assert!(!e.hit(&projection(), [0.0, 0.0], &metrics, [13.0, 0.0]));
    }

    #[test]
    fn cell_metrics_shrink_the_hit_box_to_drawn_text() {
        let mut e = Entity::label([0.0, 0.0, 0.0], "abcd", 10.0, Color::WHITE);
        e.project(&projection());
        let cells = TextMetrics::Cells {
            width: 1.0,
            height: 2.0,
        };
        let fp = e.footprint(&projection(), [0.0, 0.0]).unwrap();
        assert_eq!(e.label_half_extents(&fp, &cells), [2.0, 1.0]);
        assert!(e.hit(&projection(), [0.0, 0.0], &cells, [1.5, 0.5]));
        assert!(!e.hit(&projection(), [0.0, 0.0], &cells, [3.0, 0.0]));
    }
}
