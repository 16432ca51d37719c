use crate::entity::Entity;
use crate::math::rotate_xyz;
use crate::projection::Projection;
use crate::style::Color;
use crate::surface::{Surface, TextMetrics};

/// Background used when clearing before a paint
pub const BACKGROUND: Color = Color::rgb(8, 8, 16);

/// Fixed-size set of entities plus everything needed to animate them.
///
/// The host owns the scene and passes it to `update` and `paint`; after
/// `update` the entities are in paint order (farthest first).
#[derive(Debug, Clone)]
pub struct Scene {
    pub entities: Vec<Entity>,
    pub projection: Projection,
    /// Radians per second about the X, Y and Z axes
    pub angular_velocity: [f64; 3],
    /// Screen point the model origin projects to
    pub origin: [f64; 2],
    /// Index of the hovered label, if any
    pub hovered: Option<usize>,
    /// Text layout of the surface the scene is painted on
    pub text_metrics: TextMetrics,
}

impl Scene {
    pub fn new(projection: Projection, origin: [f64; 2]) -> Self {
        Scene {
            entities: Vec::new(),
            projection,
            angular_velocity: [0.0; 3],
            origin,
            hovered: None,
            text_metrics: TextMetrics::default(),
        }
    }

    pub fn with_angular_velocity(mut self, angular_velocity: [f64; 3]) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Sizes label hit boxes the way `surface` lays out text
    pub fn fit_text_to(&mut self, surface: &dyn Surface) {
        self.text_metrics = surface.text_metrics();
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Advances the animation by `dt` seconds: rotate, project, re-sort
    pub fn update(&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let angles = [
            self.angular_velocity[0] * dt,
            self.angular_velocity[1] * dt,
            self.angular_velocity[2] * dt,
        ];
        if angles != [0.0; 3] {
            for entity in &mut self.entities {
                entity.body.position = rotate_xyz(entity.body.position, angles);
            }
        }
        self.refresh();
    }

    /// Re-projects and re-sorts without rotating
    pub fn refresh(&mut self) {
        for entity in &mut self.entities {
            entity.project(&self.projection);
        }
        self.depth_sort();
    }

    /// Orders entities farthest first. Equal depths keep their relative order.
    pub fn depth_sort(&mut self) {
        self.entities.sort_by(|a, b| b.z().total_cmp(&a.z()));
        if self.hovered.is_some() {
            self.hovered = self.entities.iter().position(|e| e.highlighted);
        }
    }

    /// Clears the surface and paints every visible entity back to front
    pub fn paint(&self, surface: &mut dyn Surface) {
        surface.clear(BACKGROUND);
        for entity in &self.entities {
            entity.draw(surface, &self.projection, self.origin);
        }
    }

    /// Index of the nearest label under `point`.
    ///
    /// Expects paint order; a later candidate only wins when it is strictly
    /// nearer than the current one.
    pub fn hit_test(&self, point: [f64; 2]) -> Option<usize> {
        let mut found: Option<usize> = None;
        for (i, entity) in self.entities.iter().enumerate() {
            if !entity.hit(&self.projection, self.origin, &self.text_metrics, point) {
                continue;
            }
            match found {
                Some(j) if self.entities[j].z() <= entity.z() => {}
                _ => found = Some(i),
            }
        }
        found
    }

    /// Updates the hovered label from a pointer position
    pub fn hover(&mut self, point: Option<[f64; 2]>) -> Option<usize> {
        if let Some(i) = self.hovered.take() {
            if let Some(e) = self.entities.get_mut(i) {
                e.highlighted = false;
            }
        }
        let hit = point.and_then(|p| self.hit_test(p));
        self.hovered = hit;
        if let Some(i) = hit {
            self.entities[i].highlighted = true;
        }
        self.hovered
    }

    /// Number of entities that will be drawn this frame
    pub fn visible_count(&self) -> usize {
        self.entities.iter().filter(|e| e.body.visible).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use pretty_assertions::assert_eq;

    fn scene_with_depths(depths: &[f64]) -> Scene {
        let mut scene = Scene::new(Projection::new(300.0).unwrap(), [0.0, 0.0]);
        for (i, &z) in depths.iter().enumerate() {
            scene.push(Entity::circle([i as f64 * 10.0, 0.0, z], 5.0, Color::WHITE));
        }
        scene
    }

    fn label_at(position: [f64; 3], text: &str) -> Entity {
        Entity::label(position, text, 20.0, Color::WHITE)
    }

    fn depths(scene: &Scene) -> Vec<f64> {
        scene.entities.iter().map(|e| e.z()).collect()
    }

    #[test]
    fn sorts_farthest_first() {
        let mut scene = scene_with_depths(&[5.0, -3.0, 0.0, 10.0]);
        scene.depth_sort();
        assert_eq!(depths(&scene), vec![10.0, 5.0, 0.0, -3.0]);
    }

    #[test]
    fn ties_still_produce_a_valid_order() {
        let mut scene = scene_with_depths(&[1.0, 4.0, 1.0, 4.0, 0.0]);
        scene.depth_sort();
        let d = depths(&scene);
        assert!(d.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn paint_clears_then_draws_in_depth_order() {
        let mut scene = scene_with_depths(&[5.0, -3.0, 0.0, 10.0]);
        scene.update(0.0);
        let mut surface = RecordingSurface::new(200.0, 200.0);
        scene.paint(&mut surface);
        assert!(matches!(
            surface.commands.first(),
            Some(crate::surface::DrawCommand::Clear(_))
        ));
        let xs: Vec<f64> = scene.entities.iter().map(|e| e.body.position[0]).collect();
        // Original indices 3, 0, 2, 1 by depth
        assert_eq!(xs, vec![30.0, 0.0, 20.0, 10.0]);
        assert_eq!(surface.circle_centers().len(), 4);
    }

    #[test]
    fn entities_behind_the_eye_are_skipped() {
        let mut scene = scene_with_depths(&[0.0, -300.0, -500.0]);
        scene.update(0.0);
        assert_eq!(scene.visible_count(), 1);
        let mut surface = RecordingSurface::new(200.0, 200.0);
        scene.paint(&mut surface);
        assert_eq!(surface.circle_centers().len(), 1);
    }

    #[test]
    fn negative_or_nan_dt_does_not_rotate() {
        let mut scene = scene_with_depths(&[0.0]);
        scene.angular_velocity = [1.0, 1.0, 1.0];
        scene.entities[0].body.position = [100.0, 0.0, 0.0];
        scene.update(-1.0);
        scene.update(f64::NAN);
        assert_eq!(scene.entities[0].body.position, [100.0, 0.0, 0.0]);
    }

    #[test]
    fn nearest_overlapping_label_wins() {
        let mut scene = Scene::new(Projection::new(300.0).unwrap(), [50.0, 50.0]);
        scene.push(label_at([0.0, 0.0, 50.0], "far"));
        scene.push(label_at([0.0, 0.0, -50.0], "near"));
        scene.push(label_at([0.0, 0.0, 0.0], "mid"));
        scene.update(0.0);
        let hit = scene.hit_test([52.0, 51.0]).unwrap();
        assert!(matches!(
            &scene.entities[hit].kind,
            crate::entity::EntityKind::Label { text } if text == "near"
        ));
        assert_eq!(scene.hit_test([400.0, 400.0]), None);
    }

    #[test]
    fn hit_boxes_follow_the_surface_text_layout() {
        let mut scene = Scene::new(Projection::new(300.0).unwrap(), [0.0, 0.0]);
        scene.push(label_at([0.0, 0.0, 0.0], "wide"));
        scene.update(0.0);
        assert_eq!(scene.hit_test([20.0, 0.0]), Some(0));

        scene.fit_text_to(&crate::terminal::TerminalSurface::new(80, 24));
        assert_eq!(scene.hit_test([20.0, 0.0]), None);
        assert_eq!(scene.hit_test([1.5, 0.5]), Some(0));
    }

    #[test]
    fn hover_highlights_and_survives_resort() {
        let projection = Projection::new(300.0).unwrap();
        let mut scene = Scene::new(projection, [0.0, 0.0]);
        scene.angular_velocity = [0.0, 0.5, 0.0];
        scene.push(label_at([0.0, 0.0, 0.0], "center"));
        scene.push(label_at([100.0, 0.0, 0.0], "side"));
        scene.update(0.0);
        let i = scene.hover(Some([0.0, 0.0])).unwrap();
        assert!(scene.entities[i].highlighted);
        scene.update(0.1);
        let i = scene.hovered.unwrap();
        assert!(scene.entities[i].highlighted);
        assert_eq!(scene.hover(None), None);
        assert!(scene.entities.iter().all(|e| !e.highlighted));
    }
}
