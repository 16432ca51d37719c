use crate::math::{self, Euler};
use crate::quaternion::Quaternion;
use crate::scene::Scene;
use std::f64::consts::PI;

/// Unit vector for a longitude/latitude pair (radians).
///
/// Screen convention: y grows downward and the viewer looks along +z, so
/// (0, 0) faces the viewer at `z = -1` and the north pole is `y = -1`.
pub fn orthogonal_projection_of(lon: f64, lat: f64) -> [f64; 3] {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    [cos_lat * sin_lon, -sin_lat, -cos_lat * cos_lon]
}

/// Inverse of `orthogonal_projection_of`; returns (lon, lat) in radians
pub fn lon_lat_of(v: [f64; 3]) -> (f64, f64) {
    let v = math::normalize(v);
    let lat = (-v[1]).clamp(-1.0, 1.0).asin();
    let lon = v[0].atan2(-v[2]);
    (lon, lat)
}

/// Virtual trackball covering the globe's screen disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arcball {
    pub center: [f64; 2],
    pub radius: f64,
}

impl Arcball {
    /// Unit vector on the visible hemisphere under `point`.
    ///
    /// Points outside the disc are pulled onto its rim.
    pub fn vector(&self, point: [f64; 2]) -> [f64; 3] {
        let r = self.radius.max(1.0);
        let x = (point[0] - self.center[0]) / r;
        let y = (point[1] - self.center[1]) / r;
        let d2 = x * x + y * y;
        if d2 <= 1.0 {
            math::normalize([x, y, -(1.0 - d2).sqrt()])
        } else {
            let inv = 1.0 / d2.sqrt();
            [x * inv, y * inv, 0.0]
        }
    }
}

/// Rotation carrying `prev` onto `curr`, left-composed onto `orientation`.
///
/// Both inputs are unit vectors on the virtual sphere. When they coincide
/// the orientation is returned unchanged; when they are opposite the turn
/// is half way round an axis perpendicular to `prev`.
pub fn drag_rotation(
    prev: [f64; 3],
    curr: [f64; 3],
    orientation: &[[f64; 3]; 3],
) -> [[f64; 3]; 3] {
    let axis = math::cross(prev, curr);
    let rotation = if math::length(axis) >= math::EPSILON {
        let angle = math::dot(prev, curr).clamp(-1.0, 1.0).acos();
        math::axis_angle_matrix(axis, angle)
    } else if math::dot(prev, curr) > 0.0 {
        log::trace!("degenerate drag axis, keeping orientation");
        return *orientation;
    } else {
        log::trace!("opposite drag vectors, turning half way round");
        math::axis_angle_matrix(math::perpendicular(prev), PI)
    };
    math::multiply_matrices(&rotation, orientation)
}

/// Turns pointer drags into a globe orientation
pub trait DragController {
    /// Captures the baseline orientation and the grabbed point
    fn press(&mut self, grab: [f64; 3]);

    /// Rotates so the grabbed point follows `current`
    fn drag(&mut self, current: [f64; 3]);

    fn release(&mut self);

    fn is_dragging(&self) -> bool;

    /// Turns the globe about the vertical axis by `angle` radians
    fn spin(&mut self, angle: f64);

    /// Orientation as Euler angles, for the projection layer
    fn euler(&self) -> Euler;

    fn reset(&mut self);

    fn name(&self) -> &'static str;
}

/// Accumulates orientation as a rotation matrix (Rodrigues per drag)
#[derive(Debug, Clone)]
pub struct MatrixDragController {
    orientation: [[f64; 3]; 3],
    baseline: [[f64; 3]; 3],
    grab: Option<[f64; 3]>,
}

impl Default for MatrixDragController {
    fn default() -> Self {
        MatrixDragController {
            orientation: math::IDENTITY,
            baseline: math::IDENTITY,
            grab: None,
        }
    }
}

impl MatrixDragController {
    pub fn orientation(&self) -> [[f64; 3]; 3] {
        self.orientation
    }
}

impl DragController for MatrixDragController {
    fn press(&mut self, grab: [f64; 3]) {
        self.baseline = self.orientation;
        self.grab = Some(grab);
    }

    fn drag(&mut self, current: [f64; 3]) {
        if let Some(grab) = self.grab {
            let rotated = drag_rotation(grab, current, &self.baseline);
            self.orientation = math::orthonormalize(&rotated);
        }
    }

    fn release(&mut self) {
        self.grab = None;
    }

    fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    fn spin(&mut self, angle: f64) {
        let turned = math::multiply_matrices(&math::rotation_y(angle), &self.orientation);
        self.orientation = math::orthonormalize(&turned);
    }

    fn euler(&self) -> Euler {
        math::matrix_to_euler(&self.orientation)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn name(&self) -> &'static str {
        "matrix"
    }
}

/// Accumulates orientation as a unit quaternion
#[derive(Debug, Clone, Default)]
pub struct QuaternionDragController {
    orientation: Quaternion,
    baseline: Quaternion,
    grab: Option<[f64; 3]>,
}

impl QuaternionDragController {
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }
}

impl DragController for QuaternionDragController {
    fn press(&mut self, grab: [f64; 3]) {
        self.baseline = self.orientation;
        self.grab = Some(grab);
    }

    fn drag(&mut self, current: [f64; 3]) {
        if let Some(grab) = self.grab {
            let delta = Quaternion::from_unit_vectors(grab, current);
            self.orientation = (delta * self.baseline).normalize();
        }
    }

    fn release(&mut self) {
        self.grab = None;
    }

    fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    fn spin(&mut self, angle: f64) {
        // rotation_y turns left-handed about +y
        let turn = Quaternion::from_axis_angle([0.0, 1.0, 0.0], -angle);
        self.orientation = (turn * self.orientation).normalize();
    }

    fn euler(&self) -> Euler {
        self.orientation.to_euler()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn name(&self) -> &'static str {
        "quaternion"
    }
}

/// Which controller a globe uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    Matrix,
    #[default]
    Quaternion,
}

impl ControllerKind {
    pub fn build(self) -> Box<dyn DragController> {
        match self {
            ControllerKind::Matrix => Box::new(MatrixDragController::default()),
            ControllerKind::Quaternion => Box::new(QuaternionDragController::default()),
        }
    }
}

/// Drag-to-rotate globe driving a scene's entity positions.
///
/// Entities keep their unrotated position in `Body::anchor`; every frame
/// the controller's orientation is applied to the anchors.
pub struct GlobeView {
    pub arcball: Arcball,
    pub controller: Box<dyn DragController>,
    /// Idle rotation in radians per second
    pub spin_rate: f64,
}

impl GlobeView {
    pub fn new(arcball: Arcball, controller: Box<dyn DragController>, spin_rate: f64) -> Self {
        GlobeView {
            arcball,
            controller,
            spin_rate,
        }
    }

    pub fn press(&mut self, point: [f64; 2]) {
        let grab = self.arcball.vector(point);
        self.controller.press(grab);
    }

    pub fn drag(&mut self, point: [f64; 2]) {
        if self.controller.is_dragging() {
            let current = self.arcball.vector(point);
            self.controller.drag(current);
        }
    }

    pub fn release(&mut self) {
        self.controller.release();
    }

    /// Spins when idle, then writes rotated anchors into the scene
    pub fn update(&mut self, scene: &mut Scene, dt: f64) {
        if !self.controller.is_dragging() && dt.is_finite() && dt > 0.0 {
            self.controller.spin(self.spin_rate * dt);
        }
        self.apply(scene);
    }

    /// Positions every entity at its rotated anchor and re-sorts
    pub fn apply(&self, scene: &mut Scene) {
        let rotation = math::euler_to_matrix(self.controller.euler());
        for entity in &mut scene.entities {
            entity.body.position = math::multiply_matrix_vector(&rotation, &entity.body.anchor);
        }
        scene.refresh();
    }
}
