use crate::math::{self, Euler};
use std::ops::Mul;

/// Unit quaternion used for accumulating drag rotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a quaternion from its components, vector part first
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quaternion { x, y, z, w }
    }

    /// Right-handed rotation of `angle` radians about `axis`
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Self {
        let len = math::length(axis);
        if len < math::EPSILON {
            return Self::IDENTITY;
        }
        let [x, y, z] = math::scale(axis, 1.0 / len);
        let (s, c) = (angle * 0.5).sin_cos();
        Quaternion::new(x * s, y * s, z * s, c)
    }

    /// Shortest rotation taking unit vector `a` onto unit vector `b`
    pub fn from_unit_vectors(a: [f64; 3], b: [f64; 3]) -> Self {
        let d = math::dot(a, b).clamp(-1.0, 1.0);

        if d > 1.0 - 1e-12 {
            return Self::IDENTITY;
        }

        // Antipodal: any perpendicular axis will do
        if d < -1.0 + 1e-12 {
            let [x, y, z] = math::perpendicular(a);
            return Quaternion::new(x, y, z, 0.0);
        }

        let [x, y, z] = math::cross(a, b);
        Quaternion::new(x, y, z, 1.0 + d).normalize()
    }

    /// Negates the vector part; the inverse of a unit quaternion
    pub fn conjugate(self) -> Self {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Length of the quaternion as a 4-vector
    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Multiplicative inverse. Degenerate input returns the identity.
    pub fn inverse(self) -> Self {
        let n2 = self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w;
        if n2 < math::EPSILON {
            return Self::IDENTITY;
        }
        let c = self.conjugate();
        Quaternion::new(c.x / n2, c.y / n2, c.z / n2, c.w / n2)
    }

    /// Rescales to unit norm. Degenerate input returns the identity.
    pub fn normalize(self) -> Self {
        let n = self.norm();
        if n < 1e-10 {
            return Self::IDENTITY;
        }
        Quaternion::new(self.x / n, self.y / n, self.z / n, self.w / n)
    }

    /// Rotates a vector by this (unit) quaternion
    pub fn rotate_vector(self, v: [f64; 3]) -> [f64; 3] {
        let qv = [self.x, self.y, self.z];
        let t = math::scale(math::cross(qv, v), 2.0);
        math::add(v, math::add(math::scale(t, self.w), math::cross(qv, t)))
    }

    /// Rotation matrix of a unit quaternion
    pub fn to_matrix(self) -> [[f64; 3]; 3] {
        let Quaternion { x, y, z, w } = self;
        [
            [
                1.0 - 2.0 * (y * y + z * z),
                2.0 * (x * y - z * w),
                2.0 * (x * z + y * w),
            ],
            [
                2.0 * (x * y + z * w),
                1.0 - 2.0 * (x * x + z * z),
                2.0 * (y * z - x * w),
            ],
            [
                2.0 * (x * z - y * w),
                2.0 * (y * z + x * w),
                1.0 - 2.0 * (x * x + y * y),
            ],
        ]
    }

    /// Quaternion for a rotation matrix (Shepperd's method)
    pub fn from_matrix(m: &[[f64; 3]; 3]) -> Self {
        let trace = m[0][0] + m[1][1] + m[2][2];
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new(
                (m[2][1] - m[1][2]) / s,
                (m[0][2] - m[2][0]) / s,
                (m[1][0] - m[0][1]) / s,
                0.25 * s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
            Quaternion::new(
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[2][1] - m[1][2]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
            Quaternion::new(
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
                (m[0][2] - m[2][0]) / s,
            )
        } else {
            let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
            Quaternion::new(
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
                (m[1][0] - m[0][1]) / s,
            )
        };
        q.normalize()
    }

    /// Quaternion for a set of Euler angles, via the rotation matrix
    pub fn from_euler(e: Euler) -> Self {
        Self::from_matrix(&math::euler_to_matrix(e))
    }

    /// Euler angles of this rotation, via the rotation matrix
    pub fn to_euler(self) -> Euler {
        math::matrix_to_euler(&self.to_matrix())
    }

    /// Angle in radians between two orientations
    pub fn angle_to(self, other: Quaternion) -> f64 {
        let d = (self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w).abs();
        2.0 * d.clamp(-1.0, 1.0).acos()
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, b: Quaternion) -> Quaternion {
        let a = self;
        Quaternion::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn close_q(a: Quaternion, b: Quaternion) -> bool {
        close(a.x, b.x) && close(a.y, b.y) && close(a.z, b.z) && close(a.w, b.w)
    }

    #[test]
    fn quarter_turn_times_inverse_is_identity() {
        let q = Quaternion::from_axis_angle([0.0, 0.0, 1.0], FRAC_PI_2);
        assert!(close(q.norm(), 1.0));
        assert!(close_q(q * q.inverse(), Quaternion::IDENTITY));
        assert!(close_q(q.inverse() * q, Quaternion::IDENTITY));
    }

    #[test]
    fn quarter_turn_about_z_rotates_x_to_y() {
        let q = Quaternion::from_axis_angle([0.0, 0.0, 1.0], FRAC_PI_2);
        let v = q.rotate_vector([1.0, 0.0, 0.0]);
        assert!(close(v[0], 0.0) && close(v[1], 1.0) && close(v[2], 0.0));
    }

    #[test]
    fn same_vectors_give_identity() {
        let v = math::normalize([0.3, -0.4, 0.8]);
        assert_eq!(Quaternion::from_unit_vectors(v, v), Quaternion::IDENTITY);
    }

    #[test]
    fn from_unit_vectors_maps_a_onto_b() {
        let a = math::normalize([1.0, 0.2, -0.3]);
        let b = math::normalize([-0.4, 0.9, 0.1]);
        let r = Quaternion::from_unit_vectors(a, b).rotate_vector(a);
        assert!((0..3).all(|i| close(r[i], b[i])));
    }

    #[test]
    fn antipodal_vectors_turn_half_way() {
        let a = [0.0, 0.0, 1.0];
        let q = Quaternion::from_unit_vectors(a, [0.0, 0.0, -1.0]);
        assert!(close(q.angle_to(Quaternion::IDENTITY), PI));
        let r = q.rotate_vector(a);
        assert!(close(r[2], -1.0));
    }

    #[test]
    fn matrix_agrees_with_rotate_vector() {
        let q = Quaternion::from_axis_angle([1.0, 2.0, -0.5], 1.1);
        let v = [0.5, -1.0, 2.0];
        let by_matrix = math::multiply_matrix_vector(&q.to_matrix(), &v);
        let by_quat = q.rotate_vector(v);
        assert!((0..3).all(|i| close(by_matrix[i], by_quat[i])));
    }

    #[test]
    fn matrix_round_trip() {
        for &(axis, angle) in &[
            ([1.0, 0.0, 0.0], 2.9),
            ([0.0, 1.0, 0.0], -3.0),
            ([0.3, 0.3, 0.9], 0.7),
        ] {
            let q = Quaternion::from_axis_angle(axis, angle);
            let back = Quaternion::from_matrix(&q.to_matrix());
            let v = [0.2, -0.7, 1.5];
            let (a, b) = (q.rotate_vector(v), back.rotate_vector(v));
            let same = (0..3).all(|i| close(a[i], b[i]));
            assert!(same, "axis {axis:?} angle {angle}");
        }
    }

    #[test]
    fn euler_round_trip() {
        let e = Euler::new(0.4, -0.2, 1.3);
        let back = Quaternion::from_euler(e).to_euler();
        let (a, b) = (back.to_array(), e.to_array());
        assert!((0..3).all(|i| close(a[i], b[i])));
    }

    #[test]
    fn normalize_degenerate_is_identity() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q.normalize(), Quaternion::IDENTITY);
        assert_eq!(q.inverse(), Quaternion::IDENTITY);
    }
}
