/// 3x3 identity matrix
pub const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Below this length an axis is treated as degenerate
pub const EPSILON: f64 = 1e-12;

/// Rotates the pair (a, b) by `angle` radians
pub fn rotate_2d(angle: f64, a: f64, b: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (a * cos - b * sin, a * sin + b * cos)
}

/// Rotates a point about the X axis (acts on the y/z pair)
pub fn rotate_x(point: [f64; 3], angle: f64) -> [f64; 3] {
    let (y, z) = rotate_2d(angle, point[1], point[2]);
    [point[0], y, z]
}

/// Rotates a point about the Y axis (acts on the x/z pair)
pub fn rotate_y(point: [f64; 3], angle: f64) -> [f64; 3] {
    let (x, z) = rotate_2d(angle, point[0], point[2]);
    [x, point[1], z]
}

/// Rotates a point about the Z axis (acts on the x/y pair)
pub fn rotate_z(point: [f64; 3], angle: f64) -> [f64; 3] {
    let (x, y) = rotate_2d(angle, point[0], point[1]);
    [x, y, point[2]]
}

/// Applies X, then Y, then Z rotations
pub fn rotate_xyz(point: [f64; 3], angles: [f64; 3]) -> [f64; 3] {
    rotate_z(rotate_y(rotate_x(point, angles[0]), angles[1]), angles[2])
}

/// Matrix form of `rotate_x`
pub fn rotation_x(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

/// Matrix form of `rotate_y`
pub fn rotation_y(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]]
}

/// Matrix form of `rotate_z`
pub fn rotation_z(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Adds two vectors
pub fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Subtracts `b` from `a`
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Multiplies a vector by a scalar
pub fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

/// Dot product of two vectors
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product of two vectors
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Euclidean length of a vector
pub fn length(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Normalizes a vector; the zero vector is returned unchanged
pub fn normalize(a: [f64; 3]) -> [f64; 3] {
    let len = length(a);
    if len < EPSILON {
        return a;
    }
    scale(a, 1.0 / len)
}

/// Some unit vector perpendicular to `v`
pub fn perpendicular(v: [f64; 3]) -> [f64; 3] {
    let mut axis = cross([1.0, 0.0, 0.0], v);
    if dot(axis, axis) < EPSILON {
        axis = cross([0.0, 1.0, 0.0], v);
    }
    normalize(axis)
}

/// Rotation of `angle` radians about `axis` (Rodrigues' formula).
///
/// The axis does not need to be unit length. A zero-length axis gives the
/// identity.
pub fn axis_angle_matrix(axis: [f64; 3], angle: f64) -> [[f64; 3]; 3] {
    let len = length(axis);
    if len < EPSILON {
        return IDENTITY;
    }
    let [x, y, z] = scale(axis, 1.0 / len);
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    [
        [c + x * x * t, x * y * t - z * s, x * z * t + y * s],
        [y * x * t + z * s, c + y * y * t, y * z * t - x * s],
        [z * x * t - y * s, z * y * t + x * s, c + z * z * t],
    ]
}

/// Pulls a nearly orthogonal matrix back to a rotation (Gram-Schmidt on
/// the rows; the third row is rebuilt as the cross of the first two)
pub fn orthonormalize(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let x = normalize(m[0]);
    let y = normalize(sub(m[1], scale(x, dot(x, m[1]))));
    [x, y, cross(x, y)]
}

/// Euler angles in radians. The rotation is `Rz(z) * Ry(y) * Rx(x)`, i.e.
/// X is applied first, matching `rotate_xyz`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    /// Creates a set of Euler angles from radians
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Euler { x, y, z }
    }

    /// Angles as `[x, y, z]`, the order `rotate_xyz` takes
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Builds the rotation matrix for a set of Euler angles
pub fn euler_to_matrix(e: Euler) -> [[f64; 3]; 3] {
    let yx = multiply_matrices(&rotation_y(e.y), &rotation_x(e.x));
    multiply_matrices(&rotation_z(e.z), &yx)
}

/// Decomposes a rotation matrix into Euler angles with `atan2`/`asin`.
///
/// At gimbal lock (y = ±90°) only x - z is determined; z is pinned to 0.
pub fn matrix_to_euler(m: &[[f64; 3]; 3]) -> Euler {
    let sin_y = m[2][0].clamp(-1.0, 1.0);
    let y = sin_y.asin();
    if sin_y.abs() < 1.0 - 1e-9 {
        Euler {
            x: m[2][1].atan2(m[2][2]),
            y,
            z: m[1][0].atan2(m[0][0]),
        }
    } else {
        Euler {
            x: (-m[1][2]).atan2(m[1][1]),
            y,
            z: 0.0,
        }
    }
}
