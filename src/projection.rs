use crate::error::{Error, Result};

/// Perspective projection with the eye at `z = -focal_length`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    focal_length: f64,
}

/// Screen-space result of projecting a point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Projection {
    /// Creates a projection. The focal length must be positive and finite.
    pub fn new(focal_length: f64) -> Result<Self> {
        if !(focal_length.is_finite() && focal_length > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "focal length must be positive, got {focal_length}"
            )));
        }
        Ok(Projection { focal_length })
    }

    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Scale factor `f / (f + z)` for a depth.
    ///
    /// Returns `None` when the point sits on or behind the eye plane
    /// (`f + z <= 0`); such points are not drawn.
    pub fn project_scale(&self, z: f64) -> Option<f64> {
        let denominator = self.focal_length + z;
        if denominator <= 0.0 || !denominator.is_finite() {
            return None;
        }
        Some(self.focal_length / denominator)
    }

    /// Projects a position to screen space around `origin`
    pub fn project_point(&self, position: [f64; 3], origin: [f64; 2]) -> Option<Projected> {
        let scale = self.project_scale(position[2])?;
        Some(Projected {
            x: origin[0] + position[0] * scale,
            y: origin[1] + position[1] * scale,
            scale,
        })
    }
}
