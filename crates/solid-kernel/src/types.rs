use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// NEVER persisted. Valid only for the kernel instance that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center`.
    pub fn from_center_size(center: [f64; 3], size: [f64; 3]) -> Self {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for i in 0..3 {
            min[i] = center[i] - size[i] * 0.5;
            max[i] = center[i] + size[i] * 0.5;
        }
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn expand_to_include(&mut self, p: [f64; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let s = self.size();
        s[0] * s[1] * s[2]
    }

    /// Strict interior containment: points on the boundary are outside.
    pub fn contains_interior(&self, p: [f64; 3]) -> bool {
        (0..3).all(|i| p[i] > self.min[i] && p[i] < self.max[i])
    }

    pub fn translated(&self, offset: [f64; 3]) -> Self {
        let mut out = *self;
        for i in 0..3 {
            out.min[i] += offset[i];
            out.max[i] += offset[i];
        }
        out
    }

    /// Every corner of `self` lies within `tol` of the matching corner of `other`.
    pub fn approx_eq(&self, other: &Aabb, tol: f64) -> bool {
        (0..3).all(|i| {
            (self.min[i] - other.min[i]).abs() <= tol && (self.max[i] - other.max[i]).abs() <= tol
        })
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("solid not found: {handle:?}")]
    EntityNotFound { handle: KernelSolidHandle },

    #[error("kernel error: {message}")]
    Other { message: String },
}

/// Reject boxes the kernels cannot represent.
pub(crate) fn validate_box(center: [f64; 3], size: [f64; 3]) -> Result<(), KernelError> {
    if center.iter().any(|c| !c.is_finite()) {
        return Err(KernelError::InvalidGeometry {
            reason: format!("box center {:?} is not finite", center),
        });
    }
    if size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(KernelError::InvalidGeometry {
            reason: format!("box size {:?} must be finite and positive", size),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_center_size() {
        let bb = Aabb::from_center_size([1.0, 2.0, 3.0], [2.0, 4.0, 6.0]);
        assert_eq!(bb.min, [0.0, 0.0, 0.0]);
        assert_eq!(bb.max, [2.0, 4.0, 6.0]);
        assert_eq!(bb.size(), [2.0, 4.0, 6.0]);
        assert_eq!(bb.center(), [1.0, 2.0, 3.0]);
        assert!((bb.volume() - 48.0).abs() < 1e-12);
    }

    #[test]
    fn aabb_interior_excludes_boundary() {
        let bb = Aabb::new([0.0; 3], [1.0; 3]);
        assert!(bb.contains_interior([0.5, 0.5, 0.5]));
        assert!(!bb.contains_interior([1.0, 0.5, 0.5]));
        assert!(!bb.contains_interior([0.0, 0.0, 0.0]));
    }

    #[test]
    fn empty_aabb_grows_to_points() {
        let mut bb = Aabb::empty();
        assert!(bb.is_empty());
        assert_eq!(bb.volume(), 0.0);
        bb.expand_to_include([1.0, -1.0, 2.0]);
        bb.expand_to_include([-1.0, 1.0, 0.0]);
        assert!(!bb.is_empty());
        assert_eq!(bb.min, [-1.0, -1.0, 0.0]);
        assert_eq!(bb.max, [1.0, 1.0, 2.0]);
    }

    #[test]
    fn validate_box_rejects_degenerate_input() {
        assert!(validate_box([0.0; 3], [1.0, 1.0, 1.0]).is_ok());
        assert!(validate_box([0.0; 3], [0.0, 1.0, 1.0]).is_err());
        assert!(validate_box([0.0; 3], [1.0, f64::NAN, 1.0]).is_err());
        assert!(validate_box([f64::INFINITY, 0.0, 0.0], [1.0; 3]).is_err());
    }
}
