//! Ray representation.

use approx::AbsDiffEq;
use quadray_math::{Point3, Transformation, Vec3, EPSILON};

/// A ray in 3D space: `origin + t * direction` for `t` in `(tmin, tmax)`.
///
/// The direction is not normalized, so `t` is measured in units of the
/// direction's length. Applying an affine transformation keeps `t`
/// meaningful, which is what lets shapes intersect in their local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray (not necessarily unit length).
    pub direction: Vec3,
    /// Smallest accepted parameter, keeps rays from re-hitting their origin surface.
    pub tmin: f64,
    /// Largest accepted parameter.
    pub tmax: f64,
    /// Number of bounces that produced this ray.
    pub depth: u32,
}

impl Ray {
    /// Default lower bound of the valid parameter range.
    pub const DEFAULT_TMIN: f64 = 1e-5;

    /// Create a ray with the default range `(1e-5, +inf)` and depth 0.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            tmin: Self::DEFAULT_TMIN,
            tmax: f64::INFINITY,
            depth: 0,
        }
    }

    /// Replace the valid parameter range.
    pub fn with_range(self, tmin: f64, tmax: f64) -> Self {
        Self { tmin, tmax, ..self }
    }

    /// Replace the recursion depth.
    pub fn with_depth(self, depth: u32) -> Self {
        Self { depth, ..self }
    }

    /// Evaluate the ray at parameter `t`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Whether `t` lies strictly inside the valid range.
    #[inline]
    pub fn accepts(&self, t: f64) -> bool {
        t > self.tmin && t < self.tmax
    }

    /// Apply a transformation to origin and direction.
    ///
    /// Range and depth are unchanged.
    pub fn transform(&self, transformation: &Transformation) -> Ray {
        Ray {
            origin: transformation.apply_point(&self.origin),
            direction: transformation.apply_vec(&self.direction),
            ..*self
        }
    }
}

impl AbsDiffEq for Ray {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.origin.abs_diff_eq(&other.origin, epsilon)
            && self.direction.abs_diff_eq(&other.direction, epsilon)
    }
}
