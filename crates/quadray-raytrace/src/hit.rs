//! Intersection results.

use approx::AbsDiffEq;
use quadray_math::{Normal3, Point2, Point3, Transformation, EPSILON};

use crate::{Material, Ray};

/// Result of a ray-shape intersection.
///
/// Produced fresh for every query and borrowed from the shape that was hit,
/// so the material is shared instead of copied.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRecord<'a> {
    /// Intersection point in world space.
    pub world_point: Point3,
    /// Unit surface normal in world space, facing against the ray.
    pub normal: Normal3,
    /// Surface coordinates `(u, v)` of the hit.
    pub surface_point: Point2,
    /// Ray parameter of the hit.
    pub t: f64,
    /// The ray that produced this hit.
    pub ray: Ray,
    /// Material of the surface that was hit.
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Map a hit computed in a local frame back through `transformation`.
    ///
    /// The point follows the point rule and the normal the normal rule
    /// (re-normalized); `t` is unchanged because affine maps preserve the
    /// ray parameterization. `ray` replaces the local-frame ray.
    pub fn transformed(self, transformation: &Transformation, ray: &Ray) -> HitRecord<'a> {
        HitRecord {
            world_point: transformation.apply_point(&self.world_point),
            normal: transformation.apply_normal(&self.normal).normalize(),
            ray: *ray,
            ..self
        }
    }
}

/// Geometric closeness only: the material is not compared.
impl AbsDiffEq for HitRecord<'_> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.world_point.abs_diff_eq(&other.world_point, epsilon)
            && self.normal.abs_diff_eq(&other.normal, epsilon)
            && self.surface_point.abs_diff_eq(&other.surface_point, epsilon)
            && self.t.abs_diff_eq(&other.t, epsilon)
            && self.ray.abs_diff_eq(&other.ray, epsilon)
    }
}

/// Sort hits ascending by `t`. NaN parameters never reach this point.
pub(crate) fn sort_by_t(hits: &mut [HitRecord<'_>]) {
    hits.sort_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal));
}
