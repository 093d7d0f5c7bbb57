//! Shapes and the ray intersection contract.
//!
//! Every shape lives in its own local frame and is placed in the world by a
//! [`Transformation`]. Queries transform the incoming ray into the local
//! frame with the cached inverse, solve the shape's implicit equation there,
//! and map the hit back to world space.

mod csg;
mod cuboid;
mod cylinder;
mod disk;
mod plane;
mod sphere;

pub use csg::{CsgOperation, CsgShape};
pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use disk::Disk;
pub use plane::Plane;
pub use sphere::Sphere;

use std::f64::consts::PI;

use quadray_math::{Normal3, Point2, Point3, Transformation, Vec3};

use crate::{HitRecord, Material, Ray};

/// The kind of a shape (for match-based dispatch and diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Unit sphere at the origin.
    Sphere,
    /// The z = 0 plane.
    Plane,
    /// Unit disk in the z = 0 plane.
    Disk,
    /// Closed unit cylinder along z.
    Cylinder,
    /// Axis-aligned box.
    Box,
    /// CSG union.
    Union,
    /// CSG difference.
    Difference,
    /// CSG intersection.
    Intersection,
}

/// A solid (or surface) that rays can hit.
///
/// All points and rays passed in and returned are in world space.
/// Implementations must keep [`Shape::quick_ray_intersection`] consistent
/// with [`Shape::ray_intersection_list`]: the former is `true` exactly when
/// the latter is non-empty.
pub trait Shape: Send + Sync + std::fmt::Debug {
    /// Nearest valid hit, if any.
    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.ray_intersection_list(ray).into_iter().next()
    }

    /// Every valid hit, sorted ascending by `t`. Empty when the ray misses.
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>>;

    /// Whether the ray has at least one valid hit.
    fn quick_ray_intersection(&self, ray: &Ray) -> bool;

    /// Whether a world-space point lies inside the solid.
    fn is_internal(&self, point: &Point3) -> bool;

    /// Local-to-world transformation.
    fn transformation(&self) -> &Transformation;

    /// Replace the local-to-world transformation.
    fn set_transformation(&mut self, transformation: Transformation);

    /// Material of the surface.
    fn material(&self) -> &Material;

    /// Replace the material.
    fn set_material(&mut self, material: Material);

    /// The kind of this shape.
    fn kind(&self) -> ShapeKind;
}

/// Transform, material, and hit assembly shared by the primitives.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Placement {
    pub(crate) transformation: Transformation,
    pub(crate) material: Material,
}

impl Placement {
    pub(crate) fn new(transformation: Transformation, material: Material) -> Self {
        Self {
            transformation,
            material,
        }
    }

    /// Bring a world-space ray into the local frame.
    pub(crate) fn local_ray(&self, ray: &Ray) -> Ray {
        ray.transform(&self.transformation.inverse())
    }

    /// Bring a world-space point into the local frame.
    pub(crate) fn local_point(&self, point: &Point3) -> Point3 {
        self.transformation.inverse().apply_point(point)
    }

    /// Build a world-space hit from local-frame data.
    ///
    /// `local_normal` is flipped if needed so that it faces against the ray;
    /// affine maps preserve the sign of `n . d`, so orientation survives the
    /// trip to world space.
    pub(crate) fn world_hit(
        &self,
        ray: &Ray,
        local_ray: &Ray,
        t: f64,
        local_normal: Normal3,
        uv: Point2,
    ) -> HitRecord<'_> {
        let local_point = local_ray.at(t);
        let normal = facing(local_normal, &local_ray.direction);
        HitRecord {
            world_point: self.transformation.apply_point(&local_point),
            normal: self.transformation.apply_normal(&normal).normalize(),
            surface_point: uv,
            t,
            ray: *ray,
            material: &self.material,
        }
    }
}

/// Orient `normal` against `direction`.
pub(crate) fn facing(normal: Normal3, direction: &Vec3) -> Normal3 {
    if normal.dot(direction) > 0.0 {
        -normal
    } else {
        normal
    }
}

/// Fractional part of `x` in `[0, 1)`.
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 1.0; those wrap to 0.
pub(crate) fn unit_fract(x: f64) -> f64 {
    let f = x.rem_euclid(1.0);
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Azimuth of `(x, y)` mapped to `[0, 1)`.
pub(crate) fn azimuth_u(y: f64, x: f64) -> f64 {
    unit_fract(y.atan2(x) / (2.0 * PI))
}

/// Roots of `a t^2 + b t + c = 0`, smaller first.
///
/// Tangent rays (zero discriminant) and degenerate directions count as misses.
pub(crate) fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        return None;
    }
    let delta = b * b - 4.0 * a * c;
    if delta <= 0.0 {
        return None;
    }
    let sqrt_delta = delta.sqrt();
    let t1 = (-b - sqrt_delta) / (2.0 * a);
    let t2 = (-b + sqrt_delta) / (2.0 * a);
    Some((t1.min(t2), t1.max(t2)))
}
