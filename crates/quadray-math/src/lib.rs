#![warn(missing_docs)]

//! Math types for the quadray renderer.
//!
//! Thin wrappers around nalgebra providing the value types the ray tracer
//! works with: points, free vectors, surface normals, surface coordinates,
//! colors, and affine transformations that carry their own inverse.

mod color;
mod normal;
mod transform;

pub use color::Color;
pub use normal::Normal3;
pub use transform::Transformation;

use nalgebra::Vector3;

/// A point in 3D space (affine position, `w = 1`).
pub type Point3 = nalgebra::Point3<f64>;

/// A free vector in 3D space (`w = 0`).
pub type Vec3 = Vector3<f64>;

/// A point in the `(u, v)` surface parameter space, `[0, 1] x [0, 1]` by convention.
pub type Point2 = nalgebra::Point2<f64>;

/// Default tolerance used by every closeness predicate in the renderer.
pub const EPSILON: f64 = 1e-5;

/// Check if two values are equal within [`EPSILON`].
///
/// Works for every type implementing [`approx::AbsDiffEq`] with `f64`
/// epsilons: nalgebra points and vectors, [`Normal3`], [`Color`], and
/// plain floats.
pub fn are_close<T>(a: &T, b: &T) -> bool
where
    T: approx::AbsDiffEq<Epsilon = f64>,
{
    a.abs_diff_eq(b, EPSILON)
}

/// Build an orthonormal basis whose third axis is the given unit normal.
///
/// Branchless construction from Duff et al. (2017). The input must already
/// be normalized; the returned vectors `(e1, e2, e3)` are then unit length
/// and mutually orthogonal, with `e3 == normal`.
pub fn create_onb_from_z(normal: &Normal3) -> (Vec3, Vec3, Vec3) {
    let n = normal.as_vec();
    let sign = 1.0_f64.copysign(n.z);
    let a = -1.0 / (sign + n.z);
    let b = n.x * n.y * a;

    let e1 = Vec3::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x);
    let e2 = Vec3::new(b, sign + n.y * n.y * a, -n.y);

    (e1, e2, *n)
}
