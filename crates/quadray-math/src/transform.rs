//! Affine transformations with a cached inverse.

use std::ops::Mul;

use approx::AbsDiffEq;
use nalgebra::{Matrix3, Matrix4, Vector4};

use crate::{Normal3, Point3, Vec3, EPSILON};

/// A 4x4 affine transformation paired with its inverse.
///
/// Both matrices are always built together so they cannot drift apart:
/// every operation returns a new value instead of mutating in place.
/// Inversion is therefore O(1), it just swaps the pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    matrix: Matrix4<f64>,
    inverse: Matrix4<f64>,
}

impl Transformation {
    /// Build a transformation from a matrix and its inverse.
    ///
    /// The pair is trusted as given; check it with [`Self::is_consistent`].
    pub fn new(matrix: Matrix4<f64>, inverse: Matrix4<f64>) -> Self {
        Self { matrix, inverse }
    }

    /// Identity transformation.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
            inverse: Matrix4::identity(),
        }
    }

    /// Translation by `v`.
    pub fn translation(v: &Vec3) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = v.x;
        m[(1, 3)] = v.y;
        m[(2, 3)] = v.z;

        let mut inv = Matrix4::identity();
        inv[(0, 3)] = -v.x;
        inv[(1, 3)] = -v.y;
        inv[(2, 3)] = -v.z;

        Self { matrix: m, inverse: inv }
    }

    /// Scaling by the components of `v`.
    ///
    /// Components may be non-uniform or negative. A negative component
    /// mirrors space; normals follow through [`Self::apply_normal`].
    pub fn scaling(v: &Vec3) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = v.x;
        m[(1, 1)] = v.y;
        m[(2, 2)] = v.z;

        let mut inv = Matrix4::identity();
        inv[(0, 0)] = 1.0 / v.x;
        inv[(1, 1)] = 1.0 / v.y;
        inv[(2, 2)] = 1.0 / v.z;

        Self { matrix: m, inverse: inv }
    }

    /// Rotation about the X axis by `degrees`.
    pub fn rotation_x(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self::orthogonal(m)
    }

    /// Rotation about the Y axis by `degrees`.
    pub fn rotation_y(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self::orthogonal(m)
    }

    /// Rotation about the Z axis by `degrees`.
    pub fn rotation_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self::orthogonal(m)
    }

    // Rotations are orthogonal: the inverse is the transpose.
    fn orthogonal(m: Matrix4<f64>) -> Self {
        Self {
            matrix: m,
            inverse: m.transpose(),
        }
    }

    /// The forward matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// The cached inverse matrix.
    pub fn inverse_matrix(&self) -> &Matrix4<f64> {
        &self.inverse
    }

    /// The inverse transformation. Swaps the cached pair, no computation.
    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.inverse,
            inverse: self.matrix,
        }
    }

    /// Compose two transformations: `self * other`.
    ///
    /// The result applies `other` first, then `self`, matching the order of
    /// the matrix product.
    pub fn compose(&self, other: &Transformation) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
            inverse: other.inverse * self.inverse,
        }
    }

    /// Check that the cached inverse really inverts the matrix.
    ///
    /// Intended for tests and debug assertions only.
    pub fn is_consistent(&self) -> bool {
        let product = self.matrix * self.inverse;
        product.abs_diff_eq(&Matrix4::identity(), EPSILON)
    }

    /// Transform a point (homogeneous `w = 1`).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        if v.w == 1.0 {
            Point3::new(v.x, v.y, v.z)
        } else {
            Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
        }
    }

    /// Transform a free vector (homogeneous `w = 0`, translation is ignored).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Transform a normal with the transpose of the inverse.
    ///
    /// The result is not normalized.
    pub fn apply_normal(&self, n: &Normal3) -> Normal3 {
        let inv: Matrix3<f64> = self.inverse.fixed_view::<3, 3>(0, 0).into_owned();
        Normal3::from_vec(inv.transpose() * n.as_vec())
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transformation {
    type Output = Transformation;

    fn mul(self, rhs: Transformation) -> Transformation {
        self.compose(&rhs)
    }
}

impl Mul<&Transformation> for &Transformation {
    type Output = Transformation;

    fn mul(self, rhs: &Transformation) -> Transformation {
        self.compose(rhs)
    }
}

impl AbsDiffEq for Transformation {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.matrix.abs_diff_eq(&other.matrix, epsilon)
            && self.inverse.abs_diff_eq(&other.inverse, epsilon)
    }
}
