//! Surface normals.

use std::ops::{Mul, Neg};

use approx::AbsDiffEq;

use crate::Vec3;

/// A surface normal.
///
/// Algebraically a vector, but kept as a distinct type because it does not
/// transform like one: see [`crate::Transformation::apply_normal`], which
/// uses the transpose of the inverse matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal3(Vec3);

impl Normal3 {
    /// Create a normal from its components. The result is not normalized.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Reinterpret a vector as a normal.
    pub fn from_vec(v: Vec3) -> Self {
        Self(v)
    }

    /// X component.
    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    /// Y component.
    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Z component.
    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// The underlying vector.
    #[inline]
    pub fn as_vec(&self) -> &Vec3 {
        &self.0
    }

    /// Convert to a plain vector.
    pub fn to_vec(self) -> Vec3 {
        self.0
    }

    /// Dot product with a vector.
    #[inline]
    pub fn dot(&self, v: &Vec3) -> f64 {
        self.0.dot(v)
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Unit-length copy of this normal.
    ///
    /// A zero normal stays zero instead of turning into NaNs.
    pub fn normalize(&self) -> Self {
        let len = self.0.norm();
        if len > 0.0 {
            Self(self.0 / len)
        } else {
            *self
        }
    }
}

impl Neg for Normal3 {
    type Output = Normal3;

    fn neg(self) -> Normal3 {
        Normal3(-self.0)
    }
}

impl Mul<f64> for Normal3 {
    type Output = Normal3;

    fn mul(self, rhs: f64) -> Normal3 {
        Normal3(self.0 * rhs)
    }
}

impl From<Vec3> for Normal3 {
    fn from(v: Vec3) -> Self {
        Self(v)
    }
}

impl AbsDiffEq for Normal3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(&other.0, epsilon)
    }
}
