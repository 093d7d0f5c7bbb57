//! Cameras: map normalized screen coordinates to world-space rays.
//!
//! Both cameras look along +x in their own frame, with the screen spanning
//! y (scaled by the aspect ratio) and z. `u` runs left to right and `v`
//! bottom to top, both over `[0, 1]`.

use quadray_math::{Point3, Transformation, Vec3};
use quadray_raytrace::Ray;

/// A ray generator placed in the world by a transformation.
pub trait Camera: Send + Sync + std::fmt::Debug {
    /// World-space ray through screen coordinates `(u, v)`.
    fn fire_ray(&self, u: f64, v: f64) -> Ray;

    /// Camera-to-world transformation.
    fn transformation(&self) -> &Transformation;
}

/// Parallel projection: every ray travels along +x.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthogonalCamera {
    /// Width over height of the screen.
    pub aspect_ratio: f64,
    /// Camera-to-world transformation.
    pub transformation: Transformation,
}

impl OrthogonalCamera {
    /// Create an orthogonal camera.
    pub fn new(aspect_ratio: f64, transformation: Transformation) -> Self {
        Self {
            aspect_ratio,
            transformation,
        }
    }
}

impl Camera for OrthogonalCamera {
    fn fire_ray(&self, u: f64, v: f64) -> Ray {
        let origin = Point3::new(-1.0, (1.0 - 2.0 * u) * self.aspect_ratio, 2.0 * v - 1.0);
        Ray::new(origin, Vec3::new(1.0, 0.0, 0.0)).transform(&self.transformation)
    }

    fn transformation(&self) -> &Transformation {
        &self.transformation
    }
}

/// Pinhole projection: rays diverge from the eye at `(-distance, 0, 0)`
/// through the screen at x = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Distance between the eye and the screen.
    pub distance: f64,
    /// Width over height of the screen.
    pub aspect_ratio: f64,
    /// Camera-to-world transformation.
    pub transformation: Transformation,
}

impl PerspectiveCamera {
    /// Create a perspective camera.
    pub fn new(distance: f64, aspect_ratio: f64, transformation: Transformation) -> Self {
        Self {
            distance,
            aspect_ratio,
            transformation,
        }
    }
}

impl Camera for PerspectiveCamera {
    fn fire_ray(&self, u: f64, v: f64) -> Ray {
        let origin = Point3::new(-self.distance, 0.0, 0.0);
        let direction = Vec3::new(
            self.distance,
            (1.0 - 2.0 * u) * self.aspect_ratio,
            2.0 * v - 1.0,
        );
        Ray::new(origin, direction).transform(&self.transformation)
    }

    fn transformation(&self) -> &Transformation {
        &self.transformation
    }
}
