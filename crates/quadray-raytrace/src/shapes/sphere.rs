//! Ray-sphere intersection (quadratic equation).

use std::f64::consts::PI;

use quadray_math::{Normal3, Point2, Point3, Transformation};

use super::{azimuth_u, solve_quadratic, Placement, Shape, ShapeKind};
use crate::{HitRecord, Material, Ray};

/// A unit sphere centered at the origin of its local frame.
///
/// Non-unit radii and ellipsoids come from the transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    placement: Placement,
}

impl Sphere {
    /// Create a sphere placed by `transformation`.
    pub fn new(transformation: Transformation, material: Material) -> Self {
        Self {
            placement: Placement::new(transformation, material),
        }
    }

    /// Local-frame roots of `|O + tD|^2 = 1`.
    fn roots(local_ray: &Ray) -> Option<(f64, f64)> {
        let origin = local_ray.origin.coords;
        let d = &local_ray.direction;
        let a = d.norm_squared();
        let b = 2.0 * origin.dot(d);
        let c = origin.norm_squared() - 1.0;
        solve_quadratic(a, b, c)
    }

    fn hit_at<'a>(&'a self, ray: &Ray, local_ray: &Ray, t: f64) -> HitRecord<'a> {
        let p = local_ray.at(t);
        self.placement
            .world_hit(ray, local_ray, t, Normal3::from_vec(p.coords), sphere_uv(&p))
    }
}

/// `u` is the azimuth around z, `v` the polar angle from +z, both in `[0, 1]`.
fn sphere_uv(p: &Point3) -> Point2 {
    let u = azimuth_u(p.y, p.x);
    let v = p.z.clamp(-1.0, 1.0).acos() / PI;
    Point2::new(u, v)
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let local_ray = self.placement.local_ray(ray);
        let (t1, t2) = Self::roots(&local_ray)?;
        let t = if local_ray.accepts(t1) {
            t1
        } else if local_ray.accepts(t2) {
            t2
        } else {
            return None;
        };
        Some(self.hit_at(ray, &local_ray, t))
    }

    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let local_ray = self.placement.local_ray(ray);
        let Some((t1, t2)) = Self::roots(&local_ray) else {
            return Vec::new();
        };
        [t1, t2]
            .into_iter()
            .filter(|&t| local_ray.accepts(t))
            .map(|t| self.hit_at(ray, &local_ray, t))
            .collect()
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        let local_ray = self.placement.local_ray(ray);
        match Self::roots(&local_ray) {
            Some((t1, t2)) => local_ray.accepts(t1) || local_ray.accepts(t2),
            None => false,
        }
    }

    fn is_internal(&self, point: &Point3) -> bool {
        self.placement.local_point(point).coords.norm_squared() <= 1.0
    }

    fn transformation(&self) -> &Transformation {
        &self.placement.transformation
    }

    fn set_transformation(&mut self, transformation: Transformation) {
        self.placement.transformation = transformation;
    }

    fn material(&self) -> &Material {
        &self.placement.material
    }

    fn set_material(&mut self, material: Material) {
        self.placement.material = material;
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }
}
