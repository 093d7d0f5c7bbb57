//! Ray-disk intersection: the plane test plus a radius check.

use quadray_math::{Normal3, Point2, Point3, Transformation, EPSILON};

use super::{azimuth_u, Placement, Shape, ShapeKind};
use crate::{HitRecord, Material, Ray};

/// A unit disk centered at the origin of the local z = 0 plane.
///
/// A disk has no volume: only points on the disk itself (within
/// [`EPSILON`] of the plane) count as internal.
#[derive(Debug, Clone, PartialEq)]
pub struct Disk {
    placement: Placement,
}

impl Disk {
    /// Create a disk placed by `transformation`.
    pub fn new(transformation: Transformation, material: Material) -> Self {
        Self {
            placement: Placement::new(transformation, material),
        }
    }

    fn hit_parameter(local_ray: &Ray) -> Option<f64> {
        let dz = local_ray.direction.z;
        if dz.abs() <= EPSILON {
            return None;
        }
        let t = -local_ray.origin.z / dz;
        if !local_ray.accepts(t) {
            return None;
        }
        let p = local_ray.at(t);
        (p.x * p.x + p.y * p.y <= 1.0).then_some(t)
    }
}

impl Shape for Disk {
    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let local_ray = self.placement.local_ray(ray);
        let t = Self::hit_parameter(&local_ray)?;

        let p = local_ray.at(t);
        let uv = Point2::new(azimuth_u(p.y, p.x), (p.x * p.x + p.y * p.y).sqrt());
        Some(
            self.placement
                .world_hit(ray, &local_ray, t, Normal3::new(0.0, 0.0, 1.0), uv),
        )
    }

    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        self.ray_intersection(ray).into_iter().collect()
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        Self::hit_parameter(&self.placement.local_ray(ray)).is_some()
    }

    fn is_internal(&self, point: &Point3) -> bool {
        let p = self.placement.local_point(point);
        p.z.abs() <= EPSILON && p.x * p.x + p.y * p.y <= 1.0
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
        ShapeKind::Disk
    }
}
