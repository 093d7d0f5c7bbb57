//! Ray-plane intersection (closed-form).

use quadray_math::{Normal3, Point2, Point3, Transformation, EPSILON};

use super::{unit_fract, Placement, Shape, ShapeKind};
use crate::{HitRecord, Material, Ray};

/// The infinite plane z = 0 of the local frame.
///
/// The half-space z <= 0 counts as the inside of the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    placement: Placement,
}

impl Plane {
    /// Create a plane placed by `transformation`.
    pub fn new(transformation: Transformation, material: Material) -> Self {
        Self {
            placement: Placement::new(transformation, material),
        }
    }

    /// Local-frame hit parameter, if the ray crosses z = 0 inside its range.
    ///
    /// Rays running parallel to the plane never hit it.
    fn hit_parameter(local_ray: &Ray) -> Option<f64> {
        let dz = local_ray.direction.z;
        if dz.abs() <= EPSILON {
            return None;
        }
        let t = -local_ray.origin.z / dz;
        local_ray.accepts(t).then_some(t)
    }
}

impl Shape for Plane {
    fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let local_ray = self.placement.local_ray(ray);
        let t = Self::hit_parameter(&local_ray)?;

        let p = local_ray.at(t);
        let uv = Point2::new(unit_fract(p.x), unit_fract(p.y));
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
        self.placement.local_point(point).z <= 0.0
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
        ShapeKind::Plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::contract;
    use quadray_math::{are_close, Vec3};

    fn xy_plane() -> Plane {
        Plane::new(Transformation::identity(), Material::default())
    }

    #[test]
    fn test_perpendicular_hit() {
        let plane = xy_plane();
        let ray = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = plane.ray_intersection(&ray).unwrap();

        assert!(are_close(&hit.world_point, &Point3::new(0.0, 0.0, 0.0)));
        assert!(are_close(&hit.normal, &Normal3::new(0.0, 0.0, 1.0)));
        assert!((hit.t - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_from_below() {
        let plane = xy_plane();
        let ray = Ray::new(Point3::new(0.0, 0.0, -3.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = plane.ray_intersection(&ray).unwrap();
        assert!(are_close(&hit.normal, &Normal3::new(0.0, 0.0, -1.0)));
        assert!((hit.t - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_and_behind() {
        let plane = xy_plane();

        let parallel = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(plane.ray_intersection(&parallel).is_none());
        assert!(!plane.quick_ray_intersection(&parallel));

        let away = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(plane.ray_intersection(&away).is_none());

        let grazing = Ray::new(Point3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1e-7));
        assert!(plane.ray_intersection(&grazing).is_none());
    }

    #[test]
    fn test_rotated_plane() {
        // A wall at x = 0 facing +x
        let plane = Plane::new(Transformation::rotation_y(90.0), Material::default());
        let ray = Ray::new(Point3::new(2.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let hit = plane.ray_intersection(&ray).unwrap();
        assert!(are_close(&hit.world_point, &Point3::origin()));
        assert!(are_close(&hit.normal, &Normal3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_uv_coordinates() {
        let plane = xy_plane();
        let cases = [
            (Point3::new(0.0, 0.0, 1.0), Point2::new(0.0, 0.0)),
            (Point3::new(0.25, 0.75, 1.0), Point2::new(0.25, 0.75)),
            (Point3::new(4.25, 7.75, 1.0), Point2::new(0.25, 0.75)),
            (Point3::new(-0.25, -1.75, 1.0), Point2::new(0.75, 0.25)),
        ];
        for (origin, expected) in cases {
            let ray = Ray::new(origin, Vec3::new(0.0, 0.0, -1.0));
            let hit = plane.ray_intersection(&ray).unwrap();
            assert!(are_close(&hit.surface_point, &expected), "uv at {:?}", origin);
        }

        // Just left of a tile edge
        let ray = Ray::new(Point3::new(-1e-17, -1e-17, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let uv = plane.ray_intersection(&ray).unwrap().surface_point;
        assert!((0.0..1.0).contains(&uv.x), "u = {}", uv.x);
        assert!((0.0..1.0).contains(&uv.y), "v = {}", uv.y);
    }

    #[test]
    fn test_is_internal() {
        let plane = Plane::new(
            Transformation::translation(&Vec3::new(0.0, 0.0, 2.0)),
            Material::default(),
        );
        assert!(plane.is_internal(&Point3::new(5.0, -3.0, 1.0)));
        assert!(plane.is_internal(&Point3::new(0.0, 0.0, 2.0)));
        assert!(!plane.is_internal(&Point3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn test_contract() {
        let plane = Plane::new(
            Transformation::translation(&Vec3::new(0.0, 0.0, 0.3)) * Transformation::rotation_x(20.0),
            Material::default(),
        );
        for ray in contract::sample_rays() {
            contract::check_consistency(&plane, &ray);
        }
    }
}
