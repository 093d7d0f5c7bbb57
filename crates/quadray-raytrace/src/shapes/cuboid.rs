//! Ray-box intersection (slab test).

use quadray_math::{Normal3, Point2, Point3, Transformation, Vec3};

use super::{Placement, Shape, ShapeKind};
use crate::{HitRecord, Material, Ray};

/// A face of the box: the axis it is perpendicular to and whether it is the
/// `max` (positive) side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Face {
    axis: usize,
    positive: bool,
}

/// An axis-aligned box between two corners of its local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Cuboid {
    min: Point3,
    max: Point3,
    placement: Placement,
}

impl Cuboid {
    /// Create the unit cube `[0, 1]^3` placed by `transformation`.
    pub fn new(transformation: Transformation, material: Material) -> Self {
        Self::with_corners(
            Point3::origin(),
            Point3::new(1.0, 1.0, 1.0),
            transformation,
            material,
        )
    }

    /// Create a box spanning `min..max`; the corners are reordered per axis
    /// if needed.
    pub fn with_corners(
        min: Point3,
        max: Point3,
        transformation: Transformation,
        material: Material,
    ) -> Self {
        Self {
            min: min.inf(&max),
            max: min.sup(&max),
            placement: Placement::new(transformation, material),
        }
    }

    /// Lower corner in the local frame.
    pub fn min(&self) -> &Point3 {
        &self.min
    }

    /// Upper corner in the local frame.
    pub fn max(&self) -> &Point3 {
        &self.max
    }

    /// Entry and exit parameters with the faces crossed there.
    ///
    /// Grazing rays (entry equal to exit) count as misses.
    fn slabs(&self, local_ray: &Ray) -> Option<((f64, Face), (f64, Face))> {
        let o = &local_ray.origin;
        let d = &local_ray.direction;
        let mut near = (f64::NEG_INFINITY, Face { axis: 0, positive: false });
        let mut far = (f64::INFINITY, Face { axis: 0, positive: true });

        for axis in 0..3 {
            if d[axis] == 0.0 {
                if o[axis] < self.min[axis] || o[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            let t_min = (self.min[axis] - o[axis]) / d[axis];
            let t_max = (self.max[axis] - o[axis]) / d[axis];
            let (t_in, t_out, enters_positive) = if t_min < t_max {
                (t_min, t_max, false)
            } else {
                (t_max, t_min, true)
            };
            if t_in > near.0 {
                near = (
                    t_in,
                    Face {
                        axis,
                        positive: enters_positive,
                    },
                );
            }
            if t_out < far.0 {
                far = (
                    t_out,
                    Face {
                        axis,
                        positive: !enters_positive,
                    },
                );
            }
        }

        (near.0 < far.0).then_some((near, far))
    }

    fn local_hits(&self, local_ray: &Ray) -> Vec<(f64, Face)> {
        match self.slabs(local_ray) {
            Some((near, far)) => [near, far]
                .into_iter()
                .filter(|(t, _)| local_ray.accepts(*t))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Map a local point on `face` into the 4x3 cross atlas.
    fn atlas_uv(&self, p: &Point3, face: Face) -> Point2 {
        let size: Vec3 = self.max - self.min;
        let rel = (p - self.min).component_div(&size);
        let (col, row, a, b) = match (face.axis, face.positive) {
            (0, false) => (0.0, 1.0, rel.y, rel.z),
            (1, false) => (1.0, 1.0, rel.x, rel.z),
            (0, true) => (2.0, 1.0, rel.y, rel.z),
            (1, true) => (3.0, 1.0, rel.x, rel.z),
            (_, false) => (1.0, 0.0, rel.x, rel.y),
            (_, true) => (1.0, 2.0, rel.x, rel.y),
        };
        Point2::new((col + a) / 4.0, (row + b) / 3.0)
    }

    fn hit_at<'a>(&'a self, ray: &Ray, local_ray: &Ray, t: f64, face: Face) -> HitRecord<'a> {
        let p = local_ray.at(t);
        let mut n = Vec3::zeros();
        n[face.axis] = if face.positive { 1.0 } else { -1.0 };
        let uv = self.atlas_uv(&p, face);
        self.placement
            .world_hit(ray, local_ray, t, Normal3::from_vec(n), uv)
    }
}

impl Shape for Cuboid {
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let local_ray = self.placement.local_ray(ray);
        self.local_hits(&local_ray)
            .into_iter()
            .map(|(t, face)| self.hit_at(ray, &local_ray, t, face))
            .collect()
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        !self.local_hits(&self.placement.local_ray(ray)).is_empty()
    }

    fn is_internal(&self, point: &Point3) -> bool {
        let p = self.placement.local_point(point);
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
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
        ShapeKind::Box
    }
}
