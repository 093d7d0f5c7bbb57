//! Ray-cylinder intersection: lateral quadric plus two cap disks.

use quadray_math::{Normal3, Point2, Point3, Transformation, EPSILON};

use super::{azimuth_u, solve_quadratic, Placement, Shape, ShapeKind};
use crate::{HitRecord, Material, Ray};

/// Which part of the cylinder a local-frame hit landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Side,
    Bottom,
    Top,
}

/// A closed cylinder of radius 1 around the local z axis, spanning
/// `0 <= z <= 1`, capped at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    placement: Placement,
}

impl Cylinder {
    /// Create a cylinder placed by `transformation`.
    pub fn new(transformation: Transformation, material: Material) -> Self {
        Self {
            placement: Placement::new(transformation, material),
        }
    }

    /// Every accepted local-frame hit, sorted by `t`.
    fn local_hits(local_ray: &Ray) -> Vec<(f64, Part)> {
        let o = &local_ray.origin;
        let d = &local_ray.direction;
        let mut hits = Vec::with_capacity(4);

        let a = d.x * d.x + d.y * d.y;
        let b = 2.0 * (o.x * d.x + o.y * d.y);
        let c = o.x * o.x + o.y * o.y - 1.0;
        if let Some((t1, t2)) = solve_quadratic(a, b, c) {
            for t in [t1, t2] {
                let z = o.z + t * d.z;
                if (0.0..=1.0).contains(&z) && local_ray.accepts(t) {
                    hits.push((t, Part::Side));
                }
            }
        }

        if d.z.abs() > EPSILON {
            for (cap_z, part) in [(0.0, Part::Bottom), (1.0, Part::Top)] {
                let t = (cap_z - o.z) / d.z;
                if !local_ray.accepts(t) {
                    continue;
                }
                let x = o.x + t * d.x;
                let y = o.y + t * d.y;
                // A rim crossing is already reported by the lateral surface
                let on_rim = hits.iter().any(|&(side_t, hit_part)| {
                    hit_part == Part::Side && (side_t - t).abs() <= EPSILON
                });
                if x * x + y * y <= 1.0 && !on_rim {
                    hits.push((t, part));
                }
            }
        }

        hits.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }

    fn hit_at<'a>(&'a self, ray: &Ray, local_ray: &Ray, t: f64, part: Part) -> HitRecord<'a> {
        let p = local_ray.at(t);
        let (normal, uv) = match part {
            Part::Side => (
                Normal3::new(p.x, p.y, 0.0),
                Point2::new(azimuth_u(p.y, p.x), p.z),
            ),
            Part::Bottom | Part::Top => (
                Normal3::new(0.0, 0.0, 1.0),
                Point2::new((p.x + 1.0) / 2.0, (p.y + 1.0) / 2.0),
            ),
        };
        self.placement.world_hit(ray, local_ray, t, normal, uv)
    }
}

impl Shape for Cylinder {
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let local_ray = self.placement.local_ray(ray);
        Self::local_hits(&local_ray)
            .into_iter()
            .map(|(t, part)| self.hit_at(ray, &local_ray, t, part))
            .collect()
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        !Self::local_hits(&self.placement.local_ray(ray)).is_empty()
    }

    fn is_internal(&self, point: &Point3) -> bool {
        let p = self.placement.local_point(point);
        p.x * p.x + p.y * p.y <= 1.0 && (0.0..=1.0).contains(&p.z)
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
        ShapeKind::Cylinder
    }
}
