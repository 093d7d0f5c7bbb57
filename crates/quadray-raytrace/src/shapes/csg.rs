//! Constructive Solid Geometry combinators.
//!
//! A CSG node owns two child shapes and places them in the world with its
//! own transformation. Queries bring the ray into the node's frame once,
//! collect both children's hit lists there, and keep the hits that lie on
//! the boundary of the combined solid according to the other child's
//! membership test.

use quadray_math::{Point3, Transformation};

use super::{Placement, Shape, ShapeKind};
use crate::hit::sort_by_t;
use crate::{HitRecord, Material, Ray};

/// Boolean operation applied by a [`CsgShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsgOperation {
    /// Points in either child.
    Union,
    /// Points in the first child but not in the second.
    Difference,
    /// Points in both children.
    Intersection,
}

impl CsgOperation {
    /// Membership in the combined solid from membership in each child.
    pub fn contains(self, in_first: bool, in_second: bool) -> bool {
        match self {
            CsgOperation::Union => in_first || in_second,
            CsgOperation::Difference => in_first && !in_second,
            CsgOperation::Intersection => in_first && in_second,
        }
    }

    /// Whether a hit on the first child survives, given whether it lies
    /// inside the second.
    fn keeps_first(self, inside_second: bool) -> bool {
        match self {
            CsgOperation::Union => true,
            CsgOperation::Difference => !inside_second,
            CsgOperation::Intersection => inside_second,
        }
    }

    /// Whether a hit on the second child survives, given whether it lies
    /// inside the first. The subtracted solid contributes the part of its
    /// surface that is exposed inside the first child.
    fn keeps_second(self, inside_first: bool) -> bool {
        match self {
            CsgOperation::Union => true,
            CsgOperation::Difference | CsgOperation::Intersection => inside_first,
        }
    }

    fn kind(self) -> ShapeKind {
        match self {
            CsgOperation::Union => ShapeKind::Union,
            CsgOperation::Difference => ShapeKind::Difference,
            CsgOperation::Intersection => ShapeKind::Intersection,
        }
    }
}

/// A boolean combination of two shapes.
///
/// The children are expressed in the node's local frame; the node's
/// transformation maps that frame to the world. Hits carry the material of
/// the child that produced them.
#[derive(Debug)]
pub struct CsgShape {
    operation: CsgOperation,
    first: Box<dyn Shape>,
    second: Box<dyn Shape>,
    placement: Placement,
}

impl CsgShape {
    /// Combine two shapes with `operation`.
    pub fn new(
        operation: CsgOperation,
        first: Box<dyn Shape>,
        second: Box<dyn Shape>,
        transformation: Transformation,
        material: Material,
    ) -> Self {
        Self {
            operation,
            first,
            second,
            placement: Placement::new(transformation, material),
        }
    }

    /// `first OR second`, placed by `transformation`.
    pub fn union(first: Box<dyn Shape>, second: Box<dyn Shape>, transformation: Transformation) -> Self {
        Self::new(CsgOperation::Union, first, second, transformation, Material::default())
    }

    /// `first AND NOT second`, placed by `transformation`.
    pub fn difference(
        first: Box<dyn Shape>,
        second: Box<dyn Shape>,
        transformation: Transformation,
    ) -> Self {
        Self::new(CsgOperation::Difference, first, second, transformation, Material::default())
    }

    /// `first AND second`, placed by `transformation`.
    pub fn intersection(
        first: Box<dyn Shape>,
        second: Box<dyn Shape>,
        transformation: Transformation,
    ) -> Self {
        Self::new(CsgOperation::Intersection, first, second, transformation, Material::default())
    }

    /// The boolean operation of this node.
    pub fn operation(&self) -> CsgOperation {
        self.operation
    }

    /// The first operand.
    pub fn first(&self) -> &dyn Shape {
        self.first.as_ref()
    }

    /// The second operand.
    pub fn second(&self) -> &dyn Shape {
        self.second.as_ref()
    }

    /// Surviving child hits in the node's local frame, unsorted.
    fn local_hits(&self, local_ray: &Ray) -> Vec<HitRecord<'_>> {
        let op = self.operation;
        let mut hits: Vec<HitRecord<'_>> = self
            .first
            .ray_intersection_list(local_ray)
            .into_iter()
            .filter(|hit| op.keeps_first(self.second.is_internal(&hit.world_point)))
            .collect();
        hits.extend(
            self.second
                .ray_intersection_list(local_ray)
                .into_iter()
                .filter(|hit| op.keeps_second(self.first.is_internal(&hit.world_point))),
        );
        hits
    }
}

impl Shape for CsgShape {
    fn ray_intersection_list(&self, ray: &Ray) -> Vec<HitRecord<'_>> {
        let local_ray = self.placement.local_ray(ray);
        let mut hits = self.local_hits(&local_ray);
        sort_by_t(&mut hits);
        hits.into_iter()
            .map(|hit| hit.transformed(&self.placement.transformation, ray))
            .collect()
    }

    fn quick_ray_intersection(&self, ray: &Ray) -> bool {
        let local_ray = self.placement.local_ray(ray);
        let op = self.operation;
        if op == CsgOperation::Union {
            return self.first.quick_ray_intersection(&local_ray)
                || self.second.quick_ray_intersection(&local_ray);
        }
        self.first
            .ray_intersection_list(&local_ray)
            .iter()
            .any(|hit| op.keeps_first(self.second.is_internal(&hit.world_point)))
            || self
                .second
                .ray_intersection_list(&local_ray)
                .iter()
                .any(|hit| op.keeps_second(self.first.is_internal(&hit.world_point)))
    }

    fn is_internal(&self, point: &Point3) -> bool {
        let p = self.placement.local_point(point);
        self.operation
            .contains(self.first.is_internal(&p), self.second.is_internal(&p))
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
        self.operation.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{contract, Cuboid, Cylinder, Plane, Sphere};
    use crate::{Brdf, Pigment};
    use quadray_math::{are_close, Color, Normal3, Vec3};

    fn sphere_at(z: f64) -> Box<dyn Shape> {
        Box::new(Sphere::new(
            Transformation::translation(&Vec3::new(0.0, 0.0, z)),
            Material::default(),
        ))
    }

    fn pair(operation: CsgOperation) -> CsgShape {
        CsgShape::new(
            operation,
            sphere_at(0.0),
            sphere_at(0.5),
            Transformation::identity(),
            Material::default(),
        )
    }

    fn down_z() -> Ray {
        Ray::new(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0))
    }

    fn ts(hits: &[HitRecord<'_>]) -> Vec<f64> {
        hits.iter().map(|h| h.t).collect()
    }

    fn assert_ts(hits: &[HitRecord<'_>], expected: &[f64]) {
        assert_eq!(hits.len(), expected.len(), "got {:?}", ts(hits));
        for (hit, t) in hits.iter().zip(expected) {
            assert!((hit.t - t).abs() < 1e-9, "got {:?}, expected {:?}", ts(hits), expected);
        }
    }

    /// Every hit lies on the boundary of the combined solid: a small step
    /// to one side of the surface lands inside it.
    fn assert_on_boundary(shape: &dyn Shape, ray: &Ray) {
        for hit in shape.ray_intersection_list(ray) {
            let n = hit.normal.to_vec() * 1e-4;
            let p = hit.world_point;
            assert!(
                shape.is_internal(&(p + n)) || shape.is_internal(&(p - n)),
                "hit at {:?} is not on the solid",
                p
            );
        }
    }

    #[test]
    fn test_is_internal_truth_table() {
        let union = pair(CsgOperation::Union);
        let difference = pair(CsgOperation::Difference);
        let intersection = pair(CsgOperation::Intersection);

        let above = Point3::new(0.0, 0.0, 1.4);
        assert!(union.is_internal(&above));
        assert!(!intersection.is_internal(&above));
        assert!(!difference.is_internal(&above));

        let overlap = Point3::new(0.0, 0.0, 0.8);
        assert!(union.is_internal(&overlap));
        assert!(intersection.is_internal(&overlap));
        assert!(!difference.is_internal(&overlap));

        let below = Point3::new(0.0, 0.0, -0.7);
        assert!(difference.is_internal(&below));
        assert!(union.is_internal(&below));
        assert!(!intersection.is_internal(&below));

        let outside = Point3::new(3.0, 0.0, 0.0);
        assert!(!union.is_internal(&outside));
    }

    #[test]
    fn test_contains_table() {
        use CsgOperation::*;
        for (in1, in2) in [(false, false), (false, true), (true, false), (true, true)] {
            assert_eq!(Union.contains(in1, in2), in1 || in2);
            assert_eq!(Difference.contains(in1, in2), in1 && !in2);
            assert_eq!(Intersection.contains(in1, in2), in1 && in2);
        }
    }

    #[test]
    fn test_union_keeps_every_hit() {
        let union = pair(CsgOperation::Union);
        let hits = union.ray_intersection_list(&down_z());
        assert_ts(&hits, &[3.5, 4.0, 5.5, 6.0]);
        assert!(are_close(&hits[0].world_point, &Point3::new(0.0, 0.0, 1.5)));
        assert!(union.quick_ray_intersection(&down_z()));
    }

    #[test]
    fn test_intersection_hits() {
        let intersection = pair(CsgOperation::Intersection);
        let hits = intersection.ray_intersection_list(&down_z());
        assert_ts(&hits, &[4.0, 5.5]);
        assert!(are_close(&hits[0].world_point, &Point3::new(0.0, 0.0, 1.0)));
        assert!(are_close(&hits[1].world_point, &Point3::new(0.0, 0.0, -0.5)));
    }

    #[test]
    fn test_difference_hits() {
        let difference = pair(CsgOperation::Difference);
        let hits = difference.ray_intersection_list(&down_z());
        assert_ts(&hits, &[5.5, 6.0]);

        // The carved-out cavity is seen from inside the subtracted sphere
        let first = difference.ray_intersection(&down_z()).unwrap();
        assert!(are_close(&first.world_point, &Point3::new(0.0, 0.0, -0.5)));
        assert!(are_close(&first.normal, &Normal3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_disjoint_intersection_is_empty() {
        let intersection = CsgShape::intersection(
            sphere_at(0.0),
            sphere_at(3.0),
            Transformation::identity(),
        );
        assert!(intersection.ray_intersection_list(&down_z()).is_empty());
        assert!(intersection.ray_intersection(&down_z()).is_none());
        assert!(!intersection.quick_ray_intersection(&down_z()));
    }

    #[test]
    fn test_children_that_miss() {
        let union = pair(CsgOperation::Union);
        let ray = Ray::new(Point3::new(5.0, 5.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(union.ray_intersection_list(&ray).is_empty());
        assert!(!union.quick_ray_intersection(&ray));
    }

    #[test]
    fn test_transformed_node() {
        let union = CsgShape::union(
            sphere_at(0.0),
            sphere_at(0.5),
            Transformation::translation(&Vec3::new(10.0, 0.0, 0.0)),
        );
        let ray = Ray::new(Point3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hits = union.ray_intersection_list(&ray);
        assert_ts(&hits, &[3.5, 4.0, 5.5, 6.0]);
        assert!(are_close(&hits[0].world_point, &Point3::new(10.0, 0.0, 1.5)));
        assert!(are_close(&hits[0].ray, &ray));

        assert!(union.is_internal(&Point3::new(10.0, 0.0, 1.2)));
        assert!(!union.is_internal(&Point3::new(0.0, 0.0, 1.2)));
        assert!(union.ray_intersection_list(&down_z()).is_empty());
    }

    #[test]
    fn test_hits_carry_child_material() {
        let red = Material::from_brdf(Brdf::diffuse(Pigment::Uniform(Color::new(1.0, 0.0, 0.0))));
        let difference = CsgShape::difference(
            Box::new(Sphere::new(Transformation::identity(), red.clone())),
            sphere_at(0.5),
            Transformation::identity(),
        );
        let hits = difference.ray_intersection_list(&down_z());
        assert_eq!(hits[0].material, &Material::default());
        assert_eq!(hits[1].material, &red);
    }

    #[test]
    fn test_kind_and_operands() {
        let node = pair(CsgOperation::Difference);
        assert_eq!(node.kind(), ShapeKind::Difference);
        assert_eq!(node.operation(), CsgOperation::Difference);
        assert_eq!(node.first().kind(), ShapeKind::Sphere);
        assert_eq!(pair(CsgOperation::Union).kind(), ShapeKind::Union);
        assert_eq!(pair(CsgOperation::Intersection).kind(), ShapeKind::Intersection);
    }

    #[test]
    fn test_contract_and_membership() {
        let nodes: Vec<Box<dyn Shape>> = vec![
            Box::new(pair(CsgOperation::Union)),
            Box::new(pair(CsgOperation::Difference)),
            Box::new(pair(CsgOperation::Intersection)),
            Box::new(CsgShape::difference(
                Box::new(Cuboid::new(Transformation::identity(), Material::default())),
                Box::new(Cylinder::new(
                    Transformation::translation(&Vec3::new(0.5, 0.5, -0.5))
                        * Transformation::scaling(&Vec3::new(0.3, 0.3, 2.0)),
                    Material::default(),
                )),
                Transformation::rotation_z(10.0),
            )),
            Box::new(CsgShape::intersection(
                Box::new(pair(CsgOperation::Union)),
                Box::new(Plane::new(Transformation::identity(), Material::default())),
                Transformation::scaling(&Vec3::new(1.2, 1.2, 1.2)),
            )),
        ];
        for node in &nodes {
            for ray in contract::sample_rays() {
                contract::check_consistency(node.as_ref(), &ray);
                assert_on_boundary(node.as_ref(), &ray);
            }
        }
    }
}
