//! The scene's flat shape collection.

use log::trace;
use quadray_math::Point3;

use crate::{HitRecord, Ray, Shape};

/// An ordered list of shapes queried by linear scan.
#[derive(Debug, Default)]
pub struct World {
    shapes: Vec<Box<dyn Shape>>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape.
    pub fn add<S: Shape + 'static>(&mut self, shape: S) {
        self.add_boxed(Box::new(shape));
    }

    /// Append an already boxed shape.
    pub fn add_boxed(&mut self, shape: Box<dyn Shape>) {
        trace!("World::add {:?} (#{})", shape.kind(), self.shapes.len());
        self.shapes.push(shape);
    }

    /// Nearest hit over all shapes.
    ///
    /// On equal `t` the shape added first wins.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        for shape in &self.shapes {
            if let Some(hit) = shape.ray_intersection(ray) {
                if closest.as_ref().map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }
        closest
    }

    /// Whether any shape contains `point`.
    pub fn is_internal(&self, point: &Point3) -> bool {
        self.shapes.iter().any(|shape| shape.is_internal(point))
    }

    /// The shapes in insertion order.
    pub fn shapes(&self) -> &[Box<dyn Shape>] {
        &self.shapes
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the world has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Plane, Sphere};
    use crate::{Brdf, Material, Pigment};
    use quadray_math::{are_close, Color, Transformation, Vec3};

    fn sphere_at(x: f64, material: Material) -> Sphere {
        Sphere::new(Transformation::translation(&Vec3::new(x, 0.0, 0.0)), material)
    }

    #[test]
    fn test_nearest_hit() {
        let mut world = World::new();
        world.add(sphere_at(2.0, Material::default()));
        world.add(sphere_at(8.0, Material::default()));
        assert_eq!(world.len(), 2);

        let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        let hit = world.ray_intersection(&ray).unwrap();
        assert!(are_close(&hit.world_point, &Point3::new(1.0, 0.0, 0.0)));

        let ray = Ray::new(Point3::new(10.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0));
        let hit = world.ray_intersection(&ray).unwrap();
        assert!(are_close(&hit.world_point, &Point3::new(9.0, 0.0, 0.0)));
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let mut forward = World::new();
        forward.add(sphere_at(2.0, Material::default()));
        forward.add(sphere_at(8.0, Material::default()));

        let mut backward = World::new();
        backward.add(sphere_at(8.0, Material::default()));
        backward.add(sphere_at(2.0, Material::default()));

        let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        let a = forward.ray_intersection(&ray).unwrap();
        let b = backward.ray_intersection(&ray).unwrap();
        assert!(are_close(&a, &b));
    }

    #[test]
    fn test_ties_go_to_first_added() {
        let red = Material::from_brdf(Brdf::diffuse(Pigment::Uniform(Color::new(1.0, 0.0, 0.0))));
        let green = Material::from_brdf(Brdf::diffuse(Pigment::Uniform(Color::new(0.0, 1.0, 0.0))));
        let mut world = World::new();
        world.add(sphere_at(3.0, red.clone()));
        world.add(sphere_at(3.0, green));

        let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
        let hit = world.ray_intersection(&ray).unwrap();
        assert_eq!(hit.material, &red);
    }

    #[test]
    fn test_empty_world_and_misses() {
        let mut world = World::new();
        assert!(world.is_empty());
        let ray = Ray::new(Point3::origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!(world.ray_intersection(&ray).is_none());

        world.add(Plane::new(Transformation::identity(), Material::default()));
        assert!(world.ray_intersection(&ray).is_none());
        assert!(world.is_internal(&Point3::new(0.0, 0.0, -1.0)));
        assert!(!world.is_internal(&Point3::new(0.0, 0.0, 1.0)));
    }
}
