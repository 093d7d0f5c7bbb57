#![warn(missing_docs)]

//! Geometric core of the quadray renderer.
//!
//! This crate turns a ray into the nearest surface hit of a scene built from
//! implicit primitives and Constructive Solid Geometry combinators, and
//! carries the surface description (materials) that solvers shade with.
//!
//! # Architecture
//!
//! - [`Ray`] - Parametric line with a valid parameter range and depth
//! - [`HitRecord`] - Intersection result in world space
//! - [`shapes`] - The [`Shape`] contract, primitives, and CSG combinators
//! - [`World`] - Flat shape collection with nearest-hit queries
//! - [`material`] - Pigments, BRDFs, and materials
//! - [`Pcg`] - Deterministic random numbers for sampling
//! - [`HdrImage`] - Pre-allocated floating-point pixel buffer
//!
//! # Example
//!
//! ```
//! use quadray_math::{Point3, Transformation, Vec3};
//! use quadray_raytrace::shapes::Sphere;
//! use quadray_raytrace::{Material, Ray, World};
//!
//! let mut world = World::new();
//! world.add(Sphere::new(
//!     Transformation::translation(&Vec3::new(10.0, 0.0, 0.0)),
//!     Material::default(),
//! ));
//!
//! let ray = Ray::new(Point3::origin(), Vec3::new(1.0, 0.0, 0.0));
//! let hit = world.ray_intersection(&ray).unwrap();
//! assert!((hit.t - 9.0).abs() < 1e-9);
//! ```

mod hdr_image;
mod hit;
pub mod material;
mod pcg;
mod ray;
pub mod shapes;
mod world;

pub use hdr_image::HdrImage;
pub use hit::HitRecord;
pub use material::{Brdf, Material, Pigment};
pub use pcg::Pcg;
pub use ray::Ray;
pub use shapes::{Shape, ShapeKind};
pub use world::World;
