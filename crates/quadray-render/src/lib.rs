#![warn(missing_docs)]

//! Image-order rendering on top of the quadray geometric core.
//!
//! A [`Camera`] turns screen coordinates into rays, a [`Solver`] turns rays
//! into colors by querying a [`World`](quadray_raytrace::World), and the
//! [`ImageTracer`] runs the pixel loop that ties them together.
//!
//! # Architecture
//!
//! - [`camera`] - Orthogonal and perspective cameras
//! - [`solver`] - On/off, flat, and path-tracing solvers
//! - [`tracer`] - Pixel loop with stratified sampling, sequential or rayon-parallel
//! - [`settings`] - Serde/TOML render configuration and the solver factory
//! - [`scene`] - World, camera, named materials, and float variables
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use quadray_math::{Color, Transformation, Vec3};
//! use quadray_raytrace::shapes::Sphere;
//! use quadray_raytrace::{HdrImage, Material, World};
//! use quadray_render::{ImageTracer, OnOffTracing, OrthogonalCamera};
//!
//! let mut world = World::new();
//! world.add(Sphere::new(
//!     Transformation::translation(&Vec3::new(2.0, 0.0, 0.0))
//!         * Transformation::scaling(&Vec3::new(0.2, 0.2, 0.2)),
//!     Material::default(),
//! ));
//!
//! let camera = OrthogonalCamera::new(1.0, Transformation::identity());
//! let mut tracer = ImageTracer::new(HdrImage::new(3, 3), &camera);
//! tracer.fire_all_rays(&mut OnOffTracing::new(&world));
//!
//! assert_eq!(tracer.image().get_pixel(1, 1), Color::WHITE);
//! assert_eq!(tracer.image().get_pixel(0, 0), Color::BLACK);
//! ```

pub mod camera;
pub mod error;
pub mod scene;
pub mod settings;
pub mod solver;
pub mod tracer;

pub use camera::{Camera, OrthogonalCamera, PerspectiveCamera};
pub use error::{RenderError, Result};
pub use scene::Scene;
pub use settings::{make_solver, RenderAlgorithm, RenderSettings};
pub use solver::{FlatTracing, OnOffTracing, PathTracer, SameColor, Solver};
pub use tracer::ImageTracer;
