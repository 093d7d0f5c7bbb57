//! Solvers: turn a ray into a color.

use quadray_math::Color;
use quadray_raytrace::{Pcg, Ray, World};

/// A shading strategy.
///
/// Solvers read the world and its materials but never modify them; the
/// `&mut self` receiver only covers internal state such as a random stream.
pub trait Solver {
    /// Radiance carried back along `ray`.
    fn tracing(&mut self, ray: &Ray) -> Color;
}

/// Returns the same color for every ray.
#[derive(Debug, Clone, PartialEq)]
pub struct SameColor {
    /// The color returned.
    pub color: Color,
}

impl SameColor {
    /// Create a constant solver.
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Solver for SameColor {
    fn tracing(&mut self, _ray: &Ray) -> Color {
        self.color
    }
}

/// Classifies rays into "hits something" and "hits nothing".
#[derive(Debug)]
pub struct OnOffTracing<'a> {
    world: &'a World,
    /// Color for rays that miss.
    pub background_color: Color,
    /// Color for rays that hit.
    pub color: Color,
}

impl<'a> OnOffTracing<'a> {
    /// White shapes on a black background.
    pub fn new(world: &'a World) -> Self {
        Self::with_colors(world, Color::BLACK, Color::WHITE)
    }

    /// Custom background and foreground.
    pub fn with_colors(world: &'a World, background_color: Color, color: Color) -> Self {
        Self {
            world,
            background_color,
            color,
        }
    }
}

impl Solver for OnOffTracing<'_> {
    fn tracing(&mut self, ray: &Ray) -> Color {
        match self.world.ray_intersection(ray) {
            Some(_) => self.color,
            None => self.background_color,
        }
    }
}

/// Pigment plus emission at the hit, with no lighting at all.
#[derive(Debug)]
pub struct FlatTracing<'a> {
    world: &'a World,
    /// Color for rays that miss.
    pub background_color: Color,
}

impl<'a> FlatTracing<'a> {
    /// Create a flat solver.
    pub fn new(world: &'a World, background_color: Color) -> Self {
        Self {
            world,
            background_color,
        }
    }
}

impl Solver for FlatTracing<'_> {
    fn tracing(&mut self, ray: &Ray) -> Color {
        let Some(hit) = self.world.ray_intersection(ray) else {
            return self.background_color;
        };
        let material = hit.material;
        material.brdf.pigment().get_color(&hit.surface_point)
            + material.emitted_radiance.get_color(&hit.surface_point)
    }
}

/// Monte Carlo path tracer with Russian roulette.
#[derive(Debug)]
pub struct PathTracer<'a> {
    world: &'a World,
    /// Color for rays that escape the scene.
    pub background_color: Color,
    /// Random stream for scattering and roulette.
    pub pcg: Pcg,
    /// Scattered rays per hit.
    pub num_of_rays: u32,
    /// Rays deeper than this return black.
    pub max_depth: u32,
    /// Depth from which Russian roulette may end a path.
    pub russian_roulette_limit: u32,
}

impl<'a> PathTracer<'a> {
    /// Create a path tracer.
    pub fn new(
        world: &'a World,
        background_color: Color,
        pcg: Pcg,
        num_of_rays: u32,
        max_depth: u32,
        russian_roulette_limit: u32,
    ) -> Self {
        Self {
            world,
            background_color,
            pcg,
            num_of_rays,
            max_depth,
            russian_roulette_limit,
        }
    }
}

impl Solver for PathTracer<'_> {
    fn tracing(&mut self, ray: &Ray) -> Color {
        if ray.depth > self.max_depth {
            return Color::BLACK;
        }

        let world = self.world;
        let Some(hit) = world.ray_intersection(ray) else {
            return self.background_color;
        };

        let material = hit.material;
        let mut hit_color = material.brdf.pigment().get_color(&hit.surface_point);
        let emitted = material.emitted_radiance.get_color(&hit.surface_point);
        let hit_color_lum = hit_color.max_component();

        if ray.depth >= self.russian_roulette_limit {
            let q = (1.0 - hit_color_lum).max(0.05);
            if self.pcg.random_float() > q {
                hit_color = hit_color * (1.0 / (1.0 - q));
            } else {
                return emitted;
            }
        }

        if hit_color_lum <= 0.0 || self.num_of_rays == 0 {
            return emitted;
        }

        let mut cumulative = Color::BLACK;
        for _ in 0..self.num_of_rays {
            let scattered = material.brdf.scatter_ray(
                &mut self.pcg,
                &ray.direction,
                &hit.world_point,
                &hit.normal,
                ray.depth + 1,
            );
            cumulative += hit_color * self.tracing(&scattered);
        }

        emitted + cumulative * (1.0 / f64::from(self.num_of_rays))
    }
}
