//! Render configuration.

use std::collections::BTreeMap;

use log::warn;
use quadray_math::Color;
use quadray_raytrace::{Pcg, World};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::solver::{FlatTracing, OnOffTracing, PathTracer, Solver};

/// Which solver shades the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderAlgorithm {
    /// White where something is hit, black elsewhere.
    OnOff,
    /// Unlit pigment plus emission.
    Flat,
    /// Monte Carlo path tracing.
    #[default]
    PathTracer,
}

/// Rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Rays per pixel; a perfect square, 0 for a single unjittered ray.
    pub samples_per_pixel: u32,
    /// Deepest bounce the path tracer follows.
    pub max_depth: u32,
    /// Scattered rays per path tracer hit.
    pub num_of_rays: u32,
    /// Depth from which Russian roulette may end a path.
    pub russian_roulette_limit: u32,
    /// Initial PRNG state.
    pub seed: u64,
    /// PRNG stream selector.
    pub sequence: u64,
    /// Solver selection.
    pub algorithm: RenderAlgorithm,
    /// Background color as `[r, g, b]`.
    pub background: [f64; 3],
    /// Screen aspect ratio; `width / height` when unset.
    pub aspect_ratio: Option<f64>,
    /// Scene float variables overridden from the outside.
    pub declared_floats: BTreeMap<String, f64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples_per_pixel: 0,
            max_depth: 3,
            num_of_rays: 10,
            russian_roulette_limit: 2,
            seed: 42,
            sequence: 54,
            algorithm: RenderAlgorithm::PathTracer,
            background: [0.0, 0.0, 0.0],
            aspect_ratio: None,
            declared_floats: BTreeMap::new(),
        }
    }
}

impl RenderSettings {
    /// Parse settings from TOML and validate them. Missing keys keep their
    /// defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: RenderSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(err) = &result {
            warn!("Rejected render settings: {}", err);
        }
        result
    }

    fn check(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if integer_sqrt(self.samples_per_pixel).pow(2) != self.samples_per_pixel {
            return Err(RenderError::SamplesNotPerfectSquare(self.samples_per_pixel));
        }
        if self.num_of_rays == 0 {
            return Err(RenderError::InvalidSettings(
                "num_of_rays must be positive".into(),
            ));
        }
        if let Some(ratio) = self.aspect_ratio {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(RenderError::InvalidSettings(format!(
                    "aspect_ratio must be positive, got {ratio}"
                )));
            }
        }
        Ok(())
    }

    /// Subsamples along each side of a pixel.
    pub fn samples_per_side(&self) -> u32 {
        integer_sqrt(self.samples_per_pixel)
    }

    /// Screen aspect ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
            .unwrap_or(self.width as f64 / self.height as f64)
    }

    /// Background color.
    pub fn background_color(&self) -> Color {
        Color::from(self.background)
    }

    /// A fresh generator seeded from `seed` and `sequence`, used for pixel
    /// jitter.
    pub fn pcg(&self) -> Pcg {
        Pcg::new(self.seed, self.sequence)
    }

    /// A fresh generator for the path tracer's scattering and roulette draws.
    ///
    /// Runs on the stream after `sequence`, so it never replays the jitter
    /// stream returned by [`pcg`](Self::pcg).
    pub fn solver_pcg(&self) -> Pcg {
        Pcg::new(self.seed, self.sequence.wrapping_add(1))
    }
}

fn integer_sqrt(n: u32) -> u32 {
    let n = u64::from(n);
    let mut root = (n as f64).sqrt() as u64;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root as u32
}

/// Build the solver selected by `settings.algorithm`.
///
/// The path tracer draws from `settings.solver_pcg()`.
pub fn make_solver<'a>(settings: &RenderSettings, world: &'a World) -> Box<dyn Solver + 'a> {
    match settings.algorithm {
        RenderAlgorithm::OnOff => Box::new(OnOffTracing::new(world)),
        RenderAlgorithm::Flat => Box::new(FlatTracing::new(world, settings.background_color())),
        RenderAlgorithm::PathTracer => Box::new(PathTracer::new(
            world,
            settings.background_color(),
            settings.solver_pcg(),
            settings.num_of_rays,
            settings.max_depth,
            settings.russian_roulette_limit,
        )),
    }
}
