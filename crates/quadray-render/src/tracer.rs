//! Pixel loop: fire rays through every pixel and store the solver's colors.

use std::time::Instant;

use log::{debug, info};
use quadray_math::Color;
use quadray_raytrace::{HdrImage, Pcg, Ray};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::solver::Solver;

/// Drives a camera over an image, one solver call per (sub)sample.
///
/// With `samples_per_side == 0` each pixel gets a single ray through its
/// center. Otherwise the pixel is split into an `N x N` grid and one
/// jittered ray is fired per cell; the pixel stores the mean.
#[derive(Debug)]
pub struct ImageTracer<'a> {
    image: HdrImage,
    camera: &'a dyn Camera,
    pcg: Pcg,
    samples_per_side: u32,
}

impl<'a> ImageTracer<'a> {
    /// Single ray per pixel center.
    pub fn new(image: HdrImage, camera: &'a dyn Camera) -> Self {
        Self::with_sampling(image, camera, Pcg::default(), 0)
    }

    /// Stratified sampling with `samples_per_side^2` rays per pixel, jittered
    /// with `pcg`.
    pub fn with_sampling(
        image: HdrImage,
        camera: &'a dyn Camera,
        pcg: Pcg,
        samples_per_side: u32,
    ) -> Self {
        Self {
            image,
            camera,
            pcg,
            samples_per_side,
        }
    }

    /// Ray through pixel `(col, row)` at in-pixel offsets `(u_pixel, v_pixel)`,
    /// where `(0.5, 0.5)` is the pixel center and row 0 is the top of the
    /// image.
    pub fn fire_ray(&self, col: usize, row: usize, u_pixel: f64, v_pixel: f64) -> Ray {
        screen_ray(
            self.camera,
            self.image.width(),
            self.image.height(),
            col,
            row,
            u_pixel,
            v_pixel,
        )
    }

    /// Render every pixel with one solver and the tracer's own random stream,
    /// consumed row by row, then column by column, then subsample by
    /// subsample.
    pub fn fire_all_rays<S: Solver + ?Sized>(&mut self, solver: &mut S) {
        let (width, height) = (self.image.width(), self.image.height());
        info!(
            "Rendering {}x{} image, {} samples per pixel",
            width,
            height,
            self.samples_per_pixel()
        );
        let start = Instant::now();

        for row in 0..height {
            for col in 0..width {
                let color = render_pixel(
                    self.camera,
                    width,
                    height,
                    self.samples_per_side,
                    &mut self.pcg,
                    solver,
                    col,
                    row,
                );
                self.image.set_pixel(col, row, color);
            }
            debug!("Row {}/{} done", row + 1, height);
        }

        info!("Render finished in {:.2?}", start.elapsed());
    }

    /// Render rows in parallel.
    ///
    /// Row `r` jitters with `Pcg::new(seed, r)` and shades with
    /// `make_solver(r)`, so the result does not depend on scheduling. The
    /// tracer's own random stream is left untouched.
    pub fn fire_all_rays_par<S, F>(&mut self, seed: u64, make_solver: F)
    where
        S: Solver,
        F: Fn(usize) -> S + Sync,
    {
        let (width, height) = (self.image.width(), self.image.height());
        if width == 0 || height == 0 {
            return;
        }
        info!(
            "Rendering {}x{} image in parallel, {} samples per pixel",
            width,
            height,
            self.samples_per_pixel()
        );
        let start = Instant::now();

        let camera = self.camera;
        let samples_per_side = self.samples_per_side;
        self.image
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, pixels)| {
                let mut pcg = Pcg::new(seed, row as u64);
                let mut solver = make_solver(row);
                for (col, pixel) in pixels.iter_mut().enumerate() {
                    *pixel = render_pixel(
                        camera,
                        width,
                        height,
                        samples_per_side,
                        &mut pcg,
                        &mut solver,
                        col,
                        row,
                    );
                }
                debug!("Row {}/{} done", row + 1, height);
            });

        info!("Render finished in {:.2?}", start.elapsed());
    }

    /// Rays per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_side.max(1).pow(2)
    }

    /// The rendered image.
    pub fn image(&self) -> &HdrImage {
        &self.image
    }

    /// Take the rendered image.
    pub fn into_image(self) -> HdrImage {
        self.image
    }

    /// The jitter stream in its current state.
    pub fn pcg(&self) -> &Pcg {
        &self.pcg
    }
}

fn screen_ray(
    camera: &dyn Camera,
    width: usize,
    height: usize,
    col: usize,
    row: usize,
    u_pixel: f64,
    v_pixel: f64,
) -> Ray {
    let u = (col as f64 + u_pixel) / width as f64;
    let v = 1.0 - (row as f64 + v_pixel) / height as f64;
    camera.fire_ray(u, v)
}

#[allow(clippy::too_many_arguments)]
fn render_pixel<S: Solver + ?Sized>(
    camera: &dyn Camera,
    width: usize,
    height: usize,
    samples_per_side: u32,
    pcg: &mut Pcg,
    solver: &mut S,
    col: usize,
    row: usize,
) -> Color {
    if samples_per_side == 0 {
        return solver.tracing(&screen_ray(camera, width, height, col, row, 0.5, 0.5));
    }

    let n = f64::from(samples_per_side);
    let mut sum = Color::BLACK;
    for inter_row in 0..samples_per_side {
        for inter_col in 0..samples_per_side {
            let u_pixel = (f64::from(inter_col) + pcg.random_float()) / n;
            let v_pixel = (f64::from(inter_row) + pcg.random_float()) / n;
            sum += solver.tracing(&screen_ray(camera, width, height, col, row, u_pixel, v_pixel));
        }
    }
    sum * (1.0 / (n * n))
}
