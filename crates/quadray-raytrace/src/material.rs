//! Surface appearance: pigments, BRDFs, and materials.

use std::f64::consts::PI;
use std::sync::Arc;

use quadray_math::{create_onb_from_z, Color, Normal3, Point2, Point3, Vec3};

use crate::{HdrImage, Pcg, Ray};

/// Lower bound of the parameter range of scattered rays.
const SCATTER_TMIN: f64 = 1e-3;

/// A function from surface coordinates `(u, v)` to a color.
#[derive(Debug, Clone, PartialEq)]
pub enum Pigment {
    /// The same color everywhere.
    Uniform(Color),
    /// A checkerboard with `steps` squares along each of u and v.
    Checkered {
        /// Color of the squares whose u and v indices share parity.
        color1: Color,
        /// Color of the remaining squares.
        color2: Color,
        /// Number of squares per unit of u (and v).
        steps: u32,
    },
    /// A texture: u spans the image width, v its height.
    Image(Arc<HdrImage>),
}

impl Pigment {
    /// Color at surface coordinates `uv`.
    pub fn get_color(&self, uv: &Point2) -> Color {
        match self {
            Pigment::Uniform(color) => *color,
            Pigment::Checkered {
                color1,
                color2,
                steps,
            } => {
                let steps = f64::from(*steps);
                let int_u = (uv.x * steps).floor() as i64;
                let int_v = (uv.y * steps).floor() as i64;
                if int_u.rem_euclid(2) == int_v.rem_euclid(2) {
                    *color1
                } else {
                    *color2
                }
            }
            Pigment::Image(image) => {
                if image.width() == 0 || image.height() == 0 {
                    return Color::BLACK;
                }
                // Negative coordinates saturate to 0 in the cast
                let col = ((uv.x * image.width() as f64) as usize).min(image.width() - 1);
                let row = ((uv.y * image.height() as f64) as usize).min(image.height() - 1);
                image.get_pixel(col, row)
            }
        }
    }
}

impl Default for Pigment {
    fn default() -> Self {
        Pigment::Uniform(Color::WHITE)
    }
}

/// How a surface scatters incident light.
#[derive(Debug, Clone, PartialEq)]
pub enum Brdf {
    /// Ideal Lambertian reflector.
    Diffuse {
        /// Reflectance as a function of the surface coordinates.
        pigment: Pigment,
    },
    /// Ideal mirror.
    Specular {
        /// Reflectance as a function of the surface coordinates.
        pigment: Pigment,
        /// Largest angle (radians) between incoming and outgoing directions
        /// still treated as a perfect reflection by [`Brdf::eval`].
        threshold_angle_rad: f64,
    },
}

impl Brdf {
    /// Diffuse BRDF with the given pigment.
    pub fn diffuse(pigment: Pigment) -> Self {
        Brdf::Diffuse { pigment }
    }

    /// Specular BRDF with the default threshold angle of 0.1 degrees.
    pub fn specular(pigment: Pigment) -> Self {
        Brdf::Specular {
            pigment,
            threshold_angle_rad: PI / 1800.0,
        }
    }

    /// The pigment modulating this BRDF.
    pub fn pigment(&self) -> &Pigment {
        match self {
            Brdf::Diffuse { pigment } | Brdf::Specular { pigment, .. } => pigment,
        }
    }

    /// Evaluate the BRDF for a pair of directions at surface coordinates `uv`.
    pub fn eval(&self, normal: &Normal3, in_dir: &Vec3, out_dir: &Vec3, uv: &Point2) -> Color {
        match self {
            Brdf::Diffuse { pigment } => pigment.get_color(uv) * (1.0 / PI),
            Brdf::Specular {
                pigment,
                threshold_angle_rad,
            } => {
                let n = normal.normalize();
                let theta_in = n.dot(&in_dir.normalize()).clamp(-1.0, 1.0).acos();
                let theta_out = n.dot(&out_dir.normalize()).clamp(-1.0, 1.0).acos();
                if (theta_in - theta_out).abs() < *threshold_angle_rad {
                    pigment.get_color(uv)
                } else {
                    Color::BLACK
                }
            }
        }
    }

    /// Sample an outgoing ray for light arriving along `incoming_dir`.
    ///
    /// `normal` must face the side the light comes from, which is what every
    /// shape in this crate reports.
    pub fn scatter_ray(
        &self,
        pcg: &mut Pcg,
        incoming_dir: &Vec3,
        interaction_point: &Point3,
        normal: &Normal3,
        depth: u32,
    ) -> Ray {
        let direction = match self {
            Brdf::Diffuse { .. } => {
                // Cosine-weighted hemisphere sample around the normal
                let (e1, e2, e3) = create_onb_from_z(&normal.normalize());
                let cos_theta_sq = pcg.random_float();
                let cos_theta = cos_theta_sq.sqrt();
                let sin_theta = (1.0 - cos_theta_sq).sqrt();
                let phi = 2.0 * PI * pcg.random_float();

                e1 * (phi.cos() * sin_theta) + e2 * (phi.sin() * sin_theta) + e3 * cos_theta
            }
            Brdf::Specular { .. } => {
                let ray_dir = incoming_dir.normalize();
                let n = normal.normalize().to_vec();
                ray_dir - n * (2.0 * n.dot(&ray_dir))
            }
        };

        Ray::new(*interaction_point, direction)
            .with_range(SCATTER_TMIN, f64::INFINITY)
            .with_depth(depth)
    }
}

impl Default for Brdf {
    fn default() -> Self {
        Brdf::diffuse(Pigment::default())
    }
}

/// A BRDF paired with the radiance the surface emits on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Reflective behaviour.
    pub brdf: Brdf,
    /// Emitted radiance as a function of the surface coordinates.
    pub emitted_radiance: Pigment,
}

impl Material {
    /// Create a material.
    pub fn new(brdf: Brdf, emitted_radiance: Pigment) -> Self {
        Self {
            brdf,
            emitted_radiance,
        }
    }

    /// Non-emitting material with the given BRDF.
    pub fn from_brdf(brdf: Brdf) -> Self {
        Self::new(brdf, Pigment::Uniform(Color::BLACK))
    }
}

impl Default for Material {
    /// White diffuse surface, no emission.
    fn default() -> Self {
        Self::from_brdf(Brdf::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadray_math::{are_close, EPSILON};

    #[test]
    fn test_uniform_pigment() {
        let color = Color::new(1.0, 2.0, 3.0);
        let pigment = Pigment::Uniform(color);
        for (u, v) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            assert!(are_close(&pigment.get_color(&Point2::new(u, v)), &color));
        }
    }

    #[test]
    fn test_image_pigment() {
        let mut image = HdrImage::new(2, 2);
        image.set_pixel(0, 0, Color::new(1.0, 2.0, 3.0));
        image.set_pixel(1, 0, Color::new(2.0, 3.0, 1.0));
        image.set_pixel(0, 1, Color::new(2.0, 1.0, 3.0));
        image.set_pixel(1, 1, Color::new(3.0, 2.0, 1.0));

        let pigment = Pigment::Image(Arc::new(image));
        assert!(are_close(&pigment.get_color(&Point2::new(0.0, 0.0)), &Color::new(1.0, 2.0, 3.0)));
        assert!(are_close(&pigment.get_color(&Point2::new(1.0, 0.0)), &Color::new(2.0, 3.0, 1.0)));
        assert!(are_close(&pigment.get_color(&Point2::new(0.0, 1.0)), &Color::new(2.0, 1.0, 3.0)));
        assert!(are_close(&pigment.get_color(&Point2::new(1.0, 1.0)), &Color::new(3.0, 2.0, 1.0)));
    }

    #[test]
    fn test_checkered_pigment() {
        let color1 = Color::new(1.0, 2.0, 3.0);
        let color2 = Color::new(10.0, 20.0, 30.0);
        let pigment = Pigment::Checkered {
            color1,
            color2,
            steps: 2,
        };

        assert!(are_close(&pigment.get_color(&Point2::new(0.25, 0.25)), &color1));
        assert!(are_close(&pigment.get_color(&Point2::new(0.75, 0.25)), &color2));
        assert!(are_close(&pigment.get_color(&Point2::new(0.25, 0.75)), &color2));
        assert!(are_close(&pigment.get_color(&Point2::new(0.75, 0.75)), &color1));
    }

    #[test]
    fn test_diffuse_eval() {
        let brdf = Brdf::diffuse(Pigment::Uniform(Color::new(PI, PI, PI)));
        let n = Normal3::new(0.0, 0.0, 1.0);
        let c = brdf.eval(&n, &Vec3::z(), &Vec3::x(), &Point2::new(0.5, 0.5));
        assert!(are_close(&c, &Color::WHITE));
    }

    #[test]
    fn test_diffuse_scatter_stays_in_hemisphere() {
        let brdf = Brdf::default();
        let mut pcg = Pcg::default();
        let normal = Normal3::new(1.0, 2.0, -0.5).normalize();
        let point = Point3::new(1.0, 1.0, 1.0);

        for _ in 0..1000 {
            let ray = brdf.scatter_ray(&mut pcg, &Vec3::new(-1.0, 0.0, 0.0), &point, &normal, 4);
            assert!(normal.dot(&ray.direction) >= -EPSILON);
            assert!((ray.direction.norm() - 1.0).abs() < EPSILON);
            assert_eq!(ray.depth, 4);
            assert_eq!(ray.tmin, 1e-3);
            assert!(are_close(&ray.origin, &point));
        }
    }

    #[test]
    fn test_specular_scatter_reflects() {
        let brdf = Brdf::specular(Pigment::default());
        let mut pcg = Pcg::default();
        let ray = brdf.scatter_ray(
            &mut pcg,
            &Vec3::new(1.0, 0.0, -1.0),
            &Point3::origin(),
            &Normal3::new(0.0, 0.0, 1.0),
            1,
        );
        let expected = Vec3::new(1.0, 0.0, 1.0).normalize();
        assert!(are_close(&ray.direction, &expected));
    }

    #[test]
    fn test_specular_eval() {
        let brdf = Brdf::specular(Pigment::Uniform(Color::new(0.5, 0.5, 0.5)));
        let n = Normal3::new(0.0, 0.0, 1.0);
        let uv = Point2::new(0.0, 0.0);

        let mirrored = brdf.eval(&n, &Vec3::new(1.0, 0.0, 1.0), &Vec3::new(-1.0, 0.0, 1.0), &uv);
        assert!(are_close(&mirrored, &Color::new(0.5, 0.5, 0.5)));

        let off = brdf.eval(&n, &Vec3::new(1.0, 0.0, 1.0), &Vec3::new(0.0, 0.0, 1.0), &uv);
        assert!(are_close(&off, &Color::BLACK));
    }

    #[test]
    fn test_default_material() {
        let m = Material::default();
        assert_eq!(m.brdf.pigment(), &Pigment::Uniform(Color::WHITE));
        assert_eq!(m.emitted_radiance, Pigment::Uniform(Color::BLACK));
    }
}
