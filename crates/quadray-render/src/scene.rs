//! Scene aggregate handed to the renderer by scene builders.

use std::collections::{BTreeSet, HashMap};

use log::debug;
use quadray_raytrace::{Material, World};

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::settings::RenderSettings;

/// A world, its camera, and the named materials and variables used to
/// build it.
///
/// Variables overridden from the settings win over later declarations, so a
/// scene description can define defaults that a render invocation replaces.
#[derive(Debug, Default)]
pub struct Scene {
    /// Shapes to render.
    pub world: World,
    camera: Option<Box<dyn Camera>>,
    materials: HashMap<String, Material>,
    float_variables: HashMap<String, f64>,
    overridden_variables: BTreeSet<String>,
}

impl Scene {
    /// Empty scene without a camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scene whose float variables start from
    /// `settings.declared_floats` and cannot be redeclared.
    pub fn with_overrides(settings: &RenderSettings) -> Self {
        let mut scene = Self::new();
        for (name, value) in &settings.declared_floats {
            debug!("Overriding scene variable {} = {}", name, value);
            scene.float_variables.insert(name.clone(), *value);
            scene.overridden_variables.insert(name.clone());
        }
        scene
    }

    /// Register (or replace) a named material.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Result<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| RenderError::UnknownMaterial(name.to_string()))
    }

    /// Set the camera. A scene has at most one.
    pub fn set_camera(&mut self, camera: Box<dyn Camera>) -> Result<()> {
        if self.camera.is_some() {
            return Err(RenderError::CameraAlreadyDefined);
        }
        self.camera = Some(camera);
        Ok(())
    }

    /// The scene's camera.
    pub fn camera(&self) -> Result<&dyn Camera> {
        self.camera.as_deref().ok_or(RenderError::MissingCamera)
    }

    /// Declare a float variable. Overridden names keep their override.
    pub fn declare_float(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if self.overridden_variables.contains(&name) {
            debug!("Ignoring declaration of overridden variable {}", name);
            return;
        }
        self.float_variables.insert(name, value);
    }

    /// Value of a float variable.
    pub fn float_variable(&self, name: &str) -> Result<f64> {
        self.float_variables
            .get(name)
            .copied()
            .ok_or_else(|| RenderError::UndefinedVariable(name.to_string()))
    }

    /// Whether `name` was overridden from the settings.
    pub fn is_overridden(&self, name: &str) -> bool {
        self.overridden_variables.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{OrthogonalCamera, PerspectiveCamera};
    use quadray_math::{Color, Transformation};
    use quadray_raytrace::{Brdf, Pigment};

    #[test]
    fn test_materials() {
        let mut scene = Scene::new();
        let red = Material::from_brdf(Brdf::diffuse(Pigment::Uniform(Color::new(1.0, 0.0, 0.0))));
        scene.add_material("red", red.clone());

        assert_eq!(scene.material("red").unwrap(), &red);
        assert!(matches!(
            scene.material("blue"),
            Err(RenderError::UnknownMaterial(name)) if name == "blue"
        ));
    }

    #[test]
    fn test_single_camera() {
        let mut scene = Scene::new();
        assert!(matches!(scene.camera(), Err(RenderError::MissingCamera)));

        scene
            .set_camera(Box::new(OrthogonalCamera::new(1.0, Transformation::identity())))
            .unwrap();
        assert!(scene.camera().is_ok());

        let second = scene.set_camera(Box::new(PerspectiveCamera::new(
            1.0,
            1.0,
            Transformation::identity(),
        )));
        assert!(matches!(second, Err(RenderError::CameraAlreadyDefined)));
    }

    #[test]
    fn test_float_variables() {
        let mut scene = Scene::new();
        scene.declare_float("clock", 1.5);
        assert_eq!(scene.float_variable("clock").unwrap(), 1.5);
        scene.declare_float("clock", 2.5);
        assert_eq!(scene.float_variable("clock").unwrap(), 2.5);
        assert!(matches!(
            scene.float_variable("angle"),
            Err(RenderError::UndefinedVariable(_))
        ));
    }

    #[test]
    fn test_overridden_variables() {
        let mut settings = RenderSettings::default();
        settings.declared_floats.insert("clock".into(), 10.0);

        let mut scene = Scene::with_overrides(&settings);
        assert!(scene.is_overridden("clock"));
        scene.declare_float("clock", 1.0);
        scene.declare_float("angle", 30.0);

        assert_eq!(scene.float_variable("clock").unwrap(), 10.0);
        assert_eq!(scene.float_variable("angle").unwrap(), 30.0);
        assert!(!scene.is_overridden("angle"));
    }
}
