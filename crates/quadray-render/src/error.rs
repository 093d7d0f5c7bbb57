//! Error types for rendering setup.

use thiserror::Error;

/// Errors raised while configuring a render or assembling a scene.
///
/// Ray queries never fail: a miss is reported as an empty result, not as an
/// error.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Stratified sampling needs a square number of samples per pixel.
    #[error("samples per pixel must be a perfect square, got {0}")]
    SamplesNotPerfectSquare(u32),

    /// A shape referenced a material that was never defined.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    /// A float variable was read before being declared.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// The scene already has a camera.
    #[error("camera defined more than once")]
    CameraAlreadyDefined,

    /// The scene has no camera.
    #[error("no camera defined in the scene")]
    MissingCamera,

    /// The settings file could not be parsed.
    #[error("failed to parse settings: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for rendering setup.
pub type Result<T> = std::result::Result<T, RenderError>;
