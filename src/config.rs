//! Demo configuration.
//!
//! A [`DemoConfig`] can be serialized to JSON and loaded by the demos. Every
//! field has a default, so a config file only needs the values it changes:
//!
//! ```json
//! {
//!   "window": { "title": "Big galaxy" },
//!   "seed": 42,
//!   "generator": { "variant": "galaxy", "count": 50000, "branches": 5 },
//!   "animation": { "kind": "spin", "speed": 0.1 }
//! }
//! ```

use crate::animation::Animation;
use crate::error::ConfigError;
use crate::generator::{Generator, PointGenerator};
use crate::gpu::OrbitCamera;
use crate::material::PointMaterial;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Window settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "pointfield".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Camera settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Starting distance from the origin along +Z.
    pub distance: f32,
    /// Orbit damping factor; `None` disables damping.
    pub damping: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 100.0,
            distance: 3.0,
            damping: Some(0.05),
        }
    }
}

impl From<&CameraConfig> for OrbitCamera {
    fn from(config: &CameraConfig) -> Self {
        let mut camera = OrbitCamera::new();
        camera.fov_y_degrees = config.fov;
        camera.near = config.near;
        camera.far = config.far;
        camera.distance = config.distance;
        camera.damping = config.damping;
        camera
    }
}

/// Complete demo configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub material: PointMaterial,
    pub generator: Generator,
    pub animation: Animation,
    /// Fixed seed for reproducible layouts; random each run when unset.
    pub seed: Option<u64>,
    /// Show the debug panel when the `egui` feature is enabled.
    pub show_panel: bool,
}

impl DemoConfig {
    /// Galaxy defaults: spinning at 0.1 rad/s with the panel shown.
    pub fn galaxy() -> Self {
        Self {
            window: WindowConfig {
                title: "pointfield - galaxy".into(),
                ..Default::default()
            },
            generator: Generator::Galaxy(Default::default()),
            animation: Animation::Spin { speed: 0.1 },
            show_panel: true,
            ..Default::default()
        }
    }

    /// Scatter defaults: a waving field of 5000 points.
    pub fn scatter() -> Self {
        Self {
            window: WindowConfig {
                title: "pointfield - particles".into(),
                ..Default::default()
            },
            generator: Generator::Scatter(Default::default()),
            animation: Animation::Wave,
            show_panel: true,
            ..Default::default()
        }
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = serde_json::from_str(json)?;
        config.generator.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise or on failure use `fallback`.
    ///
    /// Failures are logged rather than returned.
    pub fn load_or(path: Option<&Path>, fallback: DemoConfig) -> DemoConfig {
        let Some(path) = path else {
            return fallback;
        };
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded demo config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                fallback
            }
        }
    }
}
