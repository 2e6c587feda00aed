//! # pointfield
//!
//! Procedural point-cloud demos on the GPU: a waving field of scattered
//! particles and a spiral galaxy with a radial color gradient.
//!
//! Generators are pure functions of their parameters and an injected random
//! source, so they can be tested and benchmarked without a window. The
//! [`Demo`] runner renders the result with wgpu, an orbit camera and an
//! optional egui panel for live tuning.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pointfield::prelude::*;
//!
//! fn main() -> Result<(), DemoError> {
//!     Demo::new(GalaxyParams {
//!         count: 50_000,
//!         branches: 5,
//!         ..Default::default()
//!     })
//!     .with_seed(42)
//!     .with_material(|m| m.size = 0.01)
//!     .run()
//! }
//! ```
//!
//! ## Generating without a window
//!
//! ```
//! use pointfield::prelude::*;
//!
//! let mut rng = PointRng::from_seed(1);
//! let points = GalaxyParams::default().generate(&mut rng).unwrap();
//! assert_eq!(points.positions().len(), 3 * points.len());
//! ```
//!
//! ## Variants
//!
//! | Variant | Parameters | Default animation |
//! |---------|------------|-------------------|
//! | [`ScatterParams`] | count, scale | [`Animation::Wave`], `y = sin(t + x)` |
//! | [`GalaxyParams`] | count, radius, branches, spin, randomness, colors | [`Animation::Spin`] at 0.1 rad/s |
//!
//! ## Features
//!
//! - `egui` (default): the debug panel.

pub mod animation;
pub mod color;
pub mod config;
mod demo;
pub mod error;
pub mod generator;
mod gpu;
pub mod material;
#[cfg(feature = "egui")]
pub mod panel;
pub mod params;
pub mod point_set;
pub mod random;
pub mod scene;
pub mod textures;
pub mod time;
pub mod viewport;

pub use animation::Animation;
pub use color::Color;
pub use config::DemoConfig;
pub use demo::Demo;
pub use error::{ConfigError, DemoError, GpuError, ParamError, TextureError};
pub use generator::{GalaxyParams, Generator, PointGenerator, ScatterParams};
pub use glam::{Mat4, Vec3};
pub use gpu::{GpuState, OrbitCamera, Overlay, PointBuffers};
pub use material::{BlendMode, PointMaterial};
pub use point_set::PointSet;
pub use random::PointRng;
pub use scene::Scene;

/// Everything a demo needs.
pub mod prelude {
    pub use crate::animation::Animation;
    pub use crate::color::Color;
    pub use crate::config::DemoConfig;
    pub use crate::demo::Demo;
    pub use crate::error::{DemoError, ParamError};
    pub use crate::generator::{GalaxyParams, Generator, PointGenerator, ScatterParams};
    pub use crate::material::{BlendMode, PointMaterial};
    pub use crate::point_set::PointSet;
    pub use crate::random::PointRng;
    pub use crate::scene::Scene;
    pub use crate::{Mat4, Vec3};
    #[cfg(feature = "egui")]
    pub use egui;
}
