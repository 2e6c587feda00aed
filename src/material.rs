//! Point material settings.
//!
//! A [`PointMaterial`] controls how each point is drawn: its size, whether
//! size shrinks with distance, blending, depth writes, and where the color
//! comes from.
//!
//! ```ignore
//! Demo::new(GalaxyParams::default())
//!     .with_material(|m| {
//!         m.size = 0.01;
//!         m.blend_mode = BlendMode::Additive;
//!     })
//!     .run()?;
//! ```

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How overlapping points combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Standard alpha blending.
    Alpha,

    /// Colors are added together, so dense regions glow. Default for
    /// point clouds.
    #[default]
    Additive,

    /// Colors are multiplied, darkening the result.
    Multiply,
}

impl BlendMode {
    /// Matching wgpu blend state.
    pub fn to_blend_state(self) -> wgpu::BlendState {
        match self {
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
            BlendMode::Multiply => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Dst,
                    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent::OVER,
            },
        }
    }
}

/// Material shared by every point in a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointMaterial {
    /// Point size. World units when `size_attenuation` is on, otherwise a
    /// fraction of the viewport height.
    pub size: f32,
    /// Shrink points with distance from the camera.
    pub size_attenuation: bool,
    pub blend_mode: BlendMode,
    /// Write to the depth buffer. Off lets additive points overlap freely.
    pub depth_write: bool,
    /// Use per-point colors; otherwise every point uses `color`.
    pub vertex_colors: bool,
    pub color: Color,
    /// Image whose green channel becomes point alpha. Falls back to a soft
    /// disc when unset or unreadable.
    pub alpha_map: Option<PathBuf>,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            size: 0.02,
            size_attenuation: true,
            blend_mode: BlendMode::Additive,
            depth_write: false,
            vertex_colors: true,
            color: Color::WHITE,
            alpha_map: None,
        }
    }
}

impl PointMaterial {
    /// Whether a change from `self` to `other` needs a new render pipeline
    /// rather than a uniform update.
    pub fn needs_pipeline_rebuild(&self, other: &PointMaterial) -> bool {
        self.blend_mode != other.blend_mode || self.depth_write != other.depth_write
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_blend_adds_destination() {
        let state = BlendMode::Additive.to_blend_state();
        assert_eq!(state.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(state.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(BlendMode::Alpha.to_blend_state(), wgpu::BlendState::ALPHA_BLENDING);
    }

    #[test]
    fn test_pipeline_rebuild_detection() {
        let a = PointMaterial::default();
        let mut b = a.clone();
        b.size = 0.05;
        assert!(!a.needs_pipeline_rebuild(&b));
        b.depth_write = true;
        assert!(a.needs_pipeline_rebuild(&b));
    }

    #[test]
    fn test_material_json_defaults() {
        let m: PointMaterial = serde_json::from_str(r#"{"size": 0.05, "blend_mode": "alpha"}"#).unwrap();
        assert_eq!(m.size, 0.05);
        assert_eq!(m.blend_mode, BlendMode::Alpha);
        assert!(m.size_attenuation);
        assert!(!m.depth_write);
        assert!(m.alpha_map.is_none());
    }
}
