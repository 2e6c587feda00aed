//! Per-frame point animation.
//!
//! Animations are pure functions of elapsed time and each point's stored
//! data, so a frame never depends on the previous one:
//!
//! - [`Animation::Wave`] rewrites every point's Y as `sin(t + x)` and leaves
//!   X, Z and colors alone.
//! - [`Animation::Spin`] rotates the whole set around Y by `t * speed`
//!   through the model matrix; the buffers are not touched.

use crate::point_set::PointSet;
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// How a point set moves over time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    /// Static points.
    #[default]
    None,
    /// Sinusoidal height field driven by each point's X.
    Wave,
    /// Rigid rotation around the Y axis, in radians per second.
    Spin { speed: f32 },
}

impl Animation {
    /// Apply buffer-level animation at `elapsed` seconds.
    ///
    /// Returns `true` if positions changed and need re-uploading.
    pub fn apply(&self, points: &mut PointSet, elapsed: f32) -> bool {
        match self {
            Animation::Wave => {
                apply_wave(points, elapsed);
                true
            }
            Animation::None | Animation::Spin { .. } => false,
        }
    }

    /// Rotation around Y at `elapsed` seconds.
    pub fn rotation_y(&self, elapsed: f32) -> f32 {
        match self {
            Animation::Spin { speed } => elapsed * speed,
            Animation::None | Animation::Wave => 0.0,
        }
    }

    /// Model matrix for the point set at `elapsed` seconds.
    pub fn model_matrix(&self, elapsed: f32) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y(elapsed))
    }
}

/// Height of a wave point with stored X `x` at time `t`.
#[inline]
pub fn wave_y(t: f32, x: f32) -> f32 {
    (t + x).sin()
}

/// Set every point's Y to `sin(t + x)`.
pub fn apply_wave(points: &mut PointSet, t: f32) {
    for p in points.positions_mut().chunks_exact_mut(3) {
        p[1] = wave_y(t, p[0]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ScatterParams;
    use crate::random::PointRng;

    fn field() -> PointSet {
        ScatterParams {
            count: 200,
            scale: 2.0,
        }
        .generate(&mut PointRng::from_seed(17))
        .unwrap()
    }

    #[test]
    fn test_wave_follows_sine_law() {
        let mut points = field();
        for t in [0.0_f32, 0.75, 12.5] {
            apply_wave(&mut points, t);
            for (p, _) in points.iter() {
                assert_eq!(p.y, (t + p.x).sin());
            }
        }
    }

    #[test]
    fn test_wave_keeps_x_z_and_colors() {
        let original = field();
        let mut points = original.clone();

        Animation::Wave.apply(&mut points, 1.0);
        Animation::Wave.apply(&mut points, 2.5);

        for i in 0..points.len() {
            let before = original.position(i);
            let after = points.position(i);
            assert_eq!(before.x, after.x);
            assert_eq!(before.z, after.z);
            assert_eq!(after.y, wave_y(2.5, before.x));
        }
        assert_eq!(points.colors(), original.colors());
    }

    #[test]
    fn test_wave_differs_between_frames() {
        let x = 0.3;
        let a = wave_y(1.0, x);
        let b = wave_y(2.0, x);
        assert_eq!(a, 1.3_f32.sin());
        assert_eq!(b, 2.3_f32.sin());
        assert_ne!(a, b);
    }

    #[test]
    fn test_spin_only_rotates() {
        let spin = Animation::Spin { speed: 0.1 };
        let mut points = field();
        let before = points.clone();
        assert!(!spin.apply(&mut points, 10.0));
        assert_eq!(points, before);
        assert!((spin.rotation_y(10.0) - 1.0).abs() < 1e-6);
        assert_eq!(Animation::Wave.rotation_y(10.0), 0.0);
        assert_eq!(Animation::None.model_matrix(3.0), Mat4::IDENTITY);
    }
}
