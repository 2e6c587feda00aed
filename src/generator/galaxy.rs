//! Spiral galaxy generator.
//!
//! Each point picks a radius uniformly in `[0, radius)`, joins one of
//! `branches` evenly spaced arms by its index, and is twisted by
//! `radius * spin`. Per-axis jitter scaled by `randomness` breaks up the
//! arms, and the color fades from `inner_color` at the center to
//! `outer_color` at the rim.
//!
//! Radius is uniform, not area-uniform, so points concentrate near the
//! center.

use super::{check_non_negative, PointGenerator};
use crate::color::Color;
use crate::error::ParamError;
use crate::point_set::PointSet;
use crate::random::PointRng;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Parameters for [`GalaxyParams::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyParams {
    /// Number of points.
    pub count: u32,
    /// Maximum radius of the disc.
    pub radius: f32,
    /// Number of spiral arms. Must be at least 1.
    pub branches: u32,
    /// Twist per unit radius, in radians. Negative spins the other way.
    pub spin: f32,
    /// Jitter magnitude per axis.
    pub randomness: f32,
    /// Color at the center.
    pub inner_color: Color,
    /// Color at the rim.
    pub outer_color: Color,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 10_000,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            inner_color: Color::from_rgb_u32(0xff6030),
            outer_color: Color::from_rgb_u32(0x1b3984),
        }
    }
}

/// Everything computed for one galaxy point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxySample {
    pub radius: f32,
    pub branch_angle: f32,
    pub spin_angle: f32,
    pub jitter: Vec3,
    pub position: Vec3,
    pub color: Color,
}

impl GalaxyParams {
    /// Angle of the arm that point `index` belongs to.
    pub fn branch_angle(&self, index: u32) -> f32 {
        let branches = self.branches.max(1);
        (index % branches) as f32 / branches as f32 * TAU
    }

    /// Gradient color at distance `r` from the center.
    pub fn color_at(&self, r: f32) -> Color {
        let t = if self.radius > 0.0 { r / self.radius } else { 0.0 };
        self.inner_color.lerp(self.outer_color, t)
    }

    /// Compute point `index`, drawing radius then x/y/z jitter from `rng`.
    pub fn sample(&self, index: u32, rng: &mut PointRng) -> GalaxySample {
        let radius = rng.random() * self.radius;
        let branch_angle = self.branch_angle(index);
        let spin_angle = radius * self.spin;

        let jitter = Vec3::new(
            rng.random() * self.randomness,
            rng.random() * self.randomness,
            rng.random() * self.randomness,
        );

        let angle = branch_angle + spin_angle;
        let position = Vec3::new(
            radius * angle.cos() + jitter.x,
            jitter.y,
            radius * angle.sin() + jitter.z,
        );

        GalaxySample {
            radius,
            branch_angle,
            spin_angle,
            jitter,
            position,
            color: self.color_at(radius),
        }
    }

    /// Generate the galaxy into a fresh point set.
    pub fn generate(&self, rng: &mut PointRng) -> Result<PointSet, ParamError> {
        self.validate()?;

        let mut points = PointSet::zeroed(self.count as usize);
        for i in 0..self.count {
            let s = self.sample(i, rng);
            points.set_position(i as usize, s.position);
            points.set_color(i as usize, s.color.into());
        }
        Ok(points)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if self.branches == 0 {
            return Err(ParamError::ZeroBranches);
        }
        check_non_negative("radius", self.radius)?;
        check_non_negative("randomness", self.randomness)?;
        if !self.spin.is_finite() {
            return Err(ParamError::OutOfRange {
                name: "spin",
                value: self.spin,
            });
        }
        Ok(())
    }
}

impl PointGenerator for GalaxyParams {
    fn count(&self) -> usize {
        self.count as usize
    }

    fn validate(&self) -> Result<(), ParamError> {
        GalaxyParams::validate(self)
    }

    fn generate(&self, rng: &mut PointRng) -> Result<PointSet, ParamError> {
        GalaxyParams::generate(self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(count: u32) -> GalaxyParams {
        GalaxyParams {
            count,
            ..Default::default()
        }
    }

    #[test]
    fn test_buffer_lengths() {
        for n in [0, 1, 7, 1000] {
            let set = params(n).generate(&mut PointRng::from_seed(5)).unwrap();
            assert_eq!(set.positions().len(), 3 * n as usize);
            assert_eq!(set.colors().len(), 3 * n as usize);
        }
    }

    #[test]
    fn test_radius_in_range() {
        let p = params(0);
        let mut rng = PointRng::from_seed(11);
        for i in 0..5000 {
            let s = p.sample(i, &mut rng);
            assert!(s.radius >= 0.0 && s.radius < p.radius, "radius {}", s.radius);
        }
    }

    #[test]
    fn test_position_formula() {
        let p = GalaxyParams {
            randomness: 0.5,
            ..params(0)
        };
        let mut rng = PointRng::from_seed(2);
        for i in 0..100 {
            let s = p.sample(i, &mut rng);
            let a = s.branch_angle + s.spin_angle;
            assert!((s.position.x - (s.radius * a.cos() + s.jitter.x)).abs() < 1e-5);
            assert_eq!(s.position.y, s.jitter.y);
            assert!((s.position.z - (s.radius * a.sin() + s.jitter.z)).abs() < 1e-5);
            assert!((s.spin_angle - s.radius * p.spin).abs() < 1e-6);
            assert!(s.jitter.min_element() >= 0.0 && s.jitter.max_element() < 0.5);
        }
    }

    #[test]
    fn test_branch_angles() {
        let p = GalaxyParams {
            branches: 4,
            ..params(0)
        };
        assert_eq!(p.branch_angle(0), 0.0);
        assert!((p.branch_angle(1) - TAU / 4.0).abs() < 1e-6);
        assert!((p.branch_angle(3) - 3.0 * TAU / 4.0).abs() < 1e-6);
        assert_eq!(p.branch_angle(4), 0.0);

        let single = GalaxyParams {
            branches: 1,
            ..params(0)
        };
        for i in 0..50 {
            assert_eq!(single.branch_angle(i), 0.0);
        }
    }

    #[test]
    fn test_color_gradient_law() {
        let p = params(0);
        let inner = p.inner_color;
        let outer = p.outer_color;

        assert_eq!(p.color_at(0.0), inner);

        let mid = p.color_at(p.radius / 2.0);
        assert!((mid.r - (inner.r + outer.r) / 2.0).abs() < 1e-6);
        assert!((mid.g - (inner.g + outer.g) / 2.0).abs() < 1e-6);
        assert!((mid.b - (inner.b + outer.b) / 2.0).abs() < 1e-6);

        let rim = p.color_at(p.radius);
        assert!((rim.r - outer.r).abs() < 1e-6);
        assert!((rim.g - outer.g).abs() < 1e-6);
        assert!((rim.b - outer.b).abs() < 1e-6);
    }

    #[test]
    fn test_zero_radius_collapses_to_jitter() {
        let p = GalaxyParams {
            radius: 0.0,
            randomness: 0.0,
            ..params(64)
        };
        let set = p.generate(&mut PointRng::from_seed(4)).unwrap();
        assert!(set.positions().iter().all(|&v| v == 0.0));
        for (_, c) in set.iter() {
            assert_eq!(c, Vec3::from(p.inner_color));
        }
    }

    #[test]
    fn test_validation() {
        let zero = GalaxyParams {
            branches: 0,
            ..params(10)
        };
        assert_eq!(
            zero.generate(&mut PointRng::from_seed(0)),
            Err(ParamError::ZeroBranches)
        );

        let negative = GalaxyParams {
            radius: -1.0,
            ..params(10)
        };
        assert!(matches!(
            negative.validate(),
            Err(ParamError::OutOfRange { name: "radius", .. })
        ));

        let nan_spin = GalaxyParams {
            spin: f32::NAN,
            ..params(10)
        };
        assert!(nan_spin.validate().is_err());
        assert!(params(10).validate().is_ok());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let p = params(500);
        let a = p.generate(&mut PointRng::from_seed(123)).unwrap();
        let b = p.generate(&mut PointRng::from_seed(123)).unwrap();
        assert_eq!(a, b);
        let c = p.generate(&mut PointRng::from_seed(124)).unwrap();
        assert_ne!(a, c);
    }
}
