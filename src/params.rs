//! Bounds for tunable parameters.
//!
//! Each control in the debug panel is described by a [`ParamRange`]. The
//! galaxy and scatter ranges live here so the panel and tests agree on them.

/// Inclusive `[min, max]` with a step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub const fn new(label: &'static str, min: f64, max: f64, step: f64) -> Self {
        Self {
            label,
            min,
            max,
            step,
        }
    }

    /// Clamp into range and snap to the nearest step from `min`.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Galaxy controls.
pub mod galaxy {
    use super::ParamRange;

    pub const COUNT: ParamRange = ParamRange::new("count", 100.0, 100_000.0, 100.0);
    pub const SIZE: ParamRange = ParamRange::new("size", 0.001, 0.1, 0.001);
    pub const RADIUS: ParamRange = ParamRange::new("radius", 0.1, 20.0, 0.01);
    pub const BRANCHES: ParamRange = ParamRange::new("branches", 2.0, 20.0, 1.0);
    pub const SPIN: ParamRange = ParamRange::new("spin", -5.0, 5.0, 0.001);
    pub const RANDOMNESS: ParamRange = ParamRange::new("randomness", 0.0, 2.0, 0.001);
}

/// Scatter field controls.
pub mod scatter {
    use super::ParamRange;

    pub const COUNT: ParamRange = ParamRange::new("count", 100.0, 100_000.0, 100.0);
    pub const SCALE: ParamRange = ParamRange::new("scale", 0.1, 10.0, 0.01);
    pub const SIZE: ParamRange = ParamRange::new("size", 0.001, 0.1, 0.001);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_clamps_and_steps() {
        assert_eq!(galaxy::COUNT.snap(50.0), 100.0);
        assert_eq!(galaxy::COUNT.snap(250_000.0), 100_000.0);
        assert_eq!(galaxy::COUNT.snap(1_049.0), 1_000.0);
        assert_eq!(galaxy::COUNT.snap(1_051.0), 1_100.0);
        assert_eq!(galaxy::BRANCHES.snap(3.4), 3.0);
        assert_eq!(galaxy::SPIN.snap(-9.0), -5.0);
    }

    #[test]
    fn test_defaults_fall_inside_ranges() {
        let p = crate::generator::GalaxyParams::default();
        assert!(galaxy::COUNT.contains(p.count as f64));
        assert!(galaxy::RADIUS.contains(p.radius as f64));
        assert!(galaxy::BRANCHES.contains(p.branches as f64));
        assert!(galaxy::SPIN.contains(p.spin as f64));
        assert!(galaxy::RANDOMNESS.contains(p.randomness as f64));
        assert!(galaxy::SIZE.contains(0.02));
    }
}
