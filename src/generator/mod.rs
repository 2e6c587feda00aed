//! Procedural point-cloud generators.
//!
//! A generator turns a small parameter set plus a random source into a
//! [`PointSet`]. Two variants ship with the crate:
//!
//! | Variant | Params | Layout |
//! |---------|--------|--------|
//! | Scatter | [`ScatterParams`] | `sin(k) * random() * scale` per coordinate, random RGB |
//! | Galaxy | [`GalaxyParams`] | spiral arms by index, radius-gradient colors |

mod galaxy;
mod scatter;

pub use galaxy::{GalaxyParams, GalaxySample};
pub use scatter::ScatterParams;

use crate::error::ParamError;
use crate::point_set::PointSet;
use crate::random::PointRng;
use serde::{Deserialize, Serialize};

/// Something that can produce a point set.
pub trait PointGenerator {
    /// Number of points the next call to [`generate`](Self::generate) yields.
    fn count(&self) -> usize;

    /// Check the parameters without generating.
    fn validate(&self) -> Result<(), ParamError>;

    /// Generate a fresh point set, drawing all randomness from `rng`.
    fn generate(&self, rng: &mut PointRng) -> Result<PointSet, ParamError>;
}

/// Either generator variant, tagged for configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Generator {
    Scatter(ScatterParams),
    Galaxy(GalaxyParams),
}

impl Generator {
    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Generator::Scatter(_) => "scatter",
            Generator::Galaxy(_) => "galaxy",
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::Galaxy(GalaxyParams::default())
    }
}

impl PointGenerator for Generator {
    fn count(&self) -> usize {
        match self {
            Generator::Scatter(p) => p.count(),
            Generator::Galaxy(p) => p.count(),
        }
    }

    fn validate(&self) -> Result<(), ParamError> {
        match self {
            Generator::Scatter(p) => p.validate(),
            Generator::Galaxy(p) => p.validate(),
        }
    }

    fn generate(&self, rng: &mut PointRng) -> Result<PointSet, ParamError> {
        match self {
            Generator::Scatter(p) => p.generate(rng),
            Generator::Galaxy(p) => p.generate(rng),
        }
    }
}

impl From<ScatterParams> for Generator {
    fn from(p: ScatterParams) -> Self {
        Generator::Scatter(p)
    }
}

impl From<GalaxyParams> for Generator {
    fn from(p: GalaxyParams) -> Self {
        Generator::Galaxy(p)
    }
}

/// Reject negative, NaN and infinite values.
pub(crate) fn check_non_negative(name: &'static str, value: f32) -> Result<(), ParamError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamError::OutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_dispatch() {
        let g: Generator = ScatterParams {
            count: 10,
            ..Default::default()
        }
        .into();
        assert_eq!(g.name(), "scatter");
        assert_eq!(g.count(), 10);
        let set = g.generate(&mut PointRng::from_seed(0)).unwrap();
        assert_eq!(set.len(), 10);
    }

    #[test]
    fn test_generator_tagged_json() {
        let json = r##"{"variant": "galaxy", "count": 200, "branches": 4}"##;
        let g: Generator = serde_json::from_str(json).unwrap();
        match g {
            Generator::Galaxy(p) => {
                assert_eq!(p.count, 200);
                assert_eq!(p.branches, 4);
                assert_eq!(p.radius, 5.0);
            }
            other => panic!("expected galaxy, got {}", other.name()),
        }
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative("x", 0.0).is_ok());
        assert!(check_non_negative("x", -0.1).is_err());
        assert!(check_non_negative("x", f32::NAN).is_err());
        assert!(check_non_negative("x", f32::INFINITY).is_err());
    }
}
