//! Scatter field generator.
//!
//! Every coordinate of the position buffer is `sin(k) * random() * scale`
//! where `k` is the coordinate's flat index, and every point gets an
//! independent random RGB color. The shape is cosmetic; it is kept so the
//! field looks like the classic particles demo.

use super::{check_non_negative, PointGenerator};
use crate::error::ParamError;
use crate::point_set::PointSet;
use crate::random::PointRng;
use serde::{Deserialize, Serialize};

/// Parameters for [`ScatterParams::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterParams {
    /// Number of points.
    pub count: u32,
    /// Extent multiplier applied to every coordinate.
    pub scale: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            count: 5000,
            scale: 2.0,
        }
    }
}

impl ScatterParams {
    /// Generate the field. All positions are drawn first, then all colors.
    pub fn generate(&self, rng: &mut PointRng) -> Result<PointSet, ParamError> {
        self.validate()?;

        let mut points = PointSet::zeroed(self.count as usize);
        for (k, v) in points.positions_mut().iter_mut().enumerate() {
            *v = (k as f32).sin() * rng.random() * self.scale;
        }
        for rgb in points.colors_mut().chunks_exact_mut(3) {
            rgb.copy_from_slice(&rng.random_color());
        }
        Ok(points)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        check_non_negative("scale", self.scale)
    }
}

impl PointGenerator for ScatterParams {
    fn count(&self) -> usize {
        self.count as usize
    }

    fn validate(&self) -> Result<(), ParamError> {
        ScatterParams::validate(self)
    }

    fn generate(&self, rng: &mut PointRng) -> Result<PointSet, ParamError> {
        ScatterParams::generate(self, rng)
    }
}
