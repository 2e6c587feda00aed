//! Flat position/color buffers for a point cloud.

use crate::error::ParamError;
use glam::Vec3;

/// An ordered set of colored points.
///
/// Stored as two flat `f32` buffers, `positions` and `colors`, each of
/// length `3 * len()`. Point `i` lives at `buffer[3 * i..3 * i + 3]`. Both
/// buffers always describe the same number of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl PointSet {
    /// An empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-filled buffers for `count` points.
    pub fn zeroed(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
        }
    }

    /// Build from existing buffers, checking they describe the same points.
    pub fn from_buffers(positions: Vec<f32>, colors: Vec<f32>) -> Result<Self, ParamError> {
        if positions.len() != colors.len() || positions.len() % 3 != 0 {
            return Err(ParamError::BufferMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        Ok(Self { positions, colors })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat position buffer, `[x0, y0, z0, x1, ...]`.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat color buffer, `[r0, g0, b0, r1, ...]`.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Mutable positions. The length cannot change through a slice, so the
    /// point-count invariant holds.
    pub fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }

    pub fn colors_mut(&mut self) -> &mut [f32] {
        &mut self.colors
    }

    /// Position of point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Color of point `i` as RGB.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn color(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[i * 3..i * 3 + 3])
    }

    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&p.to_array());
    }

    pub fn set_color(&mut self, i: usize, c: Vec3) {
        self.colors[i * 3..i * 3 + 3].copy_from_slice(&c.to_array());
    }

    /// Iterate `(position, color)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| (Vec3::from_slice(p), Vec3::from_slice(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_lengths() {
        let set = PointSet::zeroed(4);
        assert_eq!(set.len(), 4);
        assert_eq!(set.positions().len(), 12);
        assert_eq!(set.colors().len(), 12);
        assert!(PointSet::zeroed(0).is_empty());
    }

    #[test]
    fn test_from_buffers_rejects_mismatch() {
        let err = PointSet::from_buffers(vec![0.0; 6], vec![0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            ParamError::BufferMismatch {
                positions: 6,
                colors: 3
            }
        );
        assert!(PointSet::from_buffers(vec![0.0; 4], vec![0.0; 4]).is_err());
        assert!(PointSet::from_buffers(vec![0.0; 6], vec![0.0; 6]).is_ok());
    }

    #[test]
    fn test_point_accessors() {
        let mut set = PointSet::zeroed(2);
        set.set_position(1, Vec3::new(1.0, 2.0, 3.0));
        set.set_color(1, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(set.positions()[3..6], [1.0, 2.0, 3.0]);
        assert_eq!(set.position(1), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(set.color(1), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(set.position(0), Vec3::ZERO);

        let pairs: Vec<_> = set.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].0, Vec3::new(1.0, 2.0, 3.0));
    }
}
