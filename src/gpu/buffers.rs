//! GPU-resident point buffers.

use crate::point_set::PointSet;
use wgpu::util::DeviceExt;

/// Bytes per point in each buffer (three f32).
pub(crate) const POINT_STRIDE: wgpu::BufferAddress = 12;

/// Position and color vertex buffers for one point set.
///
/// Both buffers are always created together from the same [`PointSet`], so
/// they hold the same number of points.
pub struct PointBuffers {
    pub(crate) positions: wgpu::Buffer,
    pub(crate) colors: wgpu::Buffer,
    count: u32,
}

impl PointBuffers {
    /// Upload `points`. Empty sets get a one-point placeholder allocation
    /// and draw nothing.
    pub fn new(device: &wgpu::Device, points: &PointSet) -> Self {
        let positions = create_vertex_buffer(device, "Point Positions", points.positions());
        let colors = create_vertex_buffer(device, "Point Colors", points.colors());
        Self {
            positions,
            colors,
            count: points.len() as u32,
        }
    }

    /// Number of points drawn.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Re-upload positions in place. Colors are never touched.
    ///
    /// `points` must have the same length as the set these buffers were
    /// built from; a different length is ignored with a warning.
    pub fn write_positions(&self, queue: &wgpu::Queue, points: &PointSet) {
        if points.len() as u32 != self.count {
            tracing::warn!(
                expected = self.count,
                got = points.len(),
                "position update length mismatch, skipped"
            );
            return;
        }
        if self.count > 0 {
            queue.write_buffer(&self.positions, 0, bytemuck::cast_slice(points.positions()));
        }
    }

    /// Release GPU memory now instead of waiting for the drop.
    pub fn destroy(self) {
        self.positions.destroy();
        self.colors.destroy();
    }
}

fn create_vertex_buffer(device: &wgpu::Device, label: &str, data: &[f32]) -> wgpu::Buffer {
    let usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
    if data.is_empty() {
        return device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: POINT_STRIDE,
            usage,
            mapped_at_creation: false,
        });
    }
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage,
    })
}
