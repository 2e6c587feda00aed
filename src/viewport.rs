//! Render surface sizing.

/// Highest device pixel ratio the surface is rendered at.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Window size plus the pixel ratio the surface renders at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window size in logical pixels.
    pub logical_width: f64,
    pub logical_height: f64,
    /// Device scale factor reported by the window system.
    pub scale_factor: f64,
}

impl Viewport {
    /// Build from the window's physical size and scale factor.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            logical_width: width as f64 / scale_factor,
            logical_height: height as f64 / scale_factor,
            scale_factor,
        }
    }

    /// Device pixel ratio, capped at [`MAX_PIXEL_RATIO`].
    pub fn pixel_ratio(&self) -> f64 {
        self.scale_factor.min(MAX_PIXEL_RATIO)
    }

    /// Surface size in pixels: logical size times the capped pixel ratio.
    pub fn surface_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        (
            (self.logical_width * ratio).round() as u32,
            (self.logical_height * ratio).round() as u32,
        )
    }

    /// Surface pixels per window pixel (1.0 unless the cap kicks in).
    pub fn render_scale(&self) -> f64 {
        self.pixel_ratio() / self.scale_factor
    }

    pub fn aspect(&self) -> f32 {
        if self.logical_height > 0.0 {
            (self.logical_width / self.logical_height) as f32
        } else {
            1.0
        }
    }

    /// A zero-sized window (e.g. minimized) cannot be rendered to.
    pub fn is_empty(&self) -> bool {
        let (w, h) = self.surface_size();
        w == 0 || h == 0
    }
}
