//! Perspective orbit camera with optional damping.

use glam::{Mat4, Vec3};

const MIN_PITCH: f32 = -1.5;
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;

/// Orbit camera looking at `target`.
///
/// Input adds to pending rotation/zoom deltas; [`update`](Self::update)
/// applies them. With damping, each update applies `delta * factor` and
/// keeps `delta * (1 - factor)` for later frames, so motion eases out after
/// the mouse stops.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
    /// `Some(factor)` enables damping.
    pub damping: Option<f32>,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl OrbitCamera {
    /// Camera on +Z at distance 3, fov 75°, looking at the origin.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 3.0,
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            aspect: 16.0 / 9.0,
            damping: Some(0.05),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Recompute aspect from a surface size; zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Queue a rotation from a mouse drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * 0.005;
        self.pending_pitch += dy * 0.005;
    }

    /// Queue a zoom; positive scroll moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.pending_zoom -= scroll * 0.3;
    }

    /// Apply pending input. Call once per frame.
    pub fn update(&mut self) {
        let factor = self.damping.map(|f| f.clamp(0.0, 1.0)).unwrap_or(1.0);

        self.yaw += self.pending_yaw * factor;
        self.pitch = (self.pitch + self.pending_pitch * factor).clamp(MIN_PITCH, MAX_PITCH);
        self.distance = (self.distance + self.pending_zoom * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);

        let keep = 1.0 - factor;
        self.pending_yaw *= keep;
        self.pending_pitch *= keep;
        self.pending_zoom *= keep;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_moving(cam: &OrbitCamera) -> bool {
        const EPS: f32 = 1e-5;
        cam.pending_yaw.abs() > EPS || cam.pending_pitch.abs() > EPS || cam.pending_zoom.abs() > EPS
    }

    #[test]
    fn test_initial_position_on_z() {
        let cam = OrbitCamera::new();
        let p = cam.position();
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_undamped_applies_immediately() {
        let mut cam = OrbitCamera {
            damping: None,
            ..OrbitCamera::new()
        };
        cam.rotate(-100.0, 0.0);
        cam.update();
        assert!((cam.yaw - 0.5).abs() < 1e-6);
        assert!(!is_moving(&cam));
    }

    #[test]
    fn test_damping_converges_to_full_delta() {
        let mut cam = OrbitCamera::new();
        cam.rotate(-100.0, 0.0);
        cam.update();
        assert!((cam.yaw - 0.5 * 0.05).abs() < 1e-6);
        assert!(is_moving(&cam));
        for _ in 0..1000 {
            cam.update();
        }
        assert!((cam.yaw - 0.5).abs() < 1e-4);
        assert!(!is_moving(&cam));
    }

    #[test]
    fn test_pitch_and_distance_clamped() {
        let mut cam = OrbitCamera {
            damping: None,
            ..OrbitCamera::new()
        };
        cam.rotate(0.0, 10_000.0);
        cam.zoom(1_000.0);
        cam.update();
        assert_eq!(cam.pitch, MAX_PITCH);
        assert_eq!(cam.distance, MIN_DISTANCE);
    }

    #[test]
    fn test_viewport_aspect() {
        let mut cam = OrbitCamera::new();
        cam.set_viewport(800, 400);
        assert_eq!(cam.aspect, 2.0);
        cam.set_viewport(0, 400);
        assert_eq!(cam.aspect, 2.0);
    }
}
