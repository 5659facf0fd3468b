use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Perspective projection parameters. Only the aspect ratio changes after
/// startup (on viewport resize); the matrix is recomputed on change, not
/// per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Vertical field of view, radians.
    pub fov: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: 90.0_f32.to_radians(),
            aspect: 1.0,
            z_near: 0.1,
            z_far: 200.0,
        }
    }
}

impl Projection {
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_projection_is_finite() {
        let m = Projection::default().matrix();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn viewport_updates_aspect() {
        let mut p = Projection::default();
        p.set_viewport(1280, 720);
        assert!((p.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_viewport_does_not_divide_by_zero() {
        let mut p = Projection::default();
        p.set_viewport(800, 0);
        assert!(p.aspect.is_finite());
    }
}
