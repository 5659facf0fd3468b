use glam::{Mat4, Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Eye height above the terrain surface, world units.
const EYE_HEIGHT: f32 = 1.8;

/// First-person camera: yaw/pitch orientation plus the inverse-view
/// translation, integrated once per frame from aggregated input.
///
/// The translation is stored as the vector later composed into the view
/// matrix, so walking forward subtracts the rotated displacement (the
/// world moves backward in view space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    yaw: f32,
    pitch: f32,
    translation: Vec3,
}

impl Camera {
    pub fn new(translation: Vec3) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            translation,
        }
    }

    /// Start at eye height above the center of a `width x length` grid.
    pub fn above_grid_center(width_cells: u32, length_cells: u32) -> Self {
        Self::new(Vec3::new(
            -(width_cells as f32) / 2.0,
            -EYE_HEIGHT,
            -(length_cells as f32) / 2.0,
        ))
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Add look deltas. Yaw wraps into `(-PI, PI]`; one wrap step per call
    /// is enough since per-frame deltas are bounded. Pitch saturates at
    /// straight up/down and never wraps.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        if self.yaw > PI {
            self.yaw -= TAU;
        } else if self.yaw < -PI {
            self.yaw += TAU;
        }

        self.pitch = (self.pitch + delta_pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Displace along a horizontal direction expressed in local camera
    /// space (`direction.y` is local z; forward is negative z).
    ///
    /// The displacement is rotated by pitch first, then yaw, so walking
    /// tilts with the view while turning stays about the world vertical
    /// axis, and is then subtracted from the stored translation.
    pub fn translate(&mut self, direction: Vec2, distance: f32) {
        let displacement = Vec3::new(direction.x * distance, 0.0, direction.y * distance);
        let rotated =
            Quat::from_rotation_y(self.yaw) * (Quat::from_rotation_x(self.pitch) * displacement);
        self.translation -= rotated;
    }

    /// Compose the per-frame view-projection matrix: projection, then the
    /// inverse orientation (negated pitch about x, negated yaw about y),
    /// then the stored inverse translation.
    pub fn view_projection(&self, projection: Mat4) -> Mat4 {
        projection
            * Mat4::from_rotation_x(-self.pitch)
            * Mat4::from_rotation_y(-self.yaw)
            * Mat4::from_translation(self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn starts_above_grid_center() {
        let cam = Camera::above_grid_center(66, 66);
        assert_eq!(cam.translation(), Vec3::new(-33.0, -1.8, -33.0));
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.pitch(), 0.0);
    }

    #[test]
    fn rotate_zero_is_noop() {
        let mut cam = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        cam.rotate(0.5, -0.25);
        let before = cam;
        cam.rotate(0.0, 0.0);
        assert_eq!(cam, before);
    }

    #[test]
    fn yaw_wraps_and_pitch_clamps_under_any_sequence() {
        let mut cam = Camera::new(Vec3::ZERO);
        for i in 0..10_000 {
            let d = if i % 3 == 0 { 0.7 } else { -0.4 };
            cam.rotate(d, d);
            assert!(cam.yaw() > -PI - EPS && cam.yaw() <= PI + EPS);
            assert!(cam.pitch() >= -FRAC_PI_2 && cam.pitch() <= FRAC_PI_2);
        }
    }

    #[test]
    fn yaw_wraps_past_positive_pi() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.rotate(3.0, 0.0);
        cam.rotate(1.0, 0.0);
        assert!((cam.yaw() - (4.0 - TAU)).abs() < EPS);
    }

    #[test]
    fn pitch_saturates_at_straight_up() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.rotate(0.0, 10.0);
        assert_eq!(cam.pitch(), FRAC_PI_2);
        cam.rotate(0.0, 1.0);
        assert_eq!(cam.pitch(), FRAC_PI_2);
    }

    #[test]
    fn zero_distance_leaves_translation_unchanged() {
        let mut cam = Camera::new(Vec3::new(4.0, 0.0, -2.0));
        cam.rotate(0.3, 0.1);
        let before = cam.translation();
        cam.translate(Vec2::new(0.0, -1.0), 0.0);
        assert_eq!(cam.translation(), before);
    }

    #[test]
    fn forward_walk_negates_displacement() {
        let mut cam = Camera::new(Vec3::ZERO);
        cam.translate(Vec2::new(0.0, -1.0), 10.0);
        let t = cam.translation();
        assert!((t - Vec3::new(0.0, 0.0, 10.0)).length() < EPS);
        assert!((t.length() - 10.0).abs() < EPS);
    }

    #[test]
    fn forward_tilts_with_pitch() {
        // Looking straight down, forward motion becomes vertical.
        let mut cam = Camera::new(Vec3::ZERO);
        cam.rotate(0.0, -FRAC_PI_2);
        cam.translate(Vec2::new(0.0, -1.0), 5.0);
        assert!((cam.translation() - Vec3::new(0.0, 5.0, 0.0)).length() < EPS);
    }

    #[test]
    fn strafe_ignores_pitch_through_yaw_order() {
        // Pitch is applied before yaw, so with yaw = PI/2 a pure strafe
        // still ends up horizontal.
        let mut cam = Camera::new(Vec3::ZERO);
        cam.rotate(FRAC_PI_2, 0.0);
        cam.translate(Vec2::new(1.0, 0.0), 2.0);
        assert!(cam.translation().y.abs() < EPS);
        assert!((cam.translation().length() - 2.0).abs() < EPS);
    }

    #[test]
    fn view_projection_moves_world_opposite_camera() {
        let proj = Mat4::IDENTITY;
        let mut cam = Camera::new(Vec3::ZERO);
        cam.translate(Vec2::new(0.0, -1.0), 3.0);
        let vp = cam.view_projection(proj);
        // A point 3 units ahead of the start lands at the view origin.
        let p = vp * glam::Vec4::new(0.0, 0.0, -3.0, 1.0);
        assert!(p.truncate().length() < EPS);
    }
}
