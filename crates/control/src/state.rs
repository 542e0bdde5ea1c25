use glam::Mat4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accumulated rotation angles, in radians.
///
/// `angle_x` is the rotation about the Y axis (driven by left/right) and
/// `angle_y` the rotation about the X axis (driven by up/down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub angle_x: f32,
    pub angle_y: f32,
}

impl RotationState {
    pub fn new(angle_x: f32, angle_y: f32) -> Self {
        Self { angle_x, angle_y }
    }

    /// Transform for these angles: rotate about Y by `angle_x`, then about X
    /// by `angle_y`, each post-multiplied onto identity (`Ry * Rx`).
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle_x) * Mat4::from_rotation_x(self.angle_y)
    }
}

/// Whether the cube spins on its own or follows the arrow keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Auto,
    Manual,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Auto => Mode::Manual,
            Mode::Manual => Mode::Auto,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Auto => f.write_str("auto"),
            Mode::Manual => f.write_str("manual"),
        }
    }
}

/// Rising-edge detector for the toggle key.
///
/// Fires once when the key goes down after having been observed up, and not
/// again until the key has been observed up. Starts armed-off, so a key
/// already held at startup must be released before it can fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleLatch {
    released: bool,
}

impl ToggleLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's key state; returns true on a press edge.
    pub fn observe(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.released = true;
            return false;
        }
        let fired = self.released;
        self.released = false;
        fired
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn approx_eq(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-6)
    }

    #[test]
    fn zero_angles_give_identity() {
        assert_eq!(RotationState::default().transform(), Mat4::IDENTITY);
    }

    #[test]
    fn angle_x_rotates_about_y() {
        let m = RotationState::new(std::f32::consts::FRAC_PI_2, 0.0).transform();
        assert!(approx_eq(m, Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2)));
        // +X swings to -Z under a quarter turn about Y.
        let v = m.transform_vector3(Vec3::X);
        assert!(v.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn angle_y_rotates_about_x() {
        let m = RotationState::new(0.0, 0.7).transform();
        assert!(approx_eq(m, Mat4::from_rotation_x(0.7)));
        assert!(m.transform_vector3(Vec3::X).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn composition_order_is_y_then_x() {
        let state = RotationState::new(0.4, 1.1);
        let expected = Mat4::from_rotation_y(0.4) * Mat4::from_rotation_x(1.1);
        let swapped = Mat4::from_rotation_x(1.1) * Mat4::from_rotation_y(0.4);
        assert!(approx_eq(state.transform(), expected));
        assert!(!approx_eq(state.transform(), swapped));
    }

    #[test]
    fn mode_toggles_both_ways() {
        assert_eq!(Mode::default(), Mode::Auto);
        assert_eq!(Mode::Auto.toggled(), Mode::Manual);
        assert_eq!(Mode::Manual.toggled(), Mode::Auto);
    }

    #[test]
    fn latch_fires_once_per_press() {
        let mut latch = ToggleLatch::new();
        assert!(!latch.observe(false));
        assert!(latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(false));
        assert!(latch.observe(true));
    }

    #[test]
    fn latch_ignores_key_held_from_start() {
        let mut latch = ToggleLatch::new();
        assert!(!latch.is_released());
        assert!(!latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(false));
        assert!(latch.is_released());
        assert!(latch.observe(true));
    }
}
