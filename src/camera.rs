//! First-person camera for walking the museum.
//!
//! The camera holds position and yaw/pitch angles (in degrees) and rebuilds
//! its look direction once per frame from held-key input:
//!
//! - **W/S** walk forward/backward along the look direction
//! - **A/D** strafe along the right vector
//! - **Arrow keys** turn (yaw) and tilt (pitch)
//!
//! Movement uses fixed per-frame steps; with a Fifo present mode that means
//! one step per display refresh.

use winit::keyboard::KeyCode;

use crate::input::Input;
use crate::math::{Mat4, Vec3, add, cross, look_at, normalize, scale, subtract, vec3};

/// World units moved per frame while a movement key is held.
const MOVE_SPEED: f32 = 0.1;
/// Degrees turned per frame while an arrow key is held.
const TURN_SPEED: f32 = 0.1;

/// Position and orientation of the first-person viewer.
///
/// Yaw and pitch are stored in degrees; `yaw = -90` looks down -Z. The front
/// vector is derived state, recomputed from the angles on every
/// [`update`](Self::update).
#[derive(Clone, Copy, Debug)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    /// Horizontal angle in degrees.
    pub yaw: f32,
    /// Vertical angle in degrees.
    pub pitch: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 0.5, 3.0),
            front: vec3(0.0, 0.0, -1.0),
            up: vec3(0.0, 1.0, 0.0),
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

impl FirstPersonCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one frame of held-key input: turn, re-derive the front vector,
    /// then translate.
    pub fn update(&mut self, input: &Input) {
        if input.key_down(KeyCode::ArrowUp) {
            self.pitch += TURN_SPEED;
        }
        if input.key_down(KeyCode::ArrowDown) {
            self.pitch -= TURN_SPEED;
        }
        if input.key_down(KeyCode::ArrowLeft) {
            self.yaw -= TURN_SPEED;
        }
        if input.key_down(KeyCode::ArrowRight) {
            self.yaw += TURN_SPEED;
        }

        self.front = Self::front_from_angles(self.yaw, self.pitch);

        if input.key_down(KeyCode::KeyW) {
            self.position = add(self.position, scale(MOVE_SPEED, self.front));
        }
        if input.key_down(KeyCode::KeyS) {
            self.position = subtract(self.position, scale(MOVE_SPEED, self.front));
        }
        if input.key_down(KeyCode::KeyA) {
            let right = normalize(cross(self.front, self.up));
            self.position = subtract(self.position, scale(MOVE_SPEED, right));
        }
        if input.key_down(KeyCode::KeyD) {
            let right = normalize(cross(self.front, self.up));
            self.position = add(self.position, scale(MOVE_SPEED, right));
        }
    }

    /// Unit look direction for the given yaw/pitch in degrees.
    fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
        let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
        normalize(vec3(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        ))
    }

    /// View matrix looking from the current position along the front vector.
    pub fn view(&self) -> Mat4 {
        look_at(self.position, add(self.position, self.front), self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::dot;

    fn assert_near(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn default_pose_looks_down_negative_z() {
        let mut camera = FirstPersonCamera::new();
        camera.update(&Input::new());
        assert_near(camera.front, vec3(0.0, 0.0, -1.0));
        assert_near(camera.position, vec3(0.0, 0.5, 3.0));
    }

    #[test]
    fn front_is_unit_length_for_any_angles() {
        for (yaw, pitch) in [(-90.0, 0.0), (13.0, 42.0), (200.0, -75.0)] {
            let front = FirstPersonCamera::front_from_angles(yaw, pitch);
            assert!((dot(front, front).sqrt() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn pitch_tilts_the_front_vector() {
        let level = FirstPersonCamera::front_from_angles(-90.0, 0.0);
        let raised = FirstPersonCamera::front_from_angles(-90.0, 30.0);
        assert!(raised[1] > level[1]);
        assert!((raised[1] - 0.5).abs() < 1e-5, "sin(30 deg) = 0.5");
    }

    #[test]
    fn walking_forward_moves_along_front() {
        let mut camera = FirstPersonCamera::new();
        let mut input = Input::new();
        input.press(KeyCode::KeyW);

        camera.update(&input);

        assert_near(camera.position, vec3(0.0, 0.5, 2.9));
    }

    #[test]
    fn strafing_is_perpendicular_to_front() {
        let mut camera = FirstPersonCamera::new();
        let mut input = Input::new();
        input.press(KeyCode::KeyD);

        camera.update(&input);

        assert_near(camera.position, vec3(0.1, 0.5, 3.0));
    }

    #[test]
    fn arrow_keys_adjust_heading() {
        let mut camera = FirstPersonCamera::new();
        let mut input = Input::new();
        input.press(KeyCode::ArrowRight);
        input.press(KeyCode::ArrowUp);

        camera.update(&input);

        assert!((camera.yaw - -89.9).abs() < 1e-5);
        assert!((camera.pitch - 0.1).abs() < 1e-5);
    }
}
