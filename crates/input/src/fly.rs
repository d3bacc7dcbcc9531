//! Six-degree-of-freedom fly controls driven by keys and the pointer.

use crate::action::{Action, PointerButton};
use glam::{Quat, Vec3};
use wormhole_common::CameraPose;
use wormhole_kernel::{CameraControls, ControlsConfig};

/// Speed factor while [`Action::Slow`] is held.
const SLOW_MULTIPLIER: f32 = 0.1;

/// Per-axis input amounts, each in `[-1, 1]` for pointer axes and `{0, 1}` for keys.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct MoveState {
    up: f32,
    down: f32,
    left: f32,
    right: f32,
    forward: f32,
    back: f32,
    pitch_up: f32,
    pitch_down: f32,
    yaw_left: f32,
    yaw_right: f32,
    roll_left: f32,
    roll_right: f32,
}

/// Keyboard and pointer fly controls.
///
/// Movement is in the camera's local frame. In free-look mode the pointer's
/// offset from the viewport centre steers continuously and the primary and
/// secondary buttons fly forward and back. In drag-to-look mode the pointer
/// steers only while a button is held.
#[derive(Debug, Clone)]
pub struct FlyControls {
    pub movement_speed: f32,
    pub roll_speed: f32,
    drag_to_look: bool,
    speed_multiplier: f32,
    buttons_down: u32,
    state: MoveState,
}

impl FlyControls {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            movement_speed: config.keyboard_movement_speed,
            roll_speed: config.roll_speed,
            drag_to_look: config.drag_to_look,
            speed_multiplier: 1.0,
            buttons_down: 0,
            state: MoveState::default(),
        }
    }

    pub fn drag_to_look(&self) -> bool {
        self.drag_to_look
    }

    /// Switch look mode. Entering drag-to-look drops any pointer steering.
    pub fn toggle_drag_to_look(&mut self) {
        if !self.drag_to_look {
            self.state.yaw_left = 0.0;
            self.state.pitch_down = 0.0;
        }
        self.drag_to_look = !self.drag_to_look;
        tracing::debug!(drag_to_look = self.drag_to_look, "look mode changed");
    }

    /// Press or release a bound action.
    pub fn set_action(&mut self, action: Action, pressed: bool) {
        let amount = if pressed { 1.0 } else { 0.0 };
        let s = &mut self.state;
        match action {
            Action::MoveForward => s.forward = amount,
            Action::MoveBack => s.back = amount,
            Action::MoveLeft => s.left = amount,
            Action::MoveRight => s.right = amount,
            Action::MoveUp => s.up = amount,
            Action::MoveDown => s.down = amount,
            Action::PitchUp => s.pitch_up = amount,
            Action::PitchDown => s.pitch_down = amount,
            Action::YawLeft => s.yaw_left = amount,
            Action::YawRight => s.yaw_right = amount,
            Action::RollLeft => s.roll_left = amount,
            Action::RollRight => s.roll_right = amount,
            Action::Slow => {
                self.speed_multiplier = if pressed { SLOW_MULTIPLIER } else { 1.0 };
            }
            Action::ToggleLook => {}
        }
    }

    /// Pointer position in pixels within a `width` x `height` viewport.
    pub fn pointer_moved(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.drag_to_look && self.buttons_down == 0 {
            return;
        }
        let half_w = (width / 2.0).max(1.0);
        let half_h = (height / 2.0).max(1.0);
        self.state.yaw_left = -((x - half_w) / half_w);
        self.state.pitch_down = (y - half_h) / half_h;
    }

    pub fn pointer_button(&mut self, button: PointerButton, pressed: bool) {
        if self.drag_to_look {
            if pressed {
                self.buttons_down += 1;
            } else {
                self.buttons_down = self.buttons_down.saturating_sub(1);
                self.state.yaw_left = 0.0;
                self.state.pitch_down = 0.0;
            }
            return;
        }
        let amount = if pressed { 1.0 } else { 0.0 };
        match button {
            PointerButton::Primary => self.state.forward = amount,
            PointerButton::Secondary => self.state.back = amount,
            PointerButton::Other => {}
        }
    }

    /// Pointer left the window: stop steering.
    pub fn pointer_left(&mut self) {
        self.state.yaw_left = 0.0;
        self.state.pitch_down = 0.0;
    }

    fn move_vector(&self) -> Vec3 {
        let s = &self.state;
        Vec3::new(-s.left + s.right, -s.down + s.up, -s.forward + s.back)
    }

    fn rotation_vector(&self) -> Vec3 {
        let s = &self.state;
        Vec3::new(
            -s.pitch_down + s.pitch_up,
            -s.yaw_right + s.yaw_left,
            -s.roll_right + s.roll_left,
        )
    }
}

impl CameraControls for FlyControls {
    fn update(&mut self, pose: &mut CameraPose, dt: f32) {
        let move_mult = dt * self.movement_speed * self.speed_multiplier;
        let rot_mult = dt * self.roll_speed;

        pose.translate_local(self.move_vector() * move_mult);

        let r = self.rotation_vector() * rot_mult;
        let step = Quat::from_xyzw(r.x, r.y, r.z, 1.0).normalize();
        pose.orientation = (pose.orientation * step).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn controls() -> FlyControls {
        FlyControls::new(&ControlsConfig::default())
    }

    #[test]
    fn forward_key_moves_along_view() {
        let mut fly = controls();
        let mut pose = CameraPose::default();
        fly.set_action(Action::MoveForward, true);
        fly.update(&mut pose, 0.5);
        assert!((pose.position - Vec3::new(0.0, 0.0, -0.5)).length() < EPS);

        fly.set_action(Action::MoveForward, false);
        fly.update(&mut pose, 0.5);
        assert!((pose.position - Vec3::new(0.0, 0.0, -0.5)).length() < EPS);
    }

    #[test]
    fn slow_scales_movement() {
        let mut fly = controls();
        let mut pose = CameraPose::default();
        fly.set_action(Action::Slow, true);
        fly.set_action(Action::MoveRight, true);
        fly.update(&mut pose, 1.0);
        assert!((pose.position.x - 0.1).abs() < EPS);
        fly.set_action(Action::Slow, false);
        fly.update(&mut pose, 1.0);
        assert!((pose.position.x - 1.1).abs() < EPS);
    }

    #[test]
    fn yaw_left_turns_view_left() {
        let mut fly = controls();
        let mut pose = CameraPose::default();
        fly.set_action(Action::YawLeft, true);
        fly.update(&mut pose, 0.1);
        let fwd = pose.forward();
        assert!(fwd.x < 0.0, "expected a left turn, got {fwd}");
        assert!((pose.orientation.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn roll_keeps_view_direction() {
        let mut fly = controls();
        let mut pose = CameraPose::default();
        fly.set_action(Action::RollLeft, true);
        fly.update(&mut pose, 0.2);
        assert!((pose.forward() - Vec3::NEG_Z).length() < EPS);
        assert!((pose.orientation * Vec3::Y - Vec3::Y).length() > 1e-3);
    }

    #[test]
    fn pointer_offset_steers_in_free_look() {
        let mut fly = controls();
        fly.pointer_moved(0.0, 50.0, 100.0, 100.0);
        let mut pose = CameraPose::default();
        fly.update(&mut pose, 0.1);
        assert!(pose.forward().x < 0.0);

        fly.pointer_moved(50.0, 50.0, 100.0, 100.0);
        let before = pose;
        fly.update(&mut pose, 0.1);
        assert!((pose.orientation.dot(before.orientation).abs() - 1.0).abs() < EPS);
    }

    #[test]
    fn pointer_buttons_fly_in_free_look() {
        let mut fly = controls();
        let mut pose = CameraPose::default();
        fly.pointer_button(PointerButton::Secondary, true);
        fly.update(&mut pose, 1.0);
        assert!((pose.position.z - 1.0).abs() < EPS);
    }

    #[test]
    fn entering_drag_to_look_clears_steering() {
        let mut fly = controls();
        fly.pointer_moved(0.0, 0.0, 100.0, 100.0);
        fly.toggle_drag_to_look();
        assert!(fly.drag_to_look());

        let mut pose = CameraPose::default();
        fly.update(&mut pose, 1.0);
        assert_eq!(pose.orientation, Quat::IDENTITY);

        // Without a button held the pointer is ignored.
        fly.pointer_moved(0.0, 0.0, 100.0, 100.0);
        fly.update(&mut pose, 1.0);
        assert_eq!(pose.orientation, Quat::IDENTITY);
    }

    #[test]
    fn drag_to_look_steers_only_while_held() {
        let mut fly = controls();
        fly.toggle_drag_to_look();
        fly.pointer_button(PointerButton::Primary, true);
        fly.pointer_moved(100.0, 50.0, 100.0, 100.0);
        let mut pose = CameraPose::default();
        fly.update(&mut pose, 0.1);
        assert!(pose.forward().x > 0.0);
        // In drag mode the button does not fly.
        assert_eq!(pose.position, Vec3::ZERO);

        fly.pointer_button(PointerButton::Primary, false);
        let before = pose;
        fly.update(&mut pose, 0.1);
        assert_eq!(pose.position, before.position);
        assert!((pose.orientation.dot(before.orientation).abs() - 1.0).abs() < EPS);
    }

    #[test]
    fn toggling_twice_returns_to_free_look() {
        let mut fly = controls();
        fly.toggle_drag_to_look();
        fly.toggle_drag_to_look();
        assert!(!fly.drag_to_look());
    }
}
