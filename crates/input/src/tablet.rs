//! Tablet controls: look around by turning the device, fly by touching the screen.

use glam::{EulerRot, Quat, Vec3};
use std::collections::BTreeSet;
use std::f32::consts::FRAC_PI_2;
use wormhole_common::CameraPose;
use wormhole_kernel::{CameraControls, ControlsConfig};

/// One device-orientation sample, angles in degrees.
///
/// `alpha` is the compass heading and is absent on devices without an
/// orientation sensor; `screen_angle` is the screen's rotation from portrait.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceOrientation {
    pub alpha: Option<f32>,
    pub beta: Option<f32>,
    pub gamma: Option<f32>,
    pub screen_angle: f32,
}

impl DeviceOrientation {
    pub fn new(alpha: f32, beta: f32, gamma: f32) -> Self {
        Self {
            alpha: Some(alpha),
            beta: Some(beta),
            gamma: Some(gamma),
            screen_angle: 0.0,
        }
    }
}

/// Camera-space orientation for a device held with the given angles.
///
/// A device held upright in portrait (beta = 90°) looks straight down -Z.
pub fn device_quaternion(sample: &DeviceOrientation) -> Option<Quat> {
    let alpha = sample.alpha?.to_radians();
    let beta = sample.beta.unwrap_or(0.0).to_radians();
    let gamma = sample.gamma.unwrap_or(0.0).to_radians();
    let screen = sample.screen_angle.to_radians();

    let device = Quat::from_euler(EulerRot::YXZ, alpha, beta, -gamma);
    // The camera looks out of the back of the device, not out of the top.
    let back_camera = Quat::from_rotation_x(-FRAC_PI_2);
    let screen_turn = Quat::from_rotation_z(-screen);
    Some((device * back_camera * screen_turn).normalize())
}

/// Device-orientation and touch controls.
///
/// Orientation changes are applied as frame-to-frame deltas in the camera's
/// own frame, so the wormhole's half turn composes with whatever the device
/// is doing. One touch flies forward, two or more fly backward.
///
/// Touches are tracked by id in every state, so fingers already down when the
/// controls connect are still counted when they lift.
#[derive(Debug, Clone)]
pub struct TabletControls {
    pub movement_speed: f32,
    connected: bool,
    latest: Option<Quat>,
    applied: Option<Quat>,
    touches: BTreeSet<u64>,
}

impl TabletControls {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            movement_speed: config.tablet_movement_speed,
            connected: false,
            latest: None,
            applied: None,
            touches: BTreeSet::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn connect(&mut self) {
        if !self.connected {
            tracing::info!("tablet controls connected");
        }
        self.connected = true;
        self.latest = None;
        self.applied = None;
    }

    pub fn disconnect(&mut self) {
        if self.connected {
            tracing::info!("tablet controls disconnected");
        }
        self.connected = false;
        self.latest = None;
        self.applied = None;
    }

    /// Record an orientation sample. Ignored while disconnected.
    pub fn orientation_changed(&mut self, sample: &DeviceOrientation) {
        if !self.connected {
            return;
        }
        if let Some(q) = device_quaternion(sample) {
            self.latest = Some(q);
        }
    }

    pub fn touch_started(&mut self, id: u64) {
        self.touches.insert(id);
    }

    /// A touch lifted or was cancelled. Unknown ids are ignored.
    pub fn touch_ended(&mut self, id: u64) {
        self.touches.remove(&id);
    }

    /// Fingers currently on the screen, connected or not.
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }
}

impl CameraControls for TabletControls {
    fn update(&mut self, pose: &mut CameraPose, dt: f32) {
        if !self.connected {
            return;
        }

        if let Some(latest) = self.latest {
            if let Some(applied) = self.applied {
                let delta = applied.inverse() * latest;
                pose.orientation = (pose.orientation * delta).normalize();
            }
            self.applied = Some(latest);
        }

        let direction = match self.touches.len() {
            0 => return,
            1 => Vec3::NEG_Z,
            _ => Vec3::Z,
        };
        pose.translate_local(direction * self.movement_speed * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn connected() -> TabletControls {
        let mut tablet = TabletControls::new(&ControlsConfig::default());
        tablet.connect();
        tablet
    }

    #[test]
    fn upright_device_looks_ahead() {
        let q = device_quaternion(&DeviceOrientation::new(0.0, 90.0, 0.0)).unwrap();
        assert!((q * Vec3::NEG_Z - Vec3::NEG_Z).length() < EPS);
        assert!((q * Vec3::Y - Vec3::Y).length() < EPS);
    }

    #[test]
    fn missing_heading_gives_no_orientation() {
        let sample = DeviceOrientation {
            alpha: None,
            ..DeviceOrientation::new(0.0, 90.0, 0.0)
        };
        assert!(device_quaternion(&sample).is_none());
    }

    #[test]
    fn disconnected_controls_do_nothing() {
        let mut tablet = TabletControls::new(&ControlsConfig::default());
        tablet.orientation_changed(&DeviceOrientation::new(0.0, 90.0, 0.0));
        tablet.touch_started(0);
        let mut pose = CameraPose::default();
        tablet.update(&mut pose, 1.0);
        assert_eq!(pose, CameraPose::default());
        assert_eq!(tablet.active_touches(), 1);
    }

    #[test]
    fn first_sample_sets_reference_without_turning() {
        let mut tablet = connected();
        tablet.orientation_changed(&DeviceOrientation::new(40.0, 60.0, 10.0));
        let mut pose = CameraPose::default();
        tablet.update(&mut pose, 0.016);
        assert_eq!(pose.orientation, Quat::IDENTITY);
    }

    #[test]
    fn turning_device_turns_camera() {
        let mut tablet = connected();
        let mut pose = CameraPose::default();
        tablet.orientation_changed(&DeviceOrientation::new(0.0, 90.0, 0.0));
        tablet.update(&mut pose, 0.016);
        tablet.orientation_changed(&DeviceOrientation::new(90.0, 90.0, 0.0));
        tablet.update(&mut pose, 0.016);
        assert!((pose.forward() - Vec3::NEG_X).length() < EPS);
    }

    #[test]
    fn rotation_composes_with_prior_turn() {
        let mut tablet = connected();
        let half_turn = Quat::from_rotation_z(std::f32::consts::PI);
        let mut pose = CameraPose {
            position: Vec3::ZERO,
            orientation: half_turn,
        };
        tablet.orientation_changed(&DeviceOrientation::new(0.0, 90.0, 0.0));
        tablet.update(&mut pose, 0.016);
        tablet.orientation_changed(&DeviceOrientation::new(90.0, 90.0, 0.0));
        tablet.update(&mut pose, 0.016);
        // Upside down, turning the device left turns the view to world +X.
        assert!((pose.forward() - Vec3::X).length() < EPS);
    }

    #[test]
    fn touches_fly_forward_and_back() {
        let mut tablet = connected();
        let mut pose = CameraPose::default();
        tablet.touch_started(1);
        tablet.update(&mut pose, 1.0);
        assert!((pose.position.z + 1.3).abs() < EPS);

        tablet.touch_started(2);
        tablet.update(&mut pose, 1.0);
        assert!(pose.position.z.abs() < EPS);

        tablet.touch_ended(1);
        tablet.touch_ended(2);
        tablet.touch_ended(2);
        assert_eq!(tablet.active_touches(), 0);
    }

    #[test]
    fn finger_down_before_connect_does_not_cancel_a_later_one() {
        let mut tablet = TabletControls::new(&ControlsConfig::default());
        tablet.touch_started(7);
        tablet.connect();
        tablet.touch_started(8);
        tablet.touch_ended(7);
        assert_eq!(tablet.active_touches(), 1);

        let mut pose = CameraPose::default();
        tablet.update(&mut pose, 1.0);
        assert!((pose.position.z + 1.3).abs() < EPS);
    }

    #[test]
    fn repeated_start_for_one_finger_counts_once() {
        let mut tablet = connected();
        tablet.touch_started(3);
        tablet.touch_started(3);
        assert_eq!(tablet.active_touches(), 1);
    }

    #[test]
    fn disconnect_stops_flight_but_keeps_fingers() {
        let mut tablet = connected();
        tablet.touch_started(1);
        tablet.disconnect();
        assert!(!tablet.is_connected());
        assert_eq!(tablet.active_touches(), 1);

        let mut pose = CameraPose::default();
        tablet.update(&mut pose, 1.0);
        assert_eq!(pose, CameraPose::default());
    }
}
