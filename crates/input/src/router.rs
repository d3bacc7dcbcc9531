use crate::action::{Action, PointerButton};
use crate::fly::FlyControls;
use crate::tablet::{DeviceOrientation, TabletControls};
use wormhole_kernel::{CameraControls, ControlsConfig};

/// Owns both control schemes and decides which one is live.
///
/// Keyboard controls always run. Tablet controls stay disconnected until an
/// orientation sample with a heading arrives; that first sample connects them
/// and disarms the probe for good. Any keypress disconnects them again.
#[derive(Debug, Clone)]
pub struct InputRouter {
    keyboard: FlyControls,
    tablet: TabletControls,
    probe_armed: bool,
}

impl InputRouter {
    pub fn new(config: &ControlsConfig) -> Self {
        Self {
            keyboard: FlyControls::new(config),
            tablet: TabletControls::new(config),
            probe_armed: true,
        }
    }

    pub fn keyboard(&self) -> &FlyControls {
        &self.keyboard
    }

    pub fn tablet(&self) -> &TabletControls {
        &self.tablet
    }

    /// Whether the UI should show tablet hints.
    pub fn tablet_mode(&self) -> bool {
        self.tablet.is_connected()
    }

    /// A key went down or up. `action` is its binding, if any.
    pub fn key(&mut self, action: Option<Action>, pressed: bool) {
        if let Some(action) = action.filter(|a| a.is_held()) {
            self.keyboard.set_action(action, pressed);
        }
        if pressed {
            self.keypress(action == Some(Action::ToggleLook));
        }
    }

    /// A character key was typed.
    fn keypress(&mut self, toggle_look: bool) {
        if toggle_look {
            self.keyboard.toggle_drag_to_look();
        }
        // A keyboard in use means this is not a tablet.
        self.tablet.disconnect();
    }

    pub fn orientation(&mut self, sample: &DeviceOrientation) {
        if self.probe_armed && sample.alpha.is_some() {
            self.probe_armed = false;
            self.tablet.connect();
            tracing::info!("orientation sensor detected, switching to tablet controls");
        }
        self.tablet.orientation_changed(sample);
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.keyboard.pointer_moved(x, y, width, height);
    }

    pub fn pointer_button(&mut self, button: PointerButton, pressed: bool) {
        self.keyboard.pointer_button(button, pressed);
    }

    pub fn pointer_left(&mut self) {
        self.keyboard.pointer_left();
    }

    /// A touch with the given id went down (`started`) or lifted.
    pub fn touch(&mut self, id: u64, started: bool) {
        if started {
            self.tablet.touch_started(id);
        } else {
            self.tablet.touch_ended(id);
        }
    }

    /// Both control schemes, in update order, for [`wormhole_kernel::Simulation::advance`].
    pub fn controls(&mut self) -> [&mut dyn CameraControls; 2] {
        [&mut self.keyboard, &mut self.tablet]
    }
}
