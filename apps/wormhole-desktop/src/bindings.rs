use winit::keyboard::KeyCode;
use wormhole_input::Action;

/// Viewer commands that are not camera controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleOverlay,
    /// Select the n-th resolution preset, zero based.
    Resolution(usize),
    Reset,
    Quit,
}

/// Camera control bound to a key, if any.
pub fn action_for(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::KeyW => Action::MoveForward,
        KeyCode::KeyS => Action::MoveBack,
        KeyCode::KeyA => Action::MoveLeft,
        KeyCode::KeyD => Action::MoveRight,
        KeyCode::KeyR => Action::MoveUp,
        KeyCode::KeyF => Action::MoveDown,
        KeyCode::ArrowUp => Action::PitchUp,
        KeyCode::ArrowDown => Action::PitchDown,
        KeyCode::ArrowLeft => Action::YawLeft,
        KeyCode::ArrowRight => Action::YawRight,
        KeyCode::KeyQ => Action::RollLeft,
        KeyCode::KeyE => Action::RollRight,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Action::Slow,
        KeyCode::Space => Action::ToggleLook,
        _ => return None,
    };
    Some(action)
}

/// Viewer command bound to a key, if any.
pub fn command_for(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::F1 => Command::ToggleOverlay,
        KeyCode::Digit1 => Command::Resolution(0),
        KeyCode::Digit2 => Command::Resolution(1),
        KeyCode::Digit3 => Command::Resolution(2),
        KeyCode::Digit4 => Command::Resolution(3),
        KeyCode::Backspace => Command::Reset,
        KeyCode::Escape if cfg!(not(target_arch = "wasm32")) => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Key help shown in the overlay.
pub const KEYBOARD_HINTS: &[(&str, &str)] = &[
    ("W / S", "forward / back"),
    ("A / D", "left / right"),
    ("R / F", "up / down"),
    ("Q / E", "roll"),
    ("Arrows", "pitch and yaw"),
    ("Shift", "slow"),
    ("Space", "toggle drag-to-look"),
    ("Mouse", "steer, buttons fly"),
    ("1-4", "resolution"),
    ("Backspace", "back to start"),
    ("F1", "hide this panel"),
];

pub const TABLET_HINTS: &[(&str, &str)] = &[
    ("Turn device", "look around"),
    ("One finger", "fly forward"),
    ("Two fingers", "fly back"),
];
